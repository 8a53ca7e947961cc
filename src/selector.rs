use rand::Rng;
use rand::seq::SliceRandom;

use crate::bank::QuestionBank;
use crate::config::Config;
use crate::question::Question;

/// Length of a theme-scoped quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeLength {
    /// The configured short quiz length.
    Short,
    /// Every question of the theme.
    Full,
}

/// What the user asked to be quizzed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizRequest {
    WholeBank { length: usize },
    Theme { index: usize, length: ThemeLength },
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("no theme at index {index} ({available} available)")]
    UnknownTheme { index: usize, available: usize },
}

/// Draws a random quiz of at most `length` questions from `source`.
///
/// The whole source is shuffled before truncating, so every ordering of every
/// subset is equally likely. A `length` larger than the source returns all
/// of it.
pub fn draw<R: Rng + ?Sized>(rng: &mut R, source: &[Question], length: usize) -> Vec<Question> {
    let mut drawn = source.to_vec();
    drawn.shuffle(rng);
    drawn.truncate(length);
    drawn
}

/// Resolves `request` against the bank and draws the quiz questions.
///
/// # Errors
/// Returns [`SelectError::UnknownTheme`] if a theme request names an index
/// past the bank's theme list.
pub fn select<R: Rng + ?Sized>(
    rng: &mut R,
    bank: &QuestionBank,
    request: QuizRequest,
    config: &Config,
) -> Result<Vec<Question>, SelectError> {
    let drawn = match request {
        QuizRequest::WholeBank { length } => draw(rng, bank.questions(), length),
        QuizRequest::Theme { index, length } => {
            let source = bank
                .theme_questions(index)
                .ok_or(SelectError::UnknownTheme {
                    index,
                    available: bank.themes().len(),
                })?;
            let length = match length {
                ThemeLength::Short => config.short_quiz_length,
                ThemeLength::Full => source.len(),
            };
            draw(rng, &source, length)
        }
    };

    log::debug!("drew {} questions for {:?}", drawn.len(), request);

    Ok(drawn)
}

//! Quiz session state machines.
//!
//! A session owns the drawn questions for one quiz and records the first
//! answer given to each of them. [`DesktopSession`] walks the questions one at
//! a time; [`MobileSession`] accepts answers in any order and scores on
//! finish. Both are driven through [`QuizInteraction`].

use std::collections::HashMap;

use crate::config::DisplayMode;
use crate::question::{AnswerOption, Question};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no questions available for the quiz")]
    NoQuestions,
}

/// How far a session has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Index of the question on screen; `None` when every question is shown at once.
    pub position: Option<usize>,
    pub answered: usize,
    pub total: usize,
}

/// Highlight for one answer button once its question has been answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMark {
    Neutral,
    Correct,
    Incorrect,
}

/// Operations shared by every session variant.
pub trait QuizInteraction {
    fn mode(&self) -> DisplayMode;

    fn questions(&self) -> &[Question];

    /// Records `option` for the question. Returns `false` when the answer was
    /// ignored because the question is already answered or not answerable now.
    fn submit_answer(&mut self, question_number: &str, option: AnswerOption) -> bool;

    fn answer_for(&self, question_number: &str) -> Option<AnswerOption>;

    fn progress(&self) -> Progress;

    /// Moves past the current question. Yields the final score when this
    /// completes the session.
    fn advance(&mut self) -> Option<usize>;

    /// Completes the session and yields the final score, at most once.
    fn finalize(&mut self) -> Option<usize>;

    fn answer_marks(&self, question: &Question) -> [AnswerMark; 4] {
        let chosen = self.answer_for(&question.question_number);

        AnswerOption::ALL.map(|option| match chosen {
            None => AnswerMark::Neutral,
            Some(_) if question.is_correct(option) => AnswerMark::Correct,
            Some(selected) if selected == option => AnswerMark::Incorrect,
            Some(_) => AnswerMark::Neutral,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopState {
    AwaitingAnswer { index: usize },
    Answered { index: usize, chosen: AnswerOption },
    Finished { score: usize },
}

/// One question at a time: answer, then advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopSession {
    questions: Vec<Question>,
    answers: HashMap<String, AnswerOption>,
    state: DesktopState,
    score: usize,
}

impl DesktopSession {
    /// # Errors
    /// Returns [`SessionError::NoQuestions`] if `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }

        Ok(Self {
            questions,
            answers: HashMap::new(),
            state: DesktopState::AwaitingAnswer { index: 0 },
            score: 0,
        })
    }

    pub fn state(&self) -> DesktopState {
        self.state
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn current_index(&self) -> usize {
        match self.state {
            DesktopState::AwaitingAnswer { index } | DesktopState::Answered { index, .. } => index,
            DesktopState::Finished { .. } => self.questions.len() - 1,
        }
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index()]
    }

    /// Option chosen for the question on screen, cleared on advance.
    pub fn selected(&self) -> Option<AnswerOption> {
        match self.state {
            DesktopState::Answered { chosen, .. } => Some(chosen),
            _ => None,
        }
    }

    pub fn is_last(&self) -> bool {
        self.current_index() + 1 == self.questions.len()
    }

    /// Answers the question on screen. No-op unless awaiting an answer.
    pub fn select_answer(&mut self, option: AnswerOption) -> bool {
        let DesktopState::AwaitingAnswer { index } = self.state else {
            return false;
        };

        let question = &self.questions[index];
        if question.is_correct(option) {
            self.score += 1;
        }
        self.answers.insert(question.question_number.clone(), option);
        self.state = DesktopState::Answered {
            index,
            chosen: option,
        };

        true
    }

    fn complete(&mut self) -> usize {
        self.state = DesktopState::Finished { score: self.score };
        log::info!(
            "desktop quiz finished: {} / {}",
            self.score,
            self.questions.len()
        );
        self.score
    }
}

impl QuizInteraction for DesktopSession {
    fn mode(&self) -> DisplayMode {
        DisplayMode::Desktop
    }

    fn questions(&self) -> &[Question] {
        &self.questions
    }

    fn submit_answer(&mut self, question_number: &str, option: AnswerOption) -> bool {
        if self.current_question().question_number != question_number {
            return false;
        }
        self.select_answer(option)
    }

    fn answer_for(&self, question_number: &str) -> Option<AnswerOption> {
        self.answers.get(question_number).copied()
    }

    fn progress(&self) -> Progress {
        Progress {
            position: Some(self.current_index()),
            answered: self.answers.len(),
            total: self.questions.len(),
        }
    }

    fn advance(&mut self) -> Option<usize> {
        let DesktopState::Answered { index, .. } = self.state else {
            return None;
        };

        if index + 1 == self.questions.len() {
            return Some(self.complete());
        }

        self.state = DesktopState::AwaitingAnswer { index: index + 1 };
        None
    }

    /// Only the last question, once answered, can finish the session.
    fn finalize(&mut self) -> Option<usize> {
        match self.state {
            DesktopState::Answered { .. } if self.is_last() => Some(self.complete()),
            _ => None,
        }
    }
}

/// All questions at once, answered in any order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileSession {
    questions: Vec<Question>,
    answers: HashMap<String, AnswerOption>,
    finished: bool,
}

impl MobileSession {
    /// # Errors
    /// Returns [`SessionError::NoQuestions`] if `questions` is empty.
    pub fn new(questions: Vec<Question>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }

        Ok(Self {
            questions,
            answers: HashMap::new(),
            finished: false,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// First answer per question is permanent; unknown numbers are ignored.
    pub fn select_answer(&mut self, question_number: &str, option: AnswerOption) -> bool {
        if self.finished || self.answers.contains_key(question_number) {
            return false;
        }
        if !self
            .questions
            .iter()
            .any(|question| question.question_number == question_number)
        {
            return false;
        }

        self.answers.insert(question_number.to_string(), option);
        true
    }

    /// Correct answers over the drawn questions; unanswered ones count as wrong.
    pub fn score(&self) -> usize {
        self.questions
            .iter()
            .filter(|question| {
                self.answers
                    .get(&question.question_number)
                    .is_some_and(|chosen| question.is_correct(*chosen))
            })
            .count()
    }

    pub fn finish(&mut self) -> Option<usize> {
        if self.finished {
            return None;
        }

        self.finished = true;
        let score = self.score();
        log::info!(
            "mobile quiz finished: {} / {} ({} answered)",
            score,
            self.questions.len(),
            self.answers.len()
        );
        Some(score)
    }
}

impl QuizInteraction for MobileSession {
    fn mode(&self) -> DisplayMode {
        DisplayMode::Mobile
    }

    fn questions(&self) -> &[Question] {
        &self.questions
    }

    fn submit_answer(&mut self, question_number: &str, option: AnswerOption) -> bool {
        self.select_answer(question_number, option)
    }

    fn answer_for(&self, question_number: &str) -> Option<AnswerOption> {
        self.answers.get(question_number).copied()
    }

    fn progress(&self) -> Progress {
        Progress {
            position: None,
            answered: self.answers.len(),
            total: self.questions.len(),
        }
    }

    fn advance(&mut self) -> Option<usize> {
        None
    }

    fn finalize(&mut self) -> Option<usize> {
        self.finish()
    }
}

/// A running quiz in whichever variant the display mode selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Desktop(DesktopSession),
    Mobile(MobileSession),
}

impl Session {
    /// Opens the session kind matching `mode`.
    ///
    /// # Errors
    /// Returns [`SessionError::NoQuestions`] if `questions` is empty.
    pub fn start(questions: Vec<Question>, mode: DisplayMode) -> Result<Self, SessionError> {
        match mode {
            DisplayMode::Desktop => DesktopSession::new(questions).map(Session::Desktop),
            DisplayMode::Mobile => MobileSession::new(questions).map(Session::Mobile),
        }
    }

    fn interaction(&self) -> &dyn QuizInteraction {
        match self {
            Session::Desktop(session) => session,
            Session::Mobile(session) => session,
        }
    }

    fn interaction_mut(&mut self) -> &mut dyn QuizInteraction {
        match self {
            Session::Desktop(session) => session,
            Session::Mobile(session) => session,
        }
    }
}

impl QuizInteraction for Session {
    fn mode(&self) -> DisplayMode {
        self.interaction().mode()
    }

    fn questions(&self) -> &[Question] {
        self.interaction().questions()
    }

    fn submit_answer(&mut self, question_number: &str, option: AnswerOption) -> bool {
        self.interaction_mut().submit_answer(question_number, option)
    }

    fn answer_for(&self, question_number: &str) -> Option<AnswerOption> {
        self.interaction().answer_for(question_number)
    }

    fn progress(&self) -> Progress {
        self.interaction().progress()
    }

    fn advance(&mut self) -> Option<usize> {
        self.interaction_mut().advance()
    }

    fn finalize(&mut self) -> Option<usize> {
        self.interaction_mut().finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AnswerOption::{A, B, C, D};

    fn keyed(keys: &[AnswerOption]) -> Vec<Question> {
        keys.iter()
            .enumerate()
            .map(|(index, key)| Question {
                question_number: (index + 1).to_string(),
                question: format!("Question {}", index + 1),
                answer_a: "a".to_string(),
                answer_b: "b".to_string(),
                answer_c: "c".to_string(),
                answer_d: "d".to_string(),
                correct_answer: *key,
                question_image: None,
            })
            .collect()
    }

    #[test]
    fn desktop_scores_each_correct_answer_once() {
        let mut session = DesktopSession::new(keyed(&[A, B, C])).expect("questions present");
        let mut emitted = None;

        for choice in [A, C, C] {
            assert!(session.select_answer(choice));
            emitted = session.advance();
        }

        assert_eq!(emitted, Some(2));
        assert_eq!(session.state(), DesktopState::Finished { score: 2 });
    }

    #[test]
    fn desktop_second_answer_is_ignored() {
        let mut session = DesktopSession::new(keyed(&[A, B])).expect("questions present");

        assert!(session.select_answer(A));
        assert!(!session.select_answer(A));
        assert!(!session.select_answer(B));

        assert_eq!(session.score(), 1);
        assert_eq!(session.selected(), Some(A));
    }

    #[test]
    fn desktop_advance_requires_an_answer() {
        let mut session = DesktopSession::new(keyed(&[A, B])).expect("questions present");

        assert_eq!(session.advance(), None);
        assert_eq!(session.state(), DesktopState::AwaitingAnswer { index: 0 });
    }

    #[test]
    fn desktop_advance_clears_selection_and_moves_forward() {
        let mut session = DesktopSession::new(keyed(&[A, B])).expect("questions present");

        session.select_answer(D);
        assert_eq!(session.advance(), None);

        assert_eq!(session.state(), DesktopState::AwaitingAnswer { index: 1 });
        assert_eq!(session.selected(), None);
        assert_eq!(session.current_question().question_number, "2");
        assert!(session.is_last());
    }

    #[test]
    fn desktop_emits_score_only_once() {
        let mut session = DesktopSession::new(keyed(&[B])).expect("questions present");

        session.select_answer(B);
        assert_eq!(session.advance(), Some(1));
        assert_eq!(session.advance(), None);
        assert_eq!(session.finalize(), None);
        assert!(!session.select_answer(B));
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn desktop_finalize_only_from_answered_last_question() {
        let mut session = DesktopSession::new(keyed(&[A, B])).expect("questions present");

        session.select_answer(A);
        assert_eq!(session.finalize(), None);
        session.advance();
        assert_eq!(session.finalize(), None);
        session.select_answer(B);

        assert_eq!(session.finalize(), Some(2));
    }

    #[test]
    fn desktop_rejects_answers_for_other_questions() {
        let mut session = DesktopSession::new(keyed(&[A, B])).expect("questions present");

        assert!(!session.submit_answer("2", B));
        assert!(session.submit_answer("1", A));
        assert_eq!(session.answer_for("1"), Some(A));
    }

    #[test]
    fn empty_questions_are_rejected() {
        assert_eq!(
            DesktopSession::new(Vec::new()).expect_err("no questions"),
            SessionError::NoQuestions
        );
        assert_eq!(
            MobileSession::new(Vec::new()).expect_err("no questions"),
            SessionError::NoQuestions
        );
    }

    #[test]
    fn mobile_counts_unanswered_as_wrong() {
        let mut session =
            MobileSession::new(keyed(&[A, B, C, D, A])).expect("questions present");

        assert!(session.select_answer("2", B));
        assert!(session.select_answer("5", A));

        assert_eq!(session.finish(), Some(2));
    }

    #[test]
    fn mobile_first_answer_is_permanent() {
        let mut session = MobileSession::new(keyed(&[A, B])).expect("questions present");

        assert!(session.select_answer("1", C));
        assert!(!session.select_answer("1", A));

        assert_eq!(session.answer_for("1"), Some(C));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn mobile_accepts_any_order_and_ignores_unknown_numbers() {
        let mut session = MobileSession::new(keyed(&[A, B, C])).expect("questions present");

        assert!(session.select_answer("3", C));
        assert!(session.select_answer("1", A));
        assert!(!session.select_answer("42", A));

        let progress = session.progress();
        assert_eq!(progress.answered, 2);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.position, None);
    }

    #[test]
    fn mobile_finish_emits_once_and_freezes_answers() {
        let mut session = MobileSession::new(keyed(&[A, B])).expect("questions present");
        session.select_answer("1", A);

        assert_eq!(session.finalize(), Some(1));
        assert_eq!(session.finalize(), None);
        assert!(!session.select_answer("2", B));
        assert_eq!(session.answer_for("2"), None);
    }

    #[test]
    fn answer_marks_highlight_correct_and_wrong_choice() {
        let mut session = MobileSession::new(keyed(&[B, C])).expect("questions present");
        session.select_answer("1", D);
        let questions = session.questions().to_vec();

        assert_eq!(
            session.answer_marks(&questions[0]),
            [
                AnswerMark::Neutral,
                AnswerMark::Correct,
                AnswerMark::Neutral,
                AnswerMark::Incorrect
            ]
        );
        assert_eq!(session.answer_marks(&questions[1]), [AnswerMark::Neutral; 4]);
    }

    #[test]
    fn session_start_follows_display_mode() {
        let desktop = Session::start(keyed(&[A]), DisplayMode::Desktop).expect("started");
        let mobile = Session::start(keyed(&[A]), DisplayMode::Mobile).expect("started");

        assert_eq!(desktop.mode(), DisplayMode::Desktop);
        assert_eq!(mobile.mode(), DisplayMode::Mobile);
        assert_eq!(desktop.progress().position, Some(0));
    }

    #[test]
    fn session_delegates_to_variant() {
        let mut session = Session::start(keyed(&[A, B]), DisplayMode::Desktop).expect("started");

        assert!(session.submit_answer("1", A));
        assert_eq!(session.advance(), None);
        assert!(session.submit_answer("2", A));
        assert_eq!(session.advance(), Some(1));
    }
}

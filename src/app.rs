use std::rc::Rc;

use rand::Rng;

use crate::bank::QuestionBank;
use crate::config::Config;
use crate::question::{AnswerOption, Question};
use crate::search::{filter, navigation_anchors};
use crate::selector::{QuizRequest, SelectError, ThemeLength, select};
use crate::session::{QuizInteraction, Session, SessionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Search,
    Quiz,
    Results,
}

/// Final result of a completed quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: usize,
    pub total: usize,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AppError {
    #[error(transparent)]
    Select(#[from] SelectError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// One entry of the start menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOption {
    /// Theme title, `None` for whole-bank quizzes.
    pub theme: Option<String>,
    pub request: QuizRequest,
    /// Questions the quiz will contain.
    pub question_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AppState {
    Search,
    Quiz(Session),
    Results(QuizOutcome),
}

/// Derived state handed to the rendering layer.
#[derive(Debug, PartialEq, Eq)]
pub enum AppView<'a> {
    Search {
        term: &'a str,
        results: &'a [Question],
        show_answers: bool,
        anchors: Vec<usize>,
        notice: Option<&'a AppError>,
    },
    Quiz(&'a Session),
    Results(QuizOutcome),
}

/// Coordinates search, quiz and results modes over one question bank.
#[derive(Debug, Clone)]
pub struct AppController {
    bank: Rc<QuestionBank>,
    config: Config,
    state: AppState,
    search_term: String,
    filtered: Vec<Question>,
    show_answers: bool,
    notice: Option<AppError>,
}

impl AppController {
    pub fn new(bank: Rc<QuestionBank>, config: Config) -> Self {
        let filtered = bank.questions().to_vec();

        Self {
            bank,
            config,
            state: AppState::Search,
            search_term: String::new(),
            filtered,
            show_answers: true,
            notice: None,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> AppMode {
        match self.state {
            AppState::Search => AppMode::Search,
            AppState::Quiz(_) => AppMode::Quiz,
            AppState::Results(_) => AppMode::Results,
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filtered(&self) -> &[Question] {
        &self.filtered
    }

    pub fn show_answers(&self) -> bool {
        self.show_answers
    }

    pub fn notice(&self) -> Option<&AppError> {
        self.notice.as_ref()
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            AppState::Quiz(session) => Some(session),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<QuizOutcome> {
        match self.state {
            AppState::Results(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn view(&self) -> AppView<'_> {
        match &self.state {
            AppState::Search => AppView::Search {
                term: &self.search_term,
                results: &self.filtered,
                show_answers: self.show_answers,
                anchors: navigation_anchors(self.bank.len(), self.config.navigation_step),
                notice: self.notice.as_ref(),
            },
            AppState::Quiz(session) => AppView::Quiz(session),
            AppState::Results(outcome) => AppView::Results(*outcome),
        }
    }

    /// Whole-bank quizzes at both fixed lengths, then each theme at its short
    /// and full length.
    pub fn start_options(&self) -> Vec<StartOption> {
        let total = self.bank.len();
        let mut options = vec![
            StartOption {
                theme: None,
                request: QuizRequest::WholeBank {
                    length: self.config.quiz_length,
                },
                question_count: self.config.quiz_length.min(total),
            },
            StartOption {
                theme: None,
                request: QuizRequest::WholeBank {
                    length: self.config.short_quiz_length,
                },
                question_count: self.config.short_quiz_length.min(total),
            },
        ];

        for (index, theme) in self.bank.themes().iter().enumerate() {
            options.push(StartOption {
                theme: Some(theme.title.clone()),
                request: QuizRequest::Theme {
                    index,
                    length: ThemeLength::Short,
                },
                question_count: self.config.short_quiz_length.min(theme.len()),
            });
            options.push(StartOption {
                theme: Some(theme.title.clone()),
                request: QuizRequest::Theme {
                    index,
                    length: ThemeLength::Full,
                },
                question_count: theme.len(),
            });
        }

        options
    }

    /// Updates the search filter. Typing always returns to search mode,
    /// abandoning any running quiz.
    pub fn on_search_term_change(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.filtered = filter(self.bank.questions(), term);
        self.notice = None;

        if self.mode() != AppMode::Search {
            log::debug!("search input while in {:?}, returning to search", self.mode());
            self.state = AppState::Search;
        }
    }

    /// Draws a quiz and enters quiz mode. Ignored outside search mode.
    ///
    /// A failed start leaves the controller in search mode with a notice.
    ///
    /// # Errors
    /// * Returns [`AppError::Select`] if the request names an unknown theme.
    /// * Returns [`AppError::Session`] if the draw comes back empty.
    pub fn on_start_quiz<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        request: QuizRequest,
    ) -> Result<(), AppError> {
        if self.mode() != AppMode::Search {
            return Ok(());
        }

        let started = select(rng, &self.bank, request, &self.config)
            .map_err(AppError::from)
            .and_then(|questions| {
                Session::start(questions, self.config.display_mode).map_err(AppError::from)
            });

        match started {
            Ok(session) => {
                log::debug!(
                    "quiz started: {} questions, {:?}",
                    session.questions().len(),
                    session.mode()
                );
                self.notice = None;
                self.state = AppState::Quiz(session);
                Ok(())
            }
            Err(error) => {
                log::warn!("quiz not started: {}", error);
                self.notice = Some(error.clone());
                Err(error)
            }
        }
    }

    pub fn on_answer_select(&mut self, question_number: &str, option: AnswerOption) -> bool {
        match &mut self.state {
            AppState::Quiz(session) => session.submit_answer(question_number, option),
            _ => false,
        }
    }

    pub fn on_advance(&mut self) {
        let score = match &mut self.state {
            AppState::Quiz(session) => session.advance(),
            _ => None,
        };

        if let Some(score) = score {
            self.show_results(score);
        }
    }

    pub fn on_finish(&mut self) {
        let score = match &mut self.state {
            AppState::Quiz(session) => session.finalize(),
            _ => None,
        };

        if let Some(score) = score {
            self.show_results(score);
        }
    }

    /// Leaves a running quiz without scoring it.
    pub fn on_back_to_search(&mut self) {
        if let AppState::Quiz(session) = &self.state {
            log::debug!(
                "quiz abandoned after {} answers",
                session.progress().answered
            );
            self.notice = None;
            self.state = AppState::Search;
        }
    }

    /// Clears the search and returns to search mode from the results screen.
    pub fn on_restart(&mut self) {
        if self.mode() != AppMode::Results {
            return;
        }

        self.search_term.clear();
        self.filtered = self.bank.questions().to_vec();
        self.notice = None;
        self.state = AppState::Search;
    }

    pub fn toggle_answers(&mut self) {
        self.show_answers = !self.show_answers;
    }

    fn show_results(&mut self, score: usize) {
        let total = self
            .session()
            .map(|session| session.questions().len())
            .unwrap_or_default();

        self.state = AppState::Results(QuizOutcome { score, total });
    }
}

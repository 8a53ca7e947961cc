pub mod app;
pub mod bank;
pub mod config;
pub mod demo;
pub mod question;
pub mod search;
pub mod selector;
pub mod session;
pub mod theme;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use app::{AppController, AppError, AppMode, AppView, QuizOutcome, StartOption};
pub use bank::{BankError, BankLoadError, QuestionBank};
pub use config::{Config, DisplayMode};
pub use demo::{demo_bank, demo_questions, demo_themes};
pub use question::{AnswerOption, Question};
pub use search::{filter, navigation_anchors};
pub use selector::{QuizRequest, SelectError, ThemeLength, draw, select};
pub use session::{
    AnswerMark, DesktopSession, DesktopState, MobileSession, Progress, QuizInteraction, Session,
    SessionError,
};
pub use theme::ThemeGroup;

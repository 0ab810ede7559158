#![forbid(unsafe_code)]

pub mod error;
pub mod session;

pub use quiz_core::Clock;

pub use error::SessionError;
pub use session::{
    AdvanceOutcome, AttemptState, OptionIndicator, OptionView, QuestionView, QuizRunner,
    QuizSession, SessionProgress,
};

mod progress;
mod runner;
mod service;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use runner::{AdvanceOutcome, QuizRunner};
pub use service::{AttemptState, QuizSession};
pub use view::{OptionIndicator, OptionView, QuestionView};

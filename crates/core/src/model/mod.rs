mod attempt;
mod explanation;
mod ids;
mod question;

pub use attempt::{Attempt, AttemptCache};
pub use explanation::{Explanation, OptionRationale, TermEntry};
pub use ids::{CertificationTrack, OptionKey, QuestionNumber, UserId};
pub use question::{Question, QuestionError, QuestionOption};

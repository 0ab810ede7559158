#![forbid(unsafe_code)]

pub mod http;
pub mod memory;
pub mod source;

pub use http::HttpQuestionSource;
pub use memory::ScriptedQuestionSource;
pub use source::{QuestionSource, SourceError};

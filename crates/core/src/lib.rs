#![forbid(unsafe_code)]

pub mod grading;
pub mod history;
pub mod model;
pub mod time;

pub use history::{History, HistoryError};
pub use time::Clock;

//! Core data models for the timecard agent.

mod duration;
mod time_of_day;
mod timecard;

pub use duration::*;
pub use time_of_day::*;
pub use timecard::*;

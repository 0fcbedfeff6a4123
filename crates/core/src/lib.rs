#![forbid(unsafe_code)]

pub mod bucketing;
pub mod grading;
pub mod model;
pub mod time;

pub use time::Clock;

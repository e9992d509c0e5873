#![forbid(unsafe_code)]

pub mod model;
pub mod progress;
pub mod time;
pub mod transfer;

pub use time::Clock;

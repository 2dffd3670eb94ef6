//! Process-wide logging setup for the master controller.

mod logger;
pub use logger::*;

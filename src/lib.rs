pub mod calendar;
pub mod cli;
pub mod error;
pub mod git;
pub mod identity;
pub mod model;
pub mod render;
pub mod repos;
pub mod stats;
pub mod tui;

pub use error::{Result, StatsError};

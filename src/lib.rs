pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod report;
pub mod types;

pub use error::{Result, TrendError};

pub mod config;
pub mod history;
pub mod metrics;
pub mod report;
pub mod scoring;

pub mod config;
pub mod report;
pub mod score;
pub mod tag;

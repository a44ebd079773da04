pub mod admin;
pub mod assistant;
pub mod community;
pub mod config;
pub mod error;
pub mod reports;
pub mod telemetry;

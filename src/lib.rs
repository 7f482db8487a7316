pub mod config;
pub mod contacts;
pub mod error;
pub mod telemetry;

pub mod config;
pub mod error;
pub mod orders;
pub mod simulator;
pub mod telemetry;

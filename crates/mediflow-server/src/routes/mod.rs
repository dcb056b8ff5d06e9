pub mod alerts;
pub mod config;
pub mod events;
pub mod orchestrator;
pub mod patients;
pub mod records;
pub mod stats;
pub mod views;
pub mod workflows;

pub mod alert;
pub mod config;
pub mod error;
pub mod fetch;
pub mod io;
pub mod orchestration;
pub mod paths;
pub mod patient;
pub mod record;
pub mod rest;
pub mod seed;
pub mod source;
pub mod stats;
pub mod timestamp;
pub mod types;
pub mod workflow;

pub use error::{MediflowError, Result};

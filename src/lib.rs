//! Batch dedupe, location normalization and import staging for the Irish
//! music-scene dataset.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod locations;
pub mod logging;
pub mod pipeline;

pub use config::Config;
pub use error::{ImporterError, Result};

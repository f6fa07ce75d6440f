//! Observability module
//!
//! Structured logging for documentation builds and release runs.

pub mod logging;

pub use logging::{LogFormat, init_logging, verbosity_to_directive};

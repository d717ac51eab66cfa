//! Logging utilities.
//!
//! Centralizes logger initialization. The engine logs through the standard
//! `log` facade; binaries pick the backend by calling [`init_logging`]
//! first thing in `main`.

mod init;

pub use init::{init_logging, LoggingConfig};

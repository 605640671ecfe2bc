//! Logging utilities.
//!
//! Centralizes logger initialization. Library code only uses the `log`
//! facade; binaries and tests opt into the `env_logger` backend here.

mod init;

pub use init::{init_logging, LoggingConfig};

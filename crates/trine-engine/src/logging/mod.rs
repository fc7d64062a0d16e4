//! Logging utilities.
//!
//! Centralizes logger initialization behind the `log` facade. Native builds
//! write through `env_logger`; browser builds write to the devtools console.

mod init;

pub use init::{init_logging, LoggingConfig};

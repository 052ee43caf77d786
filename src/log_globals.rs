//! Global log stream instance.
//!
//! Single producer (the tick path), single consumer (the outer loop
//! draining to UART / stdout).

use crate::logging::LogStream;

/// Status stream for state transitions and periodic reports.
pub static STATUS_LOG: LogStream = LogStream::new();

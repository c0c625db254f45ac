//! Logging abstraction layer.
//!
//! Library components never touch a process-wide logger. Each one is handed
//! an `Arc<dyn Logger>` when it is built and logs through the macros below.
//!
//! - `Logger` trait: the interface components log through
//! - `TracingLogger`: delegates to the `tracing` crate (used by the CLI)
//! - `NoOpLogger`: discards everything
//! - `CapturingLogger` (tests only): keeps messages in memory for assertions
//!
//! ```
//! use mapstitch::log::{Logger, NoOpLogger};
//! use mapstitch::{log_debug, log_info};
//! use std::sync::Arc;
//!
//! struct Planner {
//!     logger: Arc<dyn Logger>,
//! }
//!
//! impl Planner {
//!     fn plan(&self, tiles: usize) {
//!         log_info!(self.logger, "Planning {} tiles", tiles);
//!         log_debug!(self.logger, "Plan complete");
//!     }
//! }
//!
//! Planner { logger: Arc::new(NoOpLogger) }.plan(81);
//! ```

#[cfg(test)]
mod capture;
mod noop;
mod tracing_adapter;
mod r#trait;

#[cfg(test)]
pub use capture::CapturingLogger;
pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;

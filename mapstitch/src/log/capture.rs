//! In-memory logger for assertions in tests.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;
use std::sync::Mutex;

/// A logger that records every message it receives.
#[derive(Debug, Default)]
pub struct CapturingLogger {
    records: Mutex<Vec<(LogLevel, String)>>,
}

impl CapturingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded messages, oldest first.
    pub fn records(&self) -> Vec<(LogLevel, String)> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Returns true if a message at `level` contains `needle`.
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.records()
            .iter()
            .any(|(l, message)| *l == level && message.contains(needle))
    }

    /// Number of messages recorded at `level`.
    pub fn count(&self, level: LogLevel) -> usize {
        self.records().iter().filter(|(l, _)| *l == level).count()
    }
}

impl Logger for CapturingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        if let Ok(mut records) = self.records.lock() {
            records.push((level, args.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_records_in_order() {
        let logger = CapturingLogger::new();
        logger.info(format_args!("first"));
        logger.debug(format_args!("second {}", 2));

        assert_eq!(
            logger.records(),
            vec![
                (LogLevel::Info, "first".to_string()),
                (LogLevel::Debug, "second 2".to_string())
            ]
        );
    }

    #[test]
    fn test_shared_across_threads() {
        let logger = Arc::new(CapturingLogger::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let logger = Arc::clone(&logger);
                std::thread::spawn(move || logger.warn(format_args!("worker {}", i)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(logger.count(LogLevel::Warn), 4);
        assert!(logger.contains(LogLevel::Warn, "worker 3"));
    }
}

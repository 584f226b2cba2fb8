//! Timestamped logger backend for the `log` facade.
//!
//! Records go to stderr so tool output on stdout stays clean.

extern crate chrono;
extern crate log;

use std::io::{self, Write};

use chrono::Local;
use log::{Log, LogLevelFilter, LogMetadata, LogRecord, SetLoggerError};

struct StderrLogger {
    level: LogLevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &LogMetadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &LogRecord) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(
            io::stderr(),
            "{} {:<5} {}",
            stamp,
            record.level(),
            record.args()
        );
    }
}

/// Installs the logger with the given maximum level.
pub fn init(level: LogLevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(|max_level| {
        max_level.set(level);
        Box::new(StderrLogger { level: level })
    })
}

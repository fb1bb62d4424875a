use std::env;

use log::{LevelFilter, Metadata, Record};

/// Writes to stderr so the sim binary's stdout stays machine-readable.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Initialize logging with a level taken from the `ARMADA_LOG` environment
/// variable, falling back to `RUST_LOG`. Defaults to `info` when neither is
/// set or the value does not parse.
pub fn init_logging() {
    let level = env::var("ARMADA_LOG")
        .or_else(|_| env::var("RUST_LOG"))
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Info);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}

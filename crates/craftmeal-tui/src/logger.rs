/// Logger that captures records into a memory buffer instead of stdout,
/// so logging never corrupts the TUI display.
use craftmeal_core::get_craftmeal_setting;
use log::{Level, Metadata, Record, SetLoggerError};
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

/// A log entry with timestamp and formatted message
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    pub fn format(&self) -> String {
        format!(
            "[{}] {} {}: {}",
            self.timestamp, self.level, self.target, self.message
        )
    }
}

/// Thread-safe ring buffer of log entries
#[derive(Clone)]
pub struct LogBuffer {
    logs: Arc<RwLock<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new() -> Self {
        let capacity = get_craftmeal_setting!(CRAFTMEAL_LOG_BUFFER_LINES, usize);
        Self {
            logs: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn add_log(&self, entry: LogEntry) {
        let mut logs = self.logs.write().unwrap();
        if logs.len() >= self.capacity {
            logs.pop_front();
        }
        logs.push_back(entry);
    }

    pub fn get_recent_logs(&self, count: usize) -> Vec<String> {
        let logs = self.logs.read().unwrap();
        let start = logs.len().saturating_sub(count);
        logs.iter().skip(start).map(|entry| entry.format()).collect()
    }
}

/// log::Log implementation writing into the buffer
pub struct BufferedLogger {
    buffer: LogBuffer,
}

impl log::Log for BufferedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.buffer.add_log(LogEntry {
                timestamp: chrono::Local::now()
                    .format("%Y-%m-%d %H:%M:%S%.3f")
                    .to_string(),
                level: record.level().to_string(),
                target: record.target().to_string(),
                message: format!("{}", record.args()),
            });
        }
    }

    fn flush(&self) {}
}

/// Install the buffered logger and return the buffer for reading logs.
/// Never prints to stderr, that would corrupt the TUI.
pub fn init_memory_logger() -> Result<LogBuffer, SetLoggerError> {
    let buffer = LogBuffer::new();
    let logger = BufferedLogger {
        buffer: buffer.clone(),
    };
    let _ = log::set_boxed_logger(Box::new(logger));
    log::set_max_level(log::LevelFilter::Debug);
    Ok(buffer)
}

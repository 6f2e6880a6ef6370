use std::fmt;
use std::sync::Arc;

/// Produces the wall-clock timestamp stamped on each log line.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

/// Local time of day, e.g. `14:03:27`.
pub fn local_clock() -> Clock {
    Arc::new(|| chrono::Local::now().format("%H:%M:%S").to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: String,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp, self.message)
    }
}

/// Append-only text log scoped to one source.
///
/// `revision` bumps on every append so the renderer knows when to scroll to
/// the newest line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogArea {
    entries: Vec<LogEntry>,
    text: String,
    revision: u64,
}

impl LogArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, timestamp: impl Into<String>, message: impl Into<String>) {
        let entry = LogEntry {
            timestamp: timestamp.into(),
            message: message.into(),
        };
        self.text.push_str(&entry.to_string());
        self.text.push('\n');
        self.entries.push(entry);
        self.revision += 1;
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Messages without timestamps, in append order.
    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.message.as_str()).collect()
    }

    /// The display buffer: one `[timestamp] message` line per entry.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Activity log entries attached to domain aggregates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Oldest entries are dropped once an aggregate holds more than this.
pub const MAX_LOG_ENTRIES: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl LogEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            message: message.into(),
        }
    }
}

pub trait Loggable {
    fn add_log(&mut self, message: String);
    fn get_logs(&self) -> &[LogEntry];

    /// The last `n` entries, oldest first.
    fn recent_logs(&self, n: usize) -> &[LogEntry] {
        let logs = self.get_logs();
        &logs[logs.len().saturating_sub(n)..]
    }
}

/// Append `entry`, evicting from the front past [`MAX_LOG_ENTRIES`].
pub fn push_bounded(logs: &mut Vec<LogEntry>, entry: LogEntry) {
    logs.push(entry);
    if logs.len() > MAX_LOG_ENTRIES {
        let excess = logs.len() - MAX_LOG_ENTRIES;
        logs.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Journal {
        logs: Vec<LogEntry>,
    }

    impl Loggable for Journal {
        fn add_log(&mut self, message: String) {
            push_bounded(&mut self.logs, LogEntry::new(message));
        }

        fn get_logs(&self) -> &[LogEntry] {
            &self.logs
        }
    }

    #[test]
    fn test_recent_logs() {
        let mut journal = Journal { logs: vec![] };
        for i in 0..5 {
            journal.add_log(format!("entry {}", i));
        }

        let recent = journal.recent_logs(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "entry 3");
        assert_eq!(recent[1].message, "entry 4");
        assert_eq!(journal.recent_logs(50).len(), 5);
    }

    #[test]
    fn test_push_bounded_evicts_oldest() {
        let mut logs = Vec::new();
        for i in 0..MAX_LOG_ENTRIES + 3 {
            push_bounded(&mut logs, LogEntry::new(format!("{}", i)));
        }
        assert_eq!(logs.len(), MAX_LOG_ENTRIES);
        assert_eq!(logs[0].message, "3");
    }
}

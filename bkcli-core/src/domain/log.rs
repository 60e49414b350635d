//! Log snapshot
//!
//! A job log is a single text blob that only grows while the job runs.
//! Lines are `\n`-terminated; a trailing fragment without a newline is a line
//! still being written and is not counted.
//!
//! Since a log only grows at the end, a byte offset into one snapshot is also
//! valid in every later snapshot of the same job.

/// Point-in-time copy of a job's full log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSnapshot {
    text: String,
    line_count: usize,
}

impl LogSnapshot {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_count = count_lines(&text);
        Self { text, line_count }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of `\n` occurrences
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Text from byte `offset` up to and including the last newline
    ///
    /// Empty when no newline follows `offset`. A trailing fragment that is
    /// still being written is held back.
    pub fn complete_since(&self, offset: usize) -> &str {
        let end = self.text.rfind('\n').map_or(0, |pos| pos + 1);
        if end <= offset {
            return "";
        }
        self.text.get(offset..end).unwrap_or("")
    }

    /// Everything from byte `offset` to the end, including a trailing
    /// fragment without a newline
    pub fn since(&self, offset: usize) -> &str {
        self.text.get(offset..).unwrap_or("")
    }
}

/// Count the lines of a log body
pub fn count_lines(text: &str) -> usize {
    text.bytes().filter(|b| *b == b'\n').count()
}

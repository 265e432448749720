//! Diagnostic scan log
//!
//! Hosts display the stream of normalized lines so users can see what the
//! scanner is reading. The buffer is bounded: once the text grows past its
//! capacity it is cleared and starts over, keeping the display cheap during
//! long sessions.

/// Default capacity in characters before the buffer clears itself
pub const DEFAULT_LOG_CAPACITY: usize = 2000;

/// Bounded append-only text log of scanned lines.
#[derive(Debug, Clone)]
pub struct ScanLogBuffer {
    text: String,
    capacity: usize,
}

impl Default for ScanLogBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl ScanLogBuffer {
    /// Create a log that clears once its text exceeds `capacity` characters
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::new(),
            capacity,
        }
    }

    /// Append one scanned line.
    ///
    /// The existing contents are discarded first when they have outgrown the
    /// capacity, so the newest lines are always present.
    pub fn push_line(&mut self, line: &str) {
        if self.text.len() > self.capacity {
            self.text.clear();
        }
        self.text.push_str(line);
        self.text.push('\n');
    }

    /// Current log contents
    pub fn contents(&self) -> &str {
        &self.text
    }

    /// Discard all contents
    pub fn clear(&mut self) {
        self.text.clear();
    }
}

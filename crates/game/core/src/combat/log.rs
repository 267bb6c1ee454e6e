//! Player-facing intent log.

/// Append-only destination for human-readable combat messages.
///
/// The overworld and the combat engine both write through this trait, so
/// neither needs to own the other's log.
pub trait LogSink {
    fn append(&mut self, entry: String);
}

/// In-memory [`LogSink`] that keeps every entry in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntentLog {
    entries: Vec<String>,
}

impl IntentLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// Entries appended after the first `from` ones.
    pub fn since(&self, from: usize) -> &[String] {
        &self.entries[from.min(self.entries.len())..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if any entry contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.entries.iter().any(|entry| entry.contains(needle))
    }
}

impl LogSink for IntentLog {
    fn append(&mut self, entry: String) {
        tracing::trace!(target: "intent", %entry);
        self.entries.push(entry);
    }
}

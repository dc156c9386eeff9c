//! Reporting sinks for result messages.
//!
//! Components never log through a global handle. They receive a
//! [`Reporter`] at construction and hand it human-readable messages; the
//! caller decides where those messages end up.

use std::cell::RefCell;

use crate::table::{Value, quote};

/// Severity of a reported message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Info,
    Error,
}

/// Something that can accept a result message.
pub trait Reporter {
    /// Accept an informational message.
    fn info(&self, message: &str);

    /// Accept an error message.
    fn error(&self, message: &str);
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

/// Forwards messages to `tracing` events, tagged with a logger name.
#[derive(Debug, Clone)]
pub struct TracingReporter {
    logger: String,
}

impl TracingReporter {
    /// Create a reporter whose events carry `logger = <name>`.
    pub fn new(logger: impl Into<String>) -> Self {
        Self {
            logger: logger.into(),
        }
    }

    pub fn logger(&self) -> &str {
        &self.logger
    }
}

impl Default for TracingReporter {
    fn default() -> Self {
        Self::new("tally")
    }
}

impl Reporter for TracingReporter {
    fn info(&self, message: &str) {
        tracing::info!(logger = %self.logger, "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(logger = %self.logger, "{}", message);
    }
}

/// Keeps every message in memory. Useful for tests and for callers that want
/// to inspect what a run reported.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    messages: RefCell<Vec<(Level, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages in the order they were reported.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().iter().map(|(_, m)| m.clone()).collect()
    }

    /// Messages reported at `level`.
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// True if any message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.borrow().iter().any(|(_, m)| m.contains(needle))
    }

    pub fn clear(&self) {
        self.messages.borrow_mut().clear();
    }
}

impl Reporter for MemoryReporter {
    fn info(&self, message: &str) {
        self.messages
            .borrow_mut()
            .push((Level::Info, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.messages
            .borrow_mut()
            .push((Level::Error, message.to_string()));
    }
}

// =============================================================================
// MESSAGE FORMATTING
// =============================================================================
// Lists and mappings are rendered as Python-style literals, e.g. ['A', 'B']
// and {'EU': 1, 'US': 1}.

/// Renders itself as a literal inside a list or mapping.
pub trait Literal {
    fn literal(&self) -> String;
}

impl Literal for Value {
    fn literal(&self) -> String {
        self.repr()
    }
}

impl Literal for str {
    fn literal(&self) -> String {
        quote(self)
    }
}

impl Literal for String {
    fn literal(&self) -> String {
        quote(self)
    }
}

impl Literal for i32 {
    fn literal(&self) -> String {
        self.to_string()
    }
}

impl<T: Literal + ?Sized> Literal for &T {
    fn literal(&self) -> String {
        (**self).literal()
    }
}

/// Format items as `['a', 'b']`.
pub fn format_list<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Literal,
{
    let parts: Vec<String> = items.into_iter().map(|i| i.literal()).collect();
    format!("[{}]", parts.join(", "))
}

/// Format key/count pairs as `{'a': 1, 'b': 2}`.
pub fn format_mapping<I, K>(entries: I) -> String
where
    I: IntoIterator<Item = (K, usize)>,
    K: Literal,
{
    let parts: Vec<String> = entries
        .into_iter()
        .map(|(k, v)| format!("{}: {}", k.literal(), v))
        .collect();
    format!("{{{}}}", parts.join(", "))
}

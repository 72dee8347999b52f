//! Non-fatal diagnostics collected while reading a drawing.
//!
//! Parsing is fault tolerant: a broken line does not abort the whole
//! operation, it is recorded here together with its line number so that
//! callers can report it afterwards.

use std::fmt;

/// The kind of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    /// A feature was recognized but is not implemented.
    NotImplemented,
    /// A feature is not supported by the target (typically an export
    /// format that cannot render a primitive faithfully).
    NotSupported,
    /// Something suspicious, handled with a fallback.
    Warning,
    /// A line or structure that could not be processed at all.
    Error,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationType::NotImplemented => write!(f, "NOT IMPLEMENTED"),
            NotificationType::NotSupported => write!(f, "NOT SUPPORTED"),
            NotificationType::Warning => write!(f, "WARNING"),
            NotificationType::Error => write!(f, "ERROR"),
        }
    }
}

/// A single diagnostic message, optionally tied to an input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub ntype: NotificationType,
    pub message: String,
    /// One-based line number in the source text, when known.
    pub line: Option<usize>,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(n) => write!(f, "[{}] line {}: {}", self.ntype, n, self.message),
            None => write!(f, "[{}] {}", self.ntype, self.message),
        }
    }
}

/// An ordered collection of notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    notifications: Vec<Notification>,
}

impl NotificationCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notification with an explicit type.
    pub fn add(&mut self, ntype: NotificationType, message: impl Into<String>) {
        self.notifications.push(Notification {
            ntype,
            message: message.into(),
            line: None,
        });
    }

    /// Add a notification referring to a specific input line.
    pub fn add_at_line(
        &mut self,
        ntype: NotificationType,
        message: impl Into<String>,
        line: usize,
    ) {
        self.notifications.push(Notification {
            ntype,
            message: message.into(),
            line: Some(line),
        });
    }

    /// Shorthand for a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.add(NotificationType::Warning, message);
    }

    /// Shorthand for an error.
    pub fn error(&mut self, message: impl Into<String>) {
        self.add(NotificationType::Error, message);
    }

    /// All notifications, in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Number of recorded notifications.
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// True if at least one `Error` notification is present.
    pub fn has_errors(&self) -> bool {
        self.notifications
            .iter()
            .any(|n| n.ntype == NotificationType::Error)
    }

    /// Remove all notifications.
    pub fn clear(&mut self) {
        self.notifications.clear();
    }

    /// Merge another collection into this one.
    pub fn extend(&mut self, other: NotificationCollection) {
        self.notifications.extend(other.notifications);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_query() {
        let mut nc = NotificationCollection::new();
        assert!(nc.is_empty());

        nc.warn("suspicious token");
        nc.add_at_line(NotificationType::Error, "bad arguments on LI", 12);

        assert_eq!(nc.len(), 2);
        assert!(nc.has_errors());
        let all: Vec<_> = nc.iter().collect();
        assert_eq!(all[1].line, Some(12));
    }

    #[test]
    fn test_display() {
        let n = Notification {
            ntype: NotificationType::Error,
            message: "bad arguments on BE".to_string(),
            line: Some(3),
        };
        assert_eq!(format!("{}", n), "[ERROR] line 3: bad arguments on BE");
    }

    #[test]
    fn test_no_errors() {
        let mut nc = NotificationCollection::new();
        nc.warn("only a warning");
        assert!(!nc.has_errors());
    }
}

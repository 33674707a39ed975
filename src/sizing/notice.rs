//! Per-circuit warnings and errors.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NoticeLevel {
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeLevel::Warning => f.write_str("WARNING"),
            NoticeLevel::Error => f.write_str("ERROR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Notices split by level, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupedNotices {
    #[serde(rename = "WARNING")]
    pub warnings: Vec<String>,
    #[serde(rename = "ERROR")]
    pub errors: Vec<String>,
}

impl GroupedNotices {
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }
}

/// Ordered list of notices for one circuit.
///
/// Each notice is mirrored to `tracing` with the circuit name as a field;
/// the stored message itself carries no name prefix.
#[derive(Debug, Clone)]
pub struct NoticeCollector {
    circuit_name: String,
    items: Vec<Notice>,
}

impl NoticeCollector {
    pub fn new(circuit_name: impl Into<String>) -> Self {
        Self {
            circuit_name: circuit_name.into(),
            items: Vec::new(),
        }
    }

    pub fn circuit_name(&self) -> &str {
        &self.circuit_name
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(circuit = %self.circuit_name, "{message}");
        self.items.push(Notice {
            level: NoticeLevel::Warning,
            message,
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(circuit = %self.circuit_name, "{message}");
        self.items.push(Notice {
            level: NoticeLevel::Error,
            message,
        });
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn items(&self) -> &[Notice] {
        &self.items
    }

    pub fn grouped(&self) -> GroupedNotices {
        let mut grouped = GroupedNotices::default();
        for notice in &self.items {
            match notice.level {
                NoticeLevel::Warning => grouped.warnings.push(notice.message.clone()),
                NoticeLevel::Error => grouped.errors.push(notice.message.clone()),
            }
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_preserves_order_per_level() {
        let mut notices = NoticeCollector::new("LP1-1");
        notices.warn("first");
        notices.error("boom");
        notices.warn("second");
        let grouped = notices.grouped();
        assert_eq!(grouped.warnings, vec!["first", "second"]);
        assert_eq!(grouped.errors, vec!["boom"]);
        assert!(notices.has_items());
    }

    #[test]
    fn grouped_serializes_with_level_keys() {
        let mut notices = NoticeCollector::new("LP1-1");
        notices.warn("w");
        let json = serde_json::to_string(&notices.grouped()).unwrap_or_default();
        assert_eq!(json, r#"{"WARNING":["w"],"ERROR":[]}"#);
    }
}

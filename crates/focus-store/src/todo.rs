//! The todo record and its title rule.

use serde::{Deserialize, Serialize};

/// A single task as stored and as sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Server-assigned, strictly increasing by insertion.
    pub id: i64,
    /// Trimmed, never empty.
    pub title: String,
    pub done: bool,
    /// RFC 3339 UTC timestamp set by the database at insert.
    pub created_at: Option<String>,
}

/// Trims a candidate title, returning `None` when nothing is left.
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  Buy milk \n"), Some("Buy milk".to_string()));
        assert_eq!(normalize_title(""), None);
        assert_eq!(normalize_title(" \t\n "), None);
    }

    #[test]
    fn test_wire_format_uses_camel_case() {
        let todo = Todo {
            id: 7,
            title: "Ship it".into(),
            done: false,
            created_at: Some("2024-05-01T10:00:00.000Z".into()),
        };
        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["createdAt"], "2024-05-01T10:00:00.000Z");
        assert!(value.get("created_at").is_none());
    }
}

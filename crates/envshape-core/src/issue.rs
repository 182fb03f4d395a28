//! # Validation Issues
//!
//! An [`Issue`] is one validation failure: a human-readable message plus the
//! location of the failing value inside the input.
//!
//! ## Path Order
//!
//! Leaf schemas emit issues with an empty path. Each object composer the
//! issue bubbles through prepends the key of the field it was validating, so
//! a failure for field `c` inside field `b` ends up with path `[b, c]`:
//! outer-to-inner, the same order a reader would write `b.c`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step in the location of a failing value.
///
/// Serializes as `{"key": "<name>"}` for record fields and as a bare number
/// for positional segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A named field of a record.
    Key {
        /// Field name.
        key: String,
    },
    /// A positional segment.
    Index(u64),
}

impl PathSegment {
    /// Build a key segment.
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key { key: key.into() }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key { key } => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Human-readable description of the failure.
    pub message: String,
    /// Location of the failing value, outer-to-inner. Empty for failures
    /// raised directly by a leaf schema.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,
}

impl Issue {
    /// Create an issue with no path.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
        }
    }

    /// Create an issue at an explicit path.
    pub fn at(message: impl Into<String>, path: Vec<PathSegment>) -> Self {
        Self {
            message: message.into(),
            path,
        }
    }

    /// Return this issue with `key` prepended to its path.
    ///
    /// Called once per object level the issue crosses on its way up.
    pub fn within(mut self, key: &str) -> Self {
        self.path.insert(0, PathSegment::key(key));
        self
    }

    /// The dotted form of the path (`"b.c"`), or `None` when the path is empty.
    pub fn dotted_path(&self) -> Option<String> {
        if self.path.is_empty() {
            return None;
        }
        let segments: Vec<String> = self.path.iter().map(ToString::to_string).collect();
        Some(segments.join("."))
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dotted_path() {
            Some(path) => write!(f, "{path}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Render a list of issues into the single-line summary used by parse errors.
///
/// An issue with a non-empty path renders as its dotted path; an issue without
/// a path renders as its message. Rendered issues are joined with `", "`.
pub fn render_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(|issue| issue.dotted_path().unwrap_or_else(|| issue.message.clone()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn within_prepends_outer_key() {
        let issue = Issue::new("Expected a number").within("c").within("b");
        assert_eq!(
            issue.path,
            vec![PathSegment::key("b"), PathSegment::key("c")]
        );
        assert_eq!(issue.dotted_path().as_deref(), Some("b.c"));
    }

    #[test]
    fn dotted_path_none_for_leaf_issue() {
        assert_eq!(Issue::new("Expected a string").dotted_path(), None);
    }

    #[test]
    fn render_uses_path_when_present_and_message_otherwise() {
        let issues = vec![
            Issue::new("Expected a number").within("PORT"),
            Issue::new("Expected an object"),
            Issue::new("Expected a boolean").within("debug").within("features"),
        ];
        assert_eq!(
            render_issues(&issues),
            "PORT, Expected an object, features.debug"
        );
    }

    #[test]
    fn render_empty_list_is_empty_string() {
        assert_eq!(render_issues(&[]), "");
    }

    #[test]
    fn index_segment_renders_bare() {
        let issue = Issue::at(
            "bad",
            vec![PathSegment::key("hosts"), PathSegment::Index(2)],
        );
        assert_eq!(issue.dotted_path().as_deref(), Some("hosts.2"));
    }

    #[test]
    fn leaf_issue_serializes_without_path() {
        let value = serde_json::to_value(Issue::new("Expected a boolean")).unwrap();
        assert_eq!(value, json!({"message": "Expected a boolean"}));
    }

    #[test]
    fn path_segments_serialize_to_wire_shape() {
        let issue = Issue::at(
            "Expected a number",
            vec![PathSegment::key("age"), PathSegment::Index(0)],
        );
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(
            value,
            json!({"message": "Expected a number", "path": [{"key": "age"}, 0]})
        );

        let back: Issue = serde_json::from_value(value).unwrap();
        assert_eq!(back, issue);
    }

    #[test]
    fn display_includes_path_and_message() {
        let issue = Issue::new("Expected a number").within("age");
        assert_eq!(issue.to_string(), "age: Expected a number");
    }
}

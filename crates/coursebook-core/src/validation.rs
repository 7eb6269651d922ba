//! Declarative field rules and the evaluator that runs them.
//!
//! Request DTOs declare an ordered list of [`FieldRule`]s through [`RuleSet`].
//! [`evaluate`] runs every rule against the raw JSON payload, never stopping at
//! the first failure, and reports issues in declaration order.
//!
//! ```ignore
//! const RULES: &[FieldRule] = &[
//!     FieldRule::required("title", "Title is required"),
//!     FieldRule::email("emailAddress", "Please provide a valid value for \"emailAddress\""),
//! ];
//!
//! let issues = evaluate(&serde_json::json!({}), RULES);
//! assert_eq!(issues.len(), 2);
//! ```

use serde::{Serialize, Serializer};
use serde_json::Value;
use validator::ValidateEmail;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Present, not null, and not blank when a string.
    Required,
    /// Present string that parses as an email address.
    Email,
    /// String no longer than this many UTF-8 bytes. Absent or non-string
    /// values pass; pair with `Required` to demand presence.
    MaxBytes(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub check: Check,
    pub message: &'static str,
}

impl FieldRule {
    pub const fn required(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            check: Check::Required,
            message,
        }
    }

    pub const fn email(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            check: Check::Email,
            message,
        }
    }

    pub const fn max_bytes(field: &'static str, limit: usize, message: &'static str) -> Self {
        Self {
            field,
            check: Check::MaxBytes(limit),
            message,
        }
    }

    fn passes(&self, payload: &Value) -> bool {
        let value = payload.get(self.field);

        match self.check {
            Check::Required => match value {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(_) => true,
            },
            Check::Email => value
                .and_then(Value::as_str)
                .is_some_and(|s| s.validate_email()),
            Check::MaxBytes(limit) => value
                .and_then(Value::as_str)
                .is_none_or(|s| s.len() <= limit),
        }
    }
}

/// One failed check. Serialises as its message alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Serialize for ValidationIssue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message)
    }
}

/// Implemented by request bodies that declare field rules.
pub trait RuleSet {
    const RULES: &'static [FieldRule];
}

/// Runs every rule against `payload`. An empty result means the payload passed.
pub fn evaluate(payload: &Value, rules: &[FieldRule]) -> Vec<ValidationIssue> {
    rules
        .iter()
        .filter(|rule| !rule.passes(payload))
        .map(|rule| ValidationIssue::new(rule.field, rule.message))
        .collect()
}

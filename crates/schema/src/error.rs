//! Schema error types

use serde::Serialize;
use thiserror::Error;

/// Category of a single constraint violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required field is missing or null.
    Required,
    /// A value has the wrong type, length, format or enumeration member.
    InvalidShape,
    /// A record carries a field name its shape never declares.
    UnknownField,
    /// A field is required or forbidden by the value of a sibling discriminator.
    Conditional,
}

/// A single violated constraint, located by its field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Dotted path of the offending field (`this` for the validated value itself).
    pub path: String,
    /// What kind of constraint was violated.
    pub kind: ViolationKind,
    /// Human-readable message.
    pub message: String,
}

/// Rejection of a candidate value, carrying every violation found in it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", summary(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

fn summary(violations: &[Violation]) -> String {
    match violations {
        [single] => single.message.clone(),
        many => format!("{} errors occurred", many.len()),
    }
}

impl ValidationError {
    /// Creates a validation error from collected violations.
    #[must_use]
    pub const fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns the violations in the order they were found.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns the messages in the order they were found.
    #[must_use]
    pub fn errors(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }

    /// Returns the violations of one kind.
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }
}

/// Errors raised by the schema entry points.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The candidate value does not conform to the schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The candidate text is not valid JSON.
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Serialized output was not valid UTF-8.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

//! Validation context and the building blocks every shape is written with.
//!
//! Shapes are plain functions `fn(&mut Context, &FieldPath, &Value) -> Value`
//! that open the candidate as a closed [`Record`], check each declared field
//! and return the validated output. Violations are pushed into the
//! [`Context`] rather than returned, so one pass reports every problem.

mod path;
mod record;

pub use path::FieldPath;
pub(crate) use record::{Record, open_object};

use serde_json::Value;

use crate::error::{ValidationError, Violation, ViolationKind};
use crate::options::ValidateOptions;

/// How a field may be absent or null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Presence {
    /// May be absent, must not be null.
    Optional,
    /// May be absent or null.
    Nullable,
    /// Must be present, must not be null.
    Defined,
    /// Must be present and non-null; reported with the given message.
    Required(&'static str),
    /// Must be present and non-null; reported as `<path> is a required field`.
    RequiredField,
}

/// A closed set of string values used as a discriminator or enumeration.
pub trait Choice: Sized + Copy + 'static {
    /// Every accepted wire value, in declaration order.
    const NAMES: &'static [&'static str];

    /// Parses a wire value.
    fn from_name(name: &str) -> Option<Self>;

    /// Returns the wire value.
    fn name(self) -> &'static str;
}

/// Declares a [`Choice`] enum with its wire names.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::validator::Choice for $name {
            const NAMES: &'static [&'static str] = &[$($wire),+];

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::validator::Choice::name(*self))
            }
        }
    };
}

pub(crate) use choice_enum;

/// Collects violations while a candidate is walked.
#[derive(Debug, Default)]
pub struct Context {
    options: ValidateOptions,
    violations: Vec<Violation>,
}

impl Context {
    /// Creates a context for one validation run.
    #[must_use]
    pub const fn new(options: ValidateOptions) -> Self {
        Self {
            options,
            violations: Vec::new(),
        }
    }

    /// Records a violation at `path`.
    pub fn report(&mut self, path: &FieldPath, kind: ViolationKind, message: impl Into<String>) {
        if self.options.abort_early && !self.violations.is_empty() {
            return;
        }
        self.violations.push(Violation {
            path: path.to_string(),
            kind,
            message: message.into(),
        });
    }

    /// Returns whether any violation has been recorded.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Returns the number of violations recorded so far.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// Ends the run: the validated output when nothing was violated.
    ///
    /// # Errors
    ///
    /// Returns every recorded violation if there is at least one.
    pub fn finish(self, output: Value) -> Result<Value, ValidationError> {
        if self.violations.is_empty() {
            Ok(output)
        } else {
            Err(ValidationError::new(self.violations))
        }
    }

    pub(crate) fn type_error(&mut self, path: &FieldPath, expected: &str) {
        self.report(
            path,
            ViolationKind::InvalidShape,
            format!("{path} must be a `{expected}` type"),
        );
    }
}

/// Validates a list whose every element has the given shape.
///
/// Used where a list is the validated value itself rather than a record field.
pub(crate) fn list_of<F>(cx: &mut Context, path: &FieldPath, value: &Value, mut each: F) -> Value
where
    F: FnMut(&mut Context, &FieldPath, &Value) -> Value,
{
    let Some(elements) = value.as_array() else {
        cx.type_error(path, "array");
        return Value::Null;
    };
    Value::Array(
        elements
            .iter()
            .enumerate()
            .map(|(i, element)| each(cx, &path.index(i), element))
            .collect(),
    )
}

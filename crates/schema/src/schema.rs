//! Named schemas: the public validation entry points.

use serde_json::Value;

use crate::error::{SchemaResult, ValidationError};
use crate::options::ValidateOptions;
use crate::serialization::from_json;
use crate::validator::{Context, FieldPath};

/// A shape that candidate values can be validated against.
///
/// Validation never mutates the candidate. On success it returns the
/// validated output: inapplicable fields stripped and defaults filled in.
/// On failure it returns every violation found, in document order.
pub trait Schema {
    /// Name used in log output.
    fn name(&self) -> &'static str;

    /// Checks `value` at `path`, recording violations in `cx`.
    fn check(&self, cx: &mut Context, path: &FieldPath, value: &Value) -> Value;

    /// Validates `value` with the default options.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every violation.
    fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        self.validate_with(value, &ValidateOptions::default())
    }

    /// Validates `value` with the given options.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing the violations found.
    fn validate_with(
        &self,
        value: &Value,
        options: &ValidateOptions,
    ) -> Result<Value, ValidationError> {
        let mut cx = Context::new(options.clone());
        let output = self.check(&mut cx, &FieldPath::root(), value);
        tracing::debug!(
            schema = self.name(),
            violations = cx.violation_count(),
            "validated candidate"
        );
        cx.finish(output)
    }

    /// Parses JSON text and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SchemaError::Json`] for malformed text and
    /// [`crate::SchemaError::Validation`] for a non-conforming value.
    fn validate_json(&self, json: &str) -> SchemaResult<Value> {
        let value = from_json(json)?;
        Ok(self.validate(&value)?)
    }
}

/// The whole collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionSchema;

/// A single item, validated recursively.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemSchema;

/// A single environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentSchema;

/// A list of environments.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentsSchema;

/// An HTTP or GraphQL request, without its item wrapper.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSchema;

/// Schema of a whole collection.
pub const COLLECTION_SCHEMA: CollectionSchema = CollectionSchema;
/// Schema of a single item.
pub const ITEM_SCHEMA: ItemSchema = ItemSchema;
/// Schema of a single environment.
pub const ENVIRONMENT_SCHEMA: EnvironmentSchema = EnvironmentSchema;
/// Schema of a list of environments.
pub const ENVIRONMENTS_SCHEMA: EnvironmentsSchema = EnvironmentsSchema;
/// Schema of an HTTP or GraphQL request.
pub const REQUEST_SCHEMA: RequestSchema = RequestSchema;

impl Schema for CollectionSchema {
    fn name(&self) -> &'static str {
        "collection"
    }

    fn check(&self, cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
        crate::collection::collection(cx, path, value)
    }
}

impl Schema for ItemSchema {
    fn name(&self) -> &'static str {
        "item"
    }

    fn check(&self, cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
        crate::item::item(cx, path, value)
    }
}

impl Schema for EnvironmentSchema {
    fn name(&self) -> &'static str {
        "environment"
    }

    fn check(&self, cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
        crate::environment::environment(cx, path, value)
    }
}

impl Schema for EnvironmentsSchema {
    fn name(&self) -> &'static str {
        "environments"
    }

    fn check(&self, cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
        crate::environment::environments(cx, path, value)
    }
}

impl Schema for RequestSchema {
    fn name(&self) -> &'static str {
        "request"
    }

    fn check(&self, cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
        crate::request::http_request(cx, path, value)
    }
}

/// Validates a collection.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every violation.
pub fn validate_collection(value: &Value) -> Result<Value, ValidationError> {
    COLLECTION_SCHEMA.validate(value)
}

/// Validates a single item and its descendants.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every violation.
pub fn validate_item(value: &Value) -> Result<Value, ValidationError> {
    ITEM_SCHEMA.validate(value)
}

/// Validates an environment.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every violation.
pub fn validate_environment(value: &Value) -> Result<Value, ValidationError> {
    ENVIRONMENT_SCHEMA.validate(value)
}

/// Validates a list of environments.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every violation.
pub fn validate_environments(value: &Value) -> Result<Value, ValidationError> {
    ENVIRONMENTS_SCHEMA.validate(value)
}

/// Validates an HTTP or GraphQL request.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every violation.
pub fn validate_request(value: &Value) -> Result<Value, ValidationError> {
    REQUEST_SCHEMA.validate(value)
}

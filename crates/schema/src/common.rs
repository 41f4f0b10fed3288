//! Shapes shared across requests, folders and examples.

use serde_json::Value;

use crate::validator::{Context, FieldPath, Presence, Record, choice_enum};

choice_enum! {
    /// Comparison operator of a response assertion.
    pub enum AssertionOperator {
        /// Equal.
        Eq => "eq",
        /// Not equal.
        Neq => "neq",
        /// Greater than.
        Gt => "gt",
        /// Greater than or equal.
        Gte => "gte",
        /// Less than.
        Lt => "lt",
        /// Less than or equal.
        Lte => "lte",
        /// Member of a list.
        In => "in",
        /// Not a member of a list.
        NotIn => "notIn",
        /// Contains a substring or element.
        Contains => "contains",
        /// Does not contain a substring or element.
        NotContains => "notContains",
        /// Has a given length.
        Length => "length",
        /// Matches a pattern.
        Matches => "matches",
        /// Does not match a pattern.
        NotMatches => "notMatches",
        /// Starts with a prefix.
        StartsWith => "startsWith",
        /// Ends with a suffix.
        EndsWith => "endsWith",
        /// Within an inclusive range.
        Between => "between",
        /// Empty string, list or object.
        IsEmpty => "isEmpty",
        /// Not empty.
        IsNotEmpty => "isNotEmpty",
        /// Null.
        IsNull => "isNull",
        /// Undefined.
        IsUndefined => "isUndefined",
        /// Defined.
        IsDefined => "isDefined",
        /// Truthy.
        IsTruthy => "isTruthy",
        /// Falsy.
        IsFalsy => "isFalsy",
        /// Parses as JSON.
        IsJson => "isJson",
        /// A number.
        IsNumber => "isNumber",
        /// A string.
        IsString => "isString",
        /// A boolean.
        IsBoolean => "isBoolean",
        /// An array.
        IsArray => "isArray",
    }
}

choice_enum! {
    /// Where a request parameter is sent.
    pub enum ParamType {
        /// Query string parameter.
        Query => "query",
        /// Path segment parameter.
        Path => "path",
    }
}

const KEY_VALUE_FIELDS: &[&str] = &["uid", "name", "value", "description", "enabled"];

fn key_value_fields(cx: &mut Context, record: &mut Record<'_>) {
    record.uid(cx, "uid");
    record.string(cx, "name", Presence::Nullable);
    record.string(cx, "value", Presence::Nullable);
    record.string(cx, "description", Presence::Nullable);
    record.boolean(cx, "enabled", Presence::Optional, None);
}

/// A generic name/value row: headers and url-encoded form fields.
pub(crate) fn key_value(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(cx, path, value, KEY_VALUE_FIELDS) else {
        return Value::Null;
    };
    key_value_fields(cx, &mut record);
    record.finish()
}

/// A key-value row with an optional comparison operator.
pub(crate) fn assertion(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(
        cx,
        path,
        value,
        &["uid", "name", "value", "description", "enabled", "operator"],
    ) else {
        return Value::Null;
    };
    key_value_fields(cx, &mut record);
    record.choice::<AssertionOperator>(cx, "operator", Presence::Nullable);
    record.finish()
}

/// A script variable: a key-value row with a `local` flag.
pub(crate) fn var(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(
        cx,
        path,
        value,
        &["uid", "name", "value", "description", "enabled", "local"],
    ) else {
        return Value::Null;
    };
    key_value_fields(cx, &mut record);
    record.boolean(cx, "local", Presence::Optional, None);
    record.finish()
}

/// A query or path parameter.
pub(crate) fn param(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(
        cx,
        path,
        value,
        &["uid", "name", "value", "description", "type", "enabled"],
    ) else {
        return Value::Null;
    };
    record.uid(cx, "uid");
    record.string(cx, "name", Presence::Nullable);
    record.string(cx, "value", Presence::Nullable);
    record.string(cx, "description", Presence::Nullable);
    record.choice::<ParamType>(cx, "type", Presence::Required("type is required"));
    record.boolean(cx, "enabled", Presence::Optional, None);
    record.finish()
}

/// Pre-request and post-response script sources.
pub(crate) fn script(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(cx, path, value, &["req", "res"]) else {
        return Value::Null;
    };
    record.string(cx, "req", Presence::Nullable);
    record.string(cx, "res", Presence::Nullable);
    record.finish()
}

/// Pre-request and post-response variables.
pub(crate) fn vars(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(cx, path, value, &["req", "res"]) else {
        return Value::Null;
    };
    record.list(cx, "req", Presence::Nullable, var);
    record.list(cx, "res", Presence::Nullable, var);
    record.finish()
}

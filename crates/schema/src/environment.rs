//! Environment shapes.

use serde_json::Value;

use crate::validator::{Context, FieldPath, Presence, Record, choice_enum, list_of};

choice_enum! {
    /// Type of an environment variable.
    pub enum EnvironmentVariableType {
        /// Plain text value.
        Text => "text",
    }
}

fn variable(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(
        cx,
        path,
        value,
        &["uid", "name", "value", "type", "enabled", "secret"],
    ) else {
        return Value::Null;
    };
    record.uid(cx, "uid");
    record.string(cx, "name", Presence::Nullable);
    record.any(cx, "value", Presence::Nullable);
    record.choice::<EnvironmentVariableType>(cx, "type", Presence::Required("type is required"));
    record.boolean(cx, "enabled", Presence::Defined, None);
    record.boolean(cx, "secret", Presence::Optional, None);
    record.finish()
}

/// A named set of variables.
pub(crate) fn environment(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(cx, path, value, &["uid", "name", "variables"]) else {
        return Value::Null;
    };
    record.uid(cx, "uid");
    record.string_min(cx, "name", Presence::Required("name is required"), 1, None);
    record.list(
        cx,
        "variables",
        Presence::Required("variables are required"),
        variable,
    );
    record.finish()
}

/// A list of environments.
pub(crate) fn environments(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    list_of(cx, path, value, environment)
}

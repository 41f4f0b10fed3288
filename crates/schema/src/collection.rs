//! The top-level collection shape.

use serde_json::Value;

use crate::environment::environment;
use crate::item::{folder_root, item};
use crate::validator::{Context, FieldPath, Presence, Record, choice_enum, open_object};

choice_enum! {
    /// Version of the collection format.
    pub enum CollectionVersion {
        /// The only version.
        V1 => "1",
    }
}

const COLLECTION_FIELDS: &[&str] = &[
    "version",
    "uid",
    "name",
    "items",
    "activeEnvironmentUid",
    "environments",
    "pathname",
    "runnerResult",
    "runtimeVariables",
    "brunoConfig",
    "root",
];

/// A whole collection: items, environments and collection-wide defaults.
pub(crate) fn collection(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(cx, path, value, COLLECTION_FIELDS) else {
        return Value::Null;
    };
    record.choice::<CollectionVersion>(cx, "version", Presence::Required("version is required"));
    record.uid(cx, "uid");
    record.name(cx);
    record.list(cx, "items", Presence::Required("items are required"), item);
    record.uid_shaped(
        cx,
        "activeEnvironmentUid",
        Presence::Nullable,
        "activeEnvironmentUid must be 21 characters in length",
    );
    record.list(
        cx,
        "environments",
        Presence::Required("environments are required"),
        environment,
    );
    record.string(cx, "pathname", Presence::Nullable);
    record.nested(cx, "runnerResult", Presence::Optional, runner_result);
    record.nested(cx, "runtimeVariables", Presence::Optional, open_object);
    record.nested(cx, "brunoConfig", Presence::Optional, open_object);
    record.nested(cx, "root", Presence::Required("root is required"), folder_root);
    record.finish()
}

/// Results of the last collection run; only `items` is constrained.
fn runner_result(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open_with_extras(cx, path, value, &["items"]) else {
        return Value::Null;
    };
    record.list(cx, "items", Presence::Optional, |_, _, result| result.clone());
    record.finish()
}

//! Request body shapes.

use serde_json::Value;

use crate::common::key_value;
use crate::validator::{Context, FieldPath, Presence, Record, choice_enum};

choice_enum! {
    /// Encoding of an HTTP or GraphQL request body.
    pub enum BodyMode {
        /// No body.
        None => "none",
        /// JSON text.
        Json => "json",
        /// Plain text.
        Text => "text",
        /// XML text.
        Xml => "xml",
        /// `application/x-www-form-urlencoded` fields.
        FormUrlEncoded => "formUrlEncoded",
        /// `multipart/form-data` parts.
        MultipartForm => "multipartForm",
        /// GraphQL query and variables.
        Graphql => "graphql",
        /// SPARQL query text.
        Sparql => "sparql",
        /// Raw file contents.
        File => "file",
    }
}

choice_enum! {
    /// Kind of a multipart form part.
    pub enum MultipartType {
        /// One or more files, given as paths.
        File => "file",
        /// A text value.
        Text => "text",
    }
}

choice_enum! {
    /// The only body mode of a gRPC request.
    pub enum GrpcBodyMode {
        /// gRPC messages.
        Grpc => "grpc",
    }
}

choice_enum! {
    /// The only body mode of a WebSocket request.
    pub enum WsBodyMode {
        /// WebSocket messages.
        Ws => "ws",
    }
}

fn multipart_part(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(
        cx,
        path,
        value,
        &["uid", "type", "name", "value", "description", "contentType", "enabled"],
    ) else {
        return Value::Null;
    };
    record.uid(cx, "uid");
    let kind = record.choice::<MultipartType>(cx, "type", Presence::Required("type is required"));
    record.string(cx, "name", Presence::Nullable);
    if kind == Some(MultipartType::File) {
        record.list(cx, "value", Presence::Nullable, file_path);
    } else {
        record.string(cx, "value", Presence::Nullable);
    }
    record.string(cx, "description", Presence::Nullable);
    record.string(cx, "contentType", Presence::Nullable);
    record.boolean(cx, "enabled", Presence::Optional, None);
    record.finish()
}

fn file_path(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    match value {
        Value::String(_) | Value::Null => value.clone(),
        _ => {
            cx.type_error(path, "string");
            Value::Null
        }
    }
}

fn file_part(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) =
        Record::open(cx, path, value, &["uid", "filePath", "contentType", "selected"])
    else {
        return Value::Null;
    };
    record.uid(cx, "uid");
    record.string(cx, "filePath", Presence::Nullable);
    record.string(cx, "contentType", Presence::Nullable);
    record.boolean(cx, "selected", Presence::Optional, None);
    record.finish()
}

fn graphql(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(cx, path, value, &["query", "variables"]) else {
        return Value::Null;
    };
    record.string(cx, "query", Presence::Nullable);
    record.string(cx, "variables", Presence::Nullable);
    record.finish()
}

/// Body of an HTTP or GraphQL request.
///
/// Only `mode` is required; the per-mode fields are independently nullable
/// and may coexist.
pub(crate) fn request_body(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(
        cx,
        path,
        value,
        &[
            "mode",
            "json",
            "text",
            "xml",
            "sparql",
            "formUrlEncoded",
            "multipartForm",
            "graphql",
            "file",
        ],
    ) else {
        return Value::Null;
    };
    record.choice::<BodyMode>(cx, "mode", Presence::Required("mode is required"));
    record.string(cx, "json", Presence::Nullable);
    record.string(cx, "text", Presence::Nullable);
    record.string(cx, "xml", Presence::Nullable);
    record.string(cx, "sparql", Presence::Nullable);
    record.list(cx, "formUrlEncoded", Presence::Nullable, key_value);
    record.list(cx, "multipartForm", Presence::Nullable, multipart_part);
    record.nested(cx, "graphql", Presence::Nullable, graphql);
    record.list(cx, "file", Presence::Nullable, file_part);
    record.finish()
}

fn grpc_message(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(cx, path, value, &["name", "content"]) else {
        return Value::Null;
    };
    record.string(cx, "name", Presence::Nullable);
    record.string(cx, "content", Presence::Nullable);
    record.finish()
}

/// Body of a gRPC request: a list of named messages.
pub(crate) fn grpc_body(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(cx, path, value, &["mode", "grpc"]) else {
        return Value::Null;
    };
    record.choice::<GrpcBodyMode>(cx, "mode", Presence::Required("mode is required"));
    record.list(cx, "grpc", Presence::Nullable, grpc_message);
    record.finish()
}

fn ws_message(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(cx, path, value, &["name", "type", "content"]) else {
        return Value::Null;
    };
    record.string(cx, "name", Presence::Nullable);
    record.string(cx, "type", Presence::Nullable);
    record.string(cx, "content", Presence::Nullable);
    record.finish()
}

/// Body of a WebSocket request: a list of named, typed messages.
pub(crate) fn ws_body(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(cx, path, value, &["mode", "ws"]) else {
        return Value::Null;
    };
    record.choice::<WsBodyMode>(cx, "mode", Presence::Required("mode is required"));
    record.list(cx, "ws", Presence::Nullable, ws_message);
    record.finish()
}

//! Collection items: requests, folders and script files.
//!
//! An item's `type` decides which request shape applies, whether examples
//! are kept, which settings shape applies and what `root` holds. Folders
//! nest further items to any depth; the walk is a plain depth-first
//! recursion since a parsed JSON value is always a tree.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::auth::auth;
use crate::body::request_body;
use crate::common::{key_value, script, vars};
use crate::request::{self, grpc_request, http_request, ws_request};
use crate::validator::{Context, FieldPath, Presence, Record, choice_enum};

choice_enum! {
    /// Kind of a collection item.
    pub enum ItemType {
        /// HTTP request.
        HttpRequest => "http-request",
        /// GraphQL request.
        GraphqlRequest => "graphql-request",
        /// Folder of nested items.
        Folder => "folder",
        /// Shared JavaScript file.
        Js => "js",
        /// gRPC request.
        GrpcRequest => "grpc-request",
        /// WebSocket request.
        WsRequest => "ws-request",
    }
}

choice_enum! {
    /// Kind of request an example was captured from.
    pub enum ExampleType {
        /// HTTP request.
        HttpRequest => "http-request",
        /// GraphQL request.
        GraphqlRequest => "graphql-request",
        /// gRPC request.
        GrpcRequest => "grpc-request",
    }
}

choice_enum! {
    /// Content kind of a captured response body.
    pub enum ResponseBodyType {
        /// JSON.
        Json => "json",
        /// Plain text.
        Text => "text",
        /// XML.
        Xml => "xml",
        /// HTML.
        Html => "html",
        /// Binary data.
        Binary => "binary",
    }
}

impl ItemType {
    /// Item types that carry saved examples.
    #[must_use]
    pub const fn has_examples(self) -> bool {
        matches!(
            self,
            Self::HttpRequest | Self::GraphqlRequest | Self::GrpcRequest
        )
    }

    /// Item types that carry a request.
    #[must_use]
    pub const fn is_request(self) -> bool {
        !matches!(self, Self::Folder | Self::Js)
    }
}

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"));

const ITEM_FIELDS: &[&str] = &[
    "uid",
    "type",
    "seq",
    "name",
    "tags",
    "request",
    "settings",
    "fileContent",
    "root",
    "items",
    "examples",
    "filename",
    "pathname",
];

/// A collection item, recursing into nested `items`.
pub(crate) fn item(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(cx, path, value, ITEM_FIELDS) else {
        return Value::Null;
    };
    record.uid(cx, "uid");
    let item_type = record.choice::<ItemType>(cx, "type", Presence::Required("type is required"));
    tracing::trace!(path = %path, item_type = ?item_type, "dispatching item type");

    record.number(cx, "seq", Presence::Optional, (Some(1), None), None);
    record.name(cx);
    record.list(cx, "tags", Presence::Optional, tag);
    item_request(cx, &mut record, item_type);

    if item_type == Some(ItemType::WsRequest) {
        record.nested(cx, "settings", Presence::Nullable, ws_settings);
    } else {
        record.nested(cx, "settings", Presence::Nullable, http_settings);
    }

    if item_type == Some(ItemType::Js) {
        record.string(
            cx,
            "fileContent",
            Presence::Required("fileContent is required when item-type is js"),
        );
    } else {
        record.string(cx, "fileContent", Presence::Nullable);
    }

    if item_type == Some(ItemType::Folder) {
        record.nested(cx, "root", Presence::Nullable, folder_root);
    } else {
        record.any(cx, "root", Presence::Nullable);
    }

    record.list(cx, "items", Presence::Optional, item);

    if item_type.is_some_and(ItemType::has_examples) {
        record.list(cx, "examples", Presence::Nullable, example);
    } else {
        record.strip(&["examples"]);
    }

    record.string(cx, "filename", Presence::Nullable);
    record.string(cx, "pathname", Presence::Nullable);
    record.finish()
}

/// Checks `request` with the shape the item type selects.
fn item_request(cx: &mut Context, record: &mut Record<'_>, item_type: Option<ItemType>) {
    match item_type {
        Some(ItemType::GrpcRequest) => record.nested(
            cx,
            "request",
            Presence::Required("request is required when item-type is grpc-request"),
            grpc_request,
        ),
        Some(ItemType::WsRequest) => record.nested(
            cx,
            "request",
            Presence::Required("request is required when item-type is ws-request"),
            ws_request,
        ),
        Some(ItemType::HttpRequest | ItemType::GraphqlRequest) => record.nested(
            cx,
            "request",
            Presence::Required("request is required when item-type is request"),
            http_request,
        ),
        Some(kind @ (ItemType::Folder | ItemType::Js)) => record.forbid(
            cx,
            "request",
            format!("request is not allowed when item-type is {kind}"),
        ),
        None => record.nested(cx, "request", Presence::Optional, http_request),
    }
}

fn tag(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(text) = value.as_str() else {
        cx.type_error(path, "string");
        return Value::Null;
    };
    if !TAG.is_match(text) {
        cx.report(
            path,
            crate::error::ViolationKind::InvalidShape,
            "tag must be alphanumeric",
        );
    }
    value.clone()
}

fn http_settings(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(
        cx,
        path,
        value,
        &["encodeUrl", "followRedirects", "maxRedirects", "timeout"],
    ) else {
        return Value::Null;
    };
    record.boolean(cx, "encodeUrl", Presence::Nullable, None);
    record.boolean(cx, "followRedirects", Presence::Nullable, None);
    record.number(cx, "maxRedirects", Presence::Nullable, (Some(0), Some(50)), None);
    record.any(cx, "timeout", Presence::Nullable);
    record.finish()
}

fn ws_settings(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(cx, path, value, &["settings"]) else {
        return Value::Null;
    };
    record.nested(cx, "settings", Presence::Nullable, ws_timing);
    record.finish()
}

fn ws_timing(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(cx, path, value, &["timeout", "keepAliveInterval"]) else {
        return Value::Null;
    };
    record.number(cx, "timeout", Presence::Optional, (None, None), Some(500));
    record.number(cx, "keepAliveInterval", Presence::Optional, (None, None), Some(0));
    record.finish()
}

/// Folder-level defaults: shared request parts, docs and ordering metadata.
///
/// Also used for the collection root.
pub(crate) fn folder_root(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(cx, path, value, &["request", "docs", "meta"]) else {
        return Value::Null;
    };
    record.nested(cx, "request", Presence::Nullable, folder_request);
    record.string(cx, "docs", Presence::Nullable);
    record.nested(cx, "meta", Presence::Nullable, folder_meta);
    record.finish()
}

fn folder_request(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(
        cx,
        path,
        value,
        &["headers", "auth", "script", "vars", "tests"],
    ) else {
        return Value::Null;
    };
    record.list(cx, "headers", Presence::Nullable, key_value);
    record.nested(cx, "auth", Presence::Nullable, auth);
    record.nested(cx, "script", Presence::Nullable, script);
    record.nested(cx, "vars", Presence::Nullable, vars);
    record.string(cx, "tests", Presence::Nullable);
    record.finish()
}

fn folder_meta(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(cx, path, value, &["name", "seq"]) else {
        return Value::Null;
    };
    record.string(cx, "name", Presence::Nullable);
    record.number(cx, "seq", Presence::Nullable, (Some(1), None), None);
    record.finish()
}

/// A saved request/response capture of a request item.
fn example(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(
        cx,
        path,
        value,
        &["uid", "itemUid", "name", "description", "type", "request", "response"],
    ) else {
        return Value::Null;
    };
    record.uid(cx, "uid");
    record.uid(cx, "itemUid");
    record.name(cx);
    record.string(cx, "description", Presence::Nullable);
    record.choice::<ExampleType>(cx, "type", Presence::Required("type is required"));
    record.nested(cx, "request", Presence::Nullable, example_request);
    record.nested(cx, "response", Presence::Nullable, example_response);
    record.finish()
}

fn example_request(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(
        cx,
        path,
        value,
        &["url", "method", "headers", "params", "body"],
    ) else {
        return Value::Null;
    };
    request::url(cx, &mut record);
    request::method(cx, &mut record);
    request::headers(cx, &mut record);
    request::params(cx, &mut record);
    record.nested(cx, "body", Presence::Optional, request_body);
    record.finish()
}

fn example_response(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(
        cx,
        path,
        value,
        &["status", "statusText", "headers", "body"],
    ) else {
        return Value::Null;
    };
    record.string(cx, "status", Presence::Nullable);
    record.string(cx, "statusText", Presence::Nullable);
    record.list(cx, "headers", Presence::Nullable, key_value);
    record.nested(cx, "body", Presence::Nullable, example_response_body);
    record.finish()
}

fn example_response_body(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(cx, path, value, &["type", "content"]) else {
        return Value::Null;
    };
    record.choice::<ResponseBodyType>(cx, "type", Presence::Nullable);
    record.any(cx, "content", Presence::Nullable);
    record.finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::id::generate_uid;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn check(value: &Value) -> Result<Value, Vec<String>> {
        let mut cx = Context::default();
        let output = item(&mut cx, &FieldPath::root(), value);
        cx.finish(output)
            .map_err(|err| err.errors().iter().map(ToString::to_string).collect())
    }

    fn http_request_body() -> Value {
        json!({"url": "https://api.example.com", "method": "GET", "headers": [], "params": []})
    }

    #[test]
    fn test_folder_rejects_request() {
        let folder = json!({
            "uid": generate_uid(),
            "name": "Users",
            "type": "folder",
            "request": http_request_body()
        });
        assert_eq!(
            check(&folder).unwrap_err(),
            vec!["request is not allowed when item-type is folder"]
        );

        let null_request = json!({"uid": generate_uid(), "name": "Users", "type": "folder", "request": null});
        assert!(check(&null_request).is_ok());
    }

    #[test]
    fn test_js_requires_file_content() {
        let js = json!({"uid": generate_uid(), "name": "utils.js", "type": "js"});
        assert_eq!(
            check(&js).unwrap_err(),
            vec!["fileContent is required when item-type is js"]
        );
        let js = json!({"uid": generate_uid(), "name": "utils.js", "type": "js", "fileContent": ""});
        assert!(check(&js).is_ok());
    }

    #[test]
    fn test_examples_stripped_for_folders() {
        let folder = json!({
            "uid": generate_uid(),
            "name": "Users",
            "type": "folder",
            "examples": [{"not": "checked"}]
        });
        let output = check(&folder).unwrap();
        assert!(output.get("examples").is_none());
    }

    #[test]
    fn test_examples_checked_for_requests() {
        let uid = generate_uid();
        let request = json!({
            "uid": uid,
            "name": "Get Users",
            "type": "http-request",
            "request": http_request_body(),
            "examples": [{
                "uid": generate_uid(),
                "itemUid": uid,
                "name": "200 OK",
                "type": "http-request",
                "request": http_request_body(),
                "response": {
                    "status": "200",
                    "statusText": "OK",
                    "headers": [],
                    "body": {"type": "json", "content": {"users": []}}
                }
            }]
        });
        assert!(check(&request).is_ok());

        let mut bad = request;
        bad["examples"][0]["type"] = json!("ws-request");
        bad["examples"][0]["response"]["body"]["type"] = json!("yaml");
        assert_eq!(
            check(&bad).unwrap_err(),
            vec![
                "examples[0].type must be one of the following values: http-request, graphql-request, grpc-request",
                "examples[0].response.body.type must be one of the following values: json, text, xml, html, binary",
            ]
        );
    }

    #[test]
    fn test_ws_settings_defaults() {
        let ws = json!({
            "uid": generate_uid(),
            "name": "Echo",
            "type": "ws-request",
            "request": {"url": "wss://echo", "headers": [], "body": {"mode": "ws"}},
            "settings": {"settings": {"timeout": 1000}}
        });
        let output = check(&ws).unwrap();
        assert_eq!(
            output["settings"],
            json!({"settings": {"timeout": 1000, "keepAliveInterval": 0}})
        );
    }

    #[test]
    fn test_http_settings_bounds() {
        let request = json!({
            "uid": generate_uid(),
            "name": "Get Users",
            "type": "http-request",
            "request": http_request_body(),
            "settings": {"encodeUrl": true, "maxRedirects": 51, "timeout": "30s"}
        });
        assert_eq!(
            check(&request).unwrap_err(),
            vec!["settings.maxRedirects must be less than or equal to 50"]
        );
    }

    #[test]
    fn test_nested_folders_recurse() {
        let leaf = json!({"uid": generate_uid(), "name": "", "type": "http-request"});
        let tree = json!({
            "uid": generate_uid(),
            "name": "Outer",
            "type": "folder",
            "items": [{
                "uid": generate_uid(),
                "name": "Inner",
                "type": "folder",
                "root": {"meta": {"name": "Inner", "seq": 2}},
                "items": [leaf]
            }]
        });
        assert_eq!(
            check(&tree).unwrap_err(),
            vec![
                "name must be at least 1 character",
                "request is required when item-type is request",
            ]
        );
    }

    #[test]
    fn test_tags_and_seq() {
        let folder = json!({
            "uid": generate_uid(),
            "name": "Tagged",
            "type": "folder",
            "seq": 0,
            "tags": ["smoke-test", "has space"]
        });
        assert_eq!(
            check(&folder).unwrap_err(),
            vec![
                "seq must be greater than or equal to 1",
                "tag must be alphanumeric"
            ]
        );
    }

    #[test]
    fn test_tag_pattern() {
        let folder = json!({
            "uid": generate_uid(),
            "name": "Tagged",
            "type": "folder",
            "tags": ["snake_case", "kebab-case", "v2", "", "émoji", "a.b"]
        });
        assert_eq!(
            check(&folder).unwrap_err(),
            vec![
                "tag must be alphanumeric",
                "tag must be alphanumeric",
                "tag must be alphanumeric"
            ]
        );
    }

    #[test]
    fn test_examples_stripped_for_ws_and_js() {
        let ws = json!({
            "uid": generate_uid(),
            "name": "Echo",
            "type": "ws-request",
            "request": {"url": "wss://echo", "headers": [], "body": {"mode": "ws"}},
            "examples": [{"bogus": 1}]
        });
        let js = json!({
            "uid": generate_uid(),
            "name": "utils.js",
            "type": "js",
            "fileContent": "module.exports = {};",
            "examples": [{"bogus": 1}]
        });
        for item in [ws, js] {
            let output = check(&item).unwrap();
            assert!(output.get("examples").is_none());
            assert_eq!(output["name"], item["name"]);
        }
    }

    #[test]
    fn test_folder_root_shape() {
        let folder = json!({
            "uid": generate_uid(),
            "name": "Auth",
            "type": "folder",
            "root": {
                "request": {
                    "headers": [{"uid": generate_uid(), "name": "X-Team", "value": "core"}],
                    "auth": {"mode": "inherit"},
                    "script": {"req": null, "res": null},
                    "vars": {"req": [], "res": null},
                    "tests": null
                },
                "docs": "# Auth endpoints",
                "meta": {"name": "Auth", "seq": 1}
            }
        });
        assert!(check(&folder).is_ok());
    }
}

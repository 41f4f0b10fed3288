//! Request shapes for HTTP/GraphQL, gRPC and WebSocket items.

use serde_json::Value;

use crate::auth::auth;
use crate::body::{grpc_body, request_body, ws_body};
use crate::common::{assertion, key_value, param, script, vars};
use crate::validator::{Context, FieldPath, Presence, Record, choice_enum};

choice_enum! {
    /// Call style of a gRPC method.
    pub enum GrpcMethodType {
        /// Single request, single response.
        Unary => "unary",
        /// Stream of requests, single response.
        ClientStreaming => "client-streaming",
        /// Single request, stream of responses.
        ServerStreaming => "server-streaming",
        /// Streams both ways.
        BidiStreaming => "bidi-streaming",
        /// Not yet resolved from the proto definition.
        Unknown => "",
    }
}

/// The url may be empty but must be a defined string.
pub(crate) fn url(cx: &mut Context, record: &mut Record<'_>) {
    record.string(cx, "url", Presence::Defined);
}

/// The method must be a non-empty string.
pub(crate) fn method(cx: &mut Context, record: &mut Record<'_>) {
    record.string_min(
        cx,
        "method",
        Presence::Required("method is required"),
        1,
        Some("method is required"),
    );
}

pub(crate) fn headers(cx: &mut Context, record: &mut Record<'_>) {
    record.list(cx, "headers", Presence::Required("headers are required"), key_value);
}

pub(crate) fn params(cx: &mut Context, record: &mut Record<'_>) {
    record.list(cx, "params", Presence::Required("params are required"), param);
}

/// Script, vars, assertions, tests and docs: the tail every request kind shares.
fn scripting(cx: &mut Context, record: &mut Record<'_>) {
    record.nested(cx, "script", Presence::Optional, script);
    record.nested(cx, "vars", Presence::Nullable, vars);
    record.list(cx, "assertions", Presence::Nullable, assertion);
    record.string(cx, "tests", Presence::Nullable);
    record.string(cx, "docs", Presence::Nullable);
}

/// An HTTP or GraphQL request.
pub(crate) fn http_request(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(
        cx,
        path,
        value,
        &[
            "url",
            "method",
            "headers",
            "params",
            "auth",
            "body",
            "script",
            "vars",
            "assertions",
            "tests",
            "docs",
        ],
    ) else {
        return Value::Null;
    };
    url(cx, &mut record);
    method(cx, &mut record);
    headers(cx, &mut record);
    params(cx, &mut record);
    record.nested(cx, "auth", Presence::Nullable, auth);
    record.nested(cx, "body", Presence::Optional, request_body);
    scripting(cx, &mut record);
    record.finish()
}

/// A gRPC request.
pub(crate) fn grpc_request(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(
        cx,
        path,
        value,
        &[
            "url",
            "method",
            "methodType",
            "protoPath",
            "headers",
            "auth",
            "body",
            "script",
            "vars",
            "assertions",
            "tests",
            "docs",
        ],
    ) else {
        return Value::Null;
    };
    url(cx, &mut record);
    record.string(cx, "method", Presence::Optional);
    record.choice::<GrpcMethodType>(cx, "methodType", Presence::Nullable);
    record.string(cx, "protoPath", Presence::Nullable);
    headers(cx, &mut record);
    record.nested(cx, "auth", Presence::Nullable, auth);
    record.nested(cx, "body", Presence::Required("body is required"), grpc_body);
    scripting(cx, &mut record);
    record.finish()
}

/// A WebSocket request.
pub(crate) fn ws_request(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(
        cx,
        path,
        value,
        &[
            "url",
            "headers",
            "auth",
            "body",
            "script",
            "vars",
            "assertions",
            "tests",
            "docs",
        ],
    ) else {
        return Value::Null;
    };
    url(cx, &mut record);
    headers(cx, &mut record);
    record.nested(cx, "auth", Presence::Nullable, auth);
    record.nested(cx, "body", Presence::Required("body is required"), ws_body);
    scripting(cx, &mut record);
    record.finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::id::generate_uid;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn check(
        shape: fn(&mut Context, &FieldPath, &Value) -> Value,
        value: &Value,
    ) -> Result<Value, Vec<String>> {
        let mut cx = Context::default();
        let output = shape(&mut cx, &FieldPath::root(), value);
        cx.finish(output)
            .map_err(|err| err.errors().iter().map(ToString::to_string).collect())
    }

    #[test]
    fn test_minimal_http_request() {
        let request = json!({"url": "", "method": "GET", "headers": [], "params": []});
        assert_eq!(check(http_request, &request).unwrap(), request);
    }

    #[test]
    fn test_http_request_required_fields() {
        assert_eq!(
            check(http_request, &json!({})).unwrap_err(),
            vec![
                "url must be defined",
                "method is required",
                "headers are required",
                "params are required",
            ]
        );
        assert_eq!(
            check(
                http_request,
                &json!({"url": null, "method": "", "headers": [], "params": []})
            )
            .unwrap_err(),
            vec!["url cannot be null", "method is required"]
        );
    }

    #[test]
    fn test_http_request_nested_violations_carry_paths() {
        let request = json!({
            "url": "https://api.example.com/users/:id",
            "method": "GET",
            "headers": [{"uid": generate_uid(), "name": "Accept", "value": "application/json"}],
            "params": [{"uid": generate_uid(), "name": "id", "type": "header"}],
            "script": {"req": "bru.setVar('a', 1)", "res": null},
            "assertions": [{"uid": generate_uid(), "name": "res.status", "value": "200", "operator": "eq"}]
        });
        assert_eq!(
            check(http_request, &request).unwrap_err(),
            vec!["params[0].type must be one of the following values: query, path"]
        );
    }

    #[test]
    fn test_grpc_request() {
        let request = json!({
            "url": "grpc://localhost:50051",
            "method": "/helloworld.Greeter/SayHello",
            "methodType": "unary",
            "protoPath": "protos/greeter.proto",
            "headers": [],
            "body": {"mode": "grpc", "grpc": [{"name": "message 1", "content": "{}"}]}
        });
        assert!(check(grpc_request, &request).is_ok());

        let no_body = json!({"url": "", "headers": [], "methodType": ""});
        assert_eq!(
            check(grpc_request, &no_body).unwrap_err(),
            vec!["body is required"]
        );
    }

    #[test]
    fn test_grpc_request_rejects_params() {
        let request = json!({
            "url": "",
            "headers": [],
            "params": [],
            "body": {"mode": "grpc"}
        });
        assert_eq!(
            check(grpc_request, &request).unwrap_err(),
            vec!["this field has unspecified keys: params"]
        );
    }

    #[test]
    fn test_ws_request_has_no_method() {
        let request = json!({
            "url": "wss://echo.example.com",
            "method": "GET",
            "headers": [],
            "body": {"mode": "ws", "ws": []}
        });
        assert_eq!(
            check(ws_request, &request).unwrap_err(),
            vec!["this field has unspecified keys: method"]
        );
    }
}

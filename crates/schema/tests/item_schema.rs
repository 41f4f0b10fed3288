//! Item schema validation scenarios.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use collection_schema::{ITEM_SCHEMA, Schema, ViolationKind, generate_uid, validate_item};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn errors(item: &Value) -> Vec<String> {
    validate_item(item)
        .expect_err("item should be rejected")
        .errors()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn http_request() -> Value {
    json!({
        "url": "https://api.example.com/users",
        "method": "GET",
        "headers": [],
        "params": []
    })
}

#[test]
fn test_simple_folder_is_valid() {
    let item = json!({
        "uid": generate_uid(),
        "name": "A Folder",
        "type": "folder",
        "tags": ["smoke-test"]
    });

    assert!(ITEM_SCHEMA.validate(&item).is_ok());
}

#[test]
fn test_missing_name_is_rejected() {
    let item = json!({"uid": generate_uid(), "type": "folder"});

    assert_eq!(errors(&item), vec!["name is required"]);
}

#[test]
fn test_empty_name_is_rejected() {
    let item = json!({"uid": generate_uid(), "name": "", "type": "folder"});

    assert_eq!(errors(&item), vec!["name must be at least 1 character"]);
}

#[test]
fn test_http_request_item_requires_request() {
    let item = json!({"uid": generate_uid(), "name": "Get Users", "type": "http-request"});

    assert_eq!(
        errors(&item),
        vec!["request is required when item-type is request"]
    );
}

#[test]
fn test_graphql_request_item_requires_request() {
    let item = json!({"uid": generate_uid(), "name": "Get Users", "type": "graphql-request"});

    assert_eq!(
        errors(&item),
        vec!["request is required when item-type is request"]
    );
}

#[test]
fn test_grpc_and_ws_items_require_their_request() {
    let grpc = json!({"uid": generate_uid(), "name": "SayHello", "type": "grpc-request"});
    let ws = json!({"uid": generate_uid(), "name": "Echo", "type": "ws-request", "request": null});

    assert_eq!(
        errors(&grpc),
        vec!["request is required when item-type is grpc-request"]
    );
    assert_eq!(
        errors(&ws),
        vec!["request is required when item-type is ws-request"]
    );
}

#[test]
fn test_grpc_item_with_http_body_mode_is_rejected() {
    let item = json!({
        "uid": generate_uid(),
        "name": "SayHello",
        "type": "grpc-request",
        "request": {
            "url": "grpc://localhost:50051",
            "headers": [],
            "body": {"mode": "json"}
        }
    });

    assert_eq!(
        errors(&item),
        vec!["request.body.mode must be one of the following values: grpc"]
    );
}

#[test]
fn test_folder_with_request_is_a_conditional_violation() {
    let item = json!({
        "uid": generate_uid(),
        "name": "Users",
        "type": "folder",
        "request": http_request()
    });

    let err = validate_item(&item).unwrap_err();
    let violation = &err.violations()[0];
    assert_eq!(violation.kind, ViolationKind::Conditional);
    assert_eq!(violation.path, "request");
}

#[test]
fn test_uid_shape_violations() {
    let short = json!({"uid": "abc", "name": "Users", "type": "folder"});
    let symbols = json!({"uid": "abc_def_ghi_jkl_mno_p", "name": "Users", "type": "folder"});
    let both = json!({"uid": "a-b", "name": "Users", "type": "folder"});

    assert_eq!(errors(&short), vec!["uid must be 21 characters in length"]);
    assert_eq!(errors(&symbols), vec!["uid must be alphanumeric"]);
    assert_eq!(
        errors(&both),
        vec!["uid must be 21 characters in length", "uid must be alphanumeric"]
    );
}

#[test]
fn test_violations_are_collected_across_the_tree() {
    let item = json!({
        "uid": "bad",
        "type": "folder",
        "color": "red",
        "items": [{
            "uid": generate_uid(),
            "name": "Create User",
            "type": "http-request",
            "request": {
                "url": "https://api.example.com/users",
                "method": "POST",
                "headers": [{"uid": generate_uid(), "name": "Content-Type", "value": 1}],
                "params": [],
                "body": {"mode": "json", "json": "{}"}
            }
        }]
    });

    let err = validate_item(&item).unwrap_err();
    assert_eq!(
        err.errors(),
        vec![
            "this field has unspecified keys: color",
            "uid must be 21 characters in length",
            "name is required",
            "items[0].request.headers[0].value must be a `string` type",
        ]
    );
    assert_eq!(err.of_kind(ViolationKind::UnknownField).count(), 1);
}

#[test]
fn test_implicit_oauth2_strips_inapplicable_fields() {
    let item = json!({
        "uid": generate_uid(),
        "name": "Login",
        "type": "http-request",
        "request": {
            "url": "https://api.example.com/me",
            "method": "GET",
            "headers": [],
            "params": [],
            "auth": {
                "mode": "oauth2",
                "oauth2": {
                    "grantType": "implicit",
                    "username": "alice",
                    "password": "secret",
                    "accessTokenUrl": "https://idp/token",
                    "autoRefreshToken": true,
                    "callbackUrl": "https://app/callback",
                    "authorizationUrl": "https://idp/authorize",
                    "clientId": "client",
                    "scope": "openid",
                    "state": "xyz",
                    "autoFetchToken": true
                }
            }
        }
    });

    let output = ITEM_SCHEMA.validate(&item).unwrap();
    let oauth2 = &output["request"]["auth"]["oauth2"];
    for stripped in ["username", "password", "accessTokenUrl", "autoRefreshToken"] {
        assert!(oauth2.get(stripped).is_none(), "{stripped} should be stripped");
    }
    for kept in [
        "callbackUrl",
        "authorizationUrl",
        "clientId",
        "scope",
        "state",
        "autoFetchToken",
    ] {
        assert_eq!(oauth2[kept], item["request"]["auth"]["oauth2"][kept]);
    }
    assert!(item["request"]["auth"]["oauth2"].get("username").is_some());
}

#[test]
fn test_validation_is_idempotent() {
    let item = json!({
        "uid": generate_uid(),
        "name": "Login",
        "type": "http-request",
        "examples": [],
        "request": {
            "url": "https://api.example.com/token",
            "method": "POST",
            "headers": [],
            "params": [],
            "auth": {
                "mode": "oauth2",
                "oauth2": {
                    "grantType": "authorization_code",
                    "username": "ignored",
                    "tokenPlacement": "url",
                    "tokenHeaderPrefix": "ignored",
                    "tokenQueryKey": "access_token"
                }
            }
        }
    });

    let once = ITEM_SCHEMA.validate(&item).unwrap();
    let twice = ITEM_SCHEMA.validate(&once).unwrap();
    assert_eq!(once, twice);
    assert_eq!(once["request"]["auth"]["oauth2"]["pkce"], json!(false));
    assert!(once["request"]["auth"]["oauth2"].get("username").is_none());
    assert!(once["request"]["auth"]["oauth2"].get("tokenHeaderPrefix").is_none());
}

#[test]
fn test_deeply_nested_folders_validate() {
    let mut tree = json!({
        "uid": generate_uid(),
        "name": "Leaf",
        "type": "http-request",
        "request": http_request()
    });
    for depth in 0..32 {
        tree = json!({
            "uid": generate_uid(),
            "name": format!("Level {depth}"),
            "type": "folder",
            "items": [tree]
        });
    }

    assert!(validate_item(&tree).is_ok());
}

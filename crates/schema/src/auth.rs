//! Authentication shapes.
//!
//! The auth record is discriminated by `mode`; each mode has its own nullable
//! sub-record. `OAuth2` is discriminated a second time by `grantType`, and
//! fields outside the chosen grant type are stripped from the output instead
//! of being rejected.

use serde_json::Value;

use crate::validator::{Context, FieldPath, Presence, Record, choice_enum};

choice_enum! {
    /// Authentication mode of a request or folder.
    pub enum AuthMode {
        /// Use the parent folder's or collection's auth.
        Inherit => "inherit",
        /// No authentication.
        None => "none",
        /// AWS Signature Version 4.
        AwsV4 => "awsv4",
        /// HTTP Basic.
        Basic => "basic",
        /// Bearer token.
        Bearer => "bearer",
        /// HTTP Digest.
        Digest => "digest",
        /// NTLM.
        Ntlm => "ntlm",
        /// `OAuth2`.
        OAuth2 => "oauth2",
        /// WS-Security username token.
        Wsse => "wsse",
        /// API key.
        ApiKey => "apikey",
    }
}

choice_enum! {
    /// `OAuth2` grant type.
    pub enum GrantType {
        /// Client credentials grant.
        ClientCredentials => "client_credentials",
        /// Resource owner password grant.
        Password => "password",
        /// Authorization code grant, optionally with PKCE.
        AuthorizationCode => "authorization_code",
        /// Implicit grant.
        Implicit => "implicit",
    }
}

choice_enum! {
    /// Where an API key is sent.
    pub enum ApiKeyPlacement {
        /// As a request header.
        Header => "header",
        /// As a query parameter.
        QueryParams => "queryparams",
    }
}

choice_enum! {
    /// Where an extra authorization-request parameter is sent.
    pub enum AuthorizationSendIn {
        /// As a header.
        Headers => "headers",
        /// As a query parameter.
        QueryParams => "queryparams",
    }
}

choice_enum! {
    /// Where an extra token or refresh request parameter is sent.
    pub enum TokenSendIn {
        /// As a header.
        Headers => "headers",
        /// As a query parameter.
        QueryParams => "queryparams",
        /// In the form body.
        Body => "body",
    }
}

impl GrantType {
    /// Grant types that send the resource owner's `username` and `password`.
    #[must_use]
    pub const fn uses_owner_credentials(self) -> bool {
        matches!(self, Self::ClientCredentials | Self::Password)
    }

    /// Grant types that go through the browser: `callbackUrl`,
    /// `authorizationUrl`, `state` and `autoFetchToken`.
    #[must_use]
    pub const fn uses_browser_redirect(self) -> bool {
        matches!(self, Self::AuthorizationCode | Self::Implicit)
    }

    /// Grant types that call the token endpoint: `accessTokenUrl`,
    /// `clientSecret`, `credentialsPlacement`, `refreshTokenUrl` and
    /// `autoRefreshToken`.
    #[must_use]
    pub const fn uses_token_endpoint(self) -> bool {
        !matches!(self, Self::Implicit)
    }
}

const OAUTH2_FIELDS: &[&str] = &[
    "grantType",
    "username",
    "password",
    "callbackUrl",
    "authorizationUrl",
    "accessTokenUrl",
    "clientId",
    "clientSecret",
    "scope",
    "state",
    "pkce",
    "credentialsPlacement",
    "credentialsId",
    "tokenPlacement",
    "tokenHeaderPrefix",
    "tokenQueryKey",
    "refreshTokenUrl",
    "autoRefreshToken",
    "autoFetchToken",
    "additionalParameters",
];

/// Checks nullable string fields that apply to the grant type, stripping
/// them otherwise.
fn strings_if(cx: &mut Context, record: &mut Record<'_>, applies: bool, keys: &[&str]) {
    if applies {
        for key in keys {
            record.string(cx, key, Presence::Nullable);
        }
    } else {
        record.strip(keys);
    }
}

/// The `OAuth2` record, shaped by `grantType`.
fn oauth2(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(cx, path, value, OAUTH2_FIELDS) else {
        return Value::Null;
    };
    let grant = record.choice::<GrantType>(
        cx,
        "grantType",
        Presence::Required("grantType is required"),
    );
    tracing::trace!(path = %path, grant = ?grant, "dispatching oauth2 grant type");

    let known = grant.is_some();
    let owner = grant.is_some_and(GrantType::uses_owner_credentials);
    let browser = grant.is_some_and(GrantType::uses_browser_redirect);
    let token_endpoint = grant.is_some_and(GrantType::uses_token_endpoint);

    strings_if(cx, &mut record, owner, &["username", "password"]);
    strings_if(cx, &mut record, browser, &["callbackUrl", "authorizationUrl"]);
    strings_if(cx, &mut record, token_endpoint, &["accessTokenUrl"]);
    strings_if(cx, &mut record, known, &["clientId"]);
    strings_if(cx, &mut record, token_endpoint, &["clientSecret"]);
    strings_if(cx, &mut record, known, &["scope"]);
    strings_if(cx, &mut record, browser, &["state"]);

    let pkce_default = (grant == Some(GrantType::AuthorizationCode)).then_some(false);
    record.boolean(cx, "pkce", Presence::Optional, pkce_default);

    strings_if(cx, &mut record, token_endpoint, &["credentialsPlacement"]);
    strings_if(cx, &mut record, known, &["credentialsId"]);
    let placement = if known {
        record.string(cx, "tokenPlacement", Presence::Nullable)
    } else {
        record.strip(&["tokenPlacement"]);
        None
    };
    strings_if(cx, &mut record, known && placement == Some("header"), &["tokenHeaderPrefix"]);
    strings_if(cx, &mut record, known && placement == Some("url"), &["tokenQueryKey"]);
    strings_if(cx, &mut record, token_endpoint, &["refreshTokenUrl"]);

    if token_endpoint {
        record.boolean(cx, "autoRefreshToken", Presence::Optional, Some(false));
    } else {
        record.strip(&["autoRefreshToken"]);
    }
    if browser {
        record.boolean(cx, "autoFetchToken", Presence::Optional, Some(true));
    } else {
        record.strip(&["autoFetchToken"]);
    }

    record.nested(cx, "additionalParameters", Presence::Optional, |cx, path, value| {
        additional_parameters(cx, path, value, grant)
    });
    record.finish()
}

fn additional_parameters(
    cx: &mut Context,
    path: &FieldPath,
    value: &Value,
    grant: Option<GrantType>,
) -> Value {
    let Some(mut record) = Record::open(cx, path, value, &["authorization", "token", "refresh"])
    else {
        return Value::Null;
    };
    if grant == Some(GrantType::AuthorizationCode) {
        record.list(cx, "authorization", Presence::RequiredField, authorization_parameter);
    } else {
        record.any(cx, "authorization", Presence::Nullable);
    }
    record.list(cx, "token", Presence::Optional, token_parameter);
    record.list(cx, "refresh", Presence::Optional, token_parameter);
    record.finish()
}

fn authorization_parameter(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    extra_parameter::<AuthorizationSendIn>(cx, path, value)
}

fn token_parameter(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    extra_parameter::<TokenSendIn>(cx, path, value)
}

fn extra_parameter<S: crate::validator::Choice>(
    cx: &mut Context,
    path: &FieldPath,
    value: &Value,
) -> Value {
    let Some(mut record) = Record::open(cx, path, value, &["name", "value", "sendIn", "enabled"])
    else {
        return Value::Null;
    };
    record.string(cx, "name", Presence::Nullable);
    record.string(cx, "value", Presence::Nullable);
    record.choice::<S>(cx, "sendIn", Presence::Required("send in property is required"));
    record.boolean(cx, "enabled", Presence::Optional, None);
    record.finish()
}

/// A record of nullable string fields.
fn strings(cx: &mut Context, path: &FieldPath, value: &Value, keys: &[&str]) -> Value {
    let Some(mut record) = Record::open(cx, path, value, keys) else {
        return Value::Null;
    };
    for key in keys {
        record.string(cx, key, Presence::Nullable);
    }
    record.finish()
}

fn api_key(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(cx, path, value, &["key", "value", "placement"]) else {
        return Value::Null;
    };
    record.string(cx, "key", Presence::Nullable);
    record.string(cx, "value", Presence::Nullable);
    record.choice::<ApiKeyPlacement>(cx, "placement", Presence::Nullable);
    record.finish()
}

const USERNAME_PASSWORD: &[&str] = &["username", "password"];

/// The auth record attached to requests and folder roots.
pub(crate) fn auth(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    let Some(mut record) = Record::open(
        cx,
        path,
        value,
        &[
            "mode", "awsv4", "basic", "bearer", "ntlm", "digest", "oauth2", "wsse", "apikey",
        ],
    ) else {
        return Value::Null;
    };
    record.choice::<AuthMode>(cx, "mode", Presence::Required("mode is required"));
    record.nested(cx, "awsv4", Presence::Nullable, |cx, path, value| {
        strings(
            cx,
            path,
            value,
            &[
                "accessKeyId",
                "secretAccessKey",
                "sessionToken",
                "service",
                "region",
                "profileName",
            ],
        )
    });
    record.nested(cx, "basic", Presence::Nullable, |cx, path, value| {
        strings(cx, path, value, USERNAME_PASSWORD)
    });
    record.nested(cx, "bearer", Presence::Nullable, |cx, path, value| {
        strings(cx, path, value, &["token"])
    });
    record.nested(cx, "ntlm", Presence::Nullable, |cx, path, value| {
        strings(cx, path, value, &["username", "password", "domain"])
    });
    record.nested(cx, "digest", Presence::Nullable, |cx, path, value| {
        strings(cx, path, value, USERNAME_PASSWORD)
    });
    record.nested(cx, "oauth2", Presence::Nullable, oauth2);
    record.nested(cx, "wsse", Presence::Nullable, |cx, path, value| {
        strings(cx, path, value, USERNAME_PASSWORD)
    });
    record.nested(cx, "apikey", Presence::Nullable, api_key);
    record.finish()
}

//! Collection Schema - structural validation for API request collections
//!
//! This crate decides whether a collection, or any part of one (an item,
//! an environment, a request), has the shape the collection format requires.
//! Candidates are `serde_json::Value` trees; validation is pure and
//! synchronous, never mutates its input, and reports every violation at once.
//!
//! ```
//! use collection_schema::{Schema, ITEM_SCHEMA};
//! use serde_json::json;
//!
//! let folder = json!({
//!     "uid": collection_schema::generate_uid(),
//!     "name": "A Folder",
//!     "type": "folder",
//!     "tags": ["smoke-test"]
//! });
//! assert!(ITEM_SCHEMA.validate(&folder).is_ok());
//! ```

pub mod auth;
pub mod body;
pub mod collection;
pub mod common;
pub mod environment;
pub mod error;
pub mod id;
pub mod item;
pub mod options;
pub mod request;
pub mod schema;
pub mod serialization;
pub mod validator;

pub use auth::{ApiKeyPlacement, AuthMode, AuthorizationSendIn, GrantType, TokenSendIn};
pub use body::{BodyMode, GrpcBodyMode, MultipartType, WsBodyMode};
pub use collection::CollectionVersion;
pub use common::{AssertionOperator, ParamType};
pub use environment::EnvironmentVariableType;
pub use error::{SchemaError, SchemaResult, ValidationError, Violation, ViolationKind};
pub use id::{UID_LENGTH, generate_uid, is_valid_uid};
pub use item::{ExampleType, ItemType, ResponseBodyType};
pub use options::ValidateOptions;
pub use request::GrpcMethodType;
pub use schema::{
    COLLECTION_SCHEMA, CollectionSchema, ENVIRONMENT_SCHEMA, ENVIRONMENTS_SCHEMA,
    EnvironmentSchema, EnvironmentsSchema, ITEM_SCHEMA, ItemSchema, REQUEST_SCHEMA,
    RequestSchema, Schema, validate_collection, validate_environment, validate_environments,
    validate_item, validate_request,
};
pub use validator::{Choice, Context, FieldPath};

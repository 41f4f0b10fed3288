//! Closed-record validation.

use serde_json::{Map, Value};

use super::{Choice, Context, FieldPath, Presence};
use crate::error::ViolationKind;
use crate::id::{has_uid_length, is_alphanumeric};

/// What a field lookup found after its presence rule was applied.
enum Slot<'v> {
    /// Absent and allowed to be.
    Missing,
    /// Explicitly null and allowed to be.
    Null,
    /// A non-null value to check further.
    Present(&'v Value),
    /// Presence rule violated, already reported.
    Rejected,
}

/// A JSON object being checked against a record shape.
///
/// Opening a record reports every key outside the declared set. Fields are
/// then checked one by one; each check copies the accepted value into the
/// output. A declared field that no check copies is dropped from the output,
/// which is how inapplicable fields are stripped.
pub(crate) struct Record<'v> {
    path: FieldPath,
    source: &'v Map<String, Value>,
    output: Map<String, Value>,
}

impl<'v> Record<'v> {
    /// Opens `value` as a closed record declaring exactly `declared`.
    pub(crate) fn open(
        cx: &mut Context,
        path: &FieldPath,
        value: &'v Value,
        declared: &[&str],
    ) -> Option<Self> {
        let record = Self::open_with_extras(cx, path, value, declared)?;
        let unknown: Vec<&str> = record
            .source
            .keys()
            .map(String::as_str)
            .filter(|key| !declared.contains(key))
            .collect();
        if !unknown.is_empty() {
            cx.report(
                path,
                ViolationKind::UnknownField,
                format!("{path} field has unspecified keys: {}", unknown.join(", ")),
            );
        }
        Some(Self {
            output: Map::new(),
            ..record
        })
    }

    /// Opens `value` as an open record: undeclared keys pass through untouched.
    pub(crate) fn open_with_extras(
        cx: &mut Context,
        path: &FieldPath,
        value: &'v Value,
        declared: &[&str],
    ) -> Option<Self> {
        let Some(source) = value.as_object() else {
            cx.type_error(path, "object");
            return None;
        };
        let output = source
            .iter()
            .filter(|(key, _)| !declared.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Some(Self {
            path: path.clone(),
            source,
            output,
        })
    }

    /// Returns the path of one of this record's fields.
    pub(crate) fn path_of(&self, key: &str) -> FieldPath {
        self.path.key(key)
    }

    /// Returns the validated output.
    pub(crate) fn finish(self) -> Value {
        Value::Object(self.output)
    }

    fn keep(&mut self, key: &str, value: Value) {
        self.output.insert(key.to_string(), value);
    }

    fn slot(&self, cx: &mut Context, key: &str, presence: Presence) -> Slot<'v> {
        let value = self.source.get(key);
        let path = self.path_of(key);
        match (value, presence) {
            (None | Some(Value::Null), Presence::Required(message)) => {
                cx.report(&path, ViolationKind::Required, message);
                Slot::Rejected
            }
            (None | Some(Value::Null), Presence::RequiredField) => {
                cx.report(
                    &path,
                    ViolationKind::Required,
                    format!("{path} is a required field"),
                );
                Slot::Rejected
            }
            (None, Presence::Defined) => {
                cx.report(
                    &path,
                    ViolationKind::Required,
                    format!("{path} must be defined"),
                );
                Slot::Rejected
            }
            (None, _) => Slot::Missing,
            (Some(Value::Null), Presence::Nullable) => Slot::Null,
            (Some(Value::Null), _) => {
                cx.report(
                    &path,
                    ViolationKind::InvalidShape,
                    format!("{path} cannot be null"),
                );
                Slot::Rejected
            }
            (Some(value), _) => Slot::Present(value),
        }
    }

    /// Checks a string field.
    pub(crate) fn string(
        &mut self,
        cx: &mut Context,
        key: &str,
        presence: Presence,
    ) -> Option<&'v str> {
        match self.slot(cx, key, presence) {
            Slot::Present(Value::String(text)) => {
                self.keep(key, Value::String(text.clone()));
                Some(text.as_str())
            }
            Slot::Present(_) => {
                cx.type_error(&self.path_of(key), "string");
                None
            }
            Slot::Null => {
                self.keep(key, Value::Null);
                None
            }
            Slot::Missing | Slot::Rejected => None,
        }
    }

    /// Checks a string field with a minimum length.
    pub(crate) fn string_min(
        &mut self,
        cx: &mut Context,
        key: &str,
        presence: Presence,
        min: usize,
        message: Option<&'static str>,
    ) -> Option<&'v str> {
        let text = self.string(cx, key, presence)?;
        if text.chars().count() < min {
            let path = self.path_of(key);
            let message = message.map_or_else(
                || format!("{path} must be at least {min} characters"),
                str::to_string,
            );
            cx.report(&path, ViolationKind::InvalidShape, message);
        }
        Some(text)
    }

    /// Checks the required, non-empty `name` field shared by items, examples
    /// and collections.
    pub(crate) fn name(&mut self, cx: &mut Context) -> Option<&'v str> {
        self.string_min(
            cx,
            "name",
            Presence::Required("name is required"),
            1,
            Some("name must be at least 1 character"),
        )
    }

    /// Checks a required uid field: 21 alphanumeric characters.
    pub(crate) fn uid(&mut self, cx: &mut Context, key: &str) -> Option<&'v str> {
        self.uid_shaped(
            cx,
            key,
            Presence::Required("uid is required"),
            "uid must be 21 characters in length",
        )
    }

    /// Checks a uid-shaped field with its own presence rule and length message.
    pub(crate) fn uid_shaped(
        &mut self,
        cx: &mut Context,
        key: &str,
        presence: Presence,
        length_message: &'static str,
    ) -> Option<&'v str> {
        let uid = self.string(cx, key, presence)?;
        let path = self.path_of(key);
        if !has_uid_length(uid) {
            cx.report(&path, ViolationKind::InvalidShape, length_message);
        }
        if !is_alphanumeric(uid) {
            cx.report(&path, ViolationKind::InvalidShape, "uid must be alphanumeric");
        }
        Some(uid)
    }

    /// Checks a boolean field, filling `default` when it is absent.
    pub(crate) fn boolean(
        &mut self,
        cx: &mut Context,
        key: &str,
        presence: Presence,
        default: Option<bool>,
    ) -> Option<bool> {
        match self.slot(cx, key, presence) {
            Slot::Present(Value::Bool(flag)) => {
                self.keep(key, Value::Bool(*flag));
                Some(*flag)
            }
            Slot::Present(_) => {
                cx.type_error(&self.path_of(key), "boolean");
                None
            }
            Slot::Null => {
                self.keep(key, Value::Null);
                None
            }
            Slot::Missing => {
                if let Some(flag) = default {
                    self.keep(key, Value::Bool(flag));
                }
                default
            }
            Slot::Rejected => None,
        }
    }

    /// Checks a numeric field against inclusive bounds, filling `default`
    /// when it is absent.
    pub(crate) fn number(
        &mut self,
        cx: &mut Context,
        key: &str,
        presence: Presence,
        bounds: (Option<i64>, Option<i64>),
        default: Option<i64>,
    ) {
        match self.slot(cx, key, presence) {
            Slot::Present(Value::Number(number)) => {
                let path = self.path_of(key);
                let n = number.as_f64().unwrap_or_default();
                let (min, max) = bounds;
                if let Some(min) = min.filter(|&min| n < min as f64) {
                    cx.report(
                        &path,
                        ViolationKind::InvalidShape,
                        format!("{path} must be greater than or equal to {min}"),
                    );
                }
                if let Some(max) = max.filter(|&max| n > max as f64) {
                    cx.report(
                        &path,
                        ViolationKind::InvalidShape,
                        format!("{path} must be less than or equal to {max}"),
                    );
                }
                self.keep(key, Value::Number(number.clone()));
            }
            Slot::Present(_) => cx.type_error(&self.path_of(key), "number"),
            Slot::Null => self.keep(key, Value::Null),
            Slot::Missing => {
                if let Some(n) = default {
                    self.keep(key, Value::from(n));
                }
            }
            Slot::Rejected => {}
        }
    }

    /// Checks a field whose value must be one of a closed set of strings.
    pub(crate) fn choice<C: Choice>(
        &mut self,
        cx: &mut Context,
        key: &str,
        presence: Presence,
    ) -> Option<C> {
        let name = self.string(cx, key, presence)?;
        let choice = C::from_name(name);
        if choice.is_none() {
            let path = self.path_of(key);
            cx.report(
                &path,
                ViolationKind::InvalidShape,
                format!(
                    "{path} must be one of the following values: {}",
                    C::NAMES.join(", ")
                ),
            );
        }
        choice
    }

    /// Accepts a field of any type.
    pub(crate) fn any(&mut self, cx: &mut Context, key: &str, presence: Presence) {
        match self.slot(cx, key, presence) {
            Slot::Present(value) => self.keep(key, value.clone()),
            Slot::Null => self.keep(key, Value::Null),
            Slot::Missing | Slot::Rejected => {}
        }
    }

    /// Checks a list field whose every element has the shape `each`.
    pub(crate) fn list<F>(&mut self, cx: &mut Context, key: &str, presence: Presence, mut each: F)
    where
        F: FnMut(&mut Context, &FieldPath, &'v Value) -> Value,
    {
        match self.slot(cx, key, presence) {
            Slot::Present(Value::Array(elements)) => {
                let path = self.path_of(key);
                let checked = elements
                    .iter()
                    .enumerate()
                    .map(|(i, element)| each(cx, &path.index(i), element))
                    .collect();
                self.keep(key, Value::Array(checked));
            }
            Slot::Present(_) => cx.type_error(&self.path_of(key), "array"),
            Slot::Null => self.keep(key, Value::Null),
            Slot::Missing | Slot::Rejected => {}
        }
    }

    /// Checks a nested record field with the shape `shape`.
    pub(crate) fn nested<F>(&mut self, cx: &mut Context, key: &str, presence: Presence, shape: F)
    where
        F: FnOnce(&mut Context, &FieldPath, &'v Value) -> Value,
    {
        match self.slot(cx, key, presence) {
            Slot::Present(value) => {
                let checked = shape(cx, &self.path_of(key), value);
                self.keep(key, checked);
            }
            Slot::Null => self.keep(key, Value::Null),
            Slot::Missing | Slot::Rejected => {}
        }
    }

    /// Rejects a non-null value for a field the current variant forbids.
    pub(crate) fn forbid(&mut self, cx: &mut Context, key: &str, message: String) {
        match self.source.get(key) {
            None => {}
            Some(Value::Null) => self.keep(key, Value::Null),
            Some(_) => cx.report(&self.path_of(key), ViolationKind::Conditional, message),
        }
    }

    /// Drops declared fields that are inapplicable to the current variant.
    pub(crate) fn strip(&self, keys: &[&str]) {
        for key in keys.iter().filter(|key| self.source.contains_key(**key)) {
            tracing::trace!(field = %self.path_of(key), "stripping inapplicable field");
        }
    }
}

/// Checks a free-form object: any keys, any values.
pub(crate) fn open_object(cx: &mut Context, path: &FieldPath, value: &Value) -> Value {
    if value.is_object() {
        value.clone()
    } else {
        cx.type_error(path, "object");
        Value::Null
    }
}

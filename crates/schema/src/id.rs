//! Uid generation utilities.

use std::sync::LazyLock;

use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;

/// Length of every item, environment and example uid.
pub const UID_LENGTH: usize = 21;

static ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]*$").expect("valid regex"));

/// Generates a new random uid: 21 alphanumeric characters.
#[must_use]
pub fn generate_uid() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(UID_LENGTH)
        .map(char::from)
        .collect()
}

/// Returns whether `uid` has the shape of a collection uid.
#[must_use]
pub fn is_valid_uid(uid: &str) -> bool {
    has_uid_length(uid) && is_alphanumeric(uid)
}

pub(crate) fn has_uid_length(uid: &str) -> bool {
    uid.chars().count() == UID_LENGTH
}

pub(crate) fn is_alphanumeric(text: &str) -> bool {
    ALPHANUMERIC.is_match(text)
}

//! Validation options.

use serde::{Deserialize, Serialize};

/// Options controlling a single validation run.
///
/// The defaults collect every violation in the candidate tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidateOptions {
    /// Stop recording after the first violation.
    pub abort_early: bool,
}

impl ValidateOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether validation stops recording after the first violation.
    #[must_use]
    pub const fn with_abort_early(mut self, abort_early: bool) -> Self {
        self.abort_early = abort_early;
        self
    }
}

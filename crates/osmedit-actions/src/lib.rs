//! Graph actions.
//!
//! An [`Action`] is a pure transform from one [`Graph`] snapshot to the next.
//! It never mutates its input; reverting an edit means going back to the
//! snapshot the action was applied to.

use std::borrow::Cow;
use std::fmt;

use osmedit_model::Graph;
use serde::{Deserialize, Serialize};

mod error;
pub mod reverse;
pub mod split;

pub use error::{ActionError, Result};
pub use reverse::ReverseAction;
pub use split::SplitAction;

/// Why an action (or an operation wrapping it) cannot run.
///
/// The set of reasons is open: each one names the suffix of a localization
/// key such as `operations.split.not_eligible`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisabledReason(Cow<'static, str>);

impl DisabledReason {
    pub const NOT_ELIGIBLE: Self = Self(Cow::Borrowed("not_eligible"));
    pub const CONNECTED_TO_HIDDEN: Self = Self(Cow::Borrowed("connected_to_hidden"));

    pub fn new(reason: impl Into<Cow<'static, str>>) -> Self {
        Self(reason.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisabledReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait Action: fmt::Debug {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// The reason this action cannot be applied to `graph`, if any.
    fn disabled(&self, _graph: &Graph) -> Option<DisabledReason> {
        None
    }

    /// Compute the snapshot that results from applying this action to `graph`.
    fn apply(&self, graph: &Graph) -> Result<Graph>;
}

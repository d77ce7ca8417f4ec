//! Validation rules.

use std::fmt;
use std::sync::Arc;

use osmedit_core::Context;
use osmedit_model::Entity;

use crate::issue::Issue;

mod impossible_oneway;

pub use impossible_oneway::{ImpossibleOneway, WayType};

/// A check run against one entity at a time.
///
/// Rules only read the context. Data that is missing or not loaded yet
/// produces no issue rather than an error.
pub trait ValidationRule: fmt::Debug {
    /// Issue type this rule emits, e.g. `impossible_oneway`.
    fn id(&self) -> &'static str;

    fn validate(&self, entity: &Entity, context: &Context) -> Vec<Arc<Issue>>;
}

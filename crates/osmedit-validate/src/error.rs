use thiserror::Error;

use osmedit_core::ContextError;
use osmedit_model::EntityId;

/// Failure while applying a fix.
///
/// Fixes act on the graph as it is when they are clicked, which may differ
/// from the graph the issue was found in.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FixError {
    #[error("the issue this fix belongs to has been discarded")]
    IssueDropped,

    #[error("issue does not reference an entity at position {0}")]
    MissingEntityRef(usize),

    /// The entity changed shape since validation.
    #[error("entity {0} no longer matches the issue")]
    StaleEntity(EntityId),

    #[error(transparent)]
    Context(#[from] ContextError),
}

pub type Result<T> = std::result::Result<T, FixError>;

use thiserror::Error;

use osmedit_model::ModelError;

use crate::DisabledReason;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ActionError {
    /// The action's preconditions do not hold for this graph.
    #[error("{action} is disabled: {reason}")]
    Disabled {
        action: &'static str,
        reason: DisabledReason,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, ActionError>;

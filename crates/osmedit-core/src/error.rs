use thiserror::Error;

use osmedit_actions::ActionError;
use osmedit_model::ModelError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContextError {
    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Model(#[from] ModelError),

    /// The operation is not available for the current selection.
    #[error("operation {operation} is not available for this selection")]
    Unavailable { operation: &'static str },

    #[error("invalid locale strings: {0}")]
    Locale(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ContextError>;

//! Error types for the graph model.

use thiserror::Error;

use crate::ids::{EntityId, EntityKind};

/// Errors raised while reading or building graph snapshots.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// The entity ID string could not be parsed.
    #[error("invalid entity id '{0}'")]
    InvalidEntityId(String),

    /// The graph has no entity with this ID.
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    /// The entity exists but is of another kind.
    #[error("entity {id} is not a {expected}")]
    WrongKind { id: EntityId, expected: EntityKind },

    /// A way references a node that is not part of the document.
    #[error("way {way} references missing node {node}")]
    DanglingNode { way: EntityId, node: EntityId },

    /// Failed to parse a tag vocabulary file.
    #[error("invalid tag vocabulary: {0}")]
    Vocabulary(#[from] toml::de::Error),

    /// Failed to render a tag vocabulary as TOML.
    #[error("cannot write tag vocabulary: {0}")]
    VocabularyWrite(#[from] toml::ser::Error),

    /// Failed to parse or write a graph document.
    #[error("invalid graph document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;

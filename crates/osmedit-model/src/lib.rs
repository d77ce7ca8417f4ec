//! Editable map graph model.
//!
//! Entities ([`Node`], [`Way`]) live in immutable [`Graph`] snapshots. Edits
//! produce new snapshots; [`Difference`] describes what changed between two
//! of them.

pub mod difference;
pub mod document;
pub mod entity;
pub mod error;
pub mod extent;
pub mod geometry;
pub mod graph;
pub mod ids;
pub mod vocabulary;

pub use difference::Difference;
pub use document::GraphDocument;
pub use entity::{Affix, Entity, Loc, Node, Tags, Way};
pub use error::{ModelError, Result};
pub use extent::Extent;
pub use geometry::Geometry;
pub use graph::Graph;
pub use ids::{EntityId, EntityKind};
pub use vocabulary::{DEFAULT_VOCABULARY, TagVocabulary};

/// Build a [`Tags`] map from string pairs.
pub fn tags<K, V, I>(pairs: I) -> Tags
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

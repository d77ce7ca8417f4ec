//! Map entities: nodes and ways.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::{EntityId, EntityKind};

/// Free-form `key=value` tags. Ordered so that output is deterministic.
pub type Tags = BTreeMap<String, String>;

/// A WGS84 position, serialized as `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Loc {
    pub lon: f64,
    pub lat: f64,
}

impl Loc {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<[f64; 2]> for Loc {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<Loc> for [f64; 2] {
    fn from(loc: Loc) -> Self {
        [loc.lon, loc.lat]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: EntityId,
    pub loc: Loc,
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

impl Node {
    pub fn new(id: EntityId, loc: Loc) -> Self {
        Self {
            id,
            loc,
            tags: Tags::new(),
        }
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }
}

/// Which end of a way a node sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Affix {
    /// The node is the first node of the way.
    Prefix,
    /// The node is the last node of the way.
    Suffix,
}

/// An ordered path through nodes. Closed ways repeat their first node at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Way {
    pub id: EntityId,
    pub nodes: Vec<EntityId>,
    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

impl Way {
    pub fn new(id: EntityId, nodes: Vec<EntityId>) -> Self {
        Self {
            id,
            nodes,
            tags: Tags::new(),
        }
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    pub fn first(&self) -> Option<EntityId> {
        self.nodes.first().copied()
    }

    pub fn last(&self) -> Option<EntityId> {
        self.nodes.last().copied()
    }

    pub fn is_closed(&self) -> bool {
        self.nodes.len() > 1 && self.first() == self.last()
    }

    pub fn contains(&self, node: EntityId) -> bool {
        self.nodes.contains(&node)
    }

    /// Number of times `node` appears in the node list.
    pub fn occurrences(&self, node: EntityId) -> usize {
        self.nodes.iter().filter(|id| **id == node).count()
    }

    /// Position of `node` if it is one of the way's endpoints.
    pub fn affix(&self, node: EntityId) -> Option<Affix> {
        if self.first() == Some(node) {
            Some(Affix::Prefix)
        } else if self.last() == Some(node) {
            Some(Affix::Suffix)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entity {
    Node(Node),
    Way(Way),
}

impl Entity {
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Node(node) => node.id,
            Entity::Way(way) => way.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Node(_) => EntityKind::Node,
            Entity::Way(_) => EntityKind::Way,
        }
    }

    pub fn tags(&self) -> &Tags {
        match self {
            Entity::Node(node) => &node.tags,
            Entity::Way(way) => &way.tags,
        }
    }

    /// Value of tag `key`, if present.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags().get(key).map(String::as_str)
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Entity::Node(node) => Some(node),
            Entity::Way(_) => None,
        }
    }

    pub fn as_way(&self) -> Option<&Way> {
        match self {
            Entity::Way(way) => Some(way),
            Entity::Node(_) => None,
        }
    }
}

impl From<Node> for Entity {
    fn from(node: Node) -> Self {
        Entity::Node(node)
    }
}

impl From<Way> for Entity {
    fn from(way: Way) -> Self {
        Entity::Way(way)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn way(nodes: &[i64]) -> Way {
        Way::new(
            EntityId::way(1),
            nodes.iter().map(|n| EntityId::node(*n)).collect(),
        )
    }

    #[test]
    fn closed_ways_repeat_their_first_node() {
        assert!(way(&[1, 2, 3, 1]).is_closed());
        assert!(!way(&[1, 2, 3]).is_closed());
        assert!(!way(&[1]).is_closed());
    }

    #[test]
    fn affix_reports_endpoint_role() {
        let w = way(&[1, 2, 3]);
        assert_eq!(w.affix(EntityId::node(1)), Some(Affix::Prefix));
        assert_eq!(w.affix(EntityId::node(3)), Some(Affix::Suffix));
        assert_eq!(w.affix(EntityId::node(2)), None);
    }

    #[test]
    fn loc_serializes_as_pair() {
        let json = serde_json::to_string(&Loc::new(1.5, -2.0)).unwrap();
        assert_eq!(json, "[1.5,-2.0]");
    }
}

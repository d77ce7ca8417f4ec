//! Geometry classification of entities within a graph.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Way};
use crate::error::Result;
use crate::graph::Graph;
use crate::ids::EntityId;
use crate::vocabulary::TagVocabulary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Geometry {
    /// A node that is not part of any way.
    Point,
    /// A node that is part of at least one way.
    Vertex,
    Line,
    Area,
}

impl Geometry {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Geometry::Point => "point",
            Geometry::Vertex => "vertex",
            Geometry::Line => "line",
            Geometry::Area => "area",
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Way {
    /// `area=yes`, or a closed way carrying an area-implying tag without `area=no`.
    pub fn is_area(&self, vocabulary: &TagVocabulary) -> bool {
        match self.tags.get("area").map(String::as_str) {
            Some("yes") => return true,
            Some("no") => return false,
            _ => {}
        }
        self.is_closed() && vocabulary.tag_suggesting_area(&self.tags).is_some()
    }
}

impl Graph {
    /// Classify an entity the way the editor presents it.
    pub fn geometry(&self, id: EntityId, vocabulary: &TagVocabulary) -> Result<Geometry> {
        Ok(self.entity_geometry(self.entity(id)?, vocabulary))
    }

    pub fn entity_geometry(&self, entity: &Entity, vocabulary: &TagVocabulary) -> Geometry {
        match entity {
            Entity::Node(node) => {
                if self.parent_ways(node.id).is_empty() {
                    Geometry::Point
                } else {
                    Geometry::Vertex
                }
            }
            Entity::Way(way) => {
                if way.is_area(vocabulary) {
                    Geometry::Area
                } else {
                    Geometry::Line
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Loc, Node, Tags};

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn classifies_nodes_and_ways() {
        let vocabulary = TagVocabulary::embedded().unwrap();
        let n = |i| EntityId::node(i);
        let graph = Graph::from_entities([
            Node::new(n(1), Loc::new(0.0, 0.0)).into(),
            Node::new(n(2), Loc::new(1.0, 0.0)).into(),
            Node::new(n(3), Loc::new(1.0, 1.0)).into(),
            Node::new(n(9), Loc::new(5.0, 5.0)).into(),
            Way::new(EntityId::way(1), vec![n(1), n(2), n(3), n(1)])
                .with_tags(tags(&[("building", "yes")]))
                .into(),
            Way::new(EntityId::way(2), vec![n(1), n(2), n(3), n(1)])
                .with_tags(tags(&[("highway", "residential")]))
                .into(),
            Way::new(EntityId::way(3), vec![n(1), n(2)])
                .with_tags(tags(&[("area", "yes")]))
                .into(),
        ]);
        let geometry = |id| graph.geometry(id, &vocabulary).unwrap();

        assert_eq!(geometry(n(9)), Geometry::Point);
        assert_eq!(geometry(n(1)), Geometry::Vertex);
        assert_eq!(geometry(EntityId::way(1)), Geometry::Area);
        assert_eq!(geometry(EntityId::way(2)), Geometry::Line);
        assert_eq!(geometry(EntityId::way(3)), Geometry::Area);
    }
}

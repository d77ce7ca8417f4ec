//! Split ways at a vertex.
//!
//! Every eligible parent way of the vertex is cut in two. The original way
//! keeps its ID and the first half; a new way with a freshly allocated ID and
//! a copy of the tags takes the second half.
//!
//! A way is eligible when the vertex is one of its interior nodes, or when the
//! way is closed. Closed ways are cut at the vertex and at the node half-way
//! around the ring, so both halves are open ways.

use std::sync::Arc;

use osmedit_model::{EntityId, EntityKind, Graph, TagVocabulary, Way};
use tracing::debug;

use crate::{Action, ActionError, DisabledReason, Result};

#[derive(Debug, Clone)]
pub struct SplitAction {
    vertex: EntityId,
    limit: Option<Vec<EntityId>>,
    vocabulary: Arc<TagVocabulary>,
}

impl SplitAction {
    pub fn new(vertex: EntityId, vocabulary: Arc<TagVocabulary>) -> Self {
        Self {
            vertex,
            limit: None,
            vocabulary,
        }
    }

    pub fn vertex(&self) -> EntityId {
        self.vertex
    }

    /// Only split the given ways.
    pub fn limit_ways(&mut self, ids: impl IntoIterator<Item = EntityId>) -> &mut Self {
        self.limit = Some(ids.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, ids: impl IntoIterator<Item = EntityId>) -> Self {
        self.limit_ways(ids);
        self
    }

    pub fn limited_ways(&self) -> Option<&[EntityId]> {
        self.limit.as_deref()
    }

    /// Parent ways of the vertex that this action would split.
    ///
    /// Without an explicit limit, areas are skipped whenever the vertex also
    /// belongs to a line.
    pub fn ways<'g>(&self, graph: &'g Graph) -> Vec<&'g Way> {
        let parents = graph.parent_ways(self.vertex);
        let has_lines = parents.iter().any(|way| !way.is_area(&self.vocabulary));

        parents
            .into_iter()
            .filter(|way| match &self.limit {
                Some(limit) => limit.contains(&way.id),
                None => !(has_lines && way.is_area(&self.vocabulary)),
            })
            .filter(|way| way.is_closed() || is_interior(way, self.vertex))
            .collect()
    }
}

impl Action for SplitAction {
    fn name(&self) -> &'static str {
        "split"
    }

    fn disabled(&self, graph: &Graph) -> Option<DisabledReason> {
        let candidates = self.ways(graph);
        let limit_unmet = self
            .limit
            .as_ref()
            .is_some_and(|limit| limit.len() != candidates.len());
        if candidates.is_empty() || limit_unmet {
            return Some(DisabledReason::NOT_ELIGIBLE);
        }
        None
    }

    fn apply(&self, graph: &Graph) -> Result<Graph> {
        if let Some(reason) = self.disabled(graph) {
            return Err(ActionError::Disabled {
                action: self.name(),
                reason,
            });
        }
        let candidates: Vec<Way> = self.ways(graph).into_iter().cloned().collect();
        let mut head = graph.clone();
        for way in &candidates {
            let new_id = split_way(&mut head, way, self.vertex);
            debug!(vertex = %self.vertex, way = %way.id, new_way = %new_id, "split way");
        }
        Ok(head)
    }
}

fn is_interior(way: &Way, vertex: EntityId) -> bool {
    let len = way.nodes.len();
    len > 2 && way.nodes[1..len - 1].contains(&vertex)
}

/// Cut `way` at `vertex` inside `graph`, returning the ID of the new way.
fn split_way(graph: &mut Graph, way: &Way, vertex: EntityId) -> EntityId {
    let (nodes_a, nodes_b) = if way.is_closed() {
        split_ring(&way.nodes[..way.nodes.len() - 1], vertex)
    } else {
        split_path(&way.nodes, vertex)
    };

    let new_id = graph.allocate_id(EntityKind::Way);
    let way_a = Way {
        nodes: nodes_a,
        ..way.clone()
    };
    let way_b = Way::new(new_id, nodes_b).with_tags(way.tags.clone());
    graph.replace(way_a);
    graph.replace(way_b);
    new_id
}

/// Split an open node list at the first non-leading occurrence of `vertex`.
fn split_path(nodes: &[EntityId], vertex: EntityId) -> (Vec<EntityId>, Vec<EntityId>) {
    let idx = nodes
        .iter()
        .skip(1)
        .position(|id| *id == vertex)
        .map_or(nodes.len() - 1, |pos| pos + 1);
    (nodes[..=idx].to_vec(), nodes[idx..].to_vec())
}

/// Split a ring (closing node removed) at `vertex` and at the node opposite it.
fn split_ring(ring: &[EntityId], vertex: EntityId) -> (Vec<EntityId>, Vec<EntityId>) {
    let len = ring.len();
    let idx_a = ring.iter().position(|id| *id == vertex).unwrap_or(0);
    let idx_b = idx_a + len / 2;

    if idx_b >= len {
        let idx_b = idx_b % len;
        let mut nodes_a = ring[idx_a..].to_vec();
        nodes_a.extend_from_slice(&ring[..=idx_b]);
        (nodes_a, ring[idx_b..=idx_a].to_vec())
    } else {
        let mut nodes_b = ring[idx_b..].to_vec();
        nodes_b.extend_from_slice(&ring[..=idx_a]);
        (ring[idx_a..=idx_b].to_vec(), nodes_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(numbers: &[i64]) -> Vec<EntityId> {
        numbers.iter().map(|n| EntityId::node(*n)).collect()
    }

    #[test]
    fn path_splits_at_first_interior_occurrence() {
        let (a, b) = split_path(&ids(&[1, 2, 3, 2, 4]), EntityId::node(2));
        assert_eq!(a, ids(&[1, 2]));
        assert_eq!(b, ids(&[2, 3, 2, 4]));
    }

    #[test]
    fn ring_splits_opposite_the_vertex() {
        let ring = ids(&[1, 2, 3, 4]);
        assert_eq!(
            split_ring(&ring, EntityId::node(1)),
            (ids(&[1, 2, 3]), ids(&[3, 4, 1]))
        );
        assert_eq!(
            split_ring(&ring, EntityId::node(4)),
            (ids(&[4, 1, 2]), ids(&[2, 3, 4]))
        );
    }

    #[test]
    fn odd_ring_wraps_around() {
        let ring = ids(&[1, 2, 3, 4, 5]);
        assert_eq!(
            split_ring(&ring, EntityId::node(4)),
            (ids(&[4, 5, 1]), ids(&[1, 2, 3, 4]))
        );
    }
}

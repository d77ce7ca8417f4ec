//! Immutable-per-version graph snapshots.
//!
//! A [`Graph`] is a value: cloning it is cheap (the entity table and the
//! parent-way index are shared behind `Arc`s) and mutating a clone through
//! [`Graph::replace`] or [`Graph::remove`] copies the shared tables first, so
//! every other holder of the original snapshot keeps seeing the old state.
//! Actions take `&Graph` and hand back a new `Graph`; nothing edits a
//! snapshot that someone else can observe.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::entity::{Entity, Node, Way};
use crate::error::{ModelError, Result};
use crate::ids::{EntityId, EntityKind};

#[derive(Debug, Clone, Default)]
pub struct Graph {
    entities: Arc<BTreeMap<EntityId, Arc<Entity>>>,
    /// node ID -> IDs of the ways referencing it
    parents: Arc<BTreeMap<EntityId, BTreeSet<EntityId>>>,
    allocated_nodes: i64,
    allocated_ways: i64,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from loaded entities.
    ///
    /// Ways may reference nodes that are absent; those are treated as unloaded.
    pub fn from_entities<I>(entities: I) -> Self
    where
        I: IntoIterator<Item = Entity>,
    {
        let mut graph = Self::new();
        for entity in entities {
            graph.replace(entity);
        }
        graph
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn has_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id).map(Arc::as_ref)
    }

    pub fn entity(&self, id: EntityId) -> Result<&Entity> {
        self.has_entity(id).ok_or(ModelError::EntityNotFound(id))
    }

    pub fn node(&self, id: EntityId) -> Result<&Node> {
        self.entity(id)?.as_node().ok_or(ModelError::WrongKind {
            id,
            expected: EntityKind::Node,
        })
    }

    pub fn way(&self, id: EntityId) -> Result<&Way> {
        self.entity(id)?.as_way().ok_or(ModelError::WrongKind {
            id,
            expected: EntityKind::Way,
        })
    }

    /// All entities in ID order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values().map(Arc::as_ref)
    }

    pub fn ways(&self) -> impl Iterator<Item = &Way> {
        self.entities().filter_map(Entity::as_way)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.entities().filter_map(Entity::as_node)
    }

    /// Ways that reference `node`, in ID order.
    pub fn parent_ways(&self, node: EntityId) -> Vec<&Way> {
        let Some(parents) = self.parents.get(&node) else {
            return Vec::new();
        };
        parents
            .iter()
            .filter_map(|id| self.has_entity(*id))
            .filter_map(Entity::as_way)
            .collect()
    }

    /// True when more than one way passes through `node`.
    pub fn is_shared(&self, node: EntityId) -> bool {
        self.parents.get(&node).is_some_and(|set| set.len() > 1)
    }

    /// True when `id` resolves to equal entities (or to nothing) in both snapshots.
    pub fn same_entity(&self, other: &Graph, id: EntityId) -> bool {
        match (self.entities.get(&id), other.entities.get(&id)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a == b,
            (None, None) => true,
            _ => false,
        }
    }

    /// Insert or overwrite an entity, keeping the parent-way index current.
    pub fn replace(&mut self, entity: impl Into<Entity>) {
        let entity = entity.into();
        let id = entity.id();
        if let Some(previous) = self.entities.get(&id).cloned() {
            if let Entity::Way(way) = previous.as_ref() {
                self.unlink(way);
            }
        }
        if let Entity::Way(way) = &entity {
            self.link(way);
        }
        Arc::make_mut(&mut self.entities).insert(id, Arc::new(entity));
    }

    /// Remove an entity. Removing an absent ID is a no-op.
    pub fn remove(&mut self, id: EntityId) {
        let Some(previous) = self.entities.get(&id).cloned() else {
            return;
        };
        if let Entity::Way(way) = previous.as_ref() {
            self.unlink(way);
        }
        Arc::make_mut(&mut self.entities).remove(&id);
    }

    /// Allocate a fresh negative ID that is unused in this snapshot.
    pub fn allocate_id(&mut self, kind: EntityKind) -> EntityId {
        loop {
            let counter = match kind {
                EntityKind::Node => &mut self.allocated_nodes,
                EntityKind::Way => &mut self.allocated_ways,
            };
            *counter += 1;
            let id = EntityId::new(kind, -*counter);
            if !self.entities.contains_key(&id) {
                return id;
            }
        }
    }

    fn link(&mut self, way: &Way) {
        let parents = Arc::make_mut(&mut self.parents);
        for node in &way.nodes {
            parents.entry(*node).or_default().insert(way.id);
        }
    }

    fn unlink(&mut self, way: &Way) {
        let parents = Arc::make_mut(&mut self.parents);
        for node in &way.nodes {
            if let Some(set) = parents.get_mut(node) {
                set.remove(&way.id);
                if set.is_empty() {
                    parents.remove(node);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Loc;

    fn sample() -> Graph {
        Graph::from_entities([
            Node::new(EntityId::node(1), Loc::new(0.0, 0.0)).into(),
            Node::new(EntityId::node(2), Loc::new(1.0, 0.0)).into(),
            Node::new(EntityId::node(3), Loc::new(2.0, 0.0)).into(),
            Way::new(EntityId::way(1), vec![EntityId::node(1), EntityId::node(2)]).into(),
            Way::new(EntityId::way(2), vec![EntityId::node(2), EntityId::node(3)]).into(),
        ])
    }

    #[test]
    fn parent_ways_follow_replacements() {
        let mut graph = sample();
        let ids: Vec<_> = graph
            .parent_ways(EntityId::node(2))
            .iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(ids, vec![EntityId::way(1), EntityId::way(2)]);
        assert!(graph.is_shared(EntityId::node(2)));

        graph.replace(Way::new(
            EntityId::way(2),
            vec![EntityId::node(1), EntityId::node(3)],
        ));
        assert!(!graph.is_shared(EntityId::node(2)));
        assert_eq!(graph.parent_ways(EntityId::node(1)).len(), 2);
    }

    #[test]
    fn clones_are_isolated() {
        let original = sample();
        let mut edited = original.clone();
        edited.remove(EntityId::way(1));

        assert!(original.has_entity(EntityId::way(1)).is_some());
        assert!(edited.has_entity(EntityId::way(1)).is_none());
        assert_eq!(original.parent_ways(EntityId::node(1)).len(), 1);
        assert!(edited.parent_ways(EntityId::node(1)).is_empty());
    }

    #[test]
    fn allocation_skips_existing_ids() {
        let mut graph = sample();
        graph.replace(Way::new(EntityId::way(-1), vec![]));
        assert_eq!(graph.allocate_id(EntityKind::Way), EntityId::way(-2));
        assert_eq!(graph.allocate_id(EntityKind::Node), EntityId::node(-1));
    }

    #[test]
    fn typed_lookups_report_kind_mismatch() {
        let graph = sample();
        assert!(graph.way(EntityId::way(1)).is_ok());
        assert!(matches!(
            graph.way(EntityId::node(1)),
            Err(ModelError::EntityNotFound(_) | ModelError::WrongKind { .. })
        ));
        assert!(matches!(
            graph.node(EntityId::node(9)),
            Err(ModelError::EntityNotFound(_))
        ));
    }
}

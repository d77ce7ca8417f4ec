//! Changes between two graph snapshots.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::graph::Graph;
use crate::ids::EntityId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difference {
    pub created: BTreeSet<EntityId>,
    pub modified: BTreeSet<EntityId>,
    pub deleted: BTreeSet<EntityId>,
}

impl Difference {
    pub fn between(base: &Graph, head: &Graph) -> Self {
        let mut difference = Self::default();
        for entity in head.entities() {
            let id = entity.id();
            match base.has_entity(id) {
                None => {
                    difference.created.insert(id);
                }
                Some(_) if !base.same_entity(head, id) => {
                    difference.modified.insert(id);
                }
                Some(_) => {}
            }
        }
        for entity in base.entities() {
            if head.has_entity(entity.id()).is_none() {
                difference.deleted.insert(entity.id());
            }
        }
        difference
    }

    /// Entities that were created or modified and therefore exist in the head graph.
    pub fn extant_ids(&self) -> Vec<EntityId> {
        self.created
            .union(&self.modified)
            .copied()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.created.len() + self.modified.len() + self.deleted.len()
    }
}

//! JSON graph documents used to load and save snapshots.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Node, Way};
use crate::error::{ModelError, Result};
use crate::graph::Graph;
use crate::ids::EntityId;

/// `{ "nodes": [...], "ways": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub ways: Vec<Way>,
}

impl GraphDocument {
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            nodes: graph.nodes().cloned().collect(),
            ways: graph.ways().cloned().collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a graph, rejecting ways that reference nodes missing from the document.
    pub fn into_graph(self) -> Result<Graph> {
        let node_ids: BTreeSet<EntityId> = self.nodes.iter().map(|node| node.id).collect();
        for way in &self.ways {
            if let Some(node) = way.nodes.iter().find(|id| !node_ids.contains(id)) {
                return Err(ModelError::DanglingNode {
                    way: way.id,
                    node: *node,
                });
            }
        }
        let entities = self
            .nodes
            .into_iter()
            .map(Entity::Node)
            .chain(self.ways.into_iter().map(Entity::Way));
        Ok(Graph::from_entities(entities))
    }
}

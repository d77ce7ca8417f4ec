//! Feature filtering: classes of features the user has hidden from the map.
//!
//! Entities created in the current session are never hidden. A vertex is
//! hidden only when every way it belongs to is hidden.

use std::collections::BTreeSet;

use osmedit_model::{Entity, EntityId, Geometry, Graph, TagVocabulary, Way};
use serde::{Deserialize, Serialize};

/// A hideable class of map features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Points,
    TrafficRoads,
    ServiceRoads,
    Paths,
    Buildings,
    Water,
    Rail,
    Others,
}

const TRAFFIC_ROADS: &[&str] = &[
    "motorway",
    "motorway_link",
    "trunk",
    "trunk_link",
    "primary",
    "primary_link",
    "secondary",
    "secondary_link",
    "tertiary",
    "tertiary_link",
    "residential",
    "unclassified",
    "living_street",
    "busway",
];

const SERVICE_ROADS: &[&str] = &["service", "road", "track"];

const PATHS: &[&str] = &[
    "path",
    "footway",
    "cycleway",
    "bridleway",
    "steps",
    "corridor",
    "pedestrian",
];

const WATER_NATURAL: &[&str] = &["water", "coastline", "bay", "spring", "strait"];
const WATER_LANDUSE: &[&str] = &["pond", "basin", "reservoir", "salt_pond"];

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::Points,
        Feature::TrafficRoads,
        Feature::ServiceRoads,
        Feature::Paths,
        Feature::Buildings,
        Feature::Water,
        Feature::Rail,
        Feature::Others,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Feature::Points => "points",
            Feature::TrafficRoads => "traffic_roads",
            Feature::ServiceRoads => "service_roads",
            Feature::Paths => "paths",
            Feature::Buildings => "buildings",
            Feature::Water => "water",
            Feature::Rail => "rail",
            Feature::Others => "others",
        }
    }

    /// Parse a feature class name such as `traffic_roads`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|feature| feature.as_str() == s)
    }

    /// Feature classes an entity with the given geometry belongs to.
    pub fn matches(entity: &Entity, geometry: Geometry) -> Vec<Feature> {
        if geometry == Geometry::Point {
            return vec![Feature::Points];
        }
        let tag = |key| entity.tag(key);
        let mut matches = Vec::new();

        if let Some(highway) = tag("highway") {
            if TRAFFIC_ROADS.contains(&highway) {
                matches.push(Feature::TrafficRoads);
            } else if SERVICE_ROADS.contains(&highway) {
                matches.push(Feature::ServiceRoads);
            } else if PATHS.contains(&highway) {
                matches.push(Feature::Paths);
            }
        }
        if tag("building").is_some_and(|v| v != "no") || tag("building:part").is_some() {
            matches.push(Feature::Buildings);
        }
        if tag("waterway").is_some_and(|v| v != "dam")
            || tag("natural").is_some_and(|v| WATER_NATURAL.contains(&v))
            || tag("landuse").is_some_and(|v| WATER_LANDUSE.contains(&v))
        {
            matches.push(Feature::Water);
        }
        if tag("railway").is_some_and(|v| v != "platform" && v != "abandoned") {
            matches.push(Feature::Rail);
        }
        if matches.is_empty() {
            matches.push(Feature::Others);
        }
        matches
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeatureFilter {
    hidden: BTreeSet<Feature>,
}

impl FeatureFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hide(&mut self, feature: Feature) {
        self.hidden.insert(feature);
    }

    pub fn show(&mut self, feature: Feature) {
        self.hidden.remove(&feature);
    }

    pub fn hidden(&self) -> impl Iterator<Item = Feature> + '_ {
        self.hidden.iter().copied()
    }

    pub fn is_feature_hidden(&self, feature: Feature) -> bool {
        self.hidden.contains(&feature)
    }

    /// Whether `entity` is currently filtered out of the map.
    pub fn is_hidden(&self, entity: &Entity, graph: &Graph, vocabulary: &TagVocabulary) -> bool {
        if self.hidden.is_empty() || entity.id().is_new() {
            return false;
        }
        let geometry = graph.entity_geometry(entity, vocabulary);
        if geometry == Geometry::Vertex {
            return self.is_hidden_child(entity.id(), graph, vocabulary);
        }
        Feature::matches(entity, geometry)
            .into_iter()
            .all(|feature| self.is_feature_hidden(feature))
    }

    fn is_hidden_child(&self, node: EntityId, graph: &Graph, vocabulary: &TagVocabulary) -> bool {
        let parents = graph.parent_ways(node);
        !parents.is_empty()
            && parents.iter().all(|way| {
                graph
                    .has_entity(way.id)
                    .is_some_and(|parent| self.is_hidden(parent, graph, vocabulary))
            })
    }

    /// Whether anything connected to `id` is hidden.
    ///
    /// For a vertex this is any of its parent ways; for a way it is the way
    /// itself and every way sharing one of its nodes.
    pub fn has_hidden_connections(
        &self,
        id: EntityId,
        graph: &Graph,
        vocabulary: &TagVocabulary,
    ) -> bool {
        if self.hidden.is_empty() {
            return false;
        }
        let Some(entity) = graph.has_entity(id) else {
            return false;
        };
        let mut connections: BTreeSet<EntityId> = BTreeSet::new();
        match entity {
            Entity::Node(node) => {
                connections.extend(graph.parent_ways(node.id).iter().map(|way| way.id));
            }
            Entity::Way(way) => {
                for node in shared_nodes(way, graph) {
                    connections.extend(graph.parent_ways(node).iter().map(|w| w.id));
                }
            }
        }
        connections.into_iter().any(|id| {
            graph
                .has_entity(id)
                .is_some_and(|entity| self.is_hidden(entity, graph, vocabulary))
        })
    }
}

fn shared_nodes<'a>(way: &'a Way, graph: &'a Graph) -> impl Iterator<Item = EntityId> + 'a {
    way.nodes
        .iter()
        .copied()
        .filter(|node| graph.is_shared(*node))
}

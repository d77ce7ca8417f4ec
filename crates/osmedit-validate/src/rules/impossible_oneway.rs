//! Oneway ways that can't be entered or can't be left.
//!
//! For each end of an open oneway highway or flowing waterway, look at the
//! other ways of the same type meeting there. The end is impossible when it
//! is a dead end, or when every way meeting it is oneway and none of them
//! lets traffic through in the right direction. Waterways with nothing
//! attached are taken to be sources or mouths and are not reported.

use std::fmt;
use std::sync::Arc;

use osmedit_core::Context;
use osmedit_model::{Entity, EntityId, TagVocabulary, Way};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::ValidationRule;
use crate::issue::{Fix, FixKind, Issue, Severity};

const TYPE: &str = "impossible_oneway";

/// Network a way belongs to. Ways of different types never connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WayType {
    Highway,
    Waterway,
}

impl WayType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            WayType::Highway => "highway",
            WayType::Waterway => "waterway",
        }
    }
}

impl fmt::Display for WayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Start,
    End,
}

impl Placement {
    const fn as_str(self) -> &'static str {
        match self {
            Placement::Start => "start",
            Placement::End => "end",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImpossibleOneway {
    vocabulary: Arc<TagVocabulary>,
}

impl ImpossibleOneway {
    pub fn new(vocabulary: Arc<TagVocabulary>) -> Self {
        Self { vocabulary }
    }

    /// Routable highway or flowing waterway, by tags alone; `None` for
    /// everything else. Areas keep their type so they still count as
    /// connections.
    pub fn way_type(&self, way: &Way) -> Option<WayType> {
        if way
            .tags
            .get("highway")
            .is_some_and(|value| self.vocabulary.is_routable_highway(value))
        {
            return Some(WayType::Highway);
        }
        if way
            .tags
            .get("waterway")
            .is_some_and(|value| self.vocabulary.is_flowing_waterway(value))
        {
            return Some(WayType::Waterway);
        }
        None
    }

    /// `oneway=yes`, or no `oneway` tag and a tag that implies one.
    ///
    /// Any other explicit `oneway` value, `-1` included, counts as not oneway.
    /// An empty value is treated as absent.
    pub fn is_oneway(&self, way: &Way) -> bool {
        match way.tags.get("oneway").map(String::as_str) {
            Some("yes") => true,
            Some(value) if !value.is_empty() => false,
            _ => way
                .tags
                .iter()
                .any(|(key, value)| self.vocabulary.implies_oneway(key, value)),
        }
    }

    fn issues_for_node(
        &self,
        entity: &Entity,
        way: &Way,
        way_type: WayType,
        node_id: EntityId,
        placement: Placement,
        context: &Context,
    ) -> Option<Arc<Issue>> {
        if way.occurrences(node_id) > 1 {
            trace!(way = %way.id, node = %node_id, "endpoint repeats within the way");
            return None;
        }

        let node = context.has_entity(node_id).and_then(Entity::as_node)?;
        let loaded = context
            .connection()
            .is_some_and(|connection| connection.is_data_loaded(node.loc));
        if !loaded {
            trace!(node = %node_id, "data around endpoint not loaded");
            return None;
        }

        let graph = context.graph();
        let attached: Vec<&Way> = graph
            .parent_ways(node_id)
            .into_iter()
            .filter(|parent| parent.id != way.id && self.way_type(parent) == Some(way_type))
            .collect();

        if way_type == WayType::Waterway && attached.is_empty() {
            return None;
        }
        if !attached.iter().all(|parent| self.is_oneway(parent)) {
            trace!(node = %node_id, "endpoint meets a two-way connection");
            return None;
        }

        let through_traffic = attached.iter().any(|parent| {
            let same_role = match placement {
                Placement::Start => parent.first(),
                Placement::End => parent.last(),
            };
            same_role != Some(node_id) || parent.occurrences(node_id) > 1
        });
        if through_traffic {
            trace!(node = %node_id, "a connected oneway continues the flow");
            return None;
        }

        let mut fixes = Vec::new();
        if !attached.is_empty() {
            fixes.push(
                Fix::new(
                    FixKind::Reverse,
                    "iD-operation-reverse",
                    context.t("issues.fix.reverse_feature.title", &[]),
                )
                .with_entity_ids([way.id]),
            );
        }
        if node.tags.get("noexit").map(String::as_str) != Some("yes") {
            let icon = match placement {
                Placement::Start => "iD-operation-continue-left",
                Placement::End => "iD-operation-continue",
            };
            fixes.push(Fix::new(
                FixKind::ContinueDrawing,
                icon,
                context.t(
                    &format!("issues.fix.continue_from_{}.title", placement.as_str()),
                    &[],
                ),
            ));
        }

        let (message_id, reference_id) = match way_type {
            WayType::Waterway => (
                format!("waterway.connected.{}", placement.as_str()),
                "waterway.connected".to_string(),
            ),
            WayType::Highway => {
                let id = format!("highway.{}", placement.as_str());
                (id.clone(), id)
            }
        };
        let message_key = format!("issues.{TYPE}.{message_id}.message");
        let reference_key = format!("issues.{TYPE}.{reference_id}.reference");
        let label = context.display_label(entity);

        Some(
            Issue {
                id: format!("{TYPE}-{way_type}-{}-{}", way.id, node_id),
                kind: TYPE.to_string(),
                subtype: way_type.as_str().to_string(),
                severity: Severity::Warning,
                message: context.t(&message_key, &[("feature", &label)]),
                message_key,
                reference: context.t(&reference_key, &[]),
                reference_key,
                entity_ids: vec![way.id, node_id],
                loc: Some(node.loc),
                fixes,
            }
            .into_shared(),
        )
    }
}

impl ValidationRule for ImpossibleOneway {
    fn id(&self) -> &'static str {
        TYPE
    }

    fn validate(&self, entity: &Entity, context: &Context) -> Vec<Arc<Issue>> {
        let Entity::Way(way) = entity else {
            return Vec::new();
        };
        if way.is_closed() || way.is_area(&self.vocabulary) {
            return Vec::new();
        }
        let Some(way_type) = self.way_type(way) else {
            return Vec::new();
        };
        if !self.is_oneway(way) {
            return Vec::new();
        }

        let endpoints = [
            (way.first(), Placement::Start),
            (way.last(), Placement::End),
        ];
        endpoints
            .into_iter()
            .filter_map(|(node, placement)| {
                self.issues_for_node(entity, way, way_type, node?, placement, context)
            })
            .collect()
    }
}

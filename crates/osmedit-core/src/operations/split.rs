//! Split the ways through a selected vertex.

use std::cell::OnceCell;
use std::sync::Arc;

use osmedit_actions::{Action, DisabledReason, SplitAction};
use osmedit_model::{EntityId, Geometry};
use tracing::debug;

use crate::context::Context;
use crate::error::{ContextError, Result};
use crate::mode::Mode;
use crate::operations::Operation;

/// The split operation for one selection.
///
/// The disabled state is computed the first time it is asked for and then
/// kept for the lifetime of the value; build a new operation after the
/// selection or the graph changes.
#[derive(Debug)]
pub struct SplitOperation {
    selected_ids: Vec<EntityId>,
    action: Option<SplitAction>,
    /// Ways the action would split, with their geometry at construction.
    ways: Vec<(EntityId, Geometry)>,
    disabled: OnceCell<Option<DisabledReason>>,
}

impl SplitOperation {
    pub fn new(selected_ids: impl IntoIterator<Item = EntityId>, context: &Context) -> Self {
        let selected_ids: Vec<EntityId> = selected_ids.into_iter().collect();
        let vertices: Vec<EntityId> = selected_ids
            .iter()
            .copied()
            .filter(|id| context.geometry(*id).is_ok_and(|g| g == Geometry::Vertex))
            .collect();

        let action = match vertices.as_slice() {
            [vertex] => {
                let mut action = SplitAction::new(*vertex, Arc::clone(context.vocabulary()));
                if selected_ids.len() > 1 {
                    action.limit_ways(selected_ids.iter().copied().filter(|id| id != vertex));
                }
                Some(action)
            }
            _ => None,
        };

        let vocabulary = context.vocabulary();
        let ways = action
            .as_ref()
            .map(|action| {
                action
                    .ways(context.graph())
                    .into_iter()
                    .map(|way| {
                        let geometry = if way.is_area(vocabulary) {
                            Geometry::Area
                        } else {
                            Geometry::Line
                        };
                        (way.id, geometry)
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            selected_ids,
            action,
            ways,
            disabled: OnceCell::new(),
        }
    }

    pub fn action(&self) -> Option<&SplitAction> {
        self.action.as_ref()
    }

    /// IDs of the ways that would be split.
    pub fn way_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.ways.iter().map(|(id, _)| *id)
    }
}

impl Operation for SplitOperation {
    fn id(&self) -> &'static str {
        "split"
    }

    fn available(&self, _context: &Context) -> bool {
        self.action.is_some()
    }

    fn disabled(&self, context: &Context) -> Option<DisabledReason> {
        self.disabled
            .get_or_init(|| {
                let Some(action) = &self.action else {
                    return Some(DisabledReason::NOT_ELIGIBLE);
                };
                if let Some(reason) = action.disabled(context.graph()) {
                    return Some(reason);
                }
                if self
                    .selected_ids
                    .iter()
                    .any(|id| context.has_hidden_connections(*id))
                {
                    return Some(DisabledReason::CONNECTED_TO_HIDDEN);
                }
                None
            })
            .clone()
    }

    fn tooltip(&self, context: &Context) -> String {
        if let Some(reason) = self.disabled(context) {
            return context.t(&format!("operations.split.{reason}"), &[]);
        }
        match self.ways.as_slice() {
            [(_, geometry)] => context.t(&format!("operations.split.description.{geometry}"), &[]),
            _ => context.t("operations.split.description.multiple", &[]),
        }
    }

    fn annotation(&self, context: &Context) -> String {
        match self.ways.as_slice() {
            [(_, geometry)] => context.t(&format!("operations.split.annotation.{geometry}"), &[]),
            ways => context.t(
                "operations.split.annotation.multiple",
                &[("n", &ways.len().to_string())],
            ),
        }
    }

    fn execute(&self, context: &mut Context) -> Result<()> {
        let action = self
            .action
            .as_ref()
            .ok_or(ContextError::Unavailable { operation: "split" })?;
        let annotation = self.annotation(context);
        let difference = context.perform(action, annotation)?;
        let selected = difference.extant_ids();
        debug!(ways = selected.len(), "split complete");
        context.enter(Mode::select(selected));
        Ok(())
    }
}

//! What fixes do when applied.

use osmedit_actions::ReverseAction;
use osmedit_core::{Context, Mode};
use osmedit_model::{Extent, Geometry};
use tracing::debug;

use crate::error::{FixError, Result};
use crate::issue::Issue;

/// Reverse the way in the issue's first slot.
pub(crate) fn reverse_feature(issue: &Issue, context: &mut Context) -> Result<()> {
    let way_id = issue.entity_id(0)?;
    let annotation = context.t("operations.reverse.annotation", &[]);
    context.perform(&ReverseAction::new(way_id), annotation)?;
    Ok(())
}

/// Enter line drawing on the issue's way (slot 0) from its vertex (slot 1),
/// bringing the vertex into view first if needed.
pub(crate) fn continue_drawing(issue: &Issue, context: &mut Context) -> Result<()> {
    let way_id = issue.entity_id(0)?;
    let vertex_id = issue.entity_id(1)?;

    let way = context
        .entity(way_id)?
        .as_way()
        .ok_or(FixError::StaleEntity(way_id))?;
    let affix = way.affix(vertex_id).ok_or(FixError::StaleEntity(way_id))?;
    let loc = context
        .entity(vertex_id)?
        .as_node()
        .map(|node| node.loc)
        .ok_or(FixError::StaleEntity(vertex_id))?;

    let map = context.map();
    if !map.editable() || !map.trimmed_extent().contains(loc) {
        debug!(vertex = %vertex_id, "bringing vertex into view");
        context.map_mut().zoom_to_ease(Extent::from_loc(loc));
    }

    let graph = context.graph().clone();
    context.enter(Mode::draw_line(
        way_id,
        graph.clone(),
        graph,
        Geometry::Line,
        affix,
        true,
    ));
    Ok(())
}

//! Editor interaction modes.

use osmedit_model::{Affix, EntityId, Geometry, Graph};

#[derive(Debug, Clone, Default)]
pub enum Mode {
    #[default]
    Browse,
    Select { selected_ids: Vec<EntityId> },
    DrawLine(DrawLine),
}

/// Drawing state for extending a line from one of its ends.
#[derive(Debug, Clone)]
pub struct DrawLine {
    pub way_id: EntityId,
    /// Snapshot drawing started from; cancelling returns here.
    pub start_graph: Graph,
    /// Snapshot new nodes are added to.
    pub base_graph: Graph,
    pub feature_type: Geometry,
    pub affix: Affix,
    /// Whether an existing way is being extended rather than a new one drawn.
    pub continuing: bool,
}

impl Mode {
    pub fn select(selected_ids: impl IntoIterator<Item = EntityId>) -> Self {
        Mode::Select {
            selected_ids: selected_ids.into_iter().collect(),
        }
    }

    pub fn draw_line(
        way_id: EntityId,
        start_graph: Graph,
        base_graph: Graph,
        feature_type: Geometry,
        affix: Affix,
        continuing: bool,
    ) -> Self {
        Mode::DrawLine(DrawLine {
            way_id,
            start_graph,
            base_graph,
            feature_type,
            affix,
            continuing,
        })
    }

    pub const fn id(&self) -> &'static str {
        match self {
            Mode::Browse => "browse",
            Mode::Select { .. } => "select",
            Mode::DrawLine(_) => "draw-line",
        }
    }

    pub fn selected_ids(&self) -> &[EntityId] {
        match self {
            Mode::Select { selected_ids } => selected_ids,
            _ => &[],
        }
    }
}

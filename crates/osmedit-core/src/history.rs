//! Linear edit history.
//!
//! The history commits one action at a time: `perform` computes the next
//! snapshot from the current head and only then makes it the new head, so a
//! reader never observes a half-applied edit.

use osmedit_actions::Action;
use osmedit_model::{Difference, Graph};
use tracing::debug;

use crate::error::Result;

/// One committed edit.
#[derive(Debug, Clone)]
pub struct Edit {
    pub graph: Graph,
    pub annotation: String,
    pub difference: Difference,
}

#[derive(Debug, Clone)]
pub struct History {
    base: Graph,
    edits: Vec<Edit>,
}

impl History {
    pub fn new(base: Graph) -> Self {
        Self {
            base,
            edits: Vec::new(),
        }
    }

    /// The current snapshot.
    pub fn graph(&self) -> &Graph {
        self.edits.last().map_or(&self.base, |edit| &edit.graph)
    }

    /// The snapshot the history started from.
    pub fn base(&self) -> &Graph {
        &self.base
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Apply `action` to the head and commit the result.
    pub fn perform(&mut self, action: &dyn Action, annotation: impl Into<String>) -> Result<Difference> {
        let head = action.apply(self.graph())?;
        let difference = Difference::between(self.graph(), &head);
        let annotation = annotation.into();
        debug!(
            action = action.name(),
            annotation = %annotation,
            created = difference.created.len(),
            modified = difference.modified.len(),
            deleted = difference.deleted.len(),
            "performed action"
        );
        self.edits.push(Edit {
            graph: head,
            annotation,
            difference: difference.clone(),
        });
        Ok(difference)
    }
}

//! Validation issues and the fixes offered for them.

use std::sync::{Arc, Weak};

use osmedit_core::Context;
use osmedit_model::{EntityId, Loc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FixError, Result};
use crate::fixes;

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must be resolved before the edit is saved
    Error,
    /// Should be reviewed
    Warning,
}

impl Severity {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

/// A finding about one or more entities.
///
/// Issues are rebuilt on every validation pass and shared behind an `Arc`
/// so their fixes can point back at them.
#[derive(Debug, Serialize)]
pub struct Issue {
    /// Stable across passes for the same finding.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub subtype: String,
    pub severity: Severity,
    pub message: String,
    pub message_key: String,
    pub reference: String,
    pub reference_key: String,
    /// Position matters: rules document what each slot holds.
    pub entity_ids: Vec<EntityId>,
    pub loc: Option<Loc>,
    pub fixes: Vec<Fix>,
}

impl Issue {
    /// Share the issue and point each of its fixes back at it.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new_cyclic(|weak| {
            let mut issue = self;
            for fix in &mut issue.fixes {
                fix.issue = weak.clone();
            }
            issue
        })
    }

    /// Entity at `position` in [`Issue::entity_ids`].
    pub fn entity_id(&self, position: usize) -> Result<EntityId> {
        self.entity_ids
            .get(position)
            .copied()
            .ok_or(FixError::MissingEntityRef(position))
    }
}

/// What a fix does when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixKind {
    /// Reverse the issue's way.
    Reverse,
    /// Resume drawing the issue's way from the issue's vertex.
    ContinueDrawing,
}

#[derive(Debug, Serialize)]
pub struct Fix {
    pub icon: String,
    pub title: String,
    /// Entities the fix touches; `None` means those of the issue.
    pub entity_ids: Option<Vec<EntityId>>,
    pub kind: FixKind,
    #[serde(skip)]
    issue: Weak<Issue>,
}

impl Fix {
    pub fn new(kind: FixKind, icon: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            title: title.into(),
            entity_ids: None,
            kind,
            issue: Weak::new(),
        }
    }

    #[must_use]
    pub fn with_entity_ids(mut self, ids: impl IntoIterator<Item = EntityId>) -> Self {
        self.entity_ids = Some(ids.into_iter().collect());
        self
    }

    /// The owning issue, while it is still alive.
    pub fn issue(&self) -> Option<Arc<Issue>> {
        self.issue.upgrade()
    }

    /// Entities this fix touches, inheriting the issue's when unset.
    pub fn entity_ids(&self) -> Vec<EntityId> {
        match &self.entity_ids {
            Some(ids) => ids.clone(),
            None => self
                .issue()
                .map(|issue| issue.entity_ids.clone())
                .unwrap_or_default(),
        }
    }

    /// Run the fix against the context's current graph.
    pub fn apply(&self, context: &mut Context) -> Result<()> {
        let issue = self.issue().ok_or(FixError::IssueDropped)?;
        debug!(issue = %issue.id, fix = ?self.kind, "applying fix");
        match self.kind {
            FixKind::Reverse => fixes::reverse_feature(&issue, context),
            FixKind::ContinueDrawing => fixes::continue_drawing(&issue, context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(fixes: Vec<Fix>) -> Issue {
        Issue {
            id: "test".to_string(),
            kind: "test".to_string(),
            subtype: String::new(),
            severity: Severity::Warning,
            message: String::new(),
            message_key: String::new(),
            reference: String::new(),
            reference_key: String::new(),
            entity_ids: vec![EntityId::way(1), EntityId::node(2)],
            loc: None,
            fixes,
        }
    }

    #[test]
    fn severity_labels_are_capitalized() {
        assert_eq!(Severity::Warning.label(), "Warning");
        assert_eq!(Severity::Error.label(), "Error");
    }

    #[test]
    fn fixes_resolve_their_issue_until_it_is_dropped() {
        let shared = issue(vec![
            Fix::new(FixKind::Reverse, "icon", "title").with_entity_ids([EntityId::way(1)]),
            Fix::new(FixKind::ContinueDrawing, "icon", "title"),
        ])
        .into_shared();

        let reverse = &shared.fixes[0];
        let resume = &shared.fixes[1];
        assert_eq!(reverse.issue().map(|i| i.id.clone()), Some("test".to_string()));
        assert_eq!(reverse.entity_ids(), vec![EntityId::way(1)]);
        assert_eq!(resume.entity_ids(), vec![EntityId::way(1), EntityId::node(2)]);
    }

    #[test]
    fn detached_fix_has_no_issue() {
        let fix = Fix::new(FixKind::Reverse, "icon", "title");
        assert!(fix.issue().is_none());
        assert!(fix.entity_ids().is_empty());
        assert!(matches!(
            issue(Vec::new()).entity_id(5),
            Err(FixError::MissingEntityRef(5))
        ));
    }
}

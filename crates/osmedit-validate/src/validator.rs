//! Runs validation rules over a context's graph.

use std::sync::Arc;

use osmedit_core::Context;
use osmedit_model::{Entity, EntityId, TagVocabulary};
use serde::Serialize;
use tracing::debug;

use crate::issue::{Issue, Severity};
use crate::rules::{ImpossibleOneway, ValidationRule};

/// Issues found in one validation pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<Arc<Issue>>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues that involve `id` in any slot.
    pub fn issues_for(&self, id: EntityId) -> impl Iterator<Item = &Arc<Issue>> {
        self.issues
            .iter()
            .filter(move |issue| issue.entity_ids.contains(&id))
    }
}

#[derive(Debug, Default)]
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    /// A validator with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// A validator with every built-in rule.
    pub fn with_default_rules(vocabulary: Arc<TagVocabulary>) -> Self {
        Self::new().with_rule(ImpossibleOneway::new(vocabulary))
    }

    #[must_use]
    pub fn with_rule(mut self, rule: impl ValidationRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.id())
    }

    /// Validate every entity in the current graph, in ID order.
    pub fn validate(&self, context: &Context) -> ValidationReport {
        let ids: Vec<EntityId> = context.graph().entities().map(Entity::id).collect();
        self.validate_entities(&ids, context)
    }

    /// Validate the given entities. Unknown IDs are skipped.
    pub fn validate_entities(&self, ids: &[EntityId], context: &Context) -> ValidationReport {
        let mut report = ValidationReport::default();
        for id in ids {
            let Some(entity) = context.has_entity(*id) else {
                continue;
            };
            for rule in &self.rules {
                report.issues.extend(rule.validate(entity, context));
            }
        }
        debug!(
            entities = ids.len(),
            issues = report.len(),
            warnings = report.warning_count(),
            "validation pass complete"
        );
        report
    }
}

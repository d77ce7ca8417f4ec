//! Command implementations shared by the binary and its tests.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, Result, bail};
use osmedit_core::{Catalog, Context, Feature, Operation, SplitOperation, TileCoverage};
use osmedit_model::{EntityId, Graph, GraphDocument, TagVocabulary};
use osmedit_validate::{ValidationReport, Validator};
use tracing::{debug, info};

/// Result of a successful split.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    pub graph: Graph,
    pub annotation: String,
    /// Ways created or modified by the split.
    pub selected: Vec<EntityId>,
}

/// The tag vocabulary from `path`, or the built-in one.
pub fn load_vocabulary(path: Option<&Path>) -> Result<Arc<TagVocabulary>> {
    let vocabulary = match path {
        Some(path) => TagVocabulary::load(path)
            .with_context(|| format!("load vocabulary {}", path.display()))?,
        None => TagVocabulary::embedded().context("parse built-in vocabulary")?,
    };
    Ok(Arc::new(vocabulary))
}

pub fn load_graph(path: &Path) -> Result<Graph> {
    let document =
        GraphDocument::load(path).with_context(|| format!("read graph {}", path.display()))?;
    let graph = document
        .into_graph()
        .with_context(|| format!("build graph from {}", path.display()))?;
    info!(path = %path.display(), entities = graph.len(), "loaded graph");
    Ok(graph)
}

/// An editing context over `graph` where all data counts as loaded.
pub fn editor_context(graph: Graph, vocabulary: Arc<TagVocabulary>) -> Result<Context> {
    let locale = Catalog::english().context("parse built-in strings")?;
    Ok(Context::new(graph, vocabulary)
        .with_connection(Arc::new(TileCoverage::complete()))
        .with_locale(Arc::new(locale)))
}

pub fn run_validate(graph: Graph, vocabulary: Arc<TagVocabulary>) -> Result<ValidationReport> {
    let context = editor_context(graph, Arc::clone(&vocabulary))?;
    let report = Validator::with_default_rules(vocabulary).validate(&context);
    info!(
        issues = report.len(),
        warnings = report.warning_count(),
        errors = report.error_count(),
        "validation finished"
    );
    Ok(report)
}

/// Split at `vertex`, optionally only the listed `ways`, with `hidden`
/// feature classes filtered out of the map.
pub fn run_split(
    graph: Graph,
    vocabulary: Arc<TagVocabulary>,
    vertex: EntityId,
    ways: &[EntityId],
    hidden: &[Feature],
) -> Result<SplitOutcome> {
    let mut context = editor_context(graph, vocabulary)?;
    for feature in hidden {
        context.features_mut().hide(*feature);
    }

    let selection = std::iter::once(vertex).chain(ways.iter().copied());
    let operation = SplitOperation::new(selection, &context);
    if !operation.available(&context) {
        bail!("{vertex} is not a vertex of any way");
    }
    if let Some(reason) = operation.disabled(&context) {
        bail!(
            "cannot split at {vertex} ({reason}): {}",
            operation.tooltip(&context)
        );
    }
    debug!(vertex = %vertex, ways = ways.len(), "splitting");
    operation
        .execute(&mut context)
        .with_context(|| format!("split at {vertex}"))?;

    let annotation = context
        .history()
        .edits()
        .last()
        .map(|edit| edit.annotation.clone())
        .unwrap_or_default();
    Ok(SplitOutcome {
        graph: context.graph().clone(),
        annotation,
        selected: context.mode().selected_ids().to_vec(),
    })
}

pub fn graph_to_json(graph: &Graph) -> Result<String> {
    GraphDocument::from_graph(graph)
        .to_json_pretty()
        .context("serialize graph")
}

pub fn vocabulary_to_toml(vocabulary: &TagVocabulary) -> Result<String> {
    vocabulary.to_toml_string().context("serialize vocabulary")
}

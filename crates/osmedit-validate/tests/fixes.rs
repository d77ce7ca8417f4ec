use std::sync::Arc;

use osmedit_core::{Catalog, Context, ContextError, MapView, Mode, TileCoverage, Viewport};
use osmedit_model::{Affix, Entity, EntityId, Graph, Loc, Node, TagVocabulary, Way, tags};
use osmedit_validate::{Fix, FixError, FixKind, Issue, Validator};

fn n(id: i64) -> EntityId {
    EntityId::node(id)
}

fn w(id: i64) -> EntityId {
    EntityId::way(id)
}

fn vocabulary() -> Arc<TagVocabulary> {
    Arc::new(TagVocabulary::embedded().unwrap())
}

/// Oneways w1 (1 -> 2) and w2 (1 -> 3) both leave node 1; 2 and 3 are
/// joined by a two-way road.
fn graph() -> Graph {
    let oneway = || tags([("highway", "residential"), ("oneway", "yes")]);
    Graph::from_entities([
        Entity::from(Node::new(n(1), Loc::new(8.5400, 47.3700))),
        Node::new(n(2), Loc::new(8.5410, 47.3700)).into(),
        Node::new(n(3), Loc::new(8.5400, 47.3710)).into(),
        Way::new(w(1), vec![n(1), n(2)]).with_tags(oneway()).into(),
        Way::new(w(2), vec![n(1), n(3)]).with_tags(oneway()).into(),
        Way::new(w(3), vec![n(2), n(3)])
            .with_tags(tags([("highway", "residential")]))
            .into(),
    ])
}

fn context(graph: Graph) -> Context {
    Context::new(graph, vocabulary())
        .with_connection(Arc::new(TileCoverage::complete()))
        .with_locale(Arc::new(Catalog::english().unwrap()))
}

fn first_issue(context: &Context) -> Arc<Issue> {
    let report = Validator::with_default_rules(vocabulary()).validate(context);
    Arc::clone(&report.issues[0])
}

fn fix(issue: &Issue, kind: FixKind) -> &Fix {
    issue.fixes.iter().find(|fix| fix.kind == kind).unwrap()
}

#[test]
fn reverse_fix_flips_the_way_and_clears_the_issue() {
    let mut context = context(graph());
    let issue = first_issue(&context);
    assert_eq!(issue.entity_ids, vec![w(1), n(1)]);

    fix(&issue, FixKind::Reverse).apply(&mut context).unwrap();

    let way = context.graph().way(w(1)).unwrap();
    assert_eq!(way.nodes, vec![n(2), n(1)]);
    assert_eq!(way.tags.get("oneway").map(String::as_str), Some("-1"));
    assert_eq!(
        context.history().edits()[0].annotation,
        "Reversed a line."
    );

    let report = Validator::with_default_rules(vocabulary()).validate(&context);
    assert_eq!(report.issues_for(w(1)).count(), 0);
}

#[test]
fn continue_fix_enters_draw_line_at_the_endpoint() {
    let mut context = context(graph());
    assert!(!context.map().editable());
    let issue = first_issue(&context);

    fix(&issue, FixKind::ContinueDrawing)
        .apply(&mut context)
        .unwrap();

    assert!(context.map().editable());
    assert!(context.map().trimmed_extent().contains(Loc::new(8.54, 47.37)));
    let Mode::DrawLine(draw) = context.mode() else {
        panic!("expected draw-line mode, got {}", context.mode().id());
    };
    assert_eq!(draw.way_id, w(1));
    assert_eq!(draw.affix, Affix::Prefix);
    assert!(draw.continuing);
    assert_eq!(context.history().len(), 0);
}

#[test]
fn continue_fix_keeps_the_view_when_vertex_is_visible() {
    let viewport = Viewport::new(Loc::new(8.5405, 47.3705), 18.0, 1024.0, 768.0);
    let mut context = context(graph()).with_map(Box::new(viewport));
    let issue = first_issue(&context);

    fix(&issue, FixKind::ContinueDrawing)
        .apply(&mut context)
        .unwrap();

    assert!(context.map().trimmed_extent().contains(Loc::new(8.5405, 47.3705)));
    assert_eq!(context.mode().id(), "draw-line");
}

#[test]
fn fix_without_an_issue_cannot_run() {
    let mut context = context(graph());
    let detached = Fix::new(FixKind::Reverse, "iD-operation-reverse", "Reverse");
    assert!(matches!(
        detached.apply(&mut context),
        Err(FixError::IssueDropped)
    ));
}

#[test]
fn fix_against_a_graph_without_the_way_fails() {
    let issue = first_issue(&context(graph()));
    let mut elsewhere = context(Graph::new());
    let result = fix(&issue, FixKind::ContinueDrawing).apply(&mut elsewhere);
    assert!(matches!(result, Err(FixError::Context(ContextError::Model(_)))));
}

#[test]
fn continue_fix_on_a_reshaped_way_is_stale() {
    let mut context = context(graph());
    let issue = first_issue(&context);

    let mut reshaped = context.graph().clone();
    reshaped.replace(Way::new(w(1), vec![n(2), n(1), n(3)]));
    let mut moved = self::context(reshaped);
    let result = fix(&issue, FixKind::ContinueDrawing).apply(&mut moved);
    assert!(matches!(result, Err(FixError::StaleEntity(id)) if id == w(1)));

    // the original context is unaffected
    fix(&issue, FixKind::ContinueDrawing).apply(&mut context).unwrap();
}

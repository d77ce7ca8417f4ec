//! Tests for osmedit-model types.

use osmedit_model::{
    Difference, EntityId, Geometry, Graph, GraphDocument, Loc, Node, TagVocabulary, Way, tags,
};
use proptest::prelude::*;

fn chain(len: i64) -> Graph {
    let nodes = (1..=len).map(|i| Node::new(EntityId::node(i), Loc::new(i as f64, 0.0)).into());
    let way = Way::new(EntityId::way(1), (1..=len).map(EntityId::node).collect())
        .with_tags(tags([("highway", "residential")]));
    Graph::from_entities(nodes.chain(std::iter::once(way.into())))
}

#[test]
fn interior_nodes_are_vertices() {
    let vocabulary = TagVocabulary::embedded().unwrap();
    let graph = chain(3);
    assert_eq!(
        graph.geometry(EntityId::node(2), &vocabulary).unwrap(),
        Geometry::Vertex
    );
    assert_eq!(
        graph.geometry(EntityId::way(1), &vocabulary).unwrap(),
        Geometry::Line
    );
}

#[test]
fn document_round_trip_keeps_graph_equal() {
    let graph = chain(4);
    let json = GraphDocument::from_graph(&graph).to_json_pretty().unwrap();
    let reloaded = GraphDocument::from_json_str(&json)
        .unwrap()
        .into_graph()
        .unwrap();
    assert!(Difference::between(&graph, &reloaded).is_empty());
}

proptest! {
    #[test]
    fn editing_a_clone_never_touches_the_original(len in 2i64..20, drop in 1i64..20) {
        let original = chain(len);
        let mut edited = original.clone();
        edited.remove(EntityId::node(drop));
        edited.remove(EntityId::way(1));

        prop_assert_eq!(original.len() as i64, len + 1);
        prop_assert_eq!(original.parent_ways(EntityId::node(1)).len(), 1);
        prop_assert!(edited.parent_ways(EntityId::node(1)).is_empty());
    }
}

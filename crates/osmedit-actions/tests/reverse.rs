//! Integration tests for the reverse action.

use osmedit_actions::{Action, ActionError, ReverseAction};
use osmedit_model::{EntityId, Graph, Loc, Node, Way, tags};

#[test]
fn reverses_nodes_and_direction_dependent_tags() {
    let n = EntityId::node;
    let graph = Graph::from_entities([
        Node::new(n(1), Loc::new(0.0, 0.0)).into(),
        Node::new(n(2), Loc::new(1.0, 0.0))
            .with_tags(tags([("highway", "stop"), ("direction", "forward")]))
            .into(),
        Node::new(n(3), Loc::new(2.0, 0.0)).into(),
        Way::new(EntityId::way(1), vec![n(1), n(2), n(3)])
            .with_tags(tags([
                ("highway", "primary"),
                ("oneway", "yes"),
                ("sidewalk:left", "separate"),
            ]))
            .into(),
    ]);

    let head = ReverseAction::new(EntityId::way(1)).apply(&graph).unwrap();
    let way = head.way(EntityId::way(1)).unwrap();
    assert_eq!(way.nodes, vec![n(3), n(2), n(1)]);
    assert_eq!(
        way.tags,
        tags([
            ("highway", "primary"),
            ("oneway", "-1"),
            ("sidewalk:right", "separate"),
        ])
    );
    let stop = head.node(n(2)).unwrap();
    assert_eq!(stop.tags.get("direction").map(String::as_str), Some("backward"));

    // reversing twice restores the original way
    let twice = ReverseAction::new(EntityId::way(1)).apply(&head).unwrap();
    assert_eq!(twice.way(EntityId::way(1)).unwrap(), graph.way(EntityId::way(1)).unwrap());
}

#[test]
fn missing_way_is_an_error() {
    let result = ReverseAction::new(EntityId::way(7)).apply(&Graph::new());
    assert!(matches!(result, Err(ActionError::Model(_))));
}

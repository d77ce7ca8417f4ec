//! Reverse the direction of a way.
//!
//! Besides flipping the node order, tags whose meaning depends on the
//! direction of the way are rewritten so the feature still describes the same
//! thing on the ground: `oneway=yes` becomes `oneway=-1`, `sidewalk:left`
//! becomes `sidewalk:right`, and so on. Vertices of the way that carry a
//! `direction=forward|backward` style tag are flipped as well.

use osmedit_model::{Entity, EntityId, Graph, Node, Tags, Way};
use tracing::debug;

use crate::{Action, Result};

const KEY_SUFFIXES: [(&str, &str); 4] = [
    (":right", ":left"),
    (":left", ":right"),
    (":forward", ":backward"),
    (":backward", ":forward"),
];

const KEY_INFIXES: [(&str, &str); 4] = [
    (":right:", ":left:"),
    (":left:", ":right:"),
    (":forward:", ":backward:"),
    (":backward:", ":forward:"),
];

const COMPASS: [(&str, &str); 16] = [
    ("N", "S"),
    ("NNE", "SSW"),
    ("NE", "SW"),
    ("ENE", "WSW"),
    ("E", "W"),
    ("ESE", "WNW"),
    ("SE", "NW"),
    ("SSE", "NNW"),
    ("S", "N"),
    ("SSW", "NNE"),
    ("SW", "NE"),
    ("WSW", "ENE"),
    ("W", "E"),
    ("WNW", "ESE"),
    ("NW", "SE"),
    ("NNW", "SSE"),
];

#[derive(Debug, Clone)]
pub struct ReverseAction {
    way: EntityId,
}

impl ReverseAction {
    pub fn new(way: EntityId) -> Self {
        Self { way }
    }

    pub fn way(&self) -> EntityId {
        self.way
    }
}

impl Action for ReverseAction {
    fn name(&self) -> &'static str {
        "reverse"
    }

    fn apply(&self, graph: &Graph) -> Result<Graph> {
        let way = graph.way(self.way)?;
        let mut head = graph.clone();

        let mut nodes = way.nodes.clone();
        nodes.reverse();
        head.replace(Way {
            id: way.id,
            nodes,
            tags: reverse_tags(&way.tags),
        });

        let mut seen = Vec::new();
        for id in &way.nodes {
            if seen.contains(id) {
                continue;
            }
            seen.push(*id);
            let Some(node) = graph.has_entity(*id).and_then(Entity::as_node) else {
                continue;
            };
            if let Some(tags) = reverse_node_direction(&node.tags) {
                head.replace(Node {
                    tags,
                    ..node.clone()
                });
            }
        }

        debug!(way = %self.way, "reversed way");
        Ok(head)
    }
}

fn reverse_tags(tags: &Tags) -> Tags {
    tags.iter()
        .map(|(key, value)| (reverse_key(key), reverse_value(key, value)))
        .collect()
}

fn reverse_key(key: &str) -> String {
    for (from, to) in KEY_SUFFIXES {
        if let Some(stem) = key.strip_suffix(from) {
            return format!("{stem}{to}");
        }
    }
    for (from, to) in KEY_INFIXES {
        if key.contains(from) {
            return key.replacen(from, to, 1);
        }
    }
    key.to_string()
}

fn reverse_value(key: &str, value: &str) -> String {
    match key {
        "incline" => reverse_incline(value),
        "oneway" => match value {
            "yes" | "1" => "-1".to_string(),
            "-1" => "yes".to_string(),
            other => other.to_string(),
        },
        "direction" => reverse_direction(value),
        "conveying" | "priority" => reverse_word(value),
        _ if key.ends_with(":direction") => reverse_direction(value),
        _ => value.to_string(),
    }
}

/// `5%` -> `-5%`, `-5%` -> `5%`, `up` -> `down`.
fn reverse_incline(value: &str) -> String {
    let (sign, rest) = match value.chars().next() {
        Some(sign @ ('+' | '-')) => (Some(sign), &value[1..]),
        _ => (None, value),
    };
    if rest.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return match sign {
            Some('-') => rest.to_string(),
            _ => format!("-{rest}"),
        };
    }
    reverse_word(value)
}

fn reverse_direction(value: &str) -> String {
    if let Some((_, opposite)) = COMPASS.iter().find(|(from, _)| *from == value) {
        return (*opposite).to_string();
    }
    if let Ok(degrees) = value.parse::<f64>() {
        let flipped = (degrees + 180.0).rem_euclid(360.0);
        return format!("{flipped}");
    }
    reverse_word(value)
}

fn reverse_word(value: &str) -> String {
    match value {
        "left" => "right",
        "right" => "left",
        "up" => "down",
        "down" => "up",
        "forward" | "forwards" => "backward",
        "backward" | "backwards" => "forward",
        other => other,
    }
    .to_string()
}

/// Flip relative direction tags on a vertex, or `None` when nothing changes.
fn reverse_node_direction(tags: &Tags) -> Option<Tags> {
    let mut changed = false;
    let reversed = tags
        .iter()
        .map(|(key, value)| {
            let relative = key == "direction" || key.ends_with(":direction");
            if relative && matches!(value.as_str(), "forward" | "backward") {
                changed = true;
                (key.clone(), reverse_word(value))
            } else {
                (key.clone(), value.clone())
            }
        })
        .collect();
    changed.then_some(reversed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_swap_sides_and_directions() {
        assert_eq!(reverse_key("sidewalk:left"), "sidewalk:right");
        assert_eq!(reverse_key("maxspeed:forward"), "maxspeed:backward");
        assert_eq!(reverse_key("cycleway:right:surface"), "cycleway:left:surface");
        assert_eq!(reverse_key("name"), "name");
    }

    #[test]
    fn values_follow_their_keys() {
        assert_eq!(reverse_value("oneway", "yes"), "-1");
        assert_eq!(reverse_value("oneway", "-1"), "yes");
        assert_eq!(reverse_value("oneway", "no"), "no");
        assert_eq!(reverse_value("incline", "5%"), "-5%");
        assert_eq!(reverse_value("incline", "+5%"), "-5%");
        assert_eq!(reverse_value("incline", "-5%"), "5%");
        assert_eq!(reverse_value("incline", "up"), "down");
        assert_eq!(reverse_value("direction", "NE"), "SW");
        assert_eq!(reverse_value("direction", "270"), "90");
        assert_eq!(reverse_value("name", "up"), "up");
    }
}

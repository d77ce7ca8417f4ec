#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// The kind of entity an ID refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Node,
    Way,
}

impl EntityKind {
    /// Single-letter prefix used in rendered IDs.
    pub const fn prefix(&self) -> char {
        match self {
            EntityKind::Node => 'n',
            EntityKind::Way => 'w',
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Node => "node",
            EntityKind::Way => "way",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entity identifier such as `n42` or `w-1`.
///
/// Entities loaded from a data source carry positive numbers; entities created
/// while editing are numbered negatively by the graph that introduced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId {
    kind: EntityKind,
    number: i64,
}

impl EntityId {
    pub const fn new(kind: EntityKind, number: i64) -> Self {
        Self { kind, number }
    }

    pub const fn node(number: i64) -> Self {
        Self::new(EntityKind::Node, number)
    }

    pub const fn way(number: i64) -> Self {
        Self::new(EntityKind::Way, number)
    }

    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    pub const fn number(&self) -> i64 {
        self.number
    }

    /// True for IDs allocated locally, before upload.
    pub const fn is_new(&self) -> bool {
        self.number < 0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.number)
    }
}

impl FromStr for EntityId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let kind = match chars.next() {
            Some('n') => EntityKind::Node,
            Some('w') => EntityKind::Way,
            _ => return Err(ModelError::InvalidEntityId(s.to_string())),
        };
        let number = chars
            .as_str()
            .parse::<i64>()
            .map_err(|_| ModelError::InvalidEntityId(s.to_string()))?;
        if number == 0 {
            return Err(ModelError::InvalidEntityId(s.to_string()));
        }
        Ok(Self { kind, number })
    }
}

impl serde::Serialize for EntityId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for EntityId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_renders() {
        let id: EntityId = "w-12".parse().unwrap();
        assert_eq!(id, EntityId::way(-12));
        assert!(id.is_new());
        assert_eq!(id.to_string(), "w-12");
        assert_eq!("n7".parse::<EntityId>().unwrap(), EntityId::node(7));
    }

    #[test]
    fn rejects_malformed_ids() {
        for raw in ["", "x1", "n", "w1.5", "n0", "r4"] {
            assert!(raw.parse::<EntityId>().is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&EntityId::node(3)).unwrap();
        assert_eq!(json, "\"n3\"");
        let back: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EntityId::node(3));
    }
}

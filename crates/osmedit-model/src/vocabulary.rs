//! Tag vocabularies.
//!
//! The default vocabulary is embedded at compile time from `data/tags.toml`;
//! callers may load a replacement file and inject it wherever a vocabulary is
//! needed.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entity::Tags;
use crate::error::Result;

/// Embedded default vocabulary.
pub const DEFAULT_VOCABULARY: &str = include_str!("../data/tags.toml");

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagVocabulary {
    /// `highway=*` values that carry routable traffic.
    #[serde(default)]
    pub routable_highways: BTreeSet<String>,

    /// `waterway=*` values with a direction of flow.
    #[serde(default)]
    pub flowing_waterways: BTreeSet<String>,

    /// Tags whose value implies one-way travel, e.g. `junction=roundabout`.
    #[serde(default)]
    pub oneway_tags: BTreeMap<String, BTreeMap<String, bool>>,

    /// Keys that turn a closed way into an area, mapped to the values that do not.
    /// A key ending in `*` matches any key with that prefix.
    #[serde(default)]
    pub area_keys: BTreeMap<String, BTreeSet<String>>,
}

impl TagVocabulary {
    /// Parse the embedded default vocabulary.
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_VOCABULARY)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let vocabulary = Self::from_toml_str(&source)?;
        tracing::debug!(
            path = %path.display(),
            highways = vocabulary.routable_highways.len(),
            waterways = vocabulary.flowing_waterways.len(),
            "loaded tag vocabulary"
        );
        Ok(vocabulary)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn is_routable_highway(&self, value: &str) -> bool {
        self.routable_highways.contains(value)
    }

    pub fn is_flowing_waterway(&self, value: &str) -> bool {
        self.flowing_waterways.contains(value)
    }

    /// Whether `key=value` is listed as implying one-way travel.
    pub fn implies_oneway(&self, key: &str, value: &str) -> bool {
        self.oneway_tags
            .get(key)
            .and_then(|values| values.get(value))
            .copied()
            .unwrap_or(false)
    }

    /// The first tag that makes a closed way an area, if any.
    pub fn tag_suggesting_area<'t>(&self, tags: &'t Tags) -> Option<(&'t str, &'t str)> {
        tags.iter()
            .find(|(key, value)| {
                self.area_exclusions(key)
                    .is_some_and(|excluded| !excluded.contains(value.as_str()))
            })
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    fn area_exclusions(&self, key: &str) -> Option<&BTreeSet<String>> {
        if let Some(excluded) = self.area_keys.get(key) {
            return Some(excluded);
        }
        self.area_keys.iter().find_map(|(pattern, excluded)| {
            let prefix = pattern.strip_suffix('*')?;
            key.starts_with(prefix).then_some(excluded)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn embedded_vocabulary_parses() {
        let vocabulary = TagVocabulary::embedded().expect("embedded vocabulary");
        assert!(vocabulary.is_routable_highway("residential"));
        assert!(!vocabulary.is_routable_highway("proposed"));
        assert!(vocabulary.is_flowing_waterway("stream"));
        assert!(vocabulary.implies_oneway("junction", "roundabout"));
        assert!(vocabulary.implies_oneway("piste:type", "downhill"));
        assert!(!vocabulary.implies_oneway("junction", "yes"));
    }

    #[test]
    fn area_keys_honor_exclusions() {
        let vocabulary = TagVocabulary::embedded().unwrap();
        assert_eq!(
            vocabulary.tag_suggesting_area(&tags(&[("building", "yes")])),
            Some(("building", "yes"))
        );
        assert_eq!(
            vocabulary.tag_suggesting_area(&tags(&[("natural", "coastline")])),
            None
        );
        assert_eq!(
            vocabulary.tag_suggesting_area(&tags(&[("addr:street", "Main")])),
            Some(("addr:street", "Main"))
        );
        assert_eq!(
            vocabulary.tag_suggesting_area(&tags(&[("highway", "residential")])),
            None
        );
    }

    #[test]
    fn custom_vocabulary_round_trips_through_toml() {
        let vocabulary = TagVocabulary::from_toml_str(
            r#"
routable_highways = ["residential"]

[oneway_tags.junction]
roundabout = true
"#,
        )
        .unwrap();
        assert!(vocabulary.flowing_waterways.is_empty());
        let text = vocabulary.to_toml_string().unwrap();
        assert_eq!(TagVocabulary::from_toml_str(&text).unwrap(), vocabulary);
    }
}

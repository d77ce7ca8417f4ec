//! Localized strings keyed by dotted paths such as `operations.split.title`.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::error::Result;

/// English strings, embedded at compile time.
pub const EN_STRINGS: &str = include_str!("../data/locales/en.json");

pub trait Locale: fmt::Debug {
    /// Raw template for `key`.
    fn lookup(&self, key: &str) -> Option<&str>;

    /// Render `key`, replacing `{name}` placeholders from `params`.
    ///
    /// Unknown keys render as the key itself.
    fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        match self.lookup(key) {
            Some(template) => interpolate(template, params),
            None => {
                debug!(key, "missing translation");
                key.to_string()
            }
        }
    }
}

/// A flat string table built from nested JSON objects.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    strings: HashMap<String, String>,
}

impl Catalog {
    pub fn english() -> Result<Self> {
        Self::from_json_str(EN_STRINGS)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(source)?;
        let mut catalog = Self::default();
        flatten(&root, String::new(), &mut catalog.strings);
        Ok(catalog)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Locale for Catalog {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }
}

fn flatten(value: &Value, prefix: String, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(child, path, out);
            }
        }
        Value::String(text) => {
            out.insert(prefix, text.clone());
        }
        // numbers, arrays and nulls are not translatable strings
        _ => {}
    }
}

fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    params
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}

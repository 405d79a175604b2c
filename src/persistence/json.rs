use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use super::ConfigSink;
use crate::mapping::MappingError;

/// JSON object of objects: one top-level member per section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonDocument {
    root: Map<String, Value>,
}

impl JsonDocument {
    pub fn load(path: &Path) -> Result<Self, MappingError> {
        let content = fs::read_to_string(path)?;
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(root)) => Ok(Self { root }),
            Ok(_) => Err(MappingError::ConfigError(format!(
                "{} does not contain a JSON object",
                path.display()
            ))),
            Err(e) => Err(MappingError::ConfigError(format!(
                "Failed to parse {}: {}",
                path.display(),
                e
            ))),
        }
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&Value> {
        self.root.get(section)?.get(key)
    }

    pub fn section(&self, section: &str) -> Option<&Map<String, Value>> {
        self.root.get(section)?.as_object()
    }

    fn insert(&mut self, section: &str, key: &str, value: Value) {
        let entry = self
            .root
            .entry(section.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(map) = entry {
            map.insert(key.to_string(), value);
        }
    }

    /// Pretty-printed JSON object
    pub fn render(&self) -> String {
        serde_json::to_string_pretty(&self.root).unwrap_or_else(|_| "{}".to_string())
    }
}

impl ConfigSink for JsonDocument {
    fn set(&mut self, section: &str, key: &str, value: String) {
        self.insert(section, key, Value::String(value));
    }

    fn set_int(&mut self, section: &str, key: &str, value: i64) {
        self.insert(section, key, Value::from(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_stay_numbers() {
        let mut doc = JsonDocument::default();
        doc.set_int("player1", "port", 0);
        doc.set("player1", "a", "b0".to_string());
        assert_eq!(doc.get("player1", "port"), Some(&Value::from(0)));
        assert_eq!(doc.get("player1", "a"), Some(&Value::from("b0")));
    }

    #[test]
    fn scalar_section_is_replaced_by_object() {
        let mut doc = JsonDocument::default();
        doc.root.insert("player1".to_string(), Value::from(3));
        doc.set("player1", "a", "b0".to_string());
        assert!(doc.section("player1").is_some());
    }
}

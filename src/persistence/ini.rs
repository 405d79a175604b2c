use std::fs;
use std::path::Path;
use tracing::debug;

use super::ConfigSink;
use crate::mapping::MappingError;

/// INI document keeping section and key order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IniDocument {
    sections: Vec<(String, Vec<(String, String)>)>,
}

impl IniDocument {
    pub fn load(path: &Path) -> Result<Self, MappingError> {
        let content = fs::read_to_string(path)?;
        debug!("Merging into existing {}", path.display());
        Ok(Self::parse(&content))
    }

    /// Lenient parse: comments are dropped, keys before any header go to `""`
    pub fn parse(content: &str) -> Self {
        let mut doc = Self::default();
        let mut current = String::new();
        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current = name.trim().to_string();
                doc.section_mut(&current);
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                doc.set(&current, key.trim(), value.trim().to_string());
            }
        }
        doc
    }

    /// Value of `key` in `section`, if written
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|(name, _)| name == section)
            .and_then(|(_, entries)| entries.iter().find(|(k, _)| k == key))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.iter().any(|(name, _)| name == section)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(name, _)| name.as_str())
    }

    fn section_mut(&mut self, section: &str) -> &mut Vec<(String, String)> {
        let position = match self.sections.iter().position(|(name, _)| name == section) {
            Some(position) => position,
            None => {
                self.sections.push((section.to_string(), Vec::new()));
                self.sections.len() - 1
            }
        };
        &mut self.sections[position].1
    }

    /// Sections in insertion order, `key = value` lines
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, entries) in &self.sections {
            if !name.is_empty() {
                out.push_str(&format!("[{name}]\n"));
            }
            for (key, value) in entries {
                out.push_str(&format!("{key} = {value}\n"));
            }
            out.push('\n');
        }
        out
    }
}

impl ConfigSink for IniDocument {
    fn set(&mut self, section: &str, key: &str, value: String) {
        let entries = self.section_mut(section);
        match entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key.to_string(), value)),
        }
    }
}

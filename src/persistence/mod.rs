//! # Persistence Module
//!
//! Configuration sinks the encoders write into, and the code that puts the
//! finished artifact on disk. An encoder only ever sees [`ConfigSink`]; the
//! file format is chosen separately through [`OutputFormat`].
//!
//! The target file is written exactly once per launch, after every player has
//! been encoded.

pub mod args;
pub mod ini;
pub mod json;

pub use args::ArgumentSink;
pub use ini::IniDocument;
pub use json::JsonDocument;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::mapping::MappingError;

/// Write-only destination of target encodings
pub trait ConfigSink {
    fn set(&mut self, section: &str, key: &str, value: String);

    fn set_int(&mut self, section: &str, key: &str, value: i64) {
        self.set(section, key, value.to_string());
    }
}

/// File format of the finished artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `[section]` headers with `key = value` lines
    Ini,
    /// One JSON object per section
    Json,
    /// `section.key=value` command-line tokens
    Args,
}

/// Any sink that can be rendered to text
#[derive(Debug, Clone)]
pub enum Artifact {
    Ini(IniDocument),
    Json(JsonDocument),
    Args(ArgumentSink),
}

impl Artifact {
    /// Empty artifact, or for INI/JSON the existing file at `base` to merge into
    pub fn open(format: OutputFormat, base: Option<&Path>) -> Result<Self, MappingError> {
        let existing = base.filter(|p| p.exists());
        Ok(match (format, existing) {
            (OutputFormat::Ini, Some(path)) => Artifact::Ini(IniDocument::load(path)?),
            (OutputFormat::Ini, None) => Artifact::Ini(IniDocument::default()),
            (OutputFormat::Json, Some(path)) => Artifact::Json(JsonDocument::load(path)?),
            (OutputFormat::Json, None) => Artifact::Json(JsonDocument::default()),
            (OutputFormat::Args, _) => Artifact::Args(ArgumentSink::default()),
        })
    }

    pub fn sink(&mut self) -> &mut dyn ConfigSink {
        match self {
            Artifact::Ini(doc) => doc,
            Artifact::Json(doc) => doc,
            Artifact::Args(args) => args,
        }
    }

    pub fn render(&self) -> String {
        match self {
            Artifact::Ini(doc) => doc.render(),
            Artifact::Json(doc) => doc.render(),
            Artifact::Args(args) => args.render(),
        }
    }

    /// Writes the rendered artifact, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<(), MappingError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.render())?;
        Ok(())
    }
}

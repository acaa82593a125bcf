//! Reading changelog descriptors.
//!
//! Only two entry shapes matter here, `include: { file }` and `includeAll: { path }`.
//! Everything else in a descriptor (changeSets, preconditions, properties) is dropped.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_yaml::{Mapping, Value};

use crate::config::CHANGELOG_KEY;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Include { file: String },
    IncludeAll { path: String },
}

/// Reads and parses one descriptor file.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid YAML, or lacks a
/// top-level change-log sequence.
pub fn parse_descriptor(path: &Path) -> Result<Vec<Directive>> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_descriptor_str(&text).with_context(|| format!("parse {}", path.display()))
}

/// Parses descriptor text. Unrecognized entries are skipped without error.
///
/// # Errors
/// Returns an error if the text is not YAML or has no change-log sequence.
pub fn parse_descriptor_str(text: &str) -> Result<Vec<Directive>> {
    let doc: Value = serde_yaml::from_str(text)?;
    let entries = doc
        .get(CHANGELOG_KEY)
        .and_then(Value::as_sequence)
        .ok_or_else(|| anyhow!("no `{CHANGELOG_KEY}` list at top level"))?;
    Ok(entries
        .iter()
        .filter_map(Value::as_mapping)
        .filter_map(classify)
        .collect())
}

fn classify(entry: &Mapping) -> Option<Directive> {
    if let Some(file) = nested_str(entry, "include", "file") {
        return Some(Directive::Include { file });
    }
    nested_str(entry, "includeAll", "path").map(|path| Directive::IncludeAll { path })
}

fn nested_str(entry: &Mapping, outer: &str, inner: &str) -> Option<String> {
    entry
        .get(outer)?
        .as_mapping()?
        .get(inner)?
        .as_str()
        .map(str::to_string)
}

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

/// Classification of a discovered include. Only direct schema includes exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    #[default]
    DirectSchema,
}

impl ReferenceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceKind::DirectSchema => "direct_schema",
        }
    }
}

/// One `include.file` entry that points into the schema root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaReference {
    pub schema_file: String,
    pub schema_folder: String,
    pub source_master: String,
    pub nested_file: Option<String>,
    pub nested_file_date: Option<String>,
    #[serde(rename = "type")]
    pub kind: ReferenceKind,
}

impl SchemaReference {
    pub fn direct(schema_file: &str, source_master: &str, nested_file: Option<&str>) -> Self {
        let nested_file_date = nested_file
            .and_then(crate::paths::file_name_str)
            .and_then(crate::dates::extract_nested_file_date);
        SchemaReference {
            schema_file: schema_file.to_string(),
            schema_folder: schema_folder_of(schema_file),
            source_master: source_master.to_string(),
            nested_file: nested_file.map(str::to_string),
            nested_file_date,
            kind: ReferenceKind::DirectSchema,
        }
    }
}

/// Directory component of a schema path, as written. Trailing slashes are dropped unless
/// the directory is made of slashes only.
pub fn schema_folder_of(schema_file: &str) -> String {
    let Some(idx) = schema_file.rfind('/') else {
        return String::new();
    };
    let head = &schema_file[..=idx];
    match head.trim_end_matches('/') {
        "" => head.to_string(),
        trimmed => trimmed.to_string(),
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub masters: Vec<PathBuf>,
    /// References found per master, keyed by master path, in processing order.
    pub per_master_counts: IndexMap<String, usize>,
    #[serde(rename = "all_schema_paths")]
    pub all: Vec<SchemaReference>,
    #[serde(rename = "latest_schema_files")]
    pub latest: Vec<SchemaReference>,
}

use crate::traversal::WalkOptions;

pub const DEFAULT_BASE_DIR: &str = "src/main/adgp/databases/dwh/changelogs";
pub const DEFAULT_SCHEMA_PREFIX: &str = "src/main/adgp/databases/dwh/schemas/";

pub const MASTER_FILE_NAME: &str = "master.yaml";
pub const CHANGELOG_KEY: &str = "databaseChangeLog";
pub const YAML_EXTENSIONS: &[&str] = &["yaml", "yml"];

pub const ALL_TXT_REPORT: &str = "all_schema_paths_report.txt";
pub const LATEST_TXT_REPORT: &str = "latest_schema_files_report.txt";
pub const ALL_CSV_REPORT: &str = "all_schema_paths_report.csv";
pub const LATEST_CSV_REPORT: &str = "latest_schema_files_report.csv";

/// Settings shared by the locator and the resolver for one run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Include targets starting with this prefix are schema references.
    pub schema_prefix: String,
    pub walk: WalkOptions,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            schema_prefix: DEFAULT_SCHEMA_PREFIX.to_string(),
            walk: WalkOptions::default(),
        }
    }
}

impl ScanConfig {
    pub fn is_schema_path(&self, file: &str) -> bool {
        file.starts_with(&self.schema_prefix)
    }
}

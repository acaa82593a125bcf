use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::aggregate::latest_per_folder;
use crate::config::ScanConfig;
use crate::paths;
use crate::resolver::Resolver;
use crate::traversal::find_master_files;
use crate::types::{ScanReport, SchemaReference};

/// Observer for scan progress; the CLI uses it for narration and the progress bar.
pub trait ScanObserver {
    fn masters_found(&mut self, _masters: &[PathBuf]) {}
    fn master_started(&mut self, _master: &Path) {}
    fn master_finished(&mut self, _master: &Path, _found: &[SchemaReference]) {}
    /// A `..` include resolved to another descriptor and is being followed.
    fn descending(&mut self, _include: &str, _resolved: &Path) {}
    /// An `includeAll` directory is about to be walked.
    fn expanding_directory(&mut self, _dir: &Path) {}
    fn directory_file(&mut self, _file: &Path) {}
}

impl ScanObserver for () {}

/// Locates masters under `base`, resolves each one and reduces the results.
///
/// # Errors
/// Returns an error if `base` does not exist.
pub fn scan(base: &Path, config: &ScanConfig) -> Result<ScanReport> {
    scan_with(base, config, &mut ())
}

/// Same as [`scan`], reporting progress to `observer`.
///
/// # Errors
/// Returns an error if `base` does not exist.
pub fn scan_with(base: &Path, config: &ScanConfig, observer: &mut dyn ScanObserver) -> Result<ScanReport> {
    let masters = find_master_files(base, config.walk)?;
    observer.masters_found(&masters);

    let resolver = Resolver::new(config);
    let mut report = ScanReport::default();
    for master in &masters {
        observer.master_started(master);
        let found = resolver.resolve_master(master, observer);
        observer.master_finished(master, &found);
        *report
            .per_master_counts
            .entry(paths::display(master))
            .or_default() += found.len();
        report.all.extend(found);
    }
    report.latest = latest_per_folder(&report.all);
    report.masters = masters;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[derive(Default)]
    struct Recorder {
        found: usize,
        started: Vec<PathBuf>,
        finished: Vec<usize>,
        descents: Vec<String>,
        expanded: Vec<PathBuf>,
        directory_files: usize,
    }

    impl ScanObserver for Recorder {
        fn masters_found(&mut self, masters: &[PathBuf]) {
            self.found = masters.len();
        }
        fn master_started(&mut self, master: &Path) {
            self.started.push(master.to_path_buf());
        }
        fn master_finished(&mut self, _master: &Path, found: &[SchemaReference]) {
            self.finished.push(found.len());
        }
        fn descending(&mut self, include: &str, _resolved: &Path) {
            self.descents.push(include.to_string());
        }
        fn expanding_directory(&mut self, dir: &Path) {
            self.expanded.push(dir.to_path_buf());
        }
        fn directory_file(&mut self, _file: &Path) {
            self.directory_files += 1;
        }
    }

    const SCHEMAS: &str = "src/main/adgp/databases/dwh/schemas";

    fn include(file: &str) -> String {
        format!("  - include:\n      file: {file}\n")
    }

    #[test]
    fn bad_master_does_not_abort_others() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::write(root.join("a/master.yaml"), "databaseChangeLog: [ {").unwrap();
        fs::write(
            root.join("b/master.yaml"),
            "databaseChangeLog:\n  - include:\n      file: src/main/adgp/databases/dwh/schemas/s/t.sql\n",
        )
        .unwrap();

        let mut rec = Recorder::default();
        let report = scan_with(root, &ScanConfig::default(), &mut rec).unwrap();
        assert_eq!(rec.found, 2);
        assert_eq!(rec.started, vec![root.join("a/master.yaml"), root.join("b/master.yaml")]);
        assert_eq!(rec.finished, vec![0, 1]);
        assert_eq!(report.all.len(), 1);
        assert_eq!(report.latest.len(), 1);
        assert_eq!(report.per_master_counts.values().copied().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn missing_base_fails_before_any_work() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan(&dir.path().join("absent"), &ScanConfig::default()).is_err());
    }

    #[test]
    fn shallower_master_is_processed_before_nested_one() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(
            root.join("a/master.yaml"),
            format!("databaseChangeLog:\n{}", include(&format!("{SCHEMAS}/f/parent.sql"))),
        )
        .unwrap();
        fs::write(
            root.join("a/b/master.yaml"),
            format!("databaseChangeLog:\n{}", include(&format!("{SCHEMAS}/f/child.sql"))),
        )
        .unwrap();

        let report = scan(root, &ScanConfig::default()).unwrap();
        assert_eq!(report.masters, vec![root.join("a/master.yaml"), root.join("a/b/master.yaml")]);
        assert_eq!(report.latest.len(), 1);
        assert_eq!(report.latest[0].schema_file, format!("{SCHEMAS}/f/child.sql"));
    }

    #[test]
    fn descents_and_expansions_reach_the_observer() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("app")).unwrap();
        fs::create_dir_all(root.join("release")).unwrap();
        fs::create_dir_all(root.join("bulk/deep")).unwrap();
        fs::write(
            root.join("app/master.yaml"),
            format!(
                "databaseChangeLog:\n{}  - includeAll:\n      path: ../bulk/\n",
                include("../release/r.yaml")
            ),
        )
        .unwrap();
        fs::write(
            root.join("release/r.yaml"),
            format!("databaseChangeLog:\n{}", include(&format!("{SCHEMAS}/x/1.sql"))),
        )
        .unwrap();
        fs::write(
            root.join("bulk/a.yaml"),
            format!("databaseChangeLog:\n{}", include(&format!("{SCHEMAS}/y/2.sql"))),
        )
        .unwrap();
        fs::write(
            root.join("bulk/deep/b.yml"),
            format!("databaseChangeLog:\n{}", include(&format!("{SCHEMAS}/y/3.sql"))),
        )
        .unwrap();

        let mut rec = Recorder::default();
        let report = scan_with(&root.join("app"), &ScanConfig::default(), &mut rec).unwrap();
        assert_eq!(report.all.len(), 3);
        assert_eq!(rec.descents, vec!["../release/r.yaml".to_string()]);
        assert_eq!(rec.expanded.len(), 1);
        assert!(rec.expanded[0].ends_with("bulk"));
        assert_eq!(rec.directory_files, 2);
    }
}

//! Recursive include resolution.
//!
//! Every call carries the master that started the chain. Schema references found in a
//! file are attributed to the `nested_file` that file was entered with; files reached
//! through a `..` include are entered with the including file as their nested file, and
//! files found under an `includeAll` directory with themselves.
//!
//! There is no cycle detection: a descriptor that includes one of its own ancestors
//! recurses until the stack runs out.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::ScanConfig;
use crate::descriptor::{Directive, parse_descriptor};
use crate::paths::{self, has_parent_traversal, is_yaml_like, resolve_relative};
use crate::scan::ScanObserver;
use crate::traversal::collect_descriptor_files;
use crate::types::SchemaReference;

pub struct Resolver<'a> {
    config: &'a ScanConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a ScanConfig) -> Self {
        Resolver { config }
    }

    /// Resolves a master descriptor.
    pub fn resolve_master(&self, master: &Path, observer: &mut dyn ScanObserver) -> Vec<SchemaReference> {
        let source_master = paths::display(master);
        self.resolve_descriptor(master, &source_master, None, observer)
    }

    /// Resolves one descriptor and everything it pulls in. A file that cannot be read or
    /// parsed contributes nothing; the failure is logged.
    pub fn resolve_descriptor(
        &self,
        file: &Path,
        source_master: &str,
        nested_file: Option<&str>,
        observer: &mut dyn ScanObserver,
    ) -> Vec<SchemaReference> {
        match self.try_resolve_descriptor(file, source_master, nested_file, observer) {
            Ok(found) => found,
            Err(err) => {
                warn!(file = %file.display(), "failed to process descriptor: {err:#}");
                Vec::new()
            }
        }
    }

    fn try_resolve_descriptor(
        &self,
        file: &Path,
        source_master: &str,
        nested_file: Option<&str>,
        observer: &mut dyn ScanObserver,
    ) -> Result<Vec<SchemaReference>> {
        let directives = parse_descriptor(file)?;
        let mut found = Vec::new();
        for directive in directives {
            match directive {
                Directive::Include { file: target } => {
                    self.follow_include(file, &target, source_master, nested_file, &mut found, observer)?;
                }
                Directive::IncludeAll { path } => {
                    self.follow_include_all(file, &path, source_master, &mut found, observer)?;
                }
            }
        }
        Ok(found)
    }

    fn follow_include(
        &self,
        file: &Path,
        target: &str,
        source_master: &str,
        nested_file: Option<&str>,
        found: &mut Vec<SchemaReference>,
        observer: &mut dyn ScanObserver,
    ) -> Result<()> {
        if self.config.is_schema_path(target) {
            found.push(SchemaReference::direct(target, source_master, nested_file));
            return Ok(());
        }
        if !has_parent_traversal(target) {
            debug!(file = %file.display(), include = target, "ignoring include outside schema root");
            return Ok(());
        }
        let resolved = resolve_relative(target, file)?;
        if !resolved.exists() || !is_yaml_like(&resolved) {
            debug!(file = %file.display(), include = target, resolved = %resolved.display(), "include does not resolve to a descriptor");
            return Ok(());
        }
        debug!("recursing: {target} -> {}", resolved.display());
        observer.descending(target, &resolved);
        let parent = paths::display(file);
        found.extend(self.resolve_descriptor(&resolved, source_master, Some(parent.as_str()), observer));
        Ok(())
    }

    fn follow_include_all(
        &self,
        file: &Path,
        raw: &str,
        source_master: &str,
        found: &mut Vec<SchemaReference>,
        observer: &mut dyn ScanObserver,
    ) -> Result<()> {
        // Paths without `..` are taken relative to the working directory, as written.
        let dir = if has_parent_traversal(raw) {
            resolve_relative(raw, file)?
        } else {
            raw.into()
        };
        if !dir.exists() {
            debug!(file = %file.display(), path = raw, "includeAll target does not exist");
            return Ok(());
        }
        debug!("expanding includeAll: {}", dir.display());
        observer.expanding_directory(&dir);
        found.extend(self.expand_directory(&dir, source_master, observer));
        Ok(())
    }

    /// Resolves every YAML-like file below `dir`, each as its own nested file.
    pub fn expand_directory(
        &self,
        dir: &Path,
        source_master: &str,
        observer: &mut dyn ScanObserver,
    ) -> Vec<SchemaReference> {
        let files = match collect_descriptor_files(dir, self.config.walk) {
            Ok(files) => files,
            Err(err) => {
                warn!(dir = %dir.display(), "failed to expand includeAll directory: {err:#}");
                return Vec::new();
            }
        };
        let mut found = Vec::new();
        for path in files {
            debug!("includeAll file: {}", path.display());
            observer.directory_file(&path);
            let nested = paths::display(&path);
            found.extend(self.resolve_descriptor(&path, source_master, Some(nested.as_str()), observer));
        }
        found
    }
}

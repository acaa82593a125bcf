use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use ignore::{Walk, WalkBuilder};

use crate::config::MASTER_FILE_NAME;
use crate::paths::is_yaml_like;

#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    pub follow_symlinks: bool,
    /// Honour .gitignore/.ignore files. Off means every file is visited.
    pub respect_gitignore: bool,
}

fn walker(root: &Path, opts: WalkOptions) -> Walk {
    let mut builder = WalkBuilder::new(root);
    builder.follow_links(opts.follow_symlinks);
    builder.hidden(false);
    builder.parents(opts.respect_gitignore);
    builder.ignore(opts.respect_gitignore);
    builder.git_ignore(opts.respect_gitignore);
    builder.git_exclude(opts.respect_gitignore);
    builder.git_global(opts.respect_gitignore);
    builder.sort_by_file_path(files_then_dirs);
    builder.build()
}

/// A directory's files come before its subdirectories, each group by name, so the walk
/// finishes a directory's own files before descending.
fn files_then_dirs(a: &Path, b: &Path) -> Ordering {
    a.is_dir()
        .cmp(&b.is_dir())
        .then_with(|| a.file_name().cmp(&b.file_name()))
}

fn collect_matching(root: &Path, opts: WalkOptions, keep: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for dent in walker(root, opts) {
        let dent = match dent {
            Ok(d) => d,
            Err(err) => {
                tracing::warn!(root = %root.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let path = dent.path();
        if !path.is_file() {
            continue;
        }
        if keep(path) {
            out.push(path.to_path_buf());
        }
    }
    out
}

/// Every file literally named `master.yaml` under `base`, in walk order.
///
/// # Errors
/// Returns an error if `base` does not exist or is not a directory.
pub fn find_master_files(base: &Path, opts: WalkOptions) -> Result<Vec<PathBuf>> {
    if !base.is_dir() {
        bail!("path {} does not exist", base.display());
    }
    Ok(collect_matching(base, opts, |p| {
        p.file_name().is_some_and(|n| n == MASTER_FILE_NAME)
    }))
}

/// Every YAML-like file anywhere below `dir`, in walk order.
///
/// # Errors
/// Returns an error if `dir` is not a directory.
pub fn collect_descriptor_files(dir: &Path, opts: WalkOptions) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("not a directory: {}", dir.display());
    }
    Ok(collect_matching(dir, opts, is_yaml_like))
}

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::YAML_EXTENSIONS;

/// True when the path, as written, climbs out through a `..` segment.
pub fn has_parent_traversal(raw: &str) -> bool {
    Path::new(raw)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
}

/// Resolves `relative` against the directory holding `base_file`, returning an absolute,
/// lexically normalized path. Nothing is required to exist.
pub fn resolve_relative(relative: &str, base_file: &Path) -> Result<PathBuf> {
    let base_abs = std::path::absolute(base_file)
        .with_context(|| format!("make absolute: {}", base_file.display()))?;
    let base_dir = base_abs.parent().unwrap_or(&base_abs);
    Ok(normalize(&base_dir.join(relative)))
}

/// Collapses `.` and `..` segments without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root; on a relative path with nothing left
                // to pop it is kept.
                match out.components().next_back() {
                    Some(Component::Normal(_)) => {
                        out.pop();
                    }
                    Some(Component::RootDir | Component::Prefix(_)) => {}
                    _ => out.push(".."),
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

pub fn is_yaml_like(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| YAML_EXTENSIONS.contains(&ext))
}

/// Last segment of a slash- or platform-separated path string.
pub fn file_name_str(path: &str) -> Option<&str> {
    Path::new(path).file_name().and_then(|s| s.to_str())
}

pub fn display(path: &Path) -> String {
    path.display().to_string()
}

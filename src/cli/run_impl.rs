use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::ScanConfig;
use crate::formatters;
use crate::report::write_reports;
use crate::scan::{ScanObserver, scan_with};
use crate::traversal::WalkOptions;
use crate::types::SchemaReference;

use super::Args;

pub fn run_with_args(args: &Args) -> Result<()> {
    if !args.base.is_dir() {
        bail!("path {} does not exist", args.base.display());
    }

    let config = ScanConfig {
        schema_prefix: args.schema_prefix.clone(),
        walk: WalkOptions {
            follow_symlinks: args.follow_symlinks,
            respect_gitignore: args.respect_gitignore,
        },
    };
    tracing::debug!(base = %args.base.display(), prefix = %config.schema_prefix, "scanning");

    let mut narrator = Narrator {
        progress: None,
        want_progress: args.progress,
        to_stderr: args.json,
    };
    let report = scan_with(&args.base, &config, &mut narrator)?;
    if let Some(pb) = narrator.progress.take() {
        pb.finish_and_clear();
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", formatters::text::format_console(&report));
    }

    let written = write_reports(&report, &args.out_dir)?;
    narrator.say("\nReports written:");
    for path in &written {
        narrator.say(&format!("  - {}", path.display()));
    }
    Ok(())
}

/// Console narration of the scan; stderr when stdout carries JSON.
struct Narrator {
    progress: Option<ProgressBar>,
    want_progress: bool,
    to_stderr: bool,
}

impl Narrator {
    fn say(&self, line: &str) {
        if let Some(pb) = &self.progress {
            pb.println(line);
        } else if self.to_stderr {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}

impl ScanObserver for Narrator {
    fn masters_found(&mut self, masters: &[PathBuf]) {
        if self.want_progress {
            let pb = ProgressBar::new(masters.len() as u64);
            let style = ProgressStyle::with_template("{spinner} {pos}/{len} masters {wide_bar} {eta}")
                .map(|s| s.tick_chars("⠁⠃⠇⠋⠙⠸⢰⣠⣄⡆"))
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            pb.set_style(style);
            self.progress = Some(pb);
        }
        self.say(&format!("Found master.yaml files: {}", masters.len()));
    }

    fn master_started(&mut self, master: &Path) {
        self.say(&format!("\nProcessing master: {}", master.display()));
    }

    fn master_finished(&mut self, _master: &Path, found: &[SchemaReference]) {
        self.say(&format!("  Schema paths found: {}", found.len()));
        if let Some(pb) = &self.progress {
            pb.inc(1);
        }
    }

    fn descending(&mut self, include: &str, resolved: &Path) {
        self.say(&format!("  Recursing into: {include} -> {}", resolved.display()));
    }

    fn expanding_directory(&mut self, dir: &Path) {
        self.say(&format!("  Expanding includeAll: {}", dir.display()));
    }

    fn directory_file(&mut self, file: &Path) {
        self.say(&format!("    includeAll file: {}", file.display()));
    }
}

use std::fmt::Write as _;
use std::io::IsTerminal;

use crate::types::{ScanReport, SchemaReference};

const FILE_RULE_WIDTH: usize = 100;
const CONSOLE_RULE_WIDTH: usize = 80;
const LATEST_NOTE: &str = "(last occurrence in each folder, no sorting)";

/// Plain-text body of `all_schema_paths_report.txt`.
pub fn format_all_file(refs: &[SchemaReference]) -> String {
    let mut out = String::new();
    out.push_str("FULL REPORT - ALL SCHEMA PATHS\n");
    out.push_str(&"=".repeat(FILE_RULE_WIDTH));
    out.push_str("\n\n");
    let _ = writeln!(out, "Total paths found: {}\n", refs.len());
    push_entries(&mut out, refs, &Colors::disabled());
    out
}

/// Plain-text body of `latest_schema_files_report.txt`.
pub fn format_latest_file(refs: &[SchemaReference]) -> String {
    let mut out = String::new();
    out.push_str("LATEST FILE PER SCHEMA FOLDER\n");
    out.push_str(&"=".repeat(FILE_RULE_WIDTH));
    out.push_str("\n\n");
    let _ = writeln!(out, "Total folders: {}", refs.len());
    let _ = writeln!(out, "{LATEST_NOTE}\n");
    push_entries(&mut out, refs, &Colors::disabled());
    out
}

/// Console transcript of both listings, coloured when stdout is a terminal.
pub fn format_console(report: &ScanReport) -> String {
    let colors = Colors::enabled();
    let rule = "=".repeat(CONSOLE_RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(
        out,
        "{}",
        colors.bold(&format!("FULL REPORT - ALL SCHEMA PATHS: {}", report.all.len()))
    );
    let _ = writeln!(out, "{rule}\n");
    push_entries(&mut out, &report.all, &colors);

    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(
        out,
        "{}",
        colors.bold(&format!("LATEST FILE PER SCHEMA FOLDER: {}", report.latest.len()))
    );
    let _ = writeln!(out, "{LATEST_NOTE}");
    let _ = writeln!(out, "{rule}\n");
    push_entries(&mut out, &report.latest, &colors);
    out
}

fn push_entries(out: &mut String, refs: &[SchemaReference], colors: &Colors) {
    for (i, r) in refs.iter().enumerate() {
        let _ = writeln!(out, "{:3}. Schema: {}", i + 1, colors.paint(&r.schema_file, "32"));
        let _ = writeln!(out, "     Folder: {}", r.schema_folder);
        let _ = writeln!(out, "     Master: {}", r.source_master);
        if let Some(nested) = &r.nested_file {
            let _ = writeln!(out, "     Nested file: {nested}");
            if let Some(date) = &r.nested_file_date {
                let _ = writeln!(out, "     File date: {}", colors.paint(date, "36"));
            }
        }
        let _ = writeln!(out, "     Type: {}", r.kind.as_str());
        out.push('\n');
    }
}

struct Colors {
    enabled: bool,
}

impl Colors {
    fn enabled() -> Self {
        let force = std::env::var("CLICOLOR_FORCE")
            .ok()
            .filter(|v| v != "0")
            .is_some();
        let no_color = std::env::var_os("NO_COLOR").is_some();
        let clicolor_zero = std::env::var("CLICOLOR").is_ok_and(|v| v == "0");
        let enabled = if force {
            true
        } else if no_color || clicolor_zero {
            false
        } else {
            std::io::stdout().is_terminal()
        };
        Colors { enabled }
    }

    fn disabled() -> Self {
        Colors { enabled: false }
    }

    fn paint(&self, s: &str, code: &str) -> String {
        if self.enabled {
            format!("\x1b[{code}m{s}\x1b[0m")
        } else {
            s.to_string()
        }
    }

    fn bold(&self, s: &str) -> String {
        self.paint(s, "1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<SchemaReference> {
        vec![
            SchemaReference::direct("s/a/t.sql", "cl/master.yaml", None),
            SchemaReference::direct("s/a/u.sql", "cl/master.yaml", Some("cl/r/20240115-0930-x.yaml")),
        ]
    }

    #[test]
    fn full_file_numbers_entries_and_omits_absent_fields() {
        let out = format_all_file(&sample());
        assert!(out.starts_with("FULL REPORT - ALL SCHEMA PATHS\n"));
        assert!(out.contains("Total paths found: 2\n"));
        assert!(out.contains("  1. Schema: s/a/t.sql\n     Folder: s/a\n     Master: cl/master.yaml\n     Type: direct_schema\n"));
        assert!(out.contains("  2. Schema: s/a/u.sql\n"));
        assert!(out.contains("     Nested file: cl/r/20240115-0930-x.yaml\n     File date: 2024-01-15 09:30\n"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn latest_file_reports_folder_count() {
        let out = format_latest_file(&sample()[1..]);
        assert!(out.contains("Total folders: 1\n"));
        assert!(out.contains(LATEST_NOTE));
    }

    #[test]
    fn empty_lists_still_render_headers() {
        let out = format_all_file(&[]);
        assert!(out.contains("Total paths found: 0"));
        assert!(!out.contains("Schema:"));
    }
}

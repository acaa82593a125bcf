use crate::types::SchemaReference;

pub const HEADER: &str = "schema_file;schema_folder;source_master;nested_file;nested_file_date;type";
const DELIMITER: char = ';';

pub fn format(refs: &[SchemaReference]) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    for r in refs {
        push_row(&mut out, r);
    }
    out
}

fn push_row(out: &mut String, r: &SchemaReference) {
    use std::fmt::Write as _;
    let _ = writeln!(
        out,
        "{};{};{};{};{};{}",
        field(&r.schema_file),
        field(&r.schema_folder),
        field(&r.source_master),
        field(r.nested_file.as_deref().unwrap_or_default()),
        field(r.nested_file_date.as_deref().unwrap_or_default()),
        r.kind.as_str()
    );
}

// Quote only when a value would otherwise split the row.
fn field(value: &str) -> std::borrow::Cow<'_, str> {
    if value.contains([DELIMITER, '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\"")).into()
    } else {
        value.into()
    }
}

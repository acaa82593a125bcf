use indexmap::IndexMap;

use crate::types::SchemaReference;

/// One reference per schema folder: the last one in discovery order.
///
/// Dates are deliberately not compared. Discovery order stands in for the order the
/// changelogs are applied, so the last reference seen for a folder wins. Folders keep
/// the position where they were first seen.
pub fn latest_per_folder(all: &[SchemaReference]) -> Vec<SchemaReference> {
    let mut by_folder: IndexMap<&str, &SchemaReference> = IndexMap::new();
    for r in all {
        by_folder.insert(r.schema_folder.as_str(), r);
    }
    by_folder.into_values().cloned().collect()
}

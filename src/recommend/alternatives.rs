//! Like-for-like alternatives within a category.

use crate::data::{MaterialRecord, MaterialTable};

/// Other records sharing the category of the material named `name`.
///
/// `name` must equal a material name, ignoring case and surrounding
/// whitespace. Unknown names and uncategorized materials yield an empty list.
///
/// # Examples
///
/// ```
/// use sustainrec::data::{MaterialRecord, MaterialTable};
/// use sustainrec::recommend::alternatives;
///
/// let table = MaterialTable::new(vec![
///     MaterialRecord::new("PET").with_category("plastic"),
///     MaterialRecord::new("HDPE").with_category("plastic"),
///     MaterialRecord::new("Glass").with_category("container"),
/// ]);
/// let alts = alternatives(&table, "pet");
/// assert_eq!(alts.len(), 1);
/// assert_eq!(alts[0].material, "HDPE");
/// ```
#[must_use]
pub fn alternatives(table: &MaterialTable, name: &str) -> Vec<MaterialRecord> {
    let wanted = name.trim().to_lowercase();
    let Some((query_idx, query)) = table
        .iter()
        .enumerate()
        .find(|(_, r)| r.material.trim().to_lowercase() == wanted)
    else {
        return Vec::new();
    };

    let category = query.category.trim().to_lowercase();
    if category.is_empty() {
        return Vec::new();
    }

    table
        .iter()
        .enumerate()
        .filter(|(idx, r)| *idx != query_idx && r.category.trim().to_lowercase() == category)
        .map(|(_, r)| r.clone())
        .collect()
}

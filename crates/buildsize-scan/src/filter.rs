//! File type selection.

use buildsize_core::FileRecord;

/// Select the records whose name ends with `.<file_type>`, ignoring case.
pub fn filter_by_type<'a>(records: &'a [FileRecord], file_type: &str) -> Vec<&'a FileRecord> {
    records.iter().filter(|r| r.has_type(file_type)).collect()
}

/// Pick the largest record.
///
/// Equal sizes are resolved by the lexicographically smallest path, so the
/// choice never depends on directory listing order.
pub fn largest<'a, I>(records: I) -> Option<&'a FileRecord>
where
    I: IntoIterator<Item = &'a FileRecord>,
{
    records
        .into_iter()
        .max_by(|a, b| a.size.cmp(&b.size).then_with(|| b.path.cmp(&a.path)))
}

//! Client-side filtering and pagination for the report and open-device lists.

use crate::models::OperationRecord;

/// Records whose `operation_date` starts with `date_prefix`.
///
/// An empty (or blank) prefix keeps everything. The match is a plain string
/// prefix on [`OperationRecord::date_string`], so `"2024-01"` selects a month.
pub fn filter_by_date<'a>(
    records: &'a [OperationRecord],
    date_prefix: &str,
) -> Vec<&'a OperationRecord> {
    let prefix = date_prefix.trim();
    records
        .iter()
        .filter(|record| prefix.is_empty() || record.date_string().starts_with(prefix))
        .collect()
}

/// One page of a list.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based page index.
    pub index: usize,
    pub per_page: usize,
    /// Length of the whole list.
    pub total: usize,
}

impl<T: Clone> Page<T> {
    /// Cut page `index` out of `all`. A page size of zero is treated as one.
    pub fn slice(all: &[T], index: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let start = index.saturating_mul(per_page).min(all.len());
        let end = start.saturating_add(per_page).min(all.len());
        Self {
            items: all[start..end].to_vec(),
            index,
            per_page,
            total: all.len(),
        }
    }
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index.saturating_add(1).saturating_mul(self.per_page) < self.total
    }

    /// Number of pages; an empty list still has one (empty) page.
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.per_page).max(1)
    }
}

//! Derivation pipeline: filter → sort → paginate
//!
//! Pure functions over borrowed records. Input order is the tie-breaker
//! everywhere: filtering keeps it and sorting is stable.

use std::cmp::Ordering;

use super::{SortConfig, SortDirection, SortKey};
use crate::model::Comment;

/// Keep records whose name, email or body contains `term`, ignoring case.
/// An empty term keeps everything.
pub fn filter<'a>(records: &'a [Comment], term: &str) -> Vec<&'a Comment> {
    if term.is_empty() {
        return records.iter().collect();
    }
    let needle = term.to_lowercase();
    records.iter().filter(|c| c.matches(&needle)).collect()
}

fn compare_key(a: &Comment, b: &Comment, key: SortKey) -> Ordering {
    match key {
        SortKey::PostId => a.post_id.cmp(&b.post_id),
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Email => a.email.cmp(&b.email),
    }
}

fn compare(a: &Comment, b: &Comment, config: SortConfig) -> Ordering {
    let ord = compare_key(a, b, config.key);
    match config.direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

/// Stable sort by the configured column; `None` leaves the order alone.
pub fn sort(rows: &mut [&Comment], config: Option<SortConfig>) {
    if let Some(config) = config {
        rows.sort_by(|a, b| compare(a, b, config));
    }
}

/// Filter and sort in one pass, yielding positions into `records`
pub fn ordered_indices(records: &[Comment], term: &str, config: Option<SortConfig>) -> Vec<usize> {
    let needle = term.to_lowercase();
    let mut indices: Vec<usize> = (0..records.len())
        .filter(|&i| term.is_empty() || records[i].matches(&needle))
        .collect();
    if let Some(config) = config {
        indices.sort_by(|&a, &b| compare(&records[a], &records[b], config));
    }
    indices
}

/// `ceil(count / page_size)`, at least 1
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Rows `[(page-1)*page_size, page*page_size)`, truncated at the end
pub fn paginate<'r, 'a>(rows: &'r [&'a Comment], page: usize, page_size: usize) -> &'r [&'a Comment] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size).min(rows.len());
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

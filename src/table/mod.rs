//! Comments table state
//!
//! Search, tri-state column sort and pagination over a fixed record set.
//! `pipeline` holds the pure filter → sort → paginate functions;
//! `TableController` owns the persisted state and recomputes the visible
//! page whenever it changes.

pub mod controller;
pub mod pipeline;

pub use controller::TableController;
pub use pipeline::{filter, ordered_indices, paginate, sort, total_pages};

use serde::{Deserialize, Serialize};

/// Sortable columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    PostId,
    Name,
    Email,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::PostId, SortKey::Name, SortKey::Email];

    /// Column header label
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::PostId => "Post ID",
            SortKey::Name => "Name",
            SortKey::Email => "Email",
        }
    }

    /// Field name as it appears in the JSON payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PostId => "postId",
            SortKey::Name => "name",
            SortKey::Email => "email",
        }
    }

    /// Inverse of `as_str`; only the exact field names are accepted
    pub fn parse(s: &str) -> Option<Self> {
        SortKey::ALL.into_iter().find(|key| key.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Active sort column and direction. `Option<SortConfig>::None` is input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }
}

/// Next sort state after "sort by `key`":
/// none or other column → ascending, ascending → descending, descending → none.
pub fn next_sort(current: Option<SortConfig>, key: SortKey) -> Option<SortConfig> {
    match current {
        Some(cfg) if cfg.key == key => match cfg.direction {
            SortDirection::Ascending => Some(SortConfig::descending(key)),
            SortDirection::Descending => None,
        },
        _ => Some(SortConfig::ascending(key)),
    }
}

/// Header icon state for one column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

impl SortIndicator {
    pub fn for_column(sort: Option<SortConfig>, key: SortKey) -> Self {
        match sort {
            Some(cfg) if cfg.key == key => match cfg.direction {
                SortDirection::Ascending => SortIndicator::Ascending,
                SortDirection::Descending => SortIndicator::Descending,
            },
            _ => SortIndicator::Unsorted,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            SortIndicator::Unsorted => "↕",
            SortIndicator::Ascending => "↑",
            SortIndicator::Descending => "↓",
        }
    }
}

/// Pagination footer data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    /// 1-based, already clamped
    pub current_page: usize,
    /// Never below 1
    pub total_pages: usize,
    pub page_size: usize,
    /// Records left after filtering
    pub filtered_count: usize,
    /// Rows on the current page
    pub visible_count: usize,
}

impl PageSummary {
    /// 1-based index of the first visible entry, 0 when the page is empty
    pub fn first_entry(&self) -> usize {
        if self.visible_count == 0 {
            0
        } else {
            (self.current_page - 1) * self.page_size + 1
        }
    }

    pub fn last_entry(&self) -> usize {
        (self.current_page * self.page_size).min(self.filtered_count)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// "Showing 1 to 10 of 500 entries"
    pub fn showing(&self) -> String {
        format!(
            "Showing {} to {} of {} entries",
            self.first_entry(),
            self.last_entry(),
            self.filtered_count
        )
    }

    /// "Page 1 of 50"
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }
}

/// One rendered page of the table
#[derive(Debug, Clone, PartialEq)]
pub struct TablePage<'a> {
    pub rows: Vec<&'a crate::model::Comment>,
    pub summary: PageSummary,
    pub sort: Option<SortConfig>,
    pub search_term: &'a str,
}

impl TablePage<'_> {
    pub fn indicator(&self, key: SortKey) -> SortIndicator {
        SortIndicator::for_column(self.sort, key)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

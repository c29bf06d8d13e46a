//! Plain-text rendering for the native front end
//!
//! The browser build renders into the DOM instead (see `main.rs`); both read
//! the same `TablePage` and `User` data.

use std::fmt::Write;

use crate::model::User;
use crate::table::{SortKey, TablePage};

pub const NO_RESULTS: &str = "No results found.";
pub const USER_NOT_FOUND: &str = "User not found";
pub const USER_NOT_FOUND_HINT: &str = "We couldn't load the user profile. Please try again later.";

/// Widest the comment column gets before it is cut with an ellipsis
const BODY_WIDTH: usize = 48;

/// Cut `text` to `max` characters, ending in `…` when shortened.
/// Newlines are flattened to spaces.
pub fn truncate(text: &str, max: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.chars().count() <= max {
        return flat;
    }
    let mut cut: String = flat.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Render one page of the table with its header and footer
pub fn render_table(page: &TablePage<'_>) -> String {
    let headers: Vec<String> = SortKey::ALL
        .iter()
        .map(|key| format!("{} {}", key.label(), page.indicator(*key).symbol()))
        .chain(std::iter::once("Comment".to_string()))
        .collect();

    let cells: Vec<[String; 4]> = page
        .rows
        .iter()
        .map(|c| {
            [
                c.post_id.to_string(),
                c.name.clone(),
                c.email.clone(),
                truncate(&c.body, BODY_WIDTH),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    if !page.search_term.is_empty() {
        let _ = writeln!(out, "Search: {:?}", page.search_term);
    }

    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad(h, *w))
        .collect();
    let _ = writeln!(out, "{}", header_line.join(" | ").trim_end());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));

    if cells.is_empty() {
        let _ = writeln!(out, "{}", NO_RESULTS);
    }
    for row in &cells {
        let line: Vec<String> = row.iter().zip(&widths).map(|(c, w)| pad(c, *w)).collect();
        let _ = writeln!(out, "{}", line.join(" | ").trim_end());
    }

    let summary = &page.summary;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}    {}  (rows per page: {})",
        summary.showing(),
        summary.page_label(),
        summary.page_size
    );
    out
}

/// Render the profile card, or the not-found card
pub fn render_profile(user: Option<&User>) -> String {
    let mut out = String::new();
    match user {
        Some(user) => {
            let _ = writeln!(out, "{}", user.name);
            let _ = writeln!(out, "{}", user.handle());
            let _ = writeln!(out);
            let _ = writeln!(out, "Email:   {}", user.email);
            let _ = writeln!(out, "Phone:   {}", user.phone);
            let _ = writeln!(out, "Address: {}", user.address_line());
            let _ = writeln!(out, "Company: {}", user.company_line());
        }
        None => {
            let _ = writeln!(out, "{}", USER_NOT_FOUND);
            let _ = writeln!(out, "{}", USER_NOT_FOUND_HINT);
        }
    }
    out
}

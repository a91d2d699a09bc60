//! Pagination arithmetic, the client-side name filter and identifier
//! extraction for the catalog list.

use crate::state::CatalogEntry;

/// Entries requested per page.
pub const PAGE_SIZE: u32 = 50;

/// A page navigation request from the list screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageNav {
    First,
    Prev,
    Next,
    Last,
    Jump(u32),
}

/// Offset for a 1-based page number.
pub fn page_offset(page: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(PAGE_SIZE)
}

/// `ceil(total / PAGE_SIZE)`.
pub fn total_pages(total: u64) -> u32 {
    let pages = total.div_ceil(u64::from(PAGE_SIZE));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Resolve a navigation request against the current page.
///
/// Returns the page to fetch, or `None` when the target is the current page
/// or falls outside `[1, total_pages]`.
pub fn navigate(current: u32, total_pages: u32, nav: PageNav) -> Option<u32> {
    let target = match nav {
        PageNav::First => 1,
        PageNav::Prev => current.checked_sub(1)?,
        PageNav::Next => current.checked_add(1)?,
        PageNav::Last => total_pages,
        PageNav::Jump(page) => page,
    };
    if target < 1 || target > total_pages || target == current {
        return None;
    }
    Some(target)
}

/// Collection endpoint URL for a page. `base` must end with `/`.
pub fn page_url(base: &str, page: u32) -> String {
    format!(
        "{base}pokemon/?limit={PAGE_SIZE}&offset={}",
        page_offset(page)
    )
}

/// Detail endpoint URL for an identifier.
pub fn entry_url(base: &str, id: &str) -> String {
    format!("{base}pokemon/{id}")
}

/// 1-based `(first, last)` positions shown on a page, as in
/// "Showing 51 - 100 of 1302". `None` when the page starts past `total`.
pub fn page_range(page: u32, total: u64) -> Option<(u64, u64)> {
    let first = page_offset(page) + 1;
    if first > total {
        return None;
    }
    let last = (u64::from(page) * u64::from(PAGE_SIZE)).min(total);
    Some((first, last))
}

/// Last non-empty path segment of a resource URL.
pub fn entry_id_from_url(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Indices of the entries whose name contains `query`, ignoring case.
pub fn filter_indices(entries: &[CatalogEntry], query: &str) -> Vec<usize> {
    let query = query.to_lowercase();
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| query.is_empty() || entry.name.to_lowercase().contains(&query))
        .map(|(idx, _)| idx)
        .collect()
}

/// Entries whose name contains `query`, ignoring case, in page order.
pub fn filter_entries<'a>(entries: &'a [CatalogEntry], query: &str) -> Vec<&'a CatalogEntry> {
    filter_indices(entries, query)
        .into_iter()
        .map(|idx| &entries[idx])
        .collect()
}

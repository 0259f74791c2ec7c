use serde::Serialize;
use thiserror::Error;

/// Pages are shown five cards wide and three rows deep.
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Page ranges at or below this length are listed in full.
const FULL_LIST_LIMIT: usize = 7;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("page {page} does not exist, choose a page between 1 and {total_pages}")]
    OutOfRange { page: usize, total_pages: usize },
    #[error("'{0}' is not a page number")]
    NotANumber(String),
}

/// `ceil(count / page_size)`; zero results means zero pages.
#[must_use]
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Items on 1-indexed `page`. Pages outside the range are empty.
#[must_use]
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Parse what the user typed into the jump-to-page box.
///
/// # Errors
///
/// Returns `PageError` if the input is not a number or names a page that does not exist
pub fn parse_page_input(input: &str, total_pages: usize) -> Result<usize, PageError> {
    let page = input
        .trim()
        .parse::<usize>()
        .map_err(|_| PageError::NotANumber(input.trim().to_string()))?;
    if page == 0 || page > total_pages {
        return Err(PageError::OutOfRange { page, total_pages });
    }
    Ok(page)
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "kind", content = "page", rename_all = "lowercase")]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

/// Page-number buttons for the pager. The first page, the last page and the
/// neighbours of `current` are always listed; other gaps collapse into one
/// ellipsis each.
#[must_use]
pub fn page_markers(current: usize, total_pages: usize) -> Vec<PageMarker> {
    if total_pages <= FULL_LIST_LIMIT {
        return (1..=total_pages).map(PageMarker::Page).collect();
    }
    let current = current.clamp(1, total_pages);
    let mut shown: Vec<usize> = vec![1, total_pages];
    for page in current.saturating_sub(1)..=current + 1 {
        if (1..=total_pages).contains(&page) {
            shown.push(page);
        }
    }
    // near either end the first or last four pages are listed outright
    if current <= 4 {
        shown.extend(2..=4);
    }
    if current + 3 >= total_pages {
        shown.extend(total_pages - 3..total_pages);
    }
    shown.sort_unstable();
    shown.dedup();

    let mut markers = Vec::with_capacity(shown.len() + 2);
    let mut previous = 0;
    for page in shown {
        if page > previous + 1 {
            markers.push(PageMarker::Ellipsis);
        }
        markers.push(PageMarker::Page(page));
        previous = page;
    }
    markers
}

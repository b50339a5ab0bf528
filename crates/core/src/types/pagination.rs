//! Page requests and paginated envelopes.

use serde::{Deserialize, Serialize};

/// Error returned for malformed `page`/`limit` query values.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    /// The value is not a whole number.
    #[error("{param} must be a positive integer")]
    NotANumber {
        /// Query parameter name.
        param: &'static str,
    },
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Page size when none is requested.
    pub const DEFAULT_LIMIT: u32 = 6;
    /// Largest page size served.
    pub const MAX_LIMIT: u32 = 100;

    /// Build a page request, clamping values into range.
    ///
    /// Page 0 becomes page 1; limit 0 becomes [`Self::DEFAULT_LIMIT`]; limits
    /// above [`Self::MAX_LIMIT`] are capped.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        let limit = match limit {
            0 => Self::DEFAULT_LIMIT,
            n => n.min(Self::MAX_LIMIT),
        };
        Self {
            page: page.max(1),
            limit,
        }
    }

    /// Parse raw `page` and `limit` query values.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError`] if either value is present but not a
    /// non-negative integer.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, PaginationError> {
        let page = parse_u32(page, "page")?.unwrap_or(1);
        let limit = parse_u32(limit, "limit")?.unwrap_or(Self::DEFAULT_LIMIT);
        Ok(Self::new(page, limit))
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of rows to skip.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_LIMIT)
    }
}

fn parse_u32(value: Option<&str>, param: &'static str) -> Result<Option<u32>, PaginationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse::<u32>()
            .map(Some)
            .map_err(|_| PaginationError::NotANumber { param }),
    }
}

/// One page of results plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub products: Vec<T>,
    /// Total number of items across all pages.
    pub total_count: i64,
    /// `ceil(total_count / limit)`.
    pub total_pages: i64,
    /// The requested page number.
    pub current_page: u32,
    /// Whether a later page exists.
    pub has_next_page: bool,
    /// Whether an earlier page exists.
    pub has_previous_page: bool,
}

impl<T> Page<T> {
    /// Assemble an envelope from the fetched items and the total count.
    #[must_use]
    pub fn new(products: Vec<T>, total_count: i64, request: PageRequest) -> Self {
        let limit = i64::from(request.limit());
        let total_count = total_count.max(0);
        let total_pages = (total_count + limit - 1) / limit;
        let current_page = request.page();
        Self {
            products,
            total_count,
            total_pages,
            current_page,
            has_next_page: i64::from(current_page) < total_pages,
            has_previous_page: current_page > 1,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let req = PageRequest::parse(None, None).unwrap();
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), 6);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_limit_is_capped_and_zero_falls_back() {
        assert_eq!(PageRequest::parse(None, Some("500")).unwrap().limit(), 100);
        assert_eq!(PageRequest::parse(None, Some("0")).unwrap().limit(), 6);
        assert_eq!(PageRequest::parse(Some("0"), None).unwrap().page(), 1);
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(
            PageRequest::parse(Some("two"), None),
            Err(PaginationError::NotANumber { param: "page" })
        );
        assert_eq!(
            PageRequest::parse(None, Some("-3")),
            Err(PaginationError::NotANumber { param: "limit" })
        );
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(3, 6).offset(), 12);
    }

    #[test]
    fn test_second_of_two_pages() {
        let page = Page::new(vec![7, 8, 9, 10, 11, 12], 12, PageRequest::new(2, 6));
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_page, 2);
        assert!(!page.has_next_page);
        assert!(page.has_previous_page);
    }

    #[test]
    fn test_partial_last_page() {
        let page: Page<u8> = Page::new(Vec::new(), 13, PageRequest::new(1, 6));
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next_page);
        assert!(!page.has_previous_page);
    }

    #[test]
    fn test_empty_listing() {
        let page: Page<u8> = Page::new(Vec::new(), 0, PageRequest::default());
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_serializes_camel_case() {
        let page = Page::new(vec![1], 1, PageRequest::default());
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalCount"], 1);
        assert_eq!(json["hasPreviousPage"], false);
    }
}

// Pagination requests and envelopes
//
// Offset endpoints take page + pageSize, cursor endpoints take an opaque
// cursor + pageSize. Each client accepts exactly one of the two styles.

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

fn check_page_size(size: u32) -> Result<()> {
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(DomainError::InvalidPageSize {
            size,
            max: MAX_PAGE_SIZE,
        });
    }
    Ok(())
}

/// Offset pagination request (zero-based page)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    pub fn validate(&self) -> Result<()> {
        check_page_size(self.page_size)
    }

    /// Query parameters in wire order
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("pageSize".to_string(), self.page_size.to_string()),
        ]
    }
}

/// Cursor pagination request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorRequest {
    pub cursor: Option<String>,
    pub page_size: u32,
}

impl Default for CursorRequest {
    fn default() -> Self {
        Self {
            cursor: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CursorRequest {
    pub fn first(page_size: u32) -> Self {
        Self {
            cursor: None,
            page_size,
        }
    }

    pub fn after(cursor: impl Into<String>, page_size: u32) -> Self {
        Self {
            cursor: Some(cursor.into()),
            page_size,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_page_size(self.page_size)
    }

    /// Query parameters; the cursor is omitted on the first page
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::with_capacity(2);
        if let Some(cursor) = &self.cursor {
            query.push(("cursor".to_string(), cursor.clone()));
        }
        query.push(("pageSize".to_string(), self.page_size.to_string()));
        query
    }
}

/// Offset pagination envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
}

impl<T> Page<T> {
    /// Server flag when present, else `(page + 1) * page_size < total_count`
    pub fn has_more(&self) -> bool {
        self.has_more.unwrap_or_else(|| {
            (u64::from(self.page) + 1) * u64::from(self.page_size) < self.total_count
        })
    }

    /// Request for the following page, if there is one
    pub fn next_request(&self) -> Option<PageRequest> {
        self.has_more()
            .then(|| PageRequest::new(self.page + 1, self.page_size))
    }
}

/// Cursor pagination envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPage<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
}

impl<T> CursorPage<T> {
    pub fn has_more(&self) -> bool {
        self.has_more.unwrap_or(self.next_cursor.is_some())
    }

    pub fn next_request(&self, page_size: u32) -> Option<CursorRequest> {
        if !self.has_more() {
            return None;
        }
        self.next_cursor
            .as_ref()
            .map(|cursor| CursorRequest::after(cursor.clone(), page_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(page: u32, page_size: u32, total: u64) -> Page<u32> {
        Page {
            items: vec![],
            total_count: total,
            page,
            page_size,
            has_more: None,
        }
    }

    #[test]
    fn test_has_more_computed_from_position() {
        assert!(page(0, 10, 25).has_more());
        assert!(page(1, 10, 25).has_more());
        assert!(!page(2, 10, 25).has_more());
        // exact fit: (1 + 1) * 10 == 20
        assert!(!page(1, 10, 20).has_more());
        assert!(!page(0, 10, 0).has_more());
    }

    #[test]
    fn test_server_flag_wins() {
        let mut p = page(0, 10, 100);
        p.has_more = Some(false);
        assert!(!p.has_more());
        assert!(p.next_request().is_none());
    }

    #[test]
    fn test_next_request_advances_page() {
        assert_eq!(page(0, 10, 25).next_request(), Some(PageRequest::new(1, 10)));
    }

    #[test]
    fn test_page_size_bounds() {
        assert!(PageRequest::new(0, 0).validate().is_err());
        assert!(PageRequest::new(0, MAX_PAGE_SIZE + 1).validate().is_err());
        assert!(PageRequest::new(3, MAX_PAGE_SIZE).validate().is_ok());
        assert!(CursorRequest::first(0).validate().is_err());
    }

    #[test]
    fn test_cursor_query_omits_missing_cursor() {
        let first = CursorRequest::first(50).to_query();
        assert_eq!(first, vec![("pageSize".to_string(), "50".to_string())]);

        let next = CursorRequest::after("abc", 50).to_query();
        assert_eq!(next[0], ("cursor".to_string(), "abc".to_string()));
    }

    #[test]
    fn test_cursor_page_deserializes_without_flag() {
        let p: CursorPage<u32> =
            serde_json::from_value(json!({"items": [1, 2], "nextCursor": "n2"})).unwrap();
        assert!(p.has_more());
        assert_eq!(p.next_request(2), Some(CursorRequest::after("n2", 2)));

        let last: CursorPage<u32> = serde_json::from_value(json!({"items": [3]})).unwrap();
        assert!(!last.has_more());
    }
}

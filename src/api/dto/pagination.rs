//! Pagination query parameters and the paginated response envelope.

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};
use url::Url;

use crate::config::MAX_PAGE_SIZE;
use crate::error::AppError;

/// Pagination query parameters: `?page=2&limit=10`.
///
/// Uses `serde_with` to parse numbers from query strings.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<u32>,
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }
}

impl PaginationParams {
    /// Validates the parameters, falling back to `default_limit`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the page is 0 or the limit is
    /// outside `1..=100`.
    pub fn resolve(&self, default_limit: u32) -> Result<PageRequest, AppError> {
        let page = self.page.unwrap_or(1);
        let limit = self.limit.unwrap_or(default_limit);

        if page == 0 {
            return Err(AppError::bad_request(
                "Page must be greater than 0",
                json!({ "page": page }),
            ));
        }

        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(AppError::bad_request(
                format!("Limit must be between 1 and {MAX_PAGE_SIZE}"),
                json!({ "limit": limit }),
            ));
        }

        Ok(PageRequest { page, limit })
    }
}

/// Paginated list response.
///
/// ```json
/// { "count": 12, "next": "http://host/api/recipes?page=3", "previous": "http://host/api/recipes?page=1", "results": [] }
/// ```
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Builds a page, linking neighbours through `base_url + path`.
    ///
    /// Every query parameter of the current request except `page` is kept.
    pub fn new(
        results: Vec<T>,
        count: i64,
        request: PageRequest,
        base_url: &str,
        path: &str,
        query: Option<&str>,
    ) -> Self {
        let seen = request.offset() + results.len() as i64;

        let next = (seen < count).then(|| page_link(base_url, path, query, request.page + 1));
        let previous = (request.page > 1).then(|| page_link(base_url, path, query, request.page - 1));

        Self {
            count,
            next,
            previous,
            results,
        }
    }
}

fn page_link(base_url: &str, path: &str, query: Option<&str>, page: u32) -> String {
    let Ok(mut url) = Url::parse(&format!("{base_url}{path}")) else {
        return format!("{base_url}{path}?page={page}");
    };

    {
        let mut pairs = url.query_pairs_mut();
        if let Some(query) = query {
            for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
                if key != "page" {
                    pairs.append_pair(&key, &value);
                }
            }
        }
        pairs.append_pair("page", &page.to_string());
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://testserver";

    fn params(page: Option<u32>, limit: Option<u32>) -> PaginationParams {
        PaginationParams { page, limit }
    }

    #[test]
    fn test_defaults() {
        let req = params(None, None).resolve(6).unwrap();
        assert_eq!(req.offset(), 0);
        assert_eq!(req.limit(), 6);
    }

    #[test]
    fn test_offset() {
        let req = params(Some(3), Some(10)).resolve(6).unwrap();
        assert_eq!(req.offset(), 20);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(params(Some(0), None).resolve(6).is_err());
        assert!(params(None, Some(0)).resolve(6).is_err());
        assert!(params(None, Some(101)).resolve(6).is_err());
        assert!(params(None, Some(100)).resolve(6).is_ok());
    }

    #[test]
    fn test_parse_from_query_strings() {
        let p: PaginationParams = serde_json::from_str(r#"{"page": "2", "limit": "5"}"#).unwrap();
        assert_eq!(p.page, Some(2));
        assert_eq!(p.limit, Some(5));
    }

    #[test]
    fn test_links_on_middle_page() {
        let req = params(Some(2), Some(2)).resolve(6).unwrap();
        let page = Page::new(vec![3, 4], 5, req, BASE, "/api/recipes", Some("page=2&limit=2"));

        assert_eq!(
            page.next.as_deref(),
            Some("http://testserver/api/recipes?limit=2&page=3")
        );
        assert_eq!(
            page.previous.as_deref(),
            Some("http://testserver/api/recipes?limit=2&page=1")
        );
    }

    #[test]
    fn test_links_keep_repeated_filters() {
        let req = params(None, Some(1)).resolve(6).unwrap();
        let page = Page::new(vec![1], 3, req, BASE, "/api/recipes", Some("tags=lunch&tags=dinner"));

        assert_eq!(
            page.next.as_deref(),
            Some("http://testserver/api/recipes?tags=lunch&tags=dinner&page=2")
        );
        assert!(page.previous.is_none());
    }

    #[test]
    fn test_last_page_has_no_next() {
        let req = params(Some(2), Some(3)).resolve(6).unwrap();
        let page = Page::new(vec![4], 4, req, BASE, "/api/users", None);
        assert!(page.next.is_none());
    }
}

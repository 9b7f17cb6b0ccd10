use serde::{Deserialize, Serialize};

use crate::{error::AppError, validation::Validator};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Query string of `GET /products`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn skip(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

impl ListQuery {
    /// Apply defaults, reject zero values and clamp the page size to
    /// `max_page_size`. An empty search term means no filter.
    pub fn resolve(self, max_page_size: u32) -> Result<(Option<String>, PageRequest), AppError> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let page_size = self.limit.unwrap_or(DEFAULT_PAGE_SIZE);

        let mut v = Validator::new();
        v.check("page", page >= 1, "Page must be at least 1");
        v.check("limit", page_size >= 1, "Limit must be at least 1");
        v.finish()?;

        let search = self.search.filter(|s| !s.is_empty());
        Ok((
            search,
            PageRequest {
                page,
                page_size: page_size.min(max_page_size),
            },
        ))
    }
}

/// A page of results plus the counts needed to render pagination.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: u64,
    pub total_count: u64,
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_count: u64) -> Self {
        let returned = items.len() as u64;
        Self {
            items,
            page: request.page,
            total_pages: total_count.div_ceil(u64::from(request.page_size)),
            total_count,
            has_more: request.skip() + returned < total_count,
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            current_page: self.page,
            total_pages: self.total_pages,
            total_products: self.total_count,
            has_more: self.has_more,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_products: u64,
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let (search, request) = ListQuery::default().resolve(100).unwrap();
        assert_eq!(search, None);
        assert_eq!(request, PageRequest { page: 1, page_size: 10 });
        assert_eq!(request.skip(), 0);
    }

    #[test]
    fn page_size_is_capped() {
        let query = ListQuery {
            limit: Some(5_000),
            ..ListQuery::default()
        };
        let (_, request) = query.resolve(100).unwrap();
        assert_eq!(request.page_size, 100);
    }

    #[test]
    fn zero_page_and_limit_are_rejected() {
        let query = ListQuery {
            search: None,
            page: Some(0),
            limit: Some(0),
        };
        let Err(AppError::Validation(errors)) = query.resolve(100) else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn empty_search_means_no_filter() {
        let query = ListQuery {
            search: Some(String::new()),
            ..ListQuery::default()
        };
        assert_eq!(query.resolve(100).unwrap().0, None);
    }

    #[test]
    fn has_more_tracks_remaining_items() {
        let request = PageRequest { page: 2, page_size: 10 };

        let page = Page::new(vec![0; 10], request, 25);
        assert!(page.has_more);
        assert_eq!(page.total_pages, 3);

        let page = Page::new(vec![0; 5], request, 15);
        assert!(!page.has_more);
        assert_eq!(page.total_pages, 2);

        let page: Page<u8> = Page::new(vec![], PageRequest { page: 9, page_size: 10 }, 15);
        assert!(!page.has_more);
    }
}

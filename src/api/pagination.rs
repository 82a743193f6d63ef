use serde::{Deserialize, Serialize};

use crate::config;

/// `page`/`limit` query parameters shared by every list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn page(&self) -> i64 {
        self.page.filter(|p| *p >= 1).unwrap_or(1)
    }

    pub fn limit(&self) -> i64 {
        let api = &config::config().api;
        match self.limit {
            Some(limit) if limit >= 1 => limit.min(api.max_page_size),
            _ => api.default_page_size,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

/// Paginated list body: `{data, page, limit, total}`.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, query: &ListQuery, total: i64) -> Self {
        Self {
            data,
            page: query.page(),
            limit: query.limit(),
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_applied() {
        let q = ListQuery::default();
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), config::config().api.default_page_size);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn bounds_clamped() {
        let q = ListQuery {
            page: Some(0),
            limit: Some(0),
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), config::config().api.default_page_size);

        let q = ListQuery {
            page: Some(3),
            limit: Some(1_000_000),
        };
        assert_eq!(q.limit(), config::config().api.max_page_size);
        assert_eq!(q.offset(), 2 * config::config().api.max_page_size);
    }
}

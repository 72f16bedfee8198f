use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Uniform delete acknowledgment: `{"status": "ok"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusOk {
    pub status: String,
}

impl StatusOk {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Query parameters for paginated list endpoints.
///
/// `page` is kept as a raw string: an absent or non-numeric value falls back
/// to page 1 instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number (1-indexed; invalid values fall back to 1)
    pub page: Option<String>,
}

impl PageQuery {
    /// Parsed page number, or 1 if absent/invalid.
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|&n| n >= 1)
            .unwrap_or(1)
    }
}

/// One window over an ordered collection: `{items, num_pages, total}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub num_pages: i64,
    pub total: i64,
}

/// Computes page windows with clamping semantics: a requested page past the
/// end resolves to the last valid page, never to an empty set or an error.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    page_size: i64,
}

impl Paginator {
    pub fn new(page_size: i64) -> Self {
        debug_assert!(page_size >= 1);
        Self { page_size }
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Total number of pages; an empty collection still has one page.
    pub fn num_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            1
        } else {
            (total + self.page_size - 1) / self.page_size
        }
    }

    /// Clamp a requested page into `[1, num_pages]`.
    pub fn clamp_page(&self, requested: i64, total: i64) -> i64 {
        requested.clamp(1, self.num_pages(total))
    }

    /// SQL OFFSET for a (clamped) page number.
    pub fn offset(&self, page: i64) -> i64 {
        (page.max(1) - 1) * self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_defaults_to_one() {
        assert_eq!(PageQuery { page: None }.page(), 1);
        assert_eq!(
            PageQuery {
                page: Some("abc".to_string())
            }
            .page(),
            1
        );
        assert_eq!(
            PageQuery {
                page: Some("0".to_string())
            }
            .page(),
            1
        );
        assert_eq!(
            PageQuery {
                page: Some("-3".to_string())
            }
            .page(),
            1
        );
        assert_eq!(
            PageQuery {
                page: Some("7".to_string())
            }
            .page(),
            7
        );
    }

    #[test]
    fn num_pages_rounds_up() {
        let paginator = Paginator::new(10);
        assert_eq!(paginator.num_pages(0), 1);
        assert_eq!(paginator.num_pages(1), 1);
        assert_eq!(paginator.num_pages(10), 1);
        assert_eq!(paginator.num_pages(11), 2);
        assert_eq!(paginator.num_pages(25), 3);
    }

    #[test]
    fn out_of_range_page_clamps_to_last() {
        let paginator = Paginator::new(10);
        assert_eq!(paginator.clamp_page(99, 25), 3);
        assert_eq!(paginator.clamp_page(3, 25), 3);
        assert_eq!(paginator.clamp_page(1, 0), 1);
    }

    #[test]
    fn offset_is_zero_based() {
        let paginator = Paginator::new(10);
        assert_eq!(paginator.offset(1), 0);
        assert_eq!(paginator.offset(3), 20);
    }
}

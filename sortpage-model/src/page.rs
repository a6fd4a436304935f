//! Page requests

/// 1-based page window.
///
/// Values are kept as given; degenerate inputs are not rejected. The offset is
/// clamped at zero and a non-positive page size produces an empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRequest {
    /// 1-based page number
    pub page: i64,
    /// Rows per page
    pub page_size: i64,
}

impl PageRequest {
    /// Window for `page` of `page_size` rows
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    /// Number of elements to skip: `max(0, (page - 1) * page_size)`
    pub fn offset(&self) -> usize {
        let skip = self.page.saturating_sub(1).saturating_mul(self.page_size);
        usize::try_from(skip.max(0)).unwrap_or(usize::MAX)
    }

    /// Number of elements to take: `max(0, page_size)`
    pub fn limit(&self) -> usize {
        usize::try_from(self.page_size.max(0)).unwrap_or(usize::MAX)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
        }
    }
}

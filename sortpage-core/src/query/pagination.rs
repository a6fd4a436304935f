//! Page-based slicing
use super::sequence::Sequence;
use sortpage_model::PageRequest;
use tracing::debug;

/// Slice `source` to the 1-based page `page_number` of `page_size` elements.
///
/// Inputs are not validated: the offset is clamped at zero and a
/// non-positive page size yields an empty page.
pub fn paginate<Q: Sequence>(source: Q, page_number: i64, page_size: i64) -> Q {
    apply_page(source, PageRequest::new(page_number, page_size))
}

/// Slice `source` to the window described by `page`
pub fn apply_page<Q: Sequence>(source: Q, page: PageRequest) -> Q {
    let offset = page.offset();
    let limit = page.limit();

    debug!(
        "Applying page {} (size {}): offset={}, limit={}",
        page.page, page.page_size, offset, limit
    );

    source.skip(offset).take(limit)
}

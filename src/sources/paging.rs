//! Pagination policy shared by the browse operations.

/// Pages are 1-indexed; anything lower is treated as the first page.
#[must_use]
pub const fn clamp_page(page: u32) -> u32 {
    if page < 1 { 1 } else { page }
}

#[must_use]
pub const fn offset(page: u32, page_size: u32) -> u32 {
    (clamp_page(page) - 1).saturating_mul(page_size)
}

/// Offset pagination against an authoritative total.
#[must_use]
pub fn offset_has_next(start: u32, rows: u32, total: u64) -> bool {
    u64::from(start) + u64::from(rows) < total
}

/// Page pagination when the total page count may be missing or stale: a
/// full page is assumed to have a successor, which can produce one trailing
/// empty page.
#[must_use]
pub const fn page_has_next(count: usize, page_size: u32, page: u32, total_pages: u32) -> bool {
    count >= page_size as usize || page < total_pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        assert_eq!(offset(0, 50), 0);
        assert_eq!(offset(1, 50), 0);
        assert_eq!(offset(3, 50), 100);
        assert_eq!(clamp_page(0), 1);
    }

    #[test]
    fn test_offset_has_next() {
        assert!(offset_has_next(0, 50, 51));
        assert!(!offset_has_next(0, 50, 50));
        assert!(!offset_has_next(50, 50, 60));
    }

    #[test]
    fn test_page_has_next() {
        // Short page on the last reported page.
        assert!(!page_has_next(3, 20, 2, 2));
        assert!(!page_has_next(3, 20, 5, 2));
        // Full page with no reliable total.
        assert!(page_has_next(20, 20, 1, 1));
        assert!(page_has_next(0, 20, 1, 4));
    }
}

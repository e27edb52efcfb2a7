pub(crate) const POSTS_PER_PAGE: u32 = 3;

/// Splits `total` items into 1-indexed pages of `per_page`.
///
/// An empty result set still has one (empty) page, so page 1 is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Paginator {
    per_page: u32,
    total: u64,
}

impl Paginator {
    pub(crate) fn new(per_page: u32, total: u64) -> Self {
        Self {
            per_page: per_page.max(1),
            total,
        }
    }

    pub(crate) fn per_page(&self) -> u32 {
        self.per_page
    }

    pub(crate) fn total(&self) -> u64 {
        self.total
    }

    pub(crate) fn num_pages(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.per_page)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Resolves a raw page parameter to a valid page number.
    ///
    /// Missing or non-positive-integer input falls back to page 1, numbers past
    /// the end clamp to the last page. Never fails.
    pub(crate) fn resolve_page(&self, raw: Option<&str>) -> u32 {
        let last = self.num_pages();
        let Some(raw) = raw.map(str::trim) else {
            return 1;
        };

        match raw.parse::<u64>() {
            Ok(0) | Err(_) if !is_overflowing_positive(raw) => 1,
            Ok(number) => u32::try_from(number).map_or(last, |number| number.min(last)),
            Err(_) => last,
        }
    }
}

// Digit strings too long for u64 are still positive integers past the end.
fn is_overflowing_positive(raw: &str) -> bool {
    !raw.is_empty()
        && raw.bytes().all(|b| b.is_ascii_digit())
        && raw.bytes().any(|b| b != b'0')
        && raw.parse::<u64>().is_err()
}

#[derive(Debug, Clone)]
pub(crate) struct Page<T> {
    pub(crate) items: Vec<T>,
    pub(crate) number: u32,
    pub(crate) num_pages: u32,
    pub(crate) per_page: u32,
    pub(crate) total: u64,
}

impl<T> Page<T> {
    pub(crate) fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub(crate) fn has_previous(&self) -> bool {
        self.number > 1
    }
}

#[cfg(test)]
mod tests {
    use super::{POSTS_PER_PAGE, Paginator};

    #[test]
    fn num_pages_rounds_up_and_never_drops_below_one() {
        assert_eq!(Paginator::new(POSTS_PER_PAGE, 0).num_pages(), 1);
        assert_eq!(Paginator::new(POSTS_PER_PAGE, 3).num_pages(), 1);
        assert_eq!(Paginator::new(POSTS_PER_PAGE, 4).num_pages(), 2);
        assert_eq!(Paginator::new(POSTS_PER_PAGE, 6).num_pages(), 2);
        assert_eq!(Paginator::new(POSTS_PER_PAGE, 7).num_pages(), 3);
    }

    #[test]
    fn missing_or_invalid_page_falls_back_to_first() {
        let paginator = Paginator::new(POSTS_PER_PAGE, 6);
        for raw in [None, Some("abc"), Some("0"), Some("-1"), Some(""), Some("1.5"), Some("000")] {
            assert_eq!(paginator.resolve_page(raw), 1, "raw page {raw:?}");
        }
    }

    #[test]
    fn out_of_range_page_clamps_to_last() {
        let paginator = Paginator::new(POSTS_PER_PAGE, 6);
        assert_eq!(paginator.resolve_page(Some("9999")), 2);
        assert_eq!(paginator.resolve_page(Some("99999999999999999999999")), 2);
    }

    #[test]
    fn in_range_page_is_kept() {
        let paginator = Paginator::new(POSTS_PER_PAGE, 7);
        assert_eq!(paginator.resolve_page(Some("2")), 2);
        assert_eq!(paginator.resolve_page(Some(" 3 ")), 3);
    }
}

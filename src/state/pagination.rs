/// Pagination over an ordered item list
///
/// Purely a display projection: slicing never fails, and nothing here
/// renormalizes the page on its own. When the underlying list shrinks
/// (album reload) the caller clamps explicitly via `clamp_to`.

/// A window over an ordered list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page number
    pub current_page: usize,
    pub page_size: usize,
}

impl PageWindow {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size,
        }
    }

    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Clamp the current page to the last page for a list of `len` items
    pub fn clamp_to(&mut self, len: usize) {
        self.current_page = self.current_page.min(page_count(len, self.page_size).max(1));
    }
}

/// The contiguous slice of `items` visible through `window`
///
/// Pages beyond the end of the list yield an empty slice, never an error.
pub fn page<T>(items: &[T], window: PageWindow) -> &[T] {
    let start = (window.current_page - 1).saturating_mul(window.page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(window.page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed to show `len` items
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn test_first_page_is_full() {
        let all = items(25);
        let window = PageWindow {
            current_page: 1,
            page_size: 20,
        };
        assert_eq!(page(&all, window), &all[0..20]);
    }

    #[test]
    fn test_last_page_is_partial() {
        let all = items(25);
        let window = PageWindow {
            current_page: 2,
            page_size: 20,
        };
        assert_eq!(page(&all, window), &all[20..25]);
    }

    #[test]
    fn test_page_beyond_end_is_empty() {
        let all = items(25);
        let window = PageWindow {
            current_page: 3,
            page_size: 20,
        };
        assert!(page(&all, window).is_empty());
    }

    #[test]
    fn test_exact_boundary() {
        let all = items(40);
        let window = PageWindow {
            current_page: 2,
            page_size: 20,
        };
        assert_eq!(page(&all, window), &all[20..40]);
        let window = PageWindow {
            current_page: 3,
            page_size: 20,
        };
        assert!(page(&all, window).is_empty());
    }

    #[test]
    fn test_empty_list() {
        let all: Vec<usize> = Vec::new();
        let window = PageWindow::new(20);
        assert!(page(&all, window).is_empty());
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 20), 0);
        assert_eq!(page_count(1, 20), 1);
        assert_eq!(page_count(20, 20), 1);
        assert_eq!(page_count(21, 20), 2);
        assert_eq!(page_count(25, 6), 5);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut window = PageWindow {
            current_page: 5,
            page_size: 20,
        };
        // List shrank to 25 items: page 5 is out of range, page 2 is the last
        window.clamp_to(25);
        assert_eq!(window.current_page, 2);
    }

    #[test]
    fn test_clamp_on_empty_list_keeps_page_one() {
        let mut window = PageWindow {
            current_page: 4,
            page_size: 20,
        };
        window.clamp_to(0);
        assert_eq!(window.current_page, 1);
    }

    #[test]
    fn test_go_to_floors_at_one() {
        let mut window = PageWindow::new(20);
        window.go_to(0);
        assert_eq!(window.current_page, 1);
        window.go_to(3);
        assert_eq!(window.current_page, 3);
    }
}

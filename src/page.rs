//! Current page index and its wrap/clamp policy.

use crate::config::CarouselConfig;

/// Which way a page transition goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the start of the content (index - 1)
    Previous,
    /// Toward the end of the content (index + 1)
    Next,
}

impl Direction {
    /// Signed index delta for this direction.
    pub fn delta(self) -> i64 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }

    /// Direction implied by a signed pixel displacement or velocity.
    ///
    /// Positive values move content toward its start, which reveals the
    /// previous page. Zero and NaN have no direction.
    pub fn from_motion(value: f64) -> Option<Self> {
        if value > 0.0 {
            Some(Direction::Previous)
        } else if value < 0.0 {
            Some(Direction::Next)
        } else {
            None
        }
    }
}

/// Owns the current page index.
///
/// The index always satisfies `index < page_count` in infinite mode and
/// `index <= max_index` in bounded mode; an empty carousel pins it at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageIndex {
    current: usize,
    page_count: usize,
    infinite: bool,
}

impl PageIndex {
    pub fn new(page_count: usize, infinite: bool) -> Self {
        Self {
            current: 0,
            page_count,
            infinite,
        }
    }

    pub fn from_config(config: &CarouselConfig) -> Self {
        Self::new(config.page_count(), config.infinite)
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Highest index reachable in bounded mode.
    pub fn max_index(&self) -> usize {
        self.page_count.saturating_sub(1)
    }

    /// Map any signed index into the valid range.
    ///
    /// Infinite carousels use a non-negative modulo, bounded ones clamp.
    pub fn normalize_index(&self, index: i64) -> usize {
        if self.page_count == 0 {
            return 0;
        }
        if self.infinite {
            let count = self.page_count as i64;
            (((index % count) + count) % count) as usize
        } else {
            index.clamp(0, self.max_index() as i64) as usize
        }
    }

    /// Advance one page. Returns true if the index changed.
    pub fn next(&mut self) -> bool {
        self.step(Direction::Next)
    }

    /// Go back one page. Returns true if the index changed.
    pub fn previous(&mut self) -> bool {
        self.step(Direction::Previous)
    }

    /// Move one page in `direction`. Returns true if the index changed.
    pub fn step(&mut self, direction: Direction) -> bool {
        self.go_to(self.current as i64 + direction.delta())
    }

    /// Jump to `index` after normalizing it. Returns true if the index changed.
    pub fn go_to(&mut self, index: i64) -> bool {
        let next = self.normalize_index(index);
        let changed = next != self.current;
        self.current = next;
        changed
    }

    /// Adopt new bounds, keeping the current index as close as the policy allows.
    pub fn reconfigure(&mut self, page_count: usize, infinite: bool) {
        self.page_count = page_count;
        self.infinite = infinite;
        self.current = self.normalize_index(self.current as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infinite_wraps_negative() {
        let page = PageIndex::new(5, true);
        assert_eq!(page.normalize_index(-1), 4);
        assert_eq!(page.normalize_index(-6), 4);
        assert_eq!(page.normalize_index(5), 0);
        assert_eq!(page.normalize_index(12), 2);
    }

    #[test]
    fn test_bounded_clamps() {
        let page = PageIndex::new(3, false);
        assert_eq!(page.normalize_index(-1), 0);
        assert_eq!(page.normalize_index(7), 2);
    }

    #[test]
    fn test_previous_from_zero_wraps() {
        let mut page = PageIndex::new(5, true);
        assert!(page.previous());
        assert_eq!(page.current(), 4);
    }

    #[test]
    fn test_next_at_end_is_noop_when_bounded() {
        let mut page = PageIndex::new(2, false);
        assert!(page.next());
        assert!(!page.next());
        assert_eq!(page.current(), 1);
    }

    #[test]
    fn test_zero_pages_pin_to_zero() {
        let mut page = PageIndex::new(0, true);
        assert!(!page.next());
        assert!(!page.previous());
        assert_eq!(page.current(), 0);
    }

    #[test]
    fn test_reconfigure_clamps_current() {
        let mut page = PageIndex::new(6, false);
        page.go_to(5);
        page.reconfigure(3, false);
        assert_eq!(page.current(), 2);
    }

    #[test]
    fn test_direction_from_motion() {
        assert_eq!(Direction::from_motion(12.0), Some(Direction::Previous));
        assert_eq!(Direction::from_motion(-0.5), Some(Direction::Next));
        assert_eq!(Direction::from_motion(0.0), None);
        assert_eq!(Direction::from_motion(f64::NAN), None);
    }
}

//! Layout catalog - ordered board presets with a cycling cursor
//!
//! Out-of-range indices are never an error: with wraparound enabled they are
//! reduced modulo the catalog length (negatives included), otherwise they
//! fall back to the first preset. An empty catalog yields [`LayoutSpec::ZERO`].

use crate::types::LayoutSpec;

/// Presets shipped with the game, smallest first.
pub const DEFAULT_LAYOUTS: [LayoutSpec; 4] = [
    LayoutSpec::new(2, 2),
    LayoutSpec::new(3, 4),
    LayoutSpec::new(4, 4),
    LayoutSpec::new(5, 6),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutCatalog {
    layouts: Vec<LayoutSpec>,
    current: usize,
    wraparound: bool,
}

impl LayoutCatalog {
    pub fn new(layouts: Vec<LayoutSpec>, wraparound: bool) -> Self {
        Self {
            layouts,
            current: 0,
            wraparound,
        }
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn wraparound(&self) -> bool {
        self.wraparound
    }

    pub fn layouts(&self) -> &[LayoutSpec] {
        &self.layouts
    }

    pub fn index(&self) -> usize {
        self.current
    }

    /// Layout at the (clamped) cursor, or the zero sentinel when empty.
    pub fn current(&self) -> LayoutSpec {
        if self.layouts.is_empty() {
            return LayoutSpec::ZERO;
        }
        let safe = self.current.min(self.layouts.len() - 1);
        self.layouts[safe]
    }

    /// Move the cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_pairs_core::LayoutCatalog;
    ///
    /// let mut catalog = LayoutCatalog::default();
    /// catalog.set_index(-1);
    /// assert_eq!(catalog.index(), 3);
    /// ```
    pub fn set_index(&mut self, i: i64) {
        let n = self.layouts.len() as i64;
        if n == 0 {
            self.current = 0;
            return;
        }

        self.current = if self.wraparound {
            i.rem_euclid(n) as usize
        } else if (0..n).contains(&i) {
            i as usize
        } else {
            0
        };
    }

    pub fn next(&mut self) {
        self.set_index(self.current as i64 + 1);
    }

    pub fn prev(&mut self) {
        self.set_index(self.current as i64 - 1);
    }
}

impl Default for LayoutCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_LAYOUTS.to_vec(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = LayoutCatalog::default();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.index(), 0);
        assert_eq!(catalog.current(), LayoutSpec::new(2, 2));
        assert!(catalog.wraparound());
    }

    #[test]
    fn test_next_wraps_to_start() {
        let mut catalog = LayoutCatalog::default();
        for expected in [1, 2, 3, 0, 1] {
            catalog.next();
            assert_eq!(catalog.index(), expected);
        }
    }

    #[test]
    fn test_prev_wraps_to_end() {
        let mut catalog = LayoutCatalog::default();
        catalog.prev();
        assert_eq!(catalog.index(), 3);
        assert_eq!(catalog.current(), LayoutSpec::new(5, 6));
    }

    #[test]
    fn test_negative_index_wraps() {
        let mut catalog = LayoutCatalog::default();
        catalog.set_index(-1);
        assert_eq!(catalog.index(), 3);
        catalog.set_index(-9);
        assert_eq!(catalog.index(), 3);
        catalog.set_index(10);
        assert_eq!(catalog.index(), 2);
    }

    #[test]
    fn test_clamped_catalog_falls_back_to_zero() {
        let mut catalog = LayoutCatalog::new(DEFAULT_LAYOUTS.to_vec(), false);
        catalog.set_index(2);
        assert_eq!(catalog.index(), 2);

        catalog.set_index(4);
        assert_eq!(catalog.index(), 0);

        catalog.set_index(3);
        catalog.next();
        assert_eq!(catalog.index(), 0);

        catalog.prev();
        assert_eq!(catalog.index(), 0);
    }

    #[test]
    fn test_empty_catalog_yields_zero_spec() {
        let mut catalog = LayoutCatalog::new(Vec::new(), true);
        catalog.set_index(5);
        assert_eq!(catalog.index(), 0);
        assert_eq!(catalog.current(), LayoutSpec::ZERO);
        catalog.next();
        assert_eq!(catalog.index(), 0);
    }
}

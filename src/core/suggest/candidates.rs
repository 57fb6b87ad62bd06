//! Candidate list and selection navigation
//!
//! Mirrors the engine's ranking order exactly. Selection moves one row at a
//! time and stops at either end.

use unicode_width::UnicodeWidthStr;

/// Visible rows and width bounds of the popup, in glyph cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupLimits {
    pub max_rows: usize,
    pub min_width: usize,
    pub max_width: usize,
}

impl Default for PopupLimits {
    fn default() -> Self {
        Self {
            max_rows: 8,
            min_width: 12,
            max_width: 40,
        }
    }
}

/// Cells taken by the popup border on each axis
pub const POPUP_BORDER: usize = 2;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CandidateList {
    items: Vec<String>,
    selected: Option<usize>,
    /// First row shown in the popup
    top: usize,
}

impl CandidateList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the items and select the first one
    pub fn replace(&mut self, items: Vec<String>) {
        self.selected = if items.is_empty() { None } else { Some(0) };
        self.items = items;
        self.top = 0;
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.items.get(i))
            .map(String::as_str)
    }

    /// Move selection down, stopping at the last item
    pub fn select_next(&mut self) {
        if let Some(i) = self.selected {
            self.selected = Some((i + 1).min(self.items.len().saturating_sub(1)));
        }
    }

    /// Move selection up, stopping at the first item
    pub fn select_prev(&mut self) {
        if let Some(i) = self.selected {
            self.selected = Some(i.saturating_sub(1));
        }
    }

    /// Select `index` if it exists
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// Index of the first visible row, scrolled so the selection is visible
    pub fn scroll_top(&mut self, max_rows: usize) -> usize {
        if let Some(sel) = self.selected {
            if sel < self.top {
                self.top = sel;
            } else if max_rows > 0 && sel >= self.top + max_rows {
                self.top = sel + 1 - max_rows;
            }
        }
        self.top
    }

    /// First visible row as of the last scroll
    pub fn top(&self) -> usize {
        self.top
    }

    /// Popup size in cells (columns, rows), border included
    pub fn popup_cells(items: &[String], limits: PopupLimits) -> (usize, usize) {
        let widest = items.iter().map(|w| w.width()).max().unwrap_or(0);
        // one space of padding on each side
        let columns = (widest + 2 + POPUP_BORDER).clamp(limits.min_width, limits.max_width);
        let rows = items.len().min(limits.max_rows) + POPUP_BORDER;
        (columns, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> CandidateList {
        let mut list = CandidateList::new();
        list.replace(items.iter().map(|s| s.to_string()).collect());
        list
    }

    #[test]
    fn test_replace_selects_first() {
        let list = list(&["world", "work"]);
        assert_eq!(list.selected(), Some("world"));
        assert_eq!(list.items(), &["world".to_string(), "work".to_string()]);
    }

    #[test]
    fn test_empty_has_no_selection() {
        let mut list = list(&[]);
        list.select_next();
        list.select_prev();
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn test_navigation_clamps() {
        let mut list = list(&["a", "b", "c"]);
        list.select_prev();
        assert_eq!(list.selected(), Some("a"));
        list.select_next();
        list.select_next();
        list.select_next();
        assert_eq!(list.selected(), Some("c"));
        list.select_prev();
        assert_eq!(list.selected(), Some("b"));
    }

    #[test]
    fn test_select_out_of_range() {
        let mut list = list(&["a"]);
        assert!(!list.select(3));
        assert_eq!(list.selected_index(), Some(0));
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut list = list(&["a", "b", "c", "d", "e"]);
        assert_eq!(list.scroll_top(2), 0);
        list.select(3);
        assert_eq!(list.scroll_top(2), 2);
        list.select(0);
        assert_eq!(list.scroll_top(2), 0);
    }

    #[test]
    fn test_popup_cells() {
        let limits = PopupLimits::default();
        let items: Vec<String> = vec!["hi".into()];
        assert_eq!(CandidateList::popup_cells(&items, limits), (12, 3));

        let long: Vec<String> = (0..20).map(|_| "x".repeat(60)).collect();
        assert_eq!(CandidateList::popup_cells(&long, limits), (40, 10));
    }
}

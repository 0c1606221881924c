/// Card list display state
pub struct ListState {
    pub selected: Option<usize>,
    pub scroll_offset: usize,
    /// Number of cards that fit on screen, updated on every draw
    pub visible_rows: usize,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            selected: None,
            scroll_offset: 0,
            visible_rows: 3,
        }
    }
}

impl ListState {
    /// Called when a new result set is committed
    pub fn reset(&mut self, total: usize) {
        self.selected = if total == 0 { None } else { Some(0) };
        self.scroll_offset = 0;
    }

    pub fn select_next(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let i = match self.selected {
            Some(i) => (i + 1).min(total - 1),
            None => 0,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn select_prev(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let i = match self.selected {
            Some(0) | None => 0,
            Some(i) => i - 1,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn page_down(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let jump = self.visible_rows.max(1);
        let i = match self.selected {
            Some(i) => (i + jump).min(total - 1),
            None => jump.min(total - 1),
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn page_up(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let jump = self.visible_rows.max(1);
        let i = match self.selected {
            Some(i) => i.saturating_sub(jump),
            None => 0,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn select_first(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        self.selected = Some(0);
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        self.selected = Some(total - 1);
        self.ensure_visible(total - 1);
    }

    fn ensure_visible(&mut self, index: usize) {
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if self.visible_rows > 0 && index >= self.scroll_offset + self.visible_rows {
            self.scroll_offset = index - self.visible_rows + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_clamps_and_scrolls() {
        let mut list = ListState {
            visible_rows: 2,
            ..ListState::default()
        };
        list.reset(4);
        list.select_next(4);
        list.select_next(4);
        assert_eq!(list.selected, Some(2));
        assert_eq!(list.scroll_offset, 1);

        list.select_next(4);
        list.select_next(4);
        assert_eq!(list.selected, Some(3));
        assert_eq!(list.scroll_offset, 2);

        list.select_first(4);
        assert_eq!((list.selected, list.scroll_offset), (Some(0), 0));
    }

    #[test]
    fn empty_list_has_no_selection() {
        let mut list = ListState::default();
        list.reset(0);
        list.select_next(0);
        list.select_prev(0);
        list.page_down(0);
        list.select_last(0);
        assert_eq!(list.selected, None);
    }

    #[test]
    fn paging_moves_by_visible_rows() {
        let mut list = ListState {
            visible_rows: 2,
            ..ListState::default()
        };
        list.reset(4);
        list.page_down(4);
        assert_eq!(list.selected, Some(2));
        list.page_up(4);
        assert_eq!(list.selected, Some(0));
        list.select_last(4);
        assert_eq!(list.scroll_offset, 2);
    }
}

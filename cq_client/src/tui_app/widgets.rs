use ratatui::widgets::{ListItem, ListState, ScrollbarState};
use std::collections::VecDeque;

/// A bounded list of items meant to be drawn bottom-to-top, newest item at
/// the bottom, with a matching scrollbar.
pub struct ScrollableList {
    pub list_items: VecDeque<ListItem<'static>>,
    pub list_state: ListState,
    pub scroll_state: ScrollbarState,
    max_items: usize,
}

impl ScrollableList {
    pub fn new(max_items: usize) -> Self {
        Self {
            list_items: VecDeque::with_capacity(max_items),
            list_state: ListState::default(),
            scroll_state: ScrollbarState::default(),
            max_items,
        }
    }

    /// Add an item and jump to it. The oldest item is dropped when full.
    pub fn push(&mut self, item: ListItem<'static>) {
        self.list_items.push_front(item);
        self.list_items.truncate(self.max_items);
        self.jump_to_last();
    }

    pub fn len(&self) -> usize {
        self.list_items.len()
    }

    /// Scroll towards older items.
    pub fn move_up(&mut self) {
        let idx = self.selected();
        if idx + 1 < self.len() {
            self.select(idx + 1);
        }
    }

    /// Scroll towards newer items.
    pub fn move_down(&mut self) {
        self.select(self.selected().saturating_sub(1));
    }

    /// Jump to the oldest item.
    pub fn jump_to_first(&mut self) {
        self.select(self.len().saturating_sub(1));
    }

    /// Jump to the newest item.
    pub fn jump_to_last(&mut self) {
        self.select(0);
    }

    fn selected(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        let len = self.len();
        self.list_state.select(Some(idx));
        self.scroll_state = self
            .scroll_state
            .content_length(len)
            .position(len.saturating_sub(idx + 1));
    }
}

/// Single-line text input with a character cursor.
#[derive(Debug, Default)]
pub struct UserInput {
    pub value: String,
    /// Cursor position in characters, not bytes
    pub char_idx: usize,
}

impl UserInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn byte_idx(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.char_idx)
            .map_or(self.value.len(), |(idx, _)| idx)
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    pub fn input(&mut self, c: char) {
        let idx = self.byte_idx();
        self.value.insert(idx, c);
        self.char_idx += 1;
    }

    pub fn backspace(&mut self) {
        if self.char_idx > 0 {
            self.char_idx -= 1;
            let idx = self.byte_idx();
            self.value.remove(idx);
        }
    }

    pub fn delete(&mut self) {
        if self.char_idx < self.char_count() {
            let idx = self.byte_idx();
            self.value.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.char_idx = self.char_idx.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.char_idx = (self.char_idx + 1).min(self.char_count());
    }

    pub fn jump_to_first(&mut self) {
        self.char_idx = 0;
    }

    pub fn jump_to_last(&mut self) {
        self.char_idx = self.char_count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.char_idx = 0;
    }
}

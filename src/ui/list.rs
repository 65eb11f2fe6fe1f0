//! Filterable single-selection list

use super::theme::Theme;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Rows above the first item (status or filter prompt)
pub const HEADER_HEIGHT: u16 = 1;
/// Rows drawn per item
pub const ITEM_LINES: u16 = 2;
/// Blank rows between items
pub const ITEM_SPACING: u16 = 1;
/// Rows an item occupies including spacing
pub const ITEM_HEIGHT: u16 = ITEM_LINES + ITEM_SPACING;

/// Something that can be shown in a [`SelectList`]
pub trait ListEntry {
    /// Text matched against the filter
    fn filter_key(&self) -> String;

    /// Renders up to [`ITEM_LINES`] lines for this entry
    ///
    /// `highlight` is the filter text in effect, empty when there is none.
    fn render(&self, theme: &Theme, selected: bool, width: u16, highlight: &str)
        -> Vec<Line<'static>>;
}

/// Filter input state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterState {
    #[default]
    Unfiltered,
    /// Filter text is being typed
    Filtering,
    /// A non-empty filter is in effect
    FilterApplied,
}

/// List of entries with a text filter and a selection cursor
#[derive(Debug, Clone)]
pub struct SelectList<E> {
    items: Vec<E>,
    /// Indices into `items` that pass the filter
    visible: Vec<usize>,
    /// Index into `visible`
    selected: Option<usize>,
    /// First shown index into `visible`
    offset: usize,
    filter: String,
    filter_state: FilterState,
    noun: String,
    width: u16,
    height: u16,
}

impl<E: ListEntry> SelectList<E> {
    /// Creates a list with the first entry selected
    pub fn new(items: Vec<E>, noun: impl Into<String>) -> Self {
        let visible: Vec<usize> = (0..items.len()).collect();
        let selected = (!visible.is_empty()).then_some(0);
        Self {
            items,
            visible,
            selected,
            offset: 0,
            filter: String::new(),
            filter_state: FilterState::Unfiltered,
            noun: noun.into(),
            width: 1,
            height: 1,
        }
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.scroll_to_selection();
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    /// Currently selected entry, if the filter leaves any
    pub fn selected_item(&self) -> Option<&E> {
        self.selected
            .and_then(|i| self.visible.get(i))
            .and_then(|&i| self.items.get(i))
    }

    /// Position of the selection among the visible entries
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn total_len(&self) -> usize {
        self.items.len()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn filter_state(&self) -> FilterState {
        self.filter_state
    }

    pub fn filter_value(&self) -> &str {
        &self.filter
    }

    /// Filter text to highlight in entries, empty when unfiltered
    pub fn active_filter(&self) -> &str {
        match self.filter_state {
            FilterState::Unfiltered => "",
            FilterState::Filtering | FilterState::FilterApplied => &self.filter,
        }
    }

    /// Whether keystrokes are going into the filter input
    pub fn is_filtering(&self) -> bool {
        self.filter_state == FilterState::Filtering
    }

    /// Number of entries that fit on one page
    pub fn per_page(&self) -> usize {
        let rows = self.height.saturating_sub(HEADER_HEIGHT) + ITEM_SPACING;
        usize::from((rows / ITEM_HEIGHT).max(1))
    }

    /// Handles a key press, returning whether it was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.is_filtering() {
            return self.handle_filter_key(key);
        }

        let page = self.per_page() as isize;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_by(1),
            KeyCode::PageUp => self.move_by(-page),
            KeyCode::PageDown => self.move_by(page),
            KeyCode::Home | KeyCode::Char('g') => self.select(0),
            KeyCode::End | KeyCode::Char('G') => self.select(self.visible.len().saturating_sub(1)),
            KeyCode::Char('/') => self.filter_state = FilterState::Filtering,
            KeyCode::Esc if self.filter_state == FilterState::FilterApplied => self.reset_filter(),
            _ => return false,
        }
        true
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => self.reset_filter(),
            KeyCode::Enter => {
                self.filter_state = if self.filter.is_empty() {
                    FilterState::Unfiltered
                } else {
                    FilterState::FilterApplied
                };
            }
            KeyCode::Backspace => {
                self.filter.pop();
                self.apply_filter();
            }
            KeyCode::Up => self.move_by(-1),
            KeyCode::Down => self.move_by(1),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter.push(c);
                self.apply_filter();
            }
            _ => return false,
        }
        true
    }

    fn reset_filter(&mut self) {
        self.filter.clear();
        self.filter_state = FilterState::Unfiltered;
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        let needle = self.filter.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                needle.is_empty() || item.filter_key().to_lowercase().contains(&needle)
            })
            .map(|(i, _)| i)
            .collect();
        self.selected = (!self.visible.is_empty()).then_some(0);
        self.offset = 0;
    }

    /// Selects a visible entry, clamping to the last one
    pub fn select(&mut self, index: usize) {
        if self.visible.is_empty() {
            self.selected = None;
            return;
        }
        self.selected = Some(index.min(self.visible.len() - 1));
        self.scroll_to_selection();
    }

    /// Moves the selection by `delta` entries
    pub fn move_by(&mut self, delta: isize) {
        let Some(current) = self.selected else {
            return;
        };
        self.select(current.saturating_add_signed(delta));
    }

    /// Selects the entry drawn at `row`, counted from the top of the list area
    ///
    /// Returns `false` for clicks on the header, on spacing rows or below the
    /// last entry.
    pub fn click(&mut self, row: u16) -> bool {
        let Some(row) = row.checked_sub(HEADER_HEIGHT) else {
            return false;
        };
        if row % ITEM_HEIGHT >= ITEM_LINES {
            return false;
        }
        let index = self.offset + usize::from(row / ITEM_HEIGHT);
        if index >= self.visible.len() || index >= self.offset + self.per_page() {
            return false;
        }
        self.select(index);
        true
    }

    fn scroll_to_selection(&mut self) {
        let Some(selected) = self.selected else {
            self.offset = 0;
            return;
        };
        let per_page = self.per_page();
        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + per_page {
            self.offset = selected + 1 - per_page;
        }
    }

    fn header(&self, theme: &Theme) -> Line<'static> {
        match self.filter_state {
            FilterState::Filtering => Line::from(vec![
                Span::styled("Filter: ", theme.heading_style()),
                Span::styled(self.filter.clone(), theme.text_style()),
                Span::styled("█", theme.selection_marker()),
            ]),
            FilterState::FilterApplied => Line::from(vec![
                Span::styled(
                    format!("{}/{} {}", self.visible.len(), self.items.len(), self.noun),
                    theme.muted_style(),
                ),
                Span::styled(format!("  “{}”", self.filter), theme.secondary_style()),
            ]),
            FilterState::Unfiltered => Line::styled(
                format!("{}/{} {}", self.visible.len(), self.items.len(), self.noun),
                theme.muted_style(),
            ),
        }
    }

    /// Draws the header and the current page of entries
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut lines = vec![self.header(theme)];

        if self.visible.is_empty() {
            lines.push(Line::default());
            lines.push(Line::styled(format!("No matching {}", self.noun), theme.muted_style()));
        }

        let page = self.visible.iter().enumerate().skip(self.offset).take(self.per_page());
        for (position, &index) in page {
            let Some(item) = self.items.get(index) else {
                continue;
            };
            let selected = self.selected == Some(position);
            let mut item_lines = item.render(theme, selected, area.width, self.active_filter());
            item_lines.truncate(usize::from(ITEM_LINES));
            item_lines.resize(usize::from(ITEM_HEIGHT), Line::default());
            lines.extend(item_lines);
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

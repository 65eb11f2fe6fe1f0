//! Vertically scrollable block of pre-laid-out lines

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug, Clone, Default)]
pub struct Viewport {
    lines: Vec<Line<'static>>,
    width: u16,
    height: u16,
    y_offset: usize,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            lines: Vec::new(),
            width: width.max(1),
            height: height.max(1),
            y_offset: 0,
        }
    }

    /// Replaces the content, keeping the scroll position where possible
    pub fn set_content(&mut self, lines: Vec<Line<'static>>) {
        self.lines = lines;
        self.y_offset = self.y_offset.min(self.max_offset());
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.y_offset = self.y_offset.min(self.max_offset());
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn y_offset(&self) -> usize {
        self.y_offset
    }

    pub fn total_line_count(&self) -> usize {
        self.lines.len()
    }

    /// Lines currently on screen
    pub fn visible_line_count(&self) -> usize {
        self.lines
            .len()
            .saturating_sub(self.y_offset)
            .min(usize::from(self.height))
    }

    fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(usize::from(self.height))
    }

    pub fn at_top(&self) -> bool {
        self.y_offset == 0
    }

    pub fn at_bottom(&self) -> bool {
        self.y_offset >= self.max_offset()
    }

    /// Scroll position in `0.0..=1.0`; content that fits counts as fully scrolled
    pub fn scroll_percent(&self) -> f64 {
        let max = self.max_offset();
        if max == 0 {
            return 1.0;
        }
        self.y_offset as f64 / max as f64
    }

    pub fn goto_top(&mut self) {
        self.y_offset = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.y_offset = self.max_offset();
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.y_offset = self.y_offset.saturating_add(n).min(self.max_offset());
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.y_offset = self.y_offset.saturating_sub(n);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(usize::from(self.height));
    }

    pub fn page_up(&mut self) {
        self.scroll_up(usize::from(self.height));
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down(usize::from((self.height / 2).max(1)));
    }

    pub fn half_page_up(&mut self) {
        self.scroll_up(usize::from((self.height / 2).max(1)));
    }

    /// Handles a scrolling key, returning whether it was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(1),
            KeyCode::PageUp | KeyCode::Char('b') => self.page_up(),
            KeyCode::PageDown | KeyCode::Char('f') | KeyCode::Char(' ') => self.page_down(),
            KeyCode::Char('u') => self.half_page_up(),
            KeyCode::Char('d') => self.half_page_down(),
            KeyCode::Home | KeyCode::Char('g') => self.goto_top(),
            KeyCode::End | KeyCode::Char('G') => self.goto_bottom(),
            _ => return false,
        }
        true
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let visible: Vec<Line<'static>> = self
            .lines
            .iter()
            .skip(self.y_offset)
            .take(usize::from(self.height))
            .cloned()
            .collect();
        frame.render_widget(Paragraph::new(visible), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn viewport(lines: usize, height: u16) -> Viewport {
        let mut vp = Viewport::new(20, height);
        vp.set_content((0..lines).map(|i| Line::from(format!("line {i}"))).collect());
        vp
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut vp = viewport(10, 4);
        vp.scroll_up(3);
        assert!(vp.at_top());

        vp.scroll_down(100);
        assert_eq!(vp.y_offset(), 6);
        assert!(vp.at_bottom());
        assert_eq!(vp.visible_line_count(), 4);
        assert_eq!(vp.scroll_percent(), 1.0);
    }

    #[test]
    fn test_short_content() {
        let vp = viewport(2, 10);
        assert_eq!(vp.total_line_count(), 2);
        assert_eq!(vp.visible_line_count(), 2);
        assert_eq!(vp.scroll_percent(), 1.0);
    }

    #[test]
    fn test_keys() {
        let mut vp = viewport(20, 4);
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert!(vp.handle_key(press(KeyCode::Char('j'))));
        assert_eq!(vp.y_offset(), 1);
        vp.handle_key(press(KeyCode::Char('d')));
        assert_eq!(vp.y_offset(), 3);
        vp.handle_key(press(KeyCode::PageDown));
        assert_eq!(vp.y_offset(), 7);
        vp.handle_key(press(KeyCode::End));
        assert_eq!(vp.y_offset(), 16);
        vp.handle_key(press(KeyCode::Char('g')));
        assert!(vp.at_top());
        assert!(!vp.handle_key(press(KeyCode::Char('x'))));
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let mut vp = viewport(20, 4);
        vp.goto_bottom();
        vp.set_content(vec![Line::from("only")]);
        assert_eq!(vp.y_offset(), 0);
    }
}

//! Dual-pane operations screen: filterable list on the left, details on the right

use super::app::Message;
use super::detail::DetailPanel;
use super::list::{ListEntry, SelectList};
use super::text::{highlight, truncate};
use super::theme::Theme;
use crate::catalog::OperationCatalog;
use crate::config::BrowserConfig;
use crate::types::{Operation, Spec};
use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

/// Title used when the spec has none
pub const DEFAULT_TITLE: &str = "Endpoints";
/// Rows used by the key hint line
pub const FOOTER_HEIGHT: u16 = 1;
/// Lines scrolled per mouse wheel step in the detail pane
pub const WHEEL_LINES: isize = 3;

/// Which pane receives keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    List,
    Detail,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::List => Focus::Detail,
            Focus::Detail => Focus::List,
        }
    }
}

/// Horizontal region of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    List,
    Detail,
}

/// List row for one operation
#[derive(Debug, Clone)]
pub struct OperationEntry {
    pub operation: Operation,
}

impl ListEntry for OperationEntry {
    fn filter_key(&self) -> String {
        let op = &self.operation;
        format!("{} {} {}", op.method, op.path, op.summary)
    }

    fn render(
        &self,
        theme: &Theme,
        selected: bool,
        width: u16,
        highlight: &str,
    ) -> Vec<Line<'static>> {
        let op = &self.operation;
        let width = usize::from(width);

        let (marker, path_style, summary_style) = if selected {
            (
                Span::styled("> ", theme.selection_marker()),
                theme.text_style().add_modifier(Modifier::BOLD),
                theme.secondary_style(),
            )
        } else {
            (Span::raw("  "), theme.text_style(), theme.muted_style())
        };

        let path = truncate(&op.path, width.saturating_sub(9));
        let mut first = vec![marker, theme.method_span(op.method)];
        first.extend(highlight_spans(&path, highlight, path_style, theme));
        let mut lines = vec![Line::from(first)];

        if !op.summary.trim().is_empty() {
            let summary = truncate(&op.summary, width.saturating_sub(2));
            let mut second = vec![Span::styled("  ", summary_style)];
            second.extend(highlight_spans(&summary, highlight, summary_style, theme));
            lines.push(Line::from(second));
        }
        lines
    }
}

fn highlight_spans(text: &str, needle: &str, base: Style, theme: &Theme) -> Vec<Span<'static>> {
    highlight(text, needle, base, theme.filter_match(base))
}

/// Navigation state for the operations screen
#[derive(Debug, Clone)]
pub struct OperationsScreen {
    list: SelectList<OperationEntry>,
    detail: DetailPanel,
    focus: Focus,
    /// Id of the operation the detail pane was last built from
    last_selected_id: Option<String>,
    title: String,
    width: u16,
    height: u16,
    config: BrowserConfig,
}

impl OperationsScreen {
    /// Builds the screen with operations sorted and the first one shown
    pub fn new(spec: &Spec, config: BrowserConfig) -> Self {
        let catalog = OperationCatalog::new();
        let entries = catalog
            .sort(catalog.list(spec))
            .into_iter()
            .map(|operation| OperationEntry { operation })
            .collect();

        let title = if spec.info.title.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            spec.info.title.clone()
        };

        let mut screen = Self {
            list: SelectList::new(entries, "operations"),
            detail: DetailPanel::new(1, 1, config.theme),
            focus: Focus::List,
            last_selected_id: None,
            title,
            width: 1,
            height: 1,
            config,
        };
        screen.sync_detail();
        screen
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn list(&self) -> &SelectList<OperationEntry> {
        &self.list
    }

    pub fn detail(&self) -> &DetailPanel {
        &self.detail
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Whether plain letter keys are going into the filter input
    pub fn is_capturing_input(&self) -> bool {
        self.list.is_filtering()
    }

    /// Currently selected operation
    pub fn selected_operation(&self) -> Option<&Operation> {
        self.list.selected_item().map(|entry| &entry.operation)
    }

    /// Applies one message; messages the screen does not use are ignored
    pub fn update(&mut self, message: &Message) {
        match message {
            Message::Resize { width, height } => self.resize(*width, *height),
            Message::Key(key) => self.handle_key(*key),
            Message::Mouse(mouse) => self.handle_mouse(*mouse),
            Message::Tick | Message::SpecLoaded(_) => {}
        }
        self.sync_detail();
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width.max(1);
        self.height = height.max(1);

        let frame = self.config.pane_frame;
        let list_width = self.config.list_width(self.width);
        let detail_width = self.width - list_width;
        let pane_height = self.height.saturating_sub(FOOTER_HEIGHT);

        self.list.set_size(
            list_width.saturating_sub(frame.horizontal),
            pane_height.saturating_sub(frame.vertical),
        );
        self.detail.set_size(
            detail_width.saturating_sub(frame.horizontal),
            pane_height.saturating_sub(frame.vertical),
        );
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Tab && !self.list.is_filtering() {
            self.focus = self.focus.toggle();
            tracing::debug!(focus = ?self.focus, "focus changed");
            return;
        }

        match self.focus {
            Focus::List => {
                self.list.handle_key(key);
            }
            Focus::Detail => {
                self.detail.handle_key(key);
            }
        }
    }

    /// Pane under a column; the split ignores focus
    pub fn pane_at(&self, column: u16) -> Pane {
        if column < self.config.list_width(self.width) {
            Pane::List
        } else {
            Pane::Detail
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let pane = self.pane_at(mouse.column);
        match (mouse.kind, pane) {
            (MouseEventKind::ScrollUp, Pane::List) => self.list.move_by(-1),
            (MouseEventKind::ScrollDown, Pane::List) => self.list.move_by(1),
            (MouseEventKind::ScrollUp, Pane::Detail) => self.detail.scroll(-WHEEL_LINES),
            (MouseEventKind::ScrollDown, Pane::Detail) => self.detail.scroll(WHEEL_LINES),
            (MouseEventKind::Down(MouseButton::Left), Pane::List) => {
                // top border row
                if let Some(row) = mouse.row.checked_sub(1) {
                    self.list.click(row);
                }
            }
            _ => {}
        }
    }

    /// Rebuilds the detail pane when the selected id changed
    fn sync_detail(&mut self) {
        let selected = self.list.selected_item().map(|entry| &entry.operation);
        let selected_id = selected.map(|op| op.id.as_str());
        if selected_id == self.last_selected_id.as_deref() {
            return;
        }

        match selected {
            Some(op) => {
                tracing::trace!(id = %op.id, "detail pane resynced");
                self.last_selected_id = Some(op.id.clone());
                self.detail.set_operation(op.clone());
            }
            None => {
                tracing::trace!("selection cleared");
                self.last_selected_id = None;
                self.detail.clear();
            }
        }
    }

    fn pane_block(&self, pane: Focus, title: Line<'static>) -> Block<'static> {
        let theme = &self.config.theme;
        let border = if self.focus == pane {
            theme.focused_border()
        } else {
            theme.dimmed_border()
        };
        Block::bordered().title(title).border_style(border)
    }

    fn footer(&self) -> Line<'static> {
        let theme = &self.config.theme;
        let hints = match (self.focus, self.list.is_filtering()) {
            (_, true) => "enter apply • esc clear",
            (Focus::List, false) => "↑/↓ select • / filter • tab details • q quit",
            (Focus::Detail, false) => "↑/↓ scroll • pgup/pgdn page • tab list • q quit",
        };
        Line::styled(format!(" {hints}"), theme.muted_style())
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.config.theme;
        let [main, footer] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(FOOTER_HEIGHT)]).areas(area);
        let list_width = self.config.list_width(area.width);
        let [list_area, detail_area] =
            Layout::horizontal([Constraint::Length(list_width), Constraint::Min(0)]).areas(main);

        let list_block = self.pane_block(
            Focus::List,
            Line::styled(format!(" {} ", self.title), theme.title_style()),
        );
        let list_inner = list_block.inner(list_area);
        frame.render_widget(list_block, list_area);
        self.list.render(frame, list_inner, theme);

        let detail_title = match self.detail.operation() {
            Some(op) => Line::styled(format!(" {} ", op.id), Style::default().fg(theme.subtext0)),
            None => Line::default(),
        };
        let detail_block = self.pane_block(Focus::Detail, detail_title);
        let detail_inner = detail_block.inner(detail_area);
        frame.render_widget(detail_block, detail_area);
        self.detail.render(frame, detail_inner);

        frame.render_widget(Paragraph::new(self.footer()), footer);
    }
}

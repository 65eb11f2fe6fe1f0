//! Markdown descriptions rendered as styled, wrapped lines
//!
//! Covers what API descriptions use in practice: paragraphs, emphasis,
//! inline code, links, headings, lists and code blocks. Anything else is
//! shown as its text.

use super::text::display_width;
use super::theme::Theme;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Renders `text` into lines no wider than `width` columns (long words may overflow)
pub fn render_markdown(text: &str, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut writer = MarkdownWriter::new(theme, width);
    for event in Parser::new(text) {
        writer.event(event);
    }
    writer.finish()
}

struct ListState {
    next_number: Option<u64>,
    /// Continuation padding of the item being written
    indent: String,
}

struct MarkdownWriter<'t> {
    theme: &'t Theme,
    width: usize,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    current_width: usize,
    styles: Vec<Style>,
    lists: Vec<ListState>,
    /// Marker for the first line of a list item
    item_marker: Option<String>,
    /// Padding for continuation lines inside list items
    indent: String,
    space_pending: bool,
    in_code_block: bool,
}

impl<'t> MarkdownWriter<'t> {
    fn new(theme: &'t Theme, width: usize) -> Self {
        Self {
            theme,
            width: width.max(1),
            lines: Vec::new(),
            current: Vec::new(),
            current_width: 0,
            styles: vec![theme.secondary_style()],
            lists: Vec::new(),
            item_marker: None,
            indent: String::new(),
            space_pending: false,
            in_code_block: false,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, patch: Style) {
        let style = self.style().patch(patch);
        self.styles.push(style);
    }

    fn pop_style(&mut self) {
        if self.styles.len() > 1 {
            self.styles.pop();
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) if self.in_code_block => self.code_block_text(&text),
            Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => {
                self.text(&text, self.style())
            }
            Event::Code(code) => {
                let style = self.theme.code_style();
                self.word(&code, style);
            }
            Event::SoftBreak => self.space_pending = true,
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.block_gap();
                let rule = "─".repeat(self.width.min(40));
                self.lines.push(Line::styled(rule, self.theme.muted_style()));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.block_gap(),
            Tag::Heading { .. } => {
                self.block_gap();
                self.push_style(self.theme.heading_style());
            }
            Tag::CodeBlock(_) => {
                self.block_gap();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                self.flush();
                if self.lists.is_empty() {
                    self.block_gap();
                }
                self.lists.push(ListState {
                    next_number: start,
                    indent: self.indent.clone(),
                });
            }
            Tag::Item => {
                self.flush();
                let pad = self.indent_of_enclosing_item();
                let Some(list) = self.lists.last_mut() else {
                    return;
                };
                let bullet = match list.next_number.as_mut() {
                    Some(n) => {
                        let bullet = format!("{n}. ");
                        *n += 1;
                        bullet
                    }
                    None => "• ".to_string(),
                };
                list.indent = format!("{pad}{}", " ".repeat(display_width(&bullet)));
                self.indent = list.indent.clone();
                self.item_marker = Some(format!("{pad}{bullet}"));
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { .. } => self.push_style(self.theme.link_style()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.flush(),
            TagEnd::Heading(_) => {
                self.flush();
                self.pop_style();
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.flush();
            }
            TagEnd::Item => {
                self.flush();
                self.item_marker = None;
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                // back to the enclosing item's padding
                self.indent = self
                    .lists
                    .last()
                    .map(|outer| outer.indent.clone())
                    .unwrap_or_default();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link => {
                self.pop_style()
            }
            _ => {}
        }
    }

    fn indent_of_enclosing_item(&self) -> String {
        let depth = self.lists.len();
        if depth < 2 {
            return String::new();
        }
        self.lists[depth - 2].indent.clone()
    }

    /// Separates top-level blocks with one blank line
    fn block_gap(&mut self) {
        self.flush();
        if !self.lists.is_empty() {
            return;
        }
        let last_blank = self.lines.last().map_or(true, |l| l.width() == 0);
        if !last_blank {
            self.lines.push(Line::default());
        }
    }

    fn code_block_text(&mut self, text: &str) {
        let style = self.theme.code_style();
        for line in text.lines() {
            self.lines.push(Line::from(vec![
                Span::raw(format!("{}  ", self.indent)),
                Span::styled(line.to_string(), style),
            ]));
        }
    }

    fn text(&mut self, text: &str, style: Style) {
        for (i, word) in text.split(char::is_whitespace).enumerate() {
            if i > 0 {
                self.space_pending = true;
            }
            if !word.is_empty() {
                self.word(word, style);
            }
        }
    }

    fn word(&mut self, word: &str, style: Style) {
        let word_width = display_width(word);
        let gap = usize::from(self.space_pending && !self.current.is_empty());

        if !self.current.is_empty() && self.current_width + gap + word_width > self.width {
            self.flush();
        }
        if self.current.is_empty() {
            self.start_line();
        } else if self.space_pending {
            self.current.push(Span::styled(" ", self.style()));
            self.current_width += 1;
        }

        self.current.push(Span::styled(word.to_string(), style));
        self.current_width += word_width;
        self.space_pending = false;
    }

    fn start_line(&mut self) {
        let prefix = self
            .item_marker
            .take()
            .unwrap_or_else(|| self.indent.clone());
        if !prefix.is_empty() {
            self.current_width = display_width(&prefix);
            self.current.push(Span::styled(prefix, self.theme.secondary_style()));
        }
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.current)));
        }
        self.current_width = 0;
        self.space_pending = false;
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self.lines.last().is_some_and(|l| l.width() == 0) {
            self.lines.pop();
        }
        self.lines
    }
}

//! Operation detail pane

use super::markdown::render_markdown;
use super::text::wrap_text;
use super::theme::Theme;
use super::viewport::Viewport;
use crate::types::{
    Header, MediaType, Operation, Parameter, RequestBody, Response, Schema, SchemaType,
};
use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::collections::BTreeMap;

pub const PLACEHOLDER: &str = "Select an operation to view details";

const SCROLLBAR_THUMB: &str = "┃";

/// Scrollable view of one operation
#[derive(Debug, Clone)]
pub struct DetailPanel {
    viewport: Viewport,
    operation: Option<Operation>,
    width: u16,
    height: u16,
    theme: Theme,
}

impl DetailPanel {
    pub fn new(width: u16, height: u16, theme: Theme) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            // one column is reserved for the scrollbar
            viewport: Viewport::new(width.saturating_sub(1).max(1), height),
            operation: None,
            width,
            height,
            theme,
        }
    }

    /// Shows `operation` from the top
    pub fn set_operation(&mut self, operation: Operation) {
        self.operation = Some(operation);
        self.rebuild();
        self.viewport.goto_top();
    }

    /// Returns to the placeholder
    pub fn clear(&mut self) {
        self.operation = None;
        self.viewport.set_content(Vec::new());
        self.viewport.goto_top();
    }

    /// Resizes and re-lays out the content without resetting the scroll position
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.viewport
            .set_size(self.width.saturating_sub(1).max(1), self.height);
        if self.operation.is_some() {
            self.rebuild();
        }
    }

    pub fn operation(&self) -> Option<&Operation> {
        self.operation.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.viewport.handle_key(key)
    }

    /// Scrolls by `delta` lines; negative is up
    pub fn scroll(&mut self, delta: isize) {
        if delta < 0 {
            self.viewport.scroll_up(delta.unsigned_abs());
        } else {
            self.viewport.scroll_down(delta.unsigned_abs());
        }
    }

    fn rebuild(&mut self) {
        let lines = match &self.operation {
            Some(op) => {
                ContentBuilder::new(&self.theme, usize::from(self.viewport.width())).build(op)
            }
            None => Vec::new(),
        };
        self.viewport.set_content(lines);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.operation.is_none() {
            frame.render_widget(
                Paragraph::new(Line::styled(PLACEHOLDER, self.theme.muted_style())),
                area,
            );
            return;
        }

        let content_width = area.width.saturating_sub(1);
        let content = Rect { width: content_width, ..area };
        let scrollbar = Rect {
            x: area.x + content_width,
            width: area.width - content_width,
            ..area
        };

        self.viewport.render(frame, content);
        frame.render_widget(Paragraph::new(self.scrollbar_lines(area.height)), scrollbar);
    }

    fn scrollbar_lines(&self, height: u16) -> Vec<Line<'static>> {
        let height = usize::from(height);
        let total = self.viewport.total_line_count();
        let visible = self.viewport.visible_line_count();
        if total <= visible || total == 0 {
            return Vec::new();
        }

        let thumb_height = (height * visible / total).max(1);
        let travel = height - thumb_height.min(height);
        let thumb_top = (travel as f64 * self.viewport.scroll_percent()) as usize;

        (0..height)
            .map(|row| {
                if row >= thumb_top && row < thumb_top + thumb_height {
                    Line::styled(SCROLLBAR_THUMB, self.theme.muted_style())
                } else {
                    Line::from(" ")
                }
            })
            .collect()
    }
}

/// Lays out an operation as styled lines for a given width
struct ContentBuilder<'t> {
    theme: &'t Theme,
    width: usize,
    lines: Vec<Line<'static>>,
}

impl<'t> ContentBuilder<'t> {
    fn new(theme: &'t Theme, width: usize) -> Self {
        Self {
            theme,
            width: width.max(1),
            lines: Vec::new(),
        }
    }

    fn build(mut self, op: &Operation) -> Vec<Line<'static>> {
        self.lines.push(Line::from(vec![
            self.theme.method_span(op.method),
            Span::styled(op.path.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]));

        if !op.summary.is_empty() {
            self.blank();
            self.wrapped(&op.summary, 0, self.theme.text_style());
        }
        if !op.description.is_empty() {
            self.blank();
            self.markdown(&op.description, 0);
        }

        self.section("Parameters");
        if op.parameters.is_empty() {
            self.none();
        }
        for param in &op.parameters {
            self.parameter(param);
        }

        self.section("Request Body");
        match &op.request_body {
            Some(body) => self.request_body(body),
            None => self.none(),
        }

        self.section("Responses");
        if op.responses.is_empty() {
            self.none();
        }
        for (code, response) in &op.responses {
            self.response(code, response);
        }

        self.lines
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    fn section(&mut self, title: &str) {
        self.blank();
        self.lines
            .push(Line::styled(format!(" {title} "), self.theme.title_style()));
    }

    fn none(&mut self) {
        self.lines.push(Line::styled("  None", self.theme.muted_style()));
    }

    fn wrapped(&mut self, text: &str, indent: usize, style: Style) {
        let pad = " ".repeat(indent);
        for line in wrap_text(text, self.width.saturating_sub(indent)) {
            self.lines.push(Line::styled(format!("{pad}{line}"), style));
        }
    }

    /// Markdown rendered at `indent`, wrapped to the remaining width
    fn markdown(&mut self, text: &str, indent: usize) {
        let pad = " ".repeat(indent);
        let width = self.width.saturating_sub(indent);
        for line in render_markdown(text, width, self.theme) {
            if indent == 0 || line.width() == 0 {
                self.lines.push(line);
                continue;
            }
            let mut spans = vec![Span::raw(pad.clone())];
            spans.extend(line.spans);
            self.lines.push(Line::from(spans));
        }
    }

    fn required_span(&self) -> Span<'static> {
        Span::styled("required", self.theme.required_style())
    }

    fn parameter(&mut self, param: &Parameter) {
        let mut spans = vec![
            Span::raw("  "),
            Span::styled(param.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(param.location.as_str(), self.theme.muted_style()),
        ];
        if let Some(label) = param.schema.as_ref().map(type_label).filter(|l| !l.is_empty()) {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(label, self.theme.schema_type_style()));
        }
        if param.required {
            spans.push(Span::raw("  "));
            spans.push(self.required_span());
        }
        self.lines.push(Line::from(spans));

        if let Some(values) = param.schema.as_ref().and_then(enum_label) {
            self.lines
                .push(Line::styled(format!("    {values}"), self.theme.muted_style()));
        }
        if !param.description.is_empty() {
            self.markdown(&param.description, 4);
        }
    }

    fn request_body(&mut self, body: &RequestBody) {
        if body.required {
            self.lines
                .push(Line::from(vec![Span::raw("  "), self.required_span()]));
        }
        if !body.description.is_empty() {
            self.markdown(&body.description, 2);
        }
        self.content(&body.content, 2);
    }

    fn response(&mut self, code: &str, response: &Response) {
        let mut spans = vec![
            Span::raw("  "),
            Span::styled(
                code.to_string(),
                Style::default()
                    .fg(self.theme.methods.get)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if !response.description.is_empty() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(response.description.clone(), self.theme.text_style()));
        }
        self.lines.push(Line::from(spans));

        self.headers(&response.headers);
        self.content(&response.content, 4);
    }

    fn headers(&mut self, headers: &BTreeMap<String, Header>) {
        for (name, header) in headers {
            let mut spans = vec![
                Span::styled("    header ", self.theme.muted_style()),
                Span::styled(name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ];
            if let Some(label) = header.schema.as_ref().map(type_label).filter(|l| !l.is_empty()) {
                spans.push(Span::raw(": "));
                spans.push(Span::styled(label, self.theme.schema_type_style()));
            }
            if !header.description.is_empty() {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(header.description.clone(), self.theme.secondary_style()));
            }
            self.lines.push(Line::from(spans));
        }
    }

    fn content(&mut self, content: &BTreeMap<String, MediaType>, indent: usize) {
        for (media_type, entry) in content {
            self.lines.push(Line::styled(
                format!("{}{media_type}", " ".repeat(indent)),
                Style::default().fg(self.theme.blue),
            ));
            if let Some(schema) = &entry.schema {
                self.schema(schema, indent + 2);
            }
        }
    }

    fn schema(&mut self, schema: &Schema, indent: usize) {
        let pad = " ".repeat(indent);

        if let Some(items) = array_of_object(schema) {
            self.lines.push(Line::styled(
                format!("{pad}array[object]:"),
                self.theme.schema_type_style(),
            ));
            self.properties(items, indent + 2);
            return;
        }
        if !schema.properties.is_empty() {
            self.properties(schema, indent);
            return;
        }

        let label = type_label(schema);
        if !label.is_empty() {
            self.lines
                .push(Line::styled(format!("{pad}{label}"), self.theme.schema_type_style()));
        }
        if let Some(values) = enum_label(schema) {
            self.lines
                .push(Line::styled(format!("{pad}{values}"), self.theme.muted_style()));
        }
    }

    fn properties(&mut self, schema: &Schema, indent: usize) {
        let pad = " ".repeat(indent);

        for (name, prop) in &schema.properties {
            let mut spans = vec![
                Span::raw(pad.clone()),
                Span::styled(name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(": "),
            ];
            match prop {
                Some(prop) => {
                    let label = type_label(prop);
                    spans.push(Span::styled(
                        if label.is_empty() { "any".to_string() } else { label },
                        self.theme.schema_type_style(),
                    ));
                }
                None => spans.push(Span::styled("(unresolved)", self.theme.muted_style())),
            }
            if schema.is_required(name) {
                spans.push(Span::raw("  "));
                spans.push(self.required_span());
            }
            if let Some(values) = prop.as_ref().and_then(enum_label) {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(values, self.theme.muted_style()));
            }
            self.lines.push(Line::from(spans));

            let Some(prop) = prop else {
                continue;
            };
            if !prop.properties.is_empty() {
                self.properties(prop, indent + 2);
            } else if let Some(items) = array_of_object(prop) {
                self.properties(items, indent + 2);
            }
        }
    }
}

/// Element schema of an array whose items carry properties
fn array_of_object(schema: &Schema) -> Option<&Schema> {
    if schema.schema_type != SchemaType::Array {
        return None;
    }
    schema
        .items
        .as_deref()
        .filter(|items| !items.properties.is_empty())
}

/// Inline type: `string`, `string (uuid)`, `array[integer]`
pub fn type_label(schema: &Schema) -> String {
    if schema.schema_type == SchemaType::Array {
        if let Some(items) = &schema.items {
            let inner = type_label(items);
            let inner = if inner.is_empty() { "any".to_string() } else { inner };
            return format!("array[{inner}]");
        }
    }
    let name = schema.schema_type.as_str();
    if name.is_empty() {
        return String::new();
    }
    if schema.format.is_empty() {
        name.to_string()
    } else {
        format!("{name} ({})", schema.format)
    }
}

/// `enum: a | b`, or `None` without enum values
pub fn enum_label(schema: &Schema) -> Option<String> {
    if schema.enum_values.is_empty() {
        return None;
    }
    let values: Vec<String> = schema
        .enum_values
        .iter()
        .map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect();
    Some(format!("enum: {}", values.join(" | ")))
}

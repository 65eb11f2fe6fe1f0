//! Color palette and derived styles

use crate::types::HttpMethod;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

/// Per-method badge colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodPalette {
    pub get: Color,
    pub post: Color,
    pub put: Color,
    pub patch: Color,
    pub delete: Color,
}

/// Palette shared by every screen
///
/// Built once at startup and passed by reference into rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub subtext1: Color,
    pub subtext0: Color,
    pub overlay1: Color,
    pub surface1: Color,
    pub base: Color,
    pub rosewater: Color,
    pub lavender: Color,
    pub blue: Color,
    pub red: Color,
    pub methods: MethodPalette,
}

impl Default for Theme {
    /// Catppuccin Macchiato
    fn default() -> Self {
        Self {
            text: Color::Rgb(0xca, 0xd3, 0xf5),
            subtext1: Color::Rgb(0xb8, 0xc0, 0xe0),
            subtext0: Color::Rgb(0xa5, 0xad, 0xcb),
            overlay1: Color::Rgb(0x80, 0x87, 0xa2),
            surface1: Color::Rgb(0x49, 0x4d, 0x64),
            base: Color::Rgb(0x1a, 0x1b, 0x26),
            rosewater: Color::Rgb(0xf4, 0xdb, 0xd6),
            lavender: Color::Rgb(0xb7, 0xbd, 0xf8),
            blue: Color::Rgb(0x8a, 0xad, 0xf4),
            red: Color::Rgb(0xed, 0x87, 0x96),
            methods: MethodPalette {
                get: Color::Rgb(0xa6, 0xda, 0x95),
                post: Color::Rgb(0xc6, 0xa0, 0xf6),
                put: Color::Rgb(0xf5, 0xa9, 0x7f),
                patch: Color::Rgb(0xee, 0xd4, 0x9f),
                delete: Color::Rgb(0xed, 0x87, 0x96),
            },
        }
    }
}

impl Theme {
    /// Badge color for a method; methods without their own color use the text color
    pub fn method_color(&self, method: HttpMethod) -> Color {
        match method {
            HttpMethod::Get => self.methods.get,
            HttpMethod::Post => self.methods.post,
            HttpMethod::Put => self.methods.put,
            HttpMethod::Patch => self.methods.patch,
            HttpMethod::Delete => self.methods.delete,
            HttpMethod::Head | HttpMethod::Options => self.text,
        }
    }

    /// Bold method name padded to a fixed width
    pub fn method_span(&self, method: HttpMethod) -> Span<'static> {
        Span::styled(
            format!("{:<7}", method.as_str()),
            Style::default()
                .fg(self.method_color(method))
                .add_modifier(Modifier::BOLD),
        )
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.base)
            .bg(self.text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.lavender)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.overlay1)
    }

    pub fn secondary_style(&self) -> Style {
        Style::default().fg(self.subtext1)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.red).add_modifier(Modifier::BOLD)
    }

    pub fn required_style(&self) -> Style {
        Style::default().fg(self.rosewater)
    }

    pub fn schema_type_style(&self) -> Style {
        Style::default().fg(self.blue)
    }

    /// Border of the pane that has focus
    pub fn focused_border(&self) -> Style {
        Style::default().fg(self.lavender)
    }

    /// Border of the pane that does not
    pub fn dimmed_border(&self) -> Style {
        Style::default().fg(self.surface1)
    }

    /// Left edge marker of the selected list row
    pub fn selection_marker(&self) -> Style {
        Style::default().fg(self.rosewater)
    }

    /// Characters matched by the list filter, layered over `base`
    pub fn filter_match(&self, base: Style) -> Style {
        base.add_modifier(Modifier::UNDERLINED)
    }

    /// Inline code and code blocks in rendered markdown
    pub fn code_style(&self) -> Style {
        Style::default().fg(self.red).bg(self.surface1)
    }

    pub fn link_style(&self) -> Style {
        Style::default()
            .fg(self.blue)
            .add_modifier(Modifier::UNDERLINED)
    }
}

//! Loading / error screen shown before the operations screen

use super::text::wrap_text;
use super::theme::Theme;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub const APP_NAME: &str = "dazzle";
pub const LOADING_TEXT: &str = "Loading spec...";
pub const QUIT_HINT: &str = "Press q to quit.";

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, Default)]
pub struct WelcomeScreen {
    error: Option<String>,
    frame: usize,
}

impl WelcomeScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the spinner
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    /// Switches to the error state for the rest of the session
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.error.is_none()
    }

    fn lines(&self, theme: &Theme, width: u16) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::styled(format!(" {APP_NAME} "), theme.title_style()),
            Line::default(),
        ];

        match &self.error {
            Some(error) => {
                let message = format!("Error: {error}");
                let width = usize::from(width.saturating_sub(4)).max(20);
                lines.extend(
                    wrap_text(&message, width)
                        .into_iter()
                        .map(|l| Line::styled(l, theme.error_style())),
                );
                lines.push(Line::default());
                lines.push(Line::styled(QUIT_HINT, theme.muted_style()));
            }
            None => {
                let spinner = SPINNER[self.frame % SPINNER.len()];
                lines.push(Line::styled(
                    format!("{spinner} {LOADING_TEXT}"),
                    theme.secondary_style(),
                ));
            }
        }

        lines
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let lines = self.lines(theme, area.width);
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);

        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), middle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(screen: &WelcomeScreen) -> Vec<String> {
        screen
            .lines(&Theme::default(), 80)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_loading_state() {
        let mut screen = WelcomeScreen::new();
        assert!(screen.is_loading());
        let first = text(&screen);
        assert!(first[2].ends_with(LOADING_TEXT));

        screen.tick();
        assert_ne!(text(&screen)[2], first[2]);
    }

    #[test]
    fn test_error_state() {
        let mut screen = WelcomeScreen::new();
        screen.set_error("document not found: api.yaml");
        assert!(!screen.is_loading());

        let lines = text(&screen);
        assert!(lines.contains(&"Error: document not found: api.yaml".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some(QUIT_HINT));
    }
}

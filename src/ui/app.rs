//! Application shell: screen switching and the message type

use super::operations::OperationsScreen;
use super::welcome::WelcomeScreen;
use crate::config::BrowserConfig;
use crate::errors::Result;
use crate::types::Spec;
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use ratatui::Frame;

/// Everything the shell reacts to
#[derive(Debug)]
pub enum Message {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
    /// Timer for the loading spinner
    Tick,
    /// The one-shot load finished
    SpecLoaded(Result<Spec>),
}

impl Message {
    /// Converts a terminal event; key releases and repeats are dropped
    pub fn from_terminal_event(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(Message::Key(key)),
            Event::Mouse(mouse) => Some(Message::Mouse(mouse)),
            Event::Resize(width, height) => Some(Message::Resize { width, height }),
            _ => None,
        }
    }
}

/// What the shell asks the runtime to do after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,
    Quit,
}

#[derive(Debug)]
pub enum Screen {
    Welcome(WelcomeScreen),
    Operations(Box<OperationsScreen>),
}

/// Root state: owns the current screen and the last known terminal size
#[derive(Debug)]
pub struct App {
    screen: Screen,
    config: BrowserConfig,
    width: u16,
    height: u16,
}

impl App {
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            screen: Screen::Welcome(WelcomeScreen::new()),
            config,
            width: 0,
            height: 0,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn update(&mut self, message: Message) -> Command {
        match message {
            Message::Key(key) if is_ctrl_c(&key) => Command::Quit,
            Message::Key(key) => self.handle_key(key),
            Message::Resize { width, height } => {
                self.width = width;
                self.height = height;
                if let Screen::Operations(screen) = &mut self.screen {
                    screen.update(&Message::Resize { width, height });
                }
                Command::None
            }
            Message::Mouse(mouse) => {
                if let Screen::Operations(screen) = &mut self.screen {
                    screen.update(&Message::Mouse(mouse));
                }
                Command::None
            }
            Message::Tick => {
                if let Screen::Welcome(welcome) = &mut self.screen {
                    welcome.tick();
                }
                Command::None
            }
            Message::SpecLoaded(result) => {
                self.handle_loaded(result);
                Command::None
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command {
        let quit = key.code == KeyCode::Char('q');
        match &mut self.screen {
            Screen::Welcome(_) if quit => Command::Quit,
            Screen::Welcome(_) => Command::None,
            Screen::Operations(screen) => {
                if quit && !screen.is_capturing_input() {
                    return Command::Quit;
                }
                screen.update(&Message::Key(key));
                Command::None
            }
        }
    }

    /// The load is issued once, so results arriving after the switch are stale
    fn handle_loaded(&mut self, result: Result<Spec>) {
        match result {
            Ok(spec) => {
                if matches!(self.screen, Screen::Welcome(_)) {
                    self.show_operations(&spec);
                }
            }
            Err(e) => {
                if let Screen::Welcome(welcome) = &mut self.screen {
                    tracing::error!(error = %e, "spec failed to load");
                    welcome.set_error(e.to_string());
                }
            }
        }
    }

    fn show_operations(&mut self, spec: &Spec) {
        let mut screen = OperationsScreen::new(spec, self.config.clone());
        screen.update(&Message::Resize {
            width: self.width,
            height: self.height,
        });
        tracing::debug!(operations = spec.operations.len(), "switching to operations screen");
        self.screen = Screen::Operations(Box::new(screen));
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        match &self.screen {
            Screen::Welcome(welcome) => welcome.render(frame, area, &self.config.theme),
            Screen::Operations(screen) => screen.render(frame, area),
        }
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::types::{HttpMethod, Operation};
    use ratatui::crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> Message {
        Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn loaded_spec() -> Spec {
        Spec {
            operations: vec![Operation::new(HttpMethod::Get, "/pets")],
            ..Default::default()
        }
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = App::new(BrowserConfig::default());
        let ctrl_c = Message::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(app.update(ctrl_c), Command::Quit);

        app.update(Message::SpecLoaded(Ok(loaded_spec())));
        let ctrl_c = Message::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(app.update(ctrl_c), Command::Quit);
    }

    #[test]
    fn test_load_success_transitions_once() {
        let mut app = App::new(BrowserConfig::default());
        app.update(Message::Resize { width: 120, height: 40 });
        app.update(Message::SpecLoaded(Ok(loaded_spec())));

        let Screen::Operations(screen) = app.screen() else {
            panic!("expected operations screen");
        };
        assert_eq!(screen.size(), (120, 40));

        // A stray second result changes nothing.
        app.update(Message::SpecLoaded(Err(Error::not_found("x"))));
        assert!(matches!(app.screen(), Screen::Operations(_)));
    }

    #[test]
    fn test_load_failure_stays_on_welcome() {
        let mut app = App::new(BrowserConfig::default());
        app.update(Message::SpecLoaded(Err(Error::not_found("api.yaml"))));

        let Screen::Welcome(welcome) = app.screen() else {
            panic!("expected welcome screen");
        };
        assert_eq!(welcome.error(), Some("document not found: api.yaml"));

        assert_eq!(app.update(key(KeyCode::Enter)), Command::None);
        assert_eq!(app.update(key(KeyCode::Char('q'))), Command::Quit);
    }

    #[test]
    fn test_q_is_text_while_filtering() {
        let mut app = App::new(BrowserConfig::default());
        app.update(Message::SpecLoaded(Ok(loaded_spec())));
        app.update(key(KeyCode::Char('/')));
        assert_eq!(app.update(key(KeyCode::Char('q'))), Command::None);

        app.update(key(KeyCode::Esc));
        assert_eq!(app.update(key(KeyCode::Char('q'))), Command::Quit);
    }

    #[test]
    fn test_only_key_presses_become_messages() {
        let press = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert!(matches!(
            Message::from_terminal_event(Event::Key(press)),
            Some(Message::Key(_))
        ));

        let release = KeyEvent {
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
            ..press
        };
        assert!(Message::from_terminal_event(Event::Key(release)).is_none());
        assert!(matches!(
            Message::from_terminal_event(Event::Resize(80, 24)),
            Some(Message::Resize { width: 80, height: 24 })
        ));
    }
}

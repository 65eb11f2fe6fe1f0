//! Terminal setup and the message loop

use crate::config::BrowserConfig;
use crate::errors::{Error, Result};
use crate::repository::SpecService;
use crate::ui::{App, Command, Message};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enters raw mode and the alternate screen with mouse capture
pub fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Undoes [`setup_terminal`]; safe to call more than once
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Installs a panic hook that gives the terminal back before reporting
pub fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original(info);
    }));
}

/// Forwards terminal events from a blocking reader thread
fn spawn_input_reader(tx: UnboundedSender<Message>) {
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if let Some(msg) = Message::from_terminal_event(ev) {
                    if tx.send(msg).is_err() {
                        break;
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "terminal input failed");
                break;
            }
        }
    });
}

/// Sends spinner ticks until `loaded` fires (or its sender is dropped)
fn spawn_ticker(
    tx: UnboundedSender<Message>,
    rate: Duration,
    mut loaded: oneshot::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(rate);
        loop {
            tokio::select! {
                _ = &mut loaded => {
                    tracing::debug!("load finished, ticker stopped");
                    break;
                }
                _ = interval.tick() => {
                    if tx.send(Message::Tick).is_err() {
                        break;
                    }
                }
            }
        }
    })
}

/// Issues the one-shot load; its only effect is a single message
fn spawn_load(
    tx: UnboundedSender<Message>,
    service: SpecService,
    source: String,
    loaded: oneshot::Sender<()>,
) {
    tokio::spawn(async move {
        tracing::debug!(%source, "loading spec");
        let load = tokio::spawn(async move { service.load_spec(&source).await });
        // a panicking load still reports back
        let result = load
            .await
            .unwrap_or_else(|e| Err(Error::task_failed(e.to_string())));
        let _ = tx.send(Message::SpecLoaded(result));
        let _ = loaded.send(());
    });
}

/// Drives `app` from `rx` until it asks to quit or every sender is gone
pub async fn drive<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut rx: UnboundedReceiver<Message>,
) -> Result<()> {
    terminal.draw(|frame| app.render(frame))?;
    while let Some(msg) = rx.recv().await {
        if app.update(msg) == Command::Quit {
            tracing::debug!("quit requested");
            break;
        }
        terminal.draw(|frame| app.render(frame))?;
    }
    Ok(())
}

/// Runs the browser for `source` on an already prepared terminal
pub async fn run(
    terminal: &mut Tui,
    config: BrowserConfig,
    service: SpecService,
    source: String,
) -> Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();

    let size = terminal.size()?;
    tx.send(Message::Resize {
        width: size.width,
        height: size.height,
    })
    .ok();

    spawn_input_reader(tx.clone());
    let (loaded_tx, loaded_rx) = oneshot::channel();
    spawn_ticker(tx.clone(), config.tick_rate, loaded_rx);
    spawn_load(tx, service, source, loaded_tx);

    let mut app = App::new(config);
    drive(terminal, &mut app, rx).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HttpMethod, Operation, Spec};
    use crate::ui::Screen;
    use ratatui::backend::TestBackend;
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[tokio::test]
    async fn test_drive_stops_on_quit() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut app = App::new(BrowserConfig::default());
        let (tx, rx) = mpsc::unbounded_channel();

        tx.send(Message::Resize { width: 60, height: 20 }).unwrap();
        tx.send(Message::SpecLoaded(Ok(Spec {
            operations: vec![Operation::new(HttpMethod::Get, "/pets")],
            ..Default::default()
        })))
        .unwrap();
        tx.send(Message::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)))
            .unwrap();
        // Never reached.
        tx.send(Message::Tick).unwrap();

        drive(&mut terminal, &mut app, rx).await.unwrap();
        assert!(matches!(app.screen(), Screen::Operations(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_stops_once_loaded() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (loaded_tx, loaded_rx) = oneshot::channel();
        let ticker = spawn_ticker(tx, Duration::from_millis(100), loaded_rx);

        tokio::time::sleep(Duration::from_millis(250)).await;
        loaded_tx.send(()).unwrap();
        ticker.await.unwrap();

        let mut ticks = 0;
        while let Some(msg) = rx.recv().await {
            assert!(matches!(msg, Message::Tick));
            ticks += 1;
        }
        assert!(ticks >= 1);

        // channel is closed: no tick arrives however long we wait
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_drive_ends_when_senders_drop() {
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        let mut app = App::new(BrowserConfig::default());
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(Message::Tick).unwrap();
        drop(tx);

        drive(&mut terminal, &mut app, rx).await.unwrap();
        assert!(matches!(app.screen(), Screen::Welcome(_)));
    }
}

//! Driving the app through messages and checking what ends up on screen

use dazzle::prelude::*;
use dazzle::ui::{App, Command, Focus, Message, Screen};
use ratatui::backend::TestBackend;
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::style::Modifier;
use ratatui::Terminal;

fn petstore() -> Spec {
    let doc = parse_str(include_str!("fixtures/petstore.yaml")).unwrap();
    adapt_spec(&doc, SCHEMA_MAX_DEPTH)
}

fn loaded_app(width: u16, height: u16) -> App {
    let mut app = App::new(BrowserConfig::default());
    app.update(Message::Resize { width, height });
    app.update(Message::SpecLoaded(Ok(petstore())));
    app
}

fn key(code: KeyCode) -> Message {
    Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Message {
    Message::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn screen_text(app: &App, width: u16, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    let buffer = terminal.backend().buffer();
    (0..height)
        .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
        .collect()
}

fn contains(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|row| row.contains(needle))
}

fn selected_id(app: &App) -> Option<String> {
    match app.screen() {
        Screen::Operations(screen) => screen.selected_operation().map(|op| op.id.clone()),
        Screen::Welcome(_) => None,
    }
}

fn detail_offset(app: &App) -> usize {
    match app.screen() {
        Screen::Operations(screen) => screen.detail().viewport().y_offset(),
        Screen::Welcome(_) => panic!("still on the welcome screen"),
    }
}

#[test]
fn test_welcome_screen_renders_loading_then_error() {
    let mut app = App::new(BrowserConfig::default());
    let rows = screen_text(&app, 60, 12);
    assert!(contains(&rows, "dazzle"));
    assert!(contains(&rows, "Loading spec..."));

    app.update(Message::SpecLoaded(Err(Error::not_found("api.yaml"))));
    let rows = screen_text(&app, 60, 12);
    assert!(contains(&rows, "Error: document not found: api.yaml"));
    assert!(contains(&rows, "Press q to quit."));
}

#[test]
fn test_operations_screen_renders_both_panes() {
    let app = loaded_app(100, 30);
    let rows = screen_text(&app, 100, 30);

    assert!(contains(&rows, "Swagger Petstore"));
    assert!(contains(&rows, "5/5 operations"));
    assert!(contains(&rows, "List all pets"));
    assert!(contains(&rows, "listPets"));
    assert!(contains(&rows, "Parameters"));
    assert!(contains(&rows, "Responses"));
}

#[test]
fn test_filter_to_nothing_shows_placeholders() {
    let mut app = loaded_app(100, 30);
    app.update(key(KeyCode::Char('/')));
    for c in "zzz".chars() {
        app.update(key(KeyCode::Char(c)));
    }
    app.update(key(KeyCode::Enter));

    let rows = screen_text(&app, 100, 30);
    assert!(contains(&rows, "No matching operations"));
    assert!(contains(&rows, "Select an operation to view details"));
    assert_eq!(selected_id(&app), None);
}

#[test]
fn test_filter_narrows_selection() {
    let mut app = loaded_app(100, 30);
    app.update(key(KeyCode::Char('/')));
    for c in "delete".chars() {
        app.update(key(KeyCode::Char(c)));
    }
    assert_eq!(selected_id(&app).as_deref(), Some("DELETE /pets/{petId}"));

    app.update(key(KeyCode::Esc));
    assert_eq!(selected_id(&app).as_deref(), Some("listPets"));
}

#[test]
fn test_keyboard_selection_follows_sorted_order() {
    let mut app = loaded_app(100, 30);
    assert_eq!(selected_id(&app).as_deref(), Some("listPets"));

    app.update(key(KeyCode::Down));
    assert_eq!(selected_id(&app).as_deref(), Some("createPets"));
    app.update(key(KeyCode::Char('j')));
    assert_eq!(selected_id(&app).as_deref(), Some("showPetById"));
    app.update(key(KeyCode::End));
    assert_eq!(selected_id(&app).as_deref(), Some("listUsers"));
}

#[test]
fn test_detail_keys_scroll_without_changing_selection() {
    let mut app = loaded_app(90, 12);
    app.update(key(KeyCode::Tab));
    if let Screen::Operations(screen) = app.screen() {
        assert_eq!(screen.focus(), Focus::Detail);
    }

    app.update(key(KeyCode::Down));
    app.update(key(KeyCode::Down));
    assert_eq!(detail_offset(&app), 2);
    assert_eq!(selected_id(&app).as_deref(), Some("listPets"));
}

#[test]
fn test_reselecting_same_operation_keeps_scroll() {
    let mut app = loaded_app(90, 12);
    app.update(key(KeyCode::Tab));
    app.update(key(KeyCode::Char('j')));
    app.update(key(KeyCode::Char('j')));
    assert_eq!(detail_offset(&app), 2);

    // Unrelated events and a no-op selection leave the scroll alone.
    app.update(Message::Resize { width: 90, height: 12 });
    app.update(key(KeyCode::Tab));
    app.update(key(KeyCode::Up));
    assert_eq!(selected_id(&app).as_deref(), Some("listPets"));
    assert_eq!(detail_offset(&app), 2);

    // A different operation starts at the top.
    app.update(key(KeyCode::Down));
    assert_eq!(selected_id(&app).as_deref(), Some("createPets"));
    assert_eq!(detail_offset(&app), 0);
}

#[test]
fn test_mouse_routed_by_column_not_focus() {
    let mut app = loaded_app(90, 12);

    // Focus stays on the list; the wheel over the right two thirds scrolls details.
    app.update(mouse(MouseEventKind::ScrollDown, 60, 5));
    assert_eq!(detail_offset(&app), 3);
    assert_eq!(selected_id(&app).as_deref(), Some("listPets"));

    // Over the list the wheel moves the selection instead.
    app.update(mouse(MouseEventKind::ScrollDown, 5, 5));
    assert_eq!(selected_id(&app).as_deref(), Some("createPets"));
}

#[test]
fn test_click_selects_list_row() {
    let mut app = loaded_app(90, 30);

    // Border row, header row, then two rows per entry with a spacer between.
    app.update(mouse(MouseEventKind::Down(MouseButton::Left), 5, 5));
    assert_eq!(selected_id(&app).as_deref(), Some("createPets"));

    // Spacer rows and the detail pane are ignored.
    app.update(mouse(MouseEventKind::Down(MouseButton::Left), 5, 7));
    assert_eq!(selected_id(&app).as_deref(), Some("createPets"));
    app.update(mouse(MouseEventKind::Down(MouseButton::Left), 60, 2));
    assert_eq!(selected_id(&app).as_deref(), Some("createPets"));
}

#[test]
fn test_quit_keys() {
    let mut app = loaded_app(90, 30);
    assert_eq!(app.update(key(KeyCode::Char('/'))), Command::None);
    assert_eq!(app.update(key(KeyCode::Char('q'))), Command::None);
    assert_eq!(
        app.update(Message::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        ))),
        Command::Quit
    );
}

#[test]
fn test_filter_matches_are_underlined_in_list() {
    let mut app = loaded_app(100, 30);
    app.update(key(KeyCode::Char('/')));
    for c in "pet".chars() {
        app.update(key(KeyCode::Char(c)));
    }

    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    let buffer = terminal.backend().buffer();

    // first list row: "> GET    /pets"
    let list_width = 33;
    let (x, y) = (0..30u16)
        .find_map(|y| {
            let row: String = (0..list_width).map(|x| buffer[(x, y)].symbol()).collect();
            row.find("GET    /pets").map(|byte| {
                let column = row[..byte].chars().count() as u16;
                (column + "GET    ".len() as u16, y)
            })
        })
        .expect("list row for GET /pets");

    let slash = &buffer[(x, y)];
    assert_eq!(slash.symbol(), "/");
    assert!(!slash.modifier.contains(Modifier::UNDERLINED));
    for offset in 1..=3 {
        assert!(buffer[(x + offset, y)].modifier.contains(Modifier::UNDERLINED));
    }
    assert!(!buffer[(x + 4, y)].modifier.contains(Modifier::UNDERLINED));

    // Clearing the filter drops the highlight.
    app.update(key(KeyCode::Esc));
    terminal.draw(|frame| app.render(frame)).unwrap();
    let buffer = terminal.backend().buffer();
    assert!(!buffer[(x + 1, y)].modifier.contains(Modifier::UNDERLINED));
}

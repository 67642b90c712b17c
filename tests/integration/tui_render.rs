//! Integration tests for rendering and the event loop.
//!
//! Uses ratatui's `TestBackend` to draw frames and a scripted event
//! stream to drive `event_loop::run` end to end.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io;
use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
use taskboard::app::{App, Focus};
use taskboard::{event_loop, ui};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn make_terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(60, 30)).expect("test terminal")
}

/// One line of the buffer as plain text.
fn line_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol().to_string())
        .collect()
}

/// The whole buffer as plain text, lines joined with '\n'.
fn screen_text(buffer: &Buffer) -> String {
    (0..buffer.area.height)
        .map(|y| line_text(buffer, y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn draw(terminal: &mut Terminal<TestBackend>, app: &mut App) -> String {
    terminal
        .draw(|frame| {
            app.set_viewport(frame.area());
            ui::draw(frame, app);
        })
        .unwrap();
    screen_text(terminal.backend().buffer())
}

fn key(code: KeyCode) -> io::Result<Event> {
    Ok(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

fn typed(s: &str) -> Vec<io::Result<Event>> {
    s.chars().map(|c| key(KeyCode::Char(c))).collect()
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> io::Result<Event> {
    Ok(Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }))
}

// ===========================================================================
// Static frames
// ===========================================================================

#[test]
fn empty_screen_shows_form_and_hint() {
    let mut terminal = make_terminal();
    let mut app = App::new();
    let screen = draw(&mut terminal, &mut app);

    assert!(screen.contains("Task Management System"));
    assert!(screen.contains("Title"));
    assert!(screen.contains("Description"));
    assert!(screen.contains("Add Task"));
    assert!(screen.contains("No tasks yet"));
    assert!(screen.contains("Tasks (0/0)"));
}

#[test]
fn rows_show_checkbox_title_description_and_delete() {
    let mut terminal = make_terminal();
    let mut app = App::new();
    let milk = app.store.add_task("Buy milk", "2%");
    app.store.add_task("Walk dog", "around the block");
    app.store.toggle_task(milk);

    let screen = draw(&mut terminal, &mut app);
    let buffer = terminal.backend().buffer().clone();

    let first = line_text(&buffer, 11);
    assert!(first.contains("[✓] Buy milk"), "{first}");
    assert!(first.trim_end_matches('│').trim_end().ends_with("Delete"), "{first}");
    assert!(line_text(&buffer, 12).contains("2%"));
    assert!(line_text(&buffer, 14).contains("[ ] Walk dog"));
    assert!(screen.contains("Tasks (1/2)"));
    assert!(screen.contains("1/2 done"));
}

#[test]
fn dragged_row_is_drawn_at_pointer() {
    let mut terminal = make_terminal();
    let mut app = App::new();
    for title in ["Alpha", "Bravo", "Charlie"] {
        app.store.add_task(title, "");
    }
    draw(&mut terminal, &mut app);

    let now = app.now();
    for (kind, row) in [
        (MouseEventKind::Down(MouseButton::Left), 11),
        (MouseEventKind::Drag(MouseButton::Left), 13),
    ] {
        app.handle_event(&mouse(kind, 20, row).unwrap(), now);
    }

    // Alpha moved to slot 1 but is drawn two lines below slot 0.
    assert_eq!(app.store.tasks()[1].title, "Alpha");
    draw(&mut terminal, &mut app);
    let buffer = terminal.backend().buffer();
    assert!(line_text(buffer, 13).contains("Alpha"));
    assert!(line_text(buffer, 11).contains("Bravo"));
}

// ===========================================================================
// Event loop
// ===========================================================================

#[tokio::test]
async fn event_loop_adds_and_toggles_task() {
    let mut terminal = make_terminal();
    let mut app = App::new();

    let mut script = typed("Buy milk");
    script.push(key(KeyCode::Enter));
    script.extend(typed("2%"));
    script.push(key(KeyCode::Enter));
    script.push(key(KeyCode::BackTab));
    script.push(key(KeyCode::Char(' ')));

    event_loop::run(
        &mut terminal,
        &mut app,
        futures_util::stream::iter(script),
        Duration::from_millis(5),
    )
    .await
    .unwrap();

    assert_eq!(app.focus, Focus::List);
    assert_eq!(app.store.len(), 1);
    let task = &app.store.tasks()[0];
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.description, "2%");
    assert!(task.completed);

    let screen = screen_text(terminal.backend().buffer());
    assert!(screen.contains("Buy milk"));
}

#[tokio::test]
async fn event_loop_stops_on_quit() {
    let mut terminal = make_terminal();
    let mut app = App::new();

    let mut script = vec![key(KeyCode::Esc)];
    script.extend(typed("ignored"));

    event_loop::run(
        &mut terminal,
        &mut app,
        futures_util::stream::iter(script),
        Duration::from_millis(5),
    )
    .await
    .unwrap();

    assert!(app.should_quit);
    assert!(app.form.title.is_empty());
}

#[tokio::test]
async fn event_loop_surfaces_stream_errors() {
    let mut terminal = make_terminal();
    let mut app = App::new();

    let script = vec![Err(io::Error::other("tty gone"))];
    let result = event_loop::run(
        &mut terminal,
        &mut app,
        futures_util::stream::iter(script),
        Duration::from_millis(5),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn event_loop_mouse_drag_reorders() {
    let mut terminal = make_terminal();
    let mut app = App::new();
    for title in ["A", "B", "C"] {
        app.store.add_task(title, "");
    }

    let script = vec![
        mouse(MouseEventKind::Down(MouseButton::Left), 20, 12),
        mouse(MouseEventKind::Drag(MouseButton::Left), 20, 15),
        mouse(MouseEventKind::Drag(MouseButton::Left), 20, 18),
        mouse(MouseEventKind::Up(MouseButton::Left), 20, 18),
    ];
    event_loop::run(
        &mut terminal,
        &mut app,
        futures_util::stream::iter(script),
        Duration::from_millis(5),
    )
    .await
    .unwrap();

    let titles: Vec<&str> = app.store.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["B", "C", "A"]);
}

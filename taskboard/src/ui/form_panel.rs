//! Form panel rendering (header, inputs, add button).

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{Regions, theme};
use crate::app::{App, Focus};
use crate::form::{Field, TextInput};

/// Header shown above the form.
pub const HEADER: &str = "Task Management System";

/// Render the header, both inputs and the add button.
pub fn render(frame: &mut Frame, regions: &Regions, app: &App) {
    let header = Paragraph::new(Line::from(Span::styled(HEADER, theme::header())))
        .alignment(Alignment::Center);
    frame.render_widget(header, regions.header);

    render_input(
        frame,
        regions.title,
        app.form.field(Field::Title),
        "Title",
        app.focus == Focus::Title,
    );
    render_input(
        frame,
        regions.description,
        app.form.field(Field::Description),
        "Description",
        app.focus == Focus::Description,
    );
    render_button(frame, regions.add_button, app.focus == Focus::AddButton);
}

/// Render one input box; the placeholder doubles as the title.
fn render_input(frame: &mut Frame, area: Rect, input: &TextInput, placeholder: &str, focused: bool) {
    let line = if input.is_empty() && !focused {
        Line::from(Span::styled(placeholder.to_string(), theme::dimmed()))
    } else if focused {
        Line::from(Span::styled(with_cursor(input), theme::normal()))
    } else {
        Line::from(Span::styled(input.text().to_string(), theme::normal()))
    };

    let block = Block::default()
        .title(placeholder.to_string())
        .borders(Borders::ALL)
        .border_style(theme::border(focused));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Input text with a block cursor inserted at the cursor position.
fn with_cursor(input: &TextInput) -> String {
    let mut display: String = input.text().chars().take(input.cursor()).collect();
    display.push('█');
    display.extend(input.text().chars().skip(input.cursor()));
    display
}

/// Render the "Add Task" button.
fn render_button(frame: &mut Frame, area: Rect, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(focused));
    let label = Paragraph::new(Line::from(Span::styled("Add Task", theme::button(focused))))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(label, area);
}

//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, Focus};

/// Key help for the focused control.
#[must_use]
pub const fn help_text(app: &App) -> &'static str {
    if app.drag.is_dragging() {
        return "Release to drop";
    }
    match app.focus {
        Focus::Title => "Enter: next field | Tab: switch | Esc: quit",
        Focus::Description => "Enter: add task | Tab: switch | Esc: quit",
        Focus::AddButton => "Enter/Space: add task | Tab: switch | Esc: quit",
        Focus::List => {
            "↑↓/jk: select | Space: toggle | d: delete | J/K: move | drag: reorder | Esc: quit"
        }
    }
}

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let status_line = Line::from(vec![
        Span::styled(concat!("Taskboard v", env!("CARGO_PKG_VERSION")), theme::bold()),
        Span::raw(" | "),
        Span::raw(format!(
            "{}/{} done",
            app.store.completed_count(),
            app.store.len()
        )),
        Span::raw(" | "),
        Span::styled(help_text(app), theme::dimmed()),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}

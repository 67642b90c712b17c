//! Terminal UI rendering.

pub mod form_panel;
pub mod status_bar;
pub mod task_panel;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
};

use crate::app::App;

/// Width of the "Add Task" button, borders included.
const BUTTON_WIDTH: u16 = 14;

/// Screen areas of every control. Used for drawing and for mouse
/// hit-testing, so both always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Regions {
    /// Header line.
    pub header: Rect,
    /// Title input box.
    pub title: Rect,
    /// Description input box.
    pub description: Rect,
    /// Add button.
    pub add_button: Rect,
    /// Task list, borders included.
    pub list: Rect,
    /// Task list rows area.
    pub list_inner: Rect,
    /// Status bar line.
    pub status: Rect,
}

impl Regions {
    /// Lay out the screen.
    #[must_use]
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(3), // Title
                Constraint::Length(3), // Description
                Constraint::Length(3), // Button
                Constraint::Min(3),    // Tasks
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let inputs = |area: Rect| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(10),
                    Constraint::Percentage(80),
                    Constraint::Percentage(10),
                ])
                .split(area)[1]
        };
        let button = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(BUTTON_WIDTH),
                Constraint::Fill(1),
            ])
            .split(rows[3])[1];

        let list = rows[4];
        Self {
            header: rows[0],
            title: inputs(rows[1]),
            description: inputs(rows[2]),
            add_button: button,
            list,
            list_inner: Block::default().borders(Borders::ALL).inner(list),
            status: rows[5],
        }
    }
}

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let regions = Regions::new(frame.area());

    form_panel::render(frame, &regions, app);
    task_panel::render(frame, regions.list, app);
    status_bar::render(frame, regions.status, app);
}

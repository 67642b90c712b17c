//! Application state and event handling.

use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use taskboard_core::{TaskId, TaskStore};

use crate::config::Config;
use crate::drag::{DragController, ListGeometry};
use crate::form::{Field, TaskForm};
use crate::ui::Regions;
use crate::ui::task_panel::{CHECKBOX_WIDTH, DELETE_LABEL};

/// Which control currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Title input (default).
    Title,
    /// Description input.
    Description,
    /// "Add Task" button.
    AddButton,
    /// Task list.
    List,
}

/// Part of a task row under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowZone {
    /// Completion checkbox.
    Checkbox,
    /// Delete control.
    Delete,
    /// Anywhere else; starts a drag.
    Body,
}

/// Result of hit-testing the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHit {
    /// Row index in the store.
    pub index: usize,
    /// Line within the row as drawn, from its top.
    pub line_in_row: u16,
    /// Line from the top of row 0, scrolling included.
    pub content_line: i32,
    /// Control under the pointer.
    pub zone: RowZone,
}

/// Main application state.
pub struct App {
    /// The task collection. Only mutated through `TaskStore` methods.
    pub store: TaskStore,
    /// Add-task form buffers.
    pub form: TaskForm,
    /// Which control is focused.
    pub focus: Focus,
    /// Selected row in the task list.
    pub selected: usize,
    /// First visible row in the task list.
    pub scroll: usize,
    /// Drag gesture and row animations.
    pub drag: DragController,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Terminal area of the last drawn frame.
    viewport: Rect,
    /// Animation clock, advanced by [`App::tick`].
    now: Instant,
    /// chrono format for row timestamps.
    timestamp_format: String,
}

impl App {
    /// Create an empty application with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Create an empty application from resolved configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let geometry = ListGeometry {
            row_height: config.row_height,
            row_lines: config.row_lines,
        };
        Self {
            store: TaskStore::new(),
            form: TaskForm::default(),
            focus: Focus::Title,
            selected: 0,
            scroll: 0,
            drag: DragController::new(geometry)
                .with_return_duration(config.return_duration)
                .with_enter_duration(config.enter_duration),
            should_quit: false,
            viewport: Rect::default(),
            now: Instant::now(),
            timestamp_format: config.timestamp_format.clone(),
        }
    }

    /// Animation clock of the latest tick.
    #[must_use]
    pub const fn now(&self) -> Instant {
        self.now
    }

    /// chrono format string for row timestamps.
    #[must_use]
    pub fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    /// Terminal area used for hit-testing mouse events.
    #[must_use]
    pub const fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Record the terminal area of the frame being drawn.
    pub fn set_viewport(&mut self, area: Rect) {
        if self.viewport != area {
            self.viewport = area;
            self.clamp_scroll();
        }
    }

    /// Advance the animation clock. Returns whether anything is still
    /// moving.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.now = now;
        self.drag.tick(now)
    }

    /// Id of the selected task.
    #[must_use]
    pub fn selected_task(&self) -> Option<TaskId> {
        self.store.tasks().get(self.selected).map(|t| t.id)
    }

    /// Dispatch a terminal event.
    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(*key),
            Event::Mouse(mouse) => self.handle_mouse_event(*mouse, now),
            _ => {}
        }
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // Global shortcuts
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.should_quit = true;
                return;
            }
            (KeyCode::Tab, KeyModifiers::SHIFT) | (KeyCode::BackTab, _) => {
                self.cycle_focus_backward();
                return;
            }
            (KeyCode::Tab, _) => {
                self.cycle_focus_forward();
                return;
            }
            _ => {}
        }

        // Focus-specific shortcuts
        match self.focus {
            Focus::Title => self.handle_field_key(Field::Title, key),
            Focus::Description => self.handle_field_key(Field::Description, key),
            Focus::AddButton => self.handle_button_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    /// Handle key event when a form field is focused.
    fn handle_field_key(&mut self, field: Field, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            match field {
                Field::Title => self.focus = Focus::Description,
                Field::Description => self.submit_task(),
            }
            return;
        }

        let input = self.form.field_mut(field);
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert(c),
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_home(),
            KeyCode::End => input.move_end(),
            _ => {}
        }
    }

    /// Handle key event when the add button is focused.
    fn handle_button_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
            self.submit_task();
        }
    }

    /// Handle key event when the task list is focused.
    fn handle_list_key(&mut self, key: KeyEvent) {
        // The drag owns the row order until release.
        if self.drag.is_dragging() {
            return;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Up, KeyModifiers::SHIFT) | (KeyCode::Char('K'), _) => self.move_selected_up(),
            (KeyCode::Down, KeyModifiers::SHIFT) | (KeyCode::Char('J'), _) => {
                self.move_selected_down();
            }
            (KeyCode::Up | KeyCode::Char('k'), _) => self.select_prev(),
            (KeyCode::Down | KeyCode::Char('j'), _) => self.select_next(),
            (KeyCode::Home | KeyCode::Char('g'), _) => self.select(0),
            (KeyCode::End | KeyCode::Char('G'), _) => {
                self.select(self.store.len().saturating_sub(1));
            }
            (KeyCode::Enter | KeyCode::Char(' ' | 'x'), _) => self.toggle_selected(),
            (KeyCode::Delete | KeyCode::Char('d'), _) => self.delete_selected(),
            _ => {}
        }
    }

    /// Handle a mouse event.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent, now: Instant) {
        let regions = Regions::new(self.viewport);
        let pos = Position::new(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(&regions, pos, now),
            MouseEventKind::Drag(MouseButton::Left) => {
                let line = self.content_line(regions.list_inner, mouse.row);
                if let Some(index) = self.drag.motion(&mut self.store, line) {
                    self.selected = index;
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(index) = self.drag.release(now) {
                    self.selected = index;
                }
            }
            MouseEventKind::ScrollUp if regions.list.contains(pos) => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            MouseEventKind::ScrollDown if regions.list.contains(pos) => {
                self.scroll += 1;
                self.clamp_scroll();
            }
            _ => {}
        }
    }

    /// Left button went down at `pos`.
    fn handle_click(&mut self, regions: &Regions, pos: Position, now: Instant) {
        if regions.title.contains(pos) {
            self.focus = Focus::Title;
            self.form.title.move_end();
        } else if regions.description.contains(pos) {
            self.focus = Focus::Description;
            self.form.description.move_end();
        } else if regions.add_button.contains(pos) {
            self.focus = Focus::AddButton;
            self.submit_task();
        } else if let Some(hit) = self.row_hit(regions.list_inner, pos) {
            self.focus = Focus::List;
            self.selected = hit.index;
            match hit.zone {
                RowZone::Checkbox => self.toggle_selected(),
                RowZone::Delete => self.delete_selected(),
                RowZone::Body => {
                    self.drag
                        .press(&mut self.store, hit.index, hit.content_line, now);
                }
            }
        }
    }

    /// Hit-test a position against the rows of the list's inner area, as
    /// they are drawn. Where rows overlap, the one drawn on top wins.
    #[must_use]
    pub fn row_hit(&self, inner: Rect, pos: Position) -> Option<RowHit> {
        if !inner.contains(pos) {
            return None;
        }
        let y = i32::from(pos.y - inner.y);
        let row_lines = i32::from(self.drag.geometry().row_lines);
        let dragged = self.drag.dragged();
        let (index, top) = self
            .store
            .iter()
            .enumerate()
            .map(|(index, task)| (index, task.id, self.drawn_row_top(task.id, index)))
            .filter(|&(_, _, top)| (top..top + row_lines).contains(&y))
            .max_by_key(|&(index, id, _)| (dragged == Some(id), index))
            .map(|(index, _, top)| (index, top))?;
        let line_in_row = u16::try_from(y - top).unwrap_or(0);

        // Both controls sit on a row's first line.
        let delete_width = u16::try_from(DELETE_LABEL.len()).unwrap_or(u16::MAX);
        let zone = if line_in_row != 0 {
            RowZone::Body
        } else if pos.x < inner.x + CHECKBOX_WIDTH {
            RowZone::Checkbox
        } else if pos.x >= inner.right().saturating_sub(delete_width) {
            RowZone::Delete
        } else {
            RowZone::Body
        };

        Some(RowHit {
            index,
            line_in_row,
            content_line: self.content_line(inner, pos.y),
            zone,
        })
    }

    /// Top line of row `index` as drawn, relative to the top of the list's
    /// inner area. Includes scrolling and the row's animated offset.
    #[must_use]
    pub fn drawn_row_top(&self, task: TaskId, index: usize) -> i32 {
        let geometry = self.drag.geometry();
        let slot = i32::try_from(index)
            .unwrap_or(i32::MAX)
            .saturating_sub(i32::try_from(self.scroll).unwrap_or(i32::MAX));
        let offset = self.drag.row_offset(task, index, self.now);
        slot.saturating_mul(i32::from(geometry.row_lines))
            .saturating_add(geometry.units_to_lines(offset))
    }

    /// Content line for terminal row `y`; may lie outside the list.
    fn content_line(&self, inner: Rect, y: u16) -> i32 {
        let scrolled = self.scroll * usize::from(self.drag.geometry().row_lines);
        i32::from(y) - i32::from(inner.y) + i32::try_from(scrolled).unwrap_or(i32::MAX)
    }

    /// Number of whole rows that fit in the list.
    #[must_use]
    pub fn visible_rows(&self) -> usize {
        let inner = Regions::new(self.viewport).list_inner;
        usize::from(inner.height / self.drag.geometry().row_lines.max(1)).max(1)
    }

    /// Cycle focus forward: Title -> Description -> Add -> List -> Title.
    const fn cycle_focus_forward(&mut self) {
        self.focus = match self.focus {
            Focus::Title => Focus::Description,
            Focus::Description => Focus::AddButton,
            Focus::AddButton => Focus::List,
            Focus::List => Focus::Title,
        };
    }

    /// Cycle focus backward: Title -> List -> Add -> Description -> Title.
    const fn cycle_focus_backward(&mut self) {
        self.focus = match self.focus {
            Focus::Title => Focus::List,
            Focus::List => Focus::AddButton,
            Focus::AddButton => Focus::Description,
            Focus::Description => Focus::Title,
        };
    }

    /// Add a task from the form and return focus to the title field.
    fn submit_task(&mut self) {
        let id = self.form.submit(&mut self.store);
        self.drag.on_added(id, self.now);
        self.focus = Focus::Title;
        tracing::info!(%id, total = self.store.len(), "task created");
    }

    /// Toggle the selected task.
    fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task() {
            self.store.toggle_task(id);
        }
    }

    /// Delete the selected task.
    fn delete_selected(&mut self) {
        let Some(id) = self.selected_task() else {
            return;
        };
        self.store.delete_task(id);
        self.drag.on_deleted(id);
        self.selected = self.selected.min(self.store.len().saturating_sub(1));
        self.clamp_scroll();
    }

    /// Swap the selected task with the one above it.
    fn move_selected_up(&mut self) {
        if self.selected > 0 && self.selected < self.store.len() {
            self.store.reorder_task(self.selected, self.selected - 1);
            self.select(self.selected - 1);
        }
    }

    /// Swap the selected task with the one below it.
    fn move_selected_down(&mut self) {
        if self.selected + 1 < self.store.len() {
            self.store.reorder_task(self.selected, self.selected + 1);
            self.select(self.selected + 1);
        }
    }

    /// Select the previous task.
    fn select_prev(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    /// Select the next task.
    fn select_next(&mut self) {
        self.select(self.selected + 1);
    }

    /// Select row `index` (clamped) and scroll it into view.
    fn select(&mut self, index: usize) {
        self.selected = index.min(self.store.len().saturating_sub(1));
        let visible = self.visible_rows();
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + visible {
            self.scroll = self.selected + 1 - visible;
        }
    }

    /// Keep the scroll offset from running past the last page.
    fn clamp_scroll(&mut self) {
        let max = self.store.len().saturating_sub(self.visible_rows());
        self.scroll = self.scroll.min(max);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

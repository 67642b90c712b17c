//! Task panel rendering.
//!
//! Rows are positioned by hand instead of through a `List` widget: each
//! row is drawn at its slot plus its animated offset, and the dragged row
//! is drawn last so it floats above its neighbours.

use std::fmt::Write as _;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use taskboard_core::Task;

use super::theme;
use crate::app::{App, Focus};

/// Columns taken by the checkbox at the start of a row.
pub const CHECKBOX_WIDTH: u16 = 3;

/// Delete control, right-aligned on a row's first line.
pub const DELETE_LABEL: &str = "Delete";

/// Shown when the list is empty.
pub const EMPTY_HINT: &str = "No tasks yet";

/// Render the task list.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::List;
    let block = Block::default()
        .title(format!(
            "Tasks ({}/{})",
            app.store.completed_count(),
            app.store.len()
        ))
        .borders(Borders::ALL)
        .border_style(theme::border(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.store.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(EMPTY_HINT, theme::dimmed())),
            inner,
        );
        return;
    }

    let row_lines = app.drag.geometry().row_lines;
    let dragged = app.drag.dragged();
    let mut floating = None;

    for (index, task) in app.store.iter().enumerate() {
        let top = app.drawn_row_top(task.id, index);

        if dragged == Some(task.id) {
            floating = Some((task, top));
            continue;
        }
        let style = if focused && index == app.selected {
            theme::selected()
        } else {
            Style::default()
        };
        render_row(frame, inner, task, top, row_lines, style, app);
    }

    if let Some((task, top)) = floating {
        render_row(frame, inner, task, top, row_lines, theme::dragging(), app);
    }
}

/// Draw one row whose top edge is `top` lines below the list's top,
/// clipped to the list area.
fn render_row(
    frame: &mut Frame,
    inner: Rect,
    task: &Task,
    top: i32,
    height: u16,
    style: Style,
    app: &App,
) {
    let Some((area, skip)) = clip_row(inner, top, height) else {
        return;
    };

    let (checkbox, checkbox_style) = if task.completed {
        ("[✓]", theme::checkbox_done())
    } else {
        ("[ ]", theme::normal())
    };
    let title_style = if task.completed {
        theme::completed()
    } else {
        theme::bold()
    };
    let indent = " ".repeat(usize::from(CHECKBOX_WIDTH) + 1);

    let left = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(checkbox, checkbox_style),
            Span::raw(" "),
            Span::styled(task.title.as_str(), title_style),
        ]),
        Line::from(vec![
            Span::raw(indent),
            Span::styled(task.description.as_str(), theme::dimmed()),
        ]),
    ])
    .style(style)
    .scroll((skip, 0));

    let timestamp = format_created_at(task.created_at_ms, app.timestamp_format());
    let right_width = u16::try_from(DELETE_LABEL.len().max(timestamp.chars().count()))
        .unwrap_or(u16::MAX)
        .min(area.width);
    let right = Paragraph::new(vec![
        Line::from(Span::styled(DELETE_LABEL, theme::delete())),
        Line::from(Span::styled(timestamp, theme::dimmed())),
    ])
    .alignment(Alignment::Right)
    .style(style)
    .scroll((skip, 0));

    let left_area = Rect {
        width: area.width.saturating_sub(right_width + 1),
        ..area
    };
    let right_area = Rect {
        x: area.right().saturating_sub(right_width),
        width: right_width,
        ..area
    };

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(style), area);
    frame.render_widget(left, left_area);
    frame.render_widget(right, right_area);
}

/// Visible part of a row spanning `height` lines from `top` (relative to
/// `inner`), and how many of its leading lines are cut off.
#[must_use]
pub fn clip_row(inner: Rect, top: i32, height: u16) -> Option<(Rect, u16)> {
    let start = top.max(0);
    let end = (top + i32::from(height)).min(i32::from(inner.height));
    if start >= end {
        return None;
    }
    let y = inner.y + u16::try_from(start).ok()?;
    let visible = u16::try_from(end - start).ok()?;
    let skip = u16::try_from(start - top).ok()?;
    Some((Rect::new(inner.x, y, inner.width, visible), skip))
}

/// Format an epoch-millisecond timestamp with a chrono format string.
#[must_use]
pub fn format_created_at(ms: u64, format: &str) -> String {
    use chrono::{Local, TimeZone};
    let secs = i64::try_from(ms / 1000).unwrap_or(i64::MAX);
    let nsecs = u32::try_from((ms % 1000) * 1_000_000).unwrap_or(0);
    let chrono::LocalResult::Single(dt) = Local.timestamp_opt(secs, nsecs) else {
        return "??:??".to_string();
    };
    // chrono reports bad format strings as fmt errors.
    let mut out = String::new();
    if write!(out, "{}", dt.format(format)).is_err() {
        return "??:??".to_string();
    }
    out
}

//! Mouse drag adapter and row animations for the task list.
//!
//! Terminal mouse events arrive in whole lines. [`ListGeometry`] converts
//! lines to the drag units the core gesture works in, and
//! [`DragController`] owns the gesture plus the per-row offset animations
//! (settle after release, slide-in after add).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use taskboard_core::animation::DEFAULT_DURATION;
use taskboard_core::gesture::ROW_HEIGHT;
use taskboard_core::{
    DragGesture, Easing, OffsetAnimation, PressPoint, RowMetrics, TaskId, TaskStore,
};

/// Mapping between terminal lines and drag units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListGeometry {
    /// Height of a row in drag units.
    pub row_height: f32,
    /// Terminal lines per row.
    pub row_lines: u16,
}

impl Default for ListGeometry {
    fn default() -> Self {
        Self {
            row_height: ROW_HEIGHT,
            row_lines: 3,
        }
    }
}

impl ListGeometry {
    /// Drag units covered by one terminal line.
    #[must_use]
    pub fn units_per_line(&self) -> f32 {
        self.row_height / f32::from(self.row_lines.max(1))
    }

    /// Converts a (possibly negative) line count to drag units.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn lines_to_units(&self, lines: i32) -> f32 {
        lines as f32 * self.units_per_line()
    }

    /// Converts drag units to the nearest whole line count.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn units_to_lines(&self, units: f32) -> i32 {
        (units / self.units_per_line()).round() as i32
    }

    /// Row metrics for the core gesture.
    #[must_use]
    pub const fn metrics(&self) -> RowMetrics {
        RowMetrics::new(self.row_height)
    }
}

/// In-flight press on a row.
#[derive(Debug, Clone, Copy)]
struct Grab {
    task: TaskId,
    press: PressPoint,
    /// Content line the pointer went down on.
    press_line: i32,
}

/// Owns the drag gesture and the offsets of rows that are still moving.
#[derive(Debug)]
pub struct DragController {
    geometry: ListGeometry,
    gesture: DragGesture,
    grab: Option<Grab>,
    animations: HashMap<TaskId, OffsetAnimation>,
    return_duration: Duration,
    enter_duration: Duration,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(ListGeometry::default())
    }
}

impl DragController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(geometry: ListGeometry) -> Self {
        Self {
            geometry,
            gesture: DragGesture::new(geometry.metrics()),
            grab: None,
            animations: HashMap::new(),
            return_duration: DEFAULT_DURATION,
            enter_duration: DEFAULT_DURATION,
        }
    }

    /// Sets how long released rows take to settle.
    #[must_use]
    pub const fn with_return_duration(mut self, duration: Duration) -> Self {
        self.return_duration = duration;
        self
    }

    /// Sets how long new rows take to slide in.
    #[must_use]
    pub const fn with_enter_duration(mut self, duration: Duration) -> Self {
        self.enter_duration = duration;
        self
    }

    /// List geometry.
    #[must_use]
    pub const fn geometry(&self) -> ListGeometry {
        self.geometry
    }

    /// Pointer went down on row `index` at content line `content_line`
    /// (line 0 is the top of row 0, regardless of scrolling).
    #[allow(clippy::cast_precision_loss)]
    pub fn press(&mut self, store: &mut TaskStore, index: usize, content_line: i32, now: Instant) {
        let Some(task) = store.tasks().get(index).map(|t| t.id) else {
            return;
        };
        // A row still sliding in can be more than half a slot away from its
        // layout position; clamp so the origin slot stays the pressed row.
        let limit = (self.geometry.row_height - self.geometry.units_per_line()) / 2.0;
        let current_offset = self
            .animations
            .remove(&task)
            .map_or(0.0, |anim| anim.value_at(now).clamp(-limit, limit));
        // Measured from the row's layout slot; the animated offset is
        // carried separately as the gesture's start offset.
        let absolute_y = self.geometry.lines_to_units(content_line);
        let press = PressPoint {
            absolute_y,
            local_y: absolute_y - index as f32 * self.geometry.row_height,
        };

        self.gesture.begin(press, current_offset);
        self.grab = Some(Grab {
            task,
            press,
            press_line: content_line,
        });
        // Pins the origin slot before any movement.
        self.gesture.update(0.0, store);
        tracing::debug!(%task, index, "row grabbed");
    }

    /// Pointer moved to `content_line` while pressed. Returns the slot the
    /// dragged row now occupies.
    pub fn motion(&mut self, store: &mut TaskStore, content_line: i32) -> Option<usize> {
        let grab = self.grab?;
        let translation = self.geometry.lines_to_units(content_line - grab.press_line);
        self.gesture.update(translation, store)
    }

    /// Pointer released. Starts the settle animation and returns the slot
    /// the row landed in.
    pub fn release(&mut self, now: Instant) -> Option<usize> {
        let grab = self.grab.take()?;
        let release = self.gesture.end()?;
        let index = release.index?;
        let residual = self.residual_offset(grab.press, release.offset, index);
        if residual.abs() > f32::EPSILON {
            self.animations.insert(
                grab.task,
                OffsetAnimation::settle(residual, self.return_duration, now),
            );
        }
        tracing::debug!(task = %grab.task, index, residual, "row released");
        Some(index)
    }

    /// Abandons a drag without animating.
    pub fn cancel(&mut self) {
        self.grab = None;
        self.gesture.end();
    }

    /// Starts the slide-in for a freshly added row.
    pub fn on_added(&mut self, task: TaskId, now: Instant) {
        self.animations.insert(
            task,
            OffsetAnimation::new(
                self.geometry.row_height,
                0.0,
                self.enter_duration,
                Easing::ExpOut,
                now,
            ),
        );
    }

    /// Drops all state for a deleted row.
    pub fn on_deleted(&mut self, task: TaskId) {
        self.animations.remove(&task);
        if self.dragged() == Some(task) {
            self.cancel();
        }
    }

    /// Drops finished animations. Returns whether any row is still moving.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.animations.retain(|_, anim| !anim.is_finished(now));
        self.is_dragging() || !self.animations.is_empty()
    }

    /// Visual displacement of `task`, laid out at slot `index`, in drag
    /// units.
    #[must_use]
    pub fn row_offset(&self, task: TaskId, index: usize, now: Instant) -> f32 {
        if let Some(grab) = self.grab.filter(|g| g.task == task) {
            return self.residual_offset(grab.press, self.gesture.offset(), index);
        }
        self.animations
            .get(&task)
            .map_or(0.0, |anim| anim.value_at(now))
    }

    /// The task being dragged, if any.
    #[must_use]
    pub fn dragged(&self) -> Option<TaskId> {
        self.grab.map(|g| g.task)
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Whether `task` has an animation running.
    #[must_use]
    pub fn is_animating(&self, task: TaskId) -> bool {
        self.animations.contains_key(&task)
    }

    /// Offset relative to slot `index` of a row picked up at `press` and
    /// displaced by `offset` from there.
    #[allow(clippy::cast_precision_loss)]
    fn residual_offset(&self, press: PressPoint, offset: f32, index: usize) -> f32 {
        press.row_top() + offset - index as f32 * self.geometry.row_height
    }
}

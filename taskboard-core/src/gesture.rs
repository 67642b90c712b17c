//! Drag-to-reorder gesture.
//!
//! A press on a row starts a [`DragGesture`]. Every movement sample maps
//! the row's displaced position onto a discrete slot and, when the slot
//! changes, moves the dragged task there with
//! [`TaskStore::reorder_task`]. The collection is therefore already in its
//! final order when the pointer is released; only the visual offset is
//! left to settle.
//!
//! All positions are in list units, with the list's top edge at 0.

use crate::store::TaskStore;

/// Height of one task row in list units.
pub const ROW_HEIGHT: f32 = 64.0;

/// Fixed-height row geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowMetrics {
    /// Height of a single row in list units.
    pub row_height: f32,
}

impl RowMetrics {
    /// Metrics for rows of the given height.
    #[must_use]
    pub const fn new(row_height: f32) -> Self {
        Self { row_height }
    }

    /// Half a row; positions are rounded to the nearest slot with it.
    #[must_use]
    pub fn half_row(&self) -> f32 {
        self.row_height / 2.0
    }

    /// Slot whose centre band contains a row whose top edge sits at `top`,
    /// clamped to `[0, len - 1]`. `None` when `len` is zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn slot_for(&self, top: f32, len: usize) -> Option<usize> {
        let last = len.checked_sub(1)?;
        let raw = ((top + self.half_row()) / self.row_height).floor();
        // Saturating cast: negatives and NaN land on 0.
        Some((raw.max(0.0) as usize).min(last))
    }
}

impl Default for RowMetrics {
    fn default() -> Self {
        Self::new(ROW_HEIGHT)
    }
}

/// Where the pointer went down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PressPoint {
    /// Pointer position relative to the top of the list.
    pub absolute_y: f32,
    /// Pointer position relative to the top of the pressed row.
    pub local_y: f32,
}

impl PressPoint {
    /// Layout position of the pressed row's top edge.
    #[must_use]
    pub fn row_top(&self) -> f32 {
        self.absolute_y - self.local_y
    }
}

/// Outcome of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    /// Visual offset of the row at release; animate it back to zero.
    pub offset: f32,
    /// Slot the row ended up in, if any sample was processed.
    pub index: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Dragging {
    press: PressPoint,
    /// Visual offset of the row when the press happened.
    start_offset: f32,
    /// `start_offset` plus the latest translation.
    offset: f32,
    origin_index: Option<usize>,
    current_index: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Phase {
    #[default]
    Idle,
    Dragging(Dragging),
}

/// State machine for a single pointer drag over the task list.
#[derive(Debug, Clone, Default)]
pub struct DragGesture {
    metrics: RowMetrics,
    phase: Phase,
}

impl DragGesture {
    /// Creates an idle gesture for rows with the given geometry.
    #[must_use]
    pub fn new(metrics: RowMetrics) -> Self {
        Self {
            metrics,
            phase: Phase::Idle,
        }
    }

    /// Idle → Dragging. `current_offset` is the row's visual offset right
    /// now, which is non-zero if a previous release is still settling.
    ///
    /// A press while already dragging restarts the gesture.
    pub fn begin(&mut self, press: PressPoint, current_offset: f32) {
        tracing::trace!(row_top = press.row_top(), current_offset, "drag started");
        self.phase = Phase::Dragging(Dragging {
            press,
            start_offset: current_offset,
            offset: current_offset,
            origin_index: None,
            current_index: None,
        });
    }

    /// Handles one movement sample, `translation_y` being the pointer's
    /// displacement since the press.
    ///
    /// Reorders `store` when the row crosses into a new slot and returns
    /// the slot the row now occupies. Returns `None` when idle or when the
    /// store is empty.
    pub fn update(&mut self, translation_y: f32, store: &mut TaskStore) -> Option<usize> {
        let Phase::Dragging(state) = &mut self.phase else {
            return None;
        };
        state.offset = state.start_offset + translation_y;

        let top = state.press.row_top() + state.offset;
        let candidate = self.metrics.slot_for(top, store.len())?;

        match state.current_index {
            None => {
                state.origin_index = Some(candidate);
                state.current_index = Some(candidate);
            }
            Some(current) if current != candidate => {
                store.reorder_task(current, candidate);
                tracing::debug!(
                    origin = ?state.origin_index,
                    from = current,
                    to = candidate,
                    "drag moved row"
                );
                state.current_index = Some(candidate);
            }
            Some(_) => {}
        }
        state.current_index
    }

    /// Dragging → Idle. Returns `None` if no drag was in progress.
    pub fn end(&mut self) -> Option<DragRelease> {
        let Phase::Dragging(state) = std::mem::take(&mut self.phase) else {
            return None;
        };
        tracing::trace!(offset = state.offset, index = ?state.current_index, "drag ended");
        Some(DragRelease {
            offset: state.offset,
            index: state.current_index,
        })
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    /// Current visual offset of the dragged row (0 when idle).
    #[must_use]
    pub const fn offset(&self) -> f32 {
        match &self.phase {
            Phase::Dragging(state) => state.offset,
            Phase::Idle => 0.0,
        }
    }

    /// Slot the dragged row occupies.
    #[must_use]
    pub const fn current_index(&self) -> Option<usize> {
        match &self.phase {
            Phase::Dragging(state) => state.current_index,
            Phase::Idle => None,
        }
    }

    /// Slot the dragged row was picked up from.
    #[must_use]
    pub const fn origin_index(&self) -> Option<usize> {
        match &self.phase {
            Phase::Dragging(state) => state.origin_index,
            Phase::Idle => None,
        }
    }

    /// Row geometry used for slot computation.
    #[must_use]
    pub const fn metrics(&self) -> RowMetrics {
        self.metrics
    }
}

//! Integration tests for the task store and drag-to-reorder gesture.
//!
//! Exercises the store scenarios end to end and drives `DragGesture`
//! with sample streams shaped like real pointer input, then settles the
//! released row with `OffsetAnimation`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::{Duration, Instant};

use taskboard_core::animation::DEFAULT_DURATION;
use taskboard_core::gesture::ROW_HEIGHT;
use taskboard_core::{DragGesture, OffsetAnimation, PressPoint, RowMetrics, TaskStore};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn store_with(titles: &[&str]) -> TaskStore {
    let mut store = TaskStore::new();
    for title in titles {
        store.add_task(*title, format!("{title} details"));
    }
    store
}

fn titles(store: &TaskStore) -> Vec<&str> {
    store.iter().map(|t| t.title.as_str()).collect()
}

/// Press `local_y` units below the top of row `index`.
fn press(index: u16, local_y: f32) -> PressPoint {
    PressPoint {
        absolute_y: f32::from(index).mul_add(ROW_HEIGHT, local_y),
        local_y,
    }
}

/// Feeds evenly spaced samples from 0 to `total` translation.
fn drag_smoothly(gesture: &mut DragGesture, store: &mut TaskStore, total: f32, steps: u16) {
    for step in 0..=steps {
        let translation = total * f32::from(step) / f32::from(steps);
        gesture.update(translation, store);
    }
}

// ===========================================================================
// Store scenarios
// ===========================================================================

#[test]
fn add_buy_milk() {
    let mut store = TaskStore::new();
    let id = store.add_task("Buy milk", "2%");
    assert_eq!(store.len(), 1);
    let task = &store.tasks()[0];
    assert_eq!(task.id, id);
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.description, "2%");
    assert!(!task.completed);
}

#[test]
fn toggle_new_task_twice() {
    let mut store = TaskStore::new();
    let id = store.add_task("Buy milk", "2%");
    store.toggle_task(id);
    assert!(store.get(id).unwrap().completed);
    store.toggle_task(id);
    assert!(!store.get(id).unwrap().completed);
}

#[test]
fn delete_only_task() {
    let mut store = TaskStore::new();
    let id = store.add_task("Buy milk", "2%");
    store.delete_task(id);
    assert!(store.is_empty());
}

#[test]
fn reorder_abc() {
    let mut store = store_with(&["A", "B", "C"]);
    store.reorder_task(0, 2);
    assert_eq!(titles(&store), ["B", "C", "A"]);
}

#[test]
fn reorder_beyond_last_index_clamps() {
    let mut store = store_with(&["A", "B", "C"]);
    store.reorder_task(1, usize::MAX);
    assert_eq!(titles(&store), ["A", "C", "B"]);
}

// ===========================================================================
// Drag gesture against a live store
// ===========================================================================

#[test]
fn smooth_drag_moves_row_through_every_slot() {
    let mut store = store_with(&["A", "B", "C", "D"]);
    let mut gesture = DragGesture::default();

    gesture.begin(press(0, 30.0), 0.0);
    drag_smoothly(&mut gesture, &mut store, 3.0 * ROW_HEIGHT, 24);

    assert_eq!(titles(&store), ["B", "C", "D", "A"]);
    assert_eq!(gesture.origin_index(), Some(0));
    assert_eq!(gesture.current_index(), Some(3));
}

#[test]
fn dragged_task_keeps_identity() {
    let mut store = store_with(&["A", "B", "C", "D"]);
    let dragged = store.tasks()[1].id;
    let mut gesture = DragGesture::default();

    gesture.begin(press(1, 5.0), 0.0);
    drag_smoothly(&mut gesture, &mut store, 2.0 * ROW_HEIGHT, 10);
    let release = gesture.end().unwrap();

    let index = release.index.unwrap();
    assert_eq!(store.tasks()[index].id, dragged);
    assert_eq!(titles(&store), ["A", "C", "D", "B"]);
}

#[test]
fn small_wiggle_does_not_reorder() {
    let mut store = store_with(&["A", "B", "C"]);
    let mut gesture = DragGesture::default();

    gesture.begin(press(1, 32.0), 0.0);
    for translation in [0.0, 10.0, -10.0, 31.0, -32.0, 0.0] {
        gesture.update(translation, &mut store);
    }
    assert_eq!(titles(&store), ["A", "B", "C"]);
}

#[test]
fn fling_past_top_clamps_to_first_slot() {
    let mut store = store_with(&["A", "B", "C"]);
    let mut gesture = DragGesture::default();

    gesture.begin(press(2, 10.0), 0.0);
    gesture.update(0.0, &mut store);
    gesture.update(-10_000.0, &mut store);
    assert_eq!(titles(&store), ["C", "A", "B"]);
}

#[test]
fn custom_row_height_changes_slot_size() {
    let mut store = store_with(&["A", "B", "C"]);
    let mut gesture = DragGesture::new(RowMetrics::new(10.0));

    gesture.begin(PressPoint { absolute_y: 2.0, local_y: 2.0 }, 0.0);
    gesture.update(0.0, &mut store);
    gesture.update(20.0, &mut store);
    assert_eq!(titles(&store), ["B", "C", "A"]);
}

#[test]
fn release_settles_back_to_zero() {
    let mut store = store_with(&["A", "B", "C"]);
    let mut gesture = DragGesture::default();

    gesture.begin(press(0, 10.0), 0.0);
    gesture.update(0.0, &mut store);
    gesture.update(80.0, &mut store);
    let release = gesture.end().unwrap();

    let t0 = Instant::now();
    let anim = OffsetAnimation::settle(release.offset, DEFAULT_DURATION, t0);
    assert!((anim.value_at(t0) - 80.0).abs() < 1e-3);
    let mid = anim.value_at(t0 + Duration::from_millis(150));
    assert!(mid > 0.0 && mid < 80.0);
    assert!(anim.value_at(t0 + DEFAULT_DURATION).abs() < 1e-3);

    // The collection order was fixed before the animation started.
    assert_eq!(titles(&store), ["B", "A", "C"]);
}

#[test]
fn regrab_during_settle_uses_current_offset() {
    let mut store = store_with(&["A", "B", "C"]);
    let mut gesture = DragGesture::default();

    // Row A sits in slot 1 but is still visually 40 units below it.
    store.reorder_task(0, 1);
    gesture.begin(press(1, 10.0), 40.0);
    assert_eq!(gesture.update(0.0, &mut store), Some(2));
    assert_eq!(gesture.origin_index(), Some(2));
}

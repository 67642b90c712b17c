//! `taskboard`: terminal to-do list with drag-to-reorder.

pub mod app;
pub mod config;
pub mod drag;
pub mod event_loop;
pub mod form;
pub mod ui;

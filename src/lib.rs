//! Study room presence server library.
//!
//! This library provides the room registry, presence operations and WebSocket
//! fan-out for a study room application: participants join named rooms, report
//! their focus/rest status and accumulated study time, and every connected
//! client sees a live membership list.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// shared library
pub mod common;

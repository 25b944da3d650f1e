//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key and mouse events into [`InputCommand`]s and tracks the
//! keyboard selection [`Cursor`] used on terminals without mouse support.
//!
//! Translating a mouse click into a board cell needs the renderer's layout,
//! so clicks are passed through as terminal coordinates.

pub mod cursor;
pub mod map;

pub use light_em_all_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, handle_mouse_event, should_quit, InputCommand};

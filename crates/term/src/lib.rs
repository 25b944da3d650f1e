//! Terminal rendering module.
//!
//! A small renderer for terminal gameplay. It avoids widget toolkits and
//! instead draws into a framebuffer that is diffed and flushed to the terminal.
//!
//! - [`GameView`] turns a `core::GameSnapshot` into framebuffer cells and maps
//!   mouse positions back to board pieces
//! - [`TerminalRenderer`] owns the terminal session and writes changed cells

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use light_em_all_core as core;
pub use light_em_all_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{connector_glyph, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};

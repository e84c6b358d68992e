//! A vertical chain of nodes, each a row of squares that slide into a
//! staircase and then flip over. Every tap animates the next node along the
//! chain, bouncing back at either end.

pub mod animator;
pub mod chain;
pub mod layout;
pub mod renderer;
pub mod state;

use crate::gfx::math::Color;

pub use animator::{Animator, Step, STEP_INTERVAL};
pub use chain::{Completion, Direction, NodeChain};
pub use renderer::Renderer;

pub const NODES: usize = 5;
pub const SQUARES: usize = 4;
/// Top-level phases of a node: slide, then rotate.
pub const PARTS: usize = 2;
pub const SIZE_FACTOR: f32 = 2.9;
pub const STROKE_FACTOR: f32 = 90.0;
pub const ROT_DEG: f32 = 180.0;

pub fn fore_color() -> Color {
    Color::rgba(0x67, 0x3A, 0xB7, 255)
}

pub fn back_color() -> Color {
    Color::rgba(0xBD, 0xBD, 0xBD, 255)
}

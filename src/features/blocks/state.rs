use super::SQUARES;
use crate::gfx::anim::update_value;

/// Progress of a single node's animation cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeState {
    pub scale: f32,
    /// -1, 0 or 1. Zero while idle.
    pub direction: f32,
    /// Value at which the node last came to rest: 0 or 1.
    pub committed: f32,
}

impl NodeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.direction == 0.0
    }

    /// Advances one tick. Returns the new committed value once the cycle has
    /// travelled a full unit.
    pub fn update(&mut self) -> Option<f32> {
        self.scale += update_value(self.scale, self.direction, SQUARES, 1);
        if (self.scale - self.committed).abs() > 1.0 {
            self.scale = self.committed + self.direction;
            self.direction = 0.0;
            self.committed = self.scale;
            return Some(self.committed);
        }
        None
    }

    /// Starts a cycle away from the committed value. Returns false if a cycle
    /// is already running.
    pub fn start_updating(&mut self) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.direction = 1.0 - 2.0 * self.committed;
        true
    }
}

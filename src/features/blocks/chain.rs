use super::layout::NodeLayout;
use super::state::NodeState;
use super::NODES;
use crate::gfx::canvas::{Canvas, Paint};
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Backward => Direction::Forward,
            Direction::Forward => Direction::Backward,
        }
    }
}

/// A node finishing its cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Completion {
    pub index: usize,
    pub committed: f32,
}

/// Fixed row of nodes with a cursor that ping-pongs from end to end, one node
/// per completed cycle.
#[derive(Debug, Clone)]
pub struct NodeChain {
    nodes: Vec<NodeState>,
    current: usize,
    direction: Direction,
}

impl NodeChain {
    pub fn new() -> Self {
        Self::with_len(NODES)
    }

    pub fn with_len(len: usize) -> Self {
        Self {
            nodes: vec![NodeState::new(); len.max(1)],
            current: 0,
            direction: Direction::Forward,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn node(&self, index: usize) -> Option<&NodeState> {
        self.nodes.get(index)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, paint: &Paint) {
        let (w, h) = (canvas.width(), canvas.height());
        for (i, node) in self.nodes.iter().enumerate() {
            NodeLayout::new(i, self.nodes.len(), node.scale, w, h).draw(canvas, paint);
        }
    }

    /// Neighbor of `index` in `direction`. At either end the chain reverses
    /// and `index` itself is returned.
    fn get_next(&mut self, index: usize) -> usize {
        let neighbor = match self.direction {
            Direction::Backward => index.checked_sub(1),
            Direction::Forward => Some(index + 1).filter(|&n| n < self.nodes.len()),
        };
        match neighbor {
            Some(n) => n,
            None => {
                self.direction = self.direction.flipped();
                info!("Chain reached node {}, reversing to {:?}", index, self.direction);
                index
            }
        }
    }

    pub fn update(&mut self) -> Option<Completion> {
        let index = self.current;
        let committed = self.nodes[index].update()?;
        self.current = self.get_next(index);
        debug!("Node {} settled at {}, current is now {}", index, committed, self.current);
        Some(Completion { index, committed })
    }

    pub fn start_updating(&mut self) -> bool {
        self.nodes[self.current].start_updating()
    }
}

impl Default for NodeChain {
    fn default() -> Self {
        Self::new()
    }
}

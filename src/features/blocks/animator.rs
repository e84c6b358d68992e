use super::chain::{Completion, NodeChain};
use std::time::Duration;

/// Minimum spacing between two animation steps.
pub const STEP_INTERVAL: Duration = Duration::from_millis(50);

/// Outcome of one animation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Idle,
    Running,
    /// The cycle just finished; one more frame shows the settled state.
    Finished(Completion),
}

impl Step {
    pub fn needs_redraw(&self) -> bool {
        !matches!(self, Step::Idle)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Animator {
    animated: bool,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        self.animated
    }

    /// Returns true if the animator was idle and a redraw should be scheduled.
    pub fn start(&mut self) -> bool {
        if self.animated {
            return false;
        }
        self.animated = true;
        true
    }

    pub fn stop(&mut self) {
        self.animated = false;
    }

    pub fn animate(&mut self, chain: &mut NodeChain) -> Step {
        if !self.animated {
            return Step::Idle;
        }
        match chain.update() {
            Some(done) => {
                self.stop();
                Step::Finished(done)
            }
            None => Step::Running,
        }
    }
}

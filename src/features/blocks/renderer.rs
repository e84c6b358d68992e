use super::animator::{Animator, Step};
use super::chain::NodeChain;
use super::{back_color, fore_color, STROKE_FACTOR};
use crate::gfx::canvas::{Canvas, Paint, StrokeCap};
use log::{debug, info};

/// Draws the chain every frame and drives its animation.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    chain: NodeChain,
    animator: Animator,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chain(&self) -> &NodeChain {
        &self.chain
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Draws one frame, then advances the animation by one step.
    pub fn render(&mut self, canvas: &mut dyn Canvas) -> Step {
        canvas.fill_background(back_color());
        let paint = Paint {
            color: fore_color(),
            stroke_width: canvas.width().min(canvas.height()).max(0.0) / STROKE_FACTOR,
            stroke_cap: StrokeCap::Round,
        };
        self.chain.draw(canvas, &paint);

        let step = self.animator.animate(&mut self.chain);
        if let Step::Finished(done) = step {
            debug!("Animation stopped after node {}", done.index);
        }
        step
    }

    /// Returns true when the tap started a new cycle and a redraw is needed.
    pub fn handle_tap(&mut self) -> bool {
        if !self.chain.start_updating() {
            debug!("Tap ignored, node {} is still moving", self.chain.current());
            return false;
        }
        info!("Starting node {}", self.chain.current());
        self.animator.start();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::blocks::SQUARES;
    use crate::gfx::canvas::recording::RecordingCanvas;

    fn run_to_completion(renderer: &mut Renderer, canvas: &mut RecordingCanvas) -> usize {
        let mut frames = 0;
        loop {
            frames += 1;
            match renderer.render(canvas) {
                Step::Finished(_) => return frames,
                Step::Running => {}
                Step::Idle => panic!("renderer idle before finishing"),
            }
            assert!(frames < 1_000);
        }
    }

    #[test]
    fn frame_fills_background_then_every_node() {
        let mut renderer = Renderer::new();
        let mut canvas = RecordingCanvas::new(360.0, 640.0);
        assert_eq!(renderer.render(&mut canvas), Step::Idle);

        assert_eq!(canvas.backgrounds, vec![back_color()]);
        assert_eq!(canvas.rects.len(), 5 * SQUARES);
        let paint = canvas.rects[0].paint;
        assert_eq!(paint.color, fore_color());
        assert_eq!(paint.stroke_width, 360.0 / STROKE_FACTOR);
        assert_eq!(paint.stroke_cap, StrokeCap::Round);
    }

    #[test]
    fn tap_starts_one_cycle() {
        let mut renderer = Renderer::new();
        let mut canvas = RecordingCanvas::new(360.0, 640.0);
        assert!(renderer.handle_tap());
        assert!(renderer.is_animating());
        assert!(!renderer.handle_tap());

        run_to_completion(&mut renderer, &mut canvas);
        assert!(!renderer.is_animating());
        assert_eq!(renderer.chain().node(0).map(|n| n.scale), Some(1.0));
        assert_eq!(renderer.chain().current(), 1);
        assert_eq!(renderer.render(&mut canvas), Step::Idle);
    }

    #[test]
    fn taps_walk_the_chain() {
        let mut renderer = Renderer::new();
        let mut canvas = RecordingCanvas::new(360.0, 640.0);
        for expected in [1, 2, 3, 4, 4, 3] {
            assert!(renderer.handle_tap());
            run_to_completion(&mut renderer, &mut canvas);
            assert_eq!(renderer.chain().current(), expected);
        }
    }

    #[test]
    fn zero_sized_surface_still_animates() {
        let mut renderer = Renderer::new();
        let mut canvas = RecordingCanvas::new(0.0, 0.0);
        renderer.handle_tap();
        run_to_completion(&mut renderer, &mut canvas);
        assert!(canvas.rects.is_empty());
        assert!(!canvas.backgrounds.is_empty());
    }
}

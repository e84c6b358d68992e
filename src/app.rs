use crate::config::Config;
use crate::features::blocks::{Renderer, Step};
use crate::gfx::{canvas::Canvas, math::Vec2};
use log::{debug, info};

/// Linux input code for the primary mouse button.
pub const BTN_LEFT: u32 = 0x110;

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    PointerDown { pos: Vec2, button: u32 },
    PointerUp,
    TouchDown { pos: Vec2 },
    Resized { width: u32, height: u32 },
}

pub struct App {
    pub config: Config,
    pub logical_size: [u32; 2],
    renderer: Renderer,
    redraw_pending: bool,
    frames: u64,
}

impl App {
    pub fn new(config: Config) -> Self {
        let logical_size = [config.size.width, config.size.height];
        Self {
            config,
            logical_size,
            renderer: Renderer::new(),
            redraw_pending: true,
            frames: 0,
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    /// Marks the next frame as needed, e.g. after a lost frame.
    pub fn request_redraw(&mut self) {
        self.redraw_pending = true;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::PointerDown { button, .. } if button == BTN_LEFT => self.tap(),
            UiEvent::TouchDown { .. } => self.tap(),
            UiEvent::Resized { width, height } => {
                if [width, height] != self.logical_size && width > 0 && height > 0 {
                    info!("Surface resized to {}x{}", width, height);
                    self.logical_size = [width, height];
                    self.redraw_pending = true;
                }
            }
            _ => {}
        }
    }

    fn tap(&mut self) {
        if self.renderer.handle_tap() {
            self.redraw_pending = true;
        }
    }

    /// Renders a frame if one is pending. Returns whether anything was drawn.
    pub fn render(&mut self, canvas: &mut dyn Canvas) -> bool {
        if !self.redraw_pending {
            return false;
        }
        let step = self.renderer.render(canvas);
        self.frames += 1;
        self.redraw_pending = step.needs_redraw();
        if let Step::Finished(done) = step {
            debug!(
                "Node {} finished at {} after {} frames",
                done.index, done.committed, self.frames
            );
        }
        true
    }
}

use super::math::{Color, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub stroke_width: f32,
    pub stroke_cap: StrokeCap,
}

/// 2D drawing surface the widget renders into.
///
/// Coordinates are in surface pixels with the origin at the top-left and y
/// growing downwards. `save`/`restore` follow stack discipline over the
/// current transform.
pub trait Canvas {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn fill_background(&mut self, color: Color);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    /// Clockwise, in degrees.
    fn rotate(&mut self, degrees: f32);
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);
}

use super::{PARTS, ROT_DEG, SIZE_FACTOR, SQUARES};
use crate::gfx::anim::{divide_scale, j_mirror};
use crate::gfx::canvas::{Canvas, Paint};
use crate::gfx::math::{Rect, Vec2};

/// Geometry of one node's row of squares for a given scale.
///
/// `origin` and `rotation` place the row; `squares` are local to that frame
/// and already include the `-size` horizontal shift.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeLayout {
    pub origin: Vec2,
    pub rotation: f32,
    pub side: f32,
    pub squares: [Rect; SQUARES],
}

impl NodeLayout {
    pub fn new(index: usize, nodes: usize, scale: f32, width: f32, height: f32) -> Self {
        let width = sanitize(width);
        let height = sanitize(height);

        let gap = if width > 0.0 && height > 0.0 {
            height / (nodes + 1) as f32
        } else {
            0.0
        };
        let size = gap / SIZE_FACTOR;
        let x_gap = 2.0 * size / SQUARES as f32;

        let sc1 = divide_scale(scale, 0, PARTS);
        let sc2 = divide_scale(scale, 1, PARTS);

        let mut x = -x_gap;
        let mut y = x_gap;
        let mut squares = [Rect::square(0.0, 0.0, 0.0); SQUARES];
        for (j, square) in squares.iter_mut().enumerate() {
            let sc1j = divide_scale(sc1, j, SQUARES);
            let x_diff = x_gap * divide_scale(sc1j, 0, 2);
            let y_diff = x_gap * divide_scale(sc1j, 1, 2) * j_mirror(j);
            *square = Rect::square(x + x_diff - size, y - y_diff, x_gap);
            x += x_diff;
            y -= y_diff;
        }

        Self {
            origin: Vec2::new(width / 2.0, gap * (index + 1) as f32),
            rotation: ROT_DEG * sc2,
            side: x_gap,
            squares,
        }
    }

    /// Zero-sized when the surface has no area.
    pub fn is_empty(&self) -> bool {
        self.side <= 0.0
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, paint: &Paint) {
        if self.is_empty() {
            return;
        }
        canvas.save();
        canvas.translate(self.origin.x, self.origin.y);
        canvas.rotate(self.rotation);
        for square in &self.squares {
            canvas.fill_rect(*square, paint);
        }
        canvas.restore();
    }
}

fn sanitize(dim: f32) -> f32 {
    if dim.is_finite() {
        dim.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::canvas::recording::RecordingCanvas;
    use crate::gfx::canvas::StrokeCap;
    use crate::gfx::math::Color;

    const EPS: f32 = 1e-4;

    fn paint() -> Paint {
        Paint {
            color: Color::rgba(0, 0, 0, 255),
            stroke_width: 1.0,
            stroke_cap: StrokeCap::Round,
        }
    }

    fn assert_at(rect: &Rect, x: f32, y: f32) {
        assert!(
            (rect.x - x).abs() < EPS && (rect.y - y).abs() < EPS,
            "expected ({}, {}), got {:?}",
            x,
            y,
            rect
        );
    }

    #[test]
    fn rest_position_stacks_all_squares() {
        let layout = NodeLayout::new(0, 5, 0.0, 300.0, 580.0);
        let gap = 580.0 / 6.0;
        let size = gap / SIZE_FACTOR;
        let x_gap = size / 2.0;

        assert_eq!(layout.origin, Vec2::new(150.0, gap));
        assert_eq!(layout.rotation, 0.0);
        assert!((layout.side - x_gap).abs() < EPS);
        for square in &layout.squares {
            assert_at(square, -x_gap - size, x_gap);
        }
    }

    #[test]
    fn half_scale_lays_out_a_zig_zag() {
        let layout = NodeLayout::new(2, 5, 0.5, 300.0, 600.0);
        let size = 100.0 / SIZE_FACTOR;
        let g = size / 2.0;

        assert_eq!(layout.origin, Vec2::new(150.0, 300.0));
        assert!(layout.rotation.abs() < EPS);
        assert_at(&layout.squares[0], 0.0 - size, 0.0);
        assert_at(&layout.squares[1], g - size, 0.0);
        assert_at(&layout.squares[2], 2.0 * g - size, -g);
        assert_at(&layout.squares[3], 3.0 * g - size, -g);
    }

    #[test]
    fn full_scale_rotates_the_row() {
        let half = NodeLayout::new(1, 5, 0.5, 300.0, 600.0);
        let full = NodeLayout::new(1, 5, 1.0, 300.0, 600.0);
        assert!((full.rotation - 180.0).abs() < EPS);
        assert_eq!(half.squares, full.squares);

        let quarter = NodeLayout::new(1, 5, 0.75, 300.0, 600.0);
        assert!((quarter.rotation - 90.0).abs() < EPS);
    }

    #[test]
    fn first_square_moves_before_the_rest() {
        let rest = NodeLayout::new(0, 5, 0.0, 300.0, 600.0);
        let early = NodeLayout::new(0, 5, 0.05, 300.0, 600.0);
        let lead = early.squares[0];
        assert!(lead.x > rest.squares[0].x);
        assert_eq!(lead.y, rest.squares[0].y);
        for square in &early.squares[1..] {
            assert_at(square, lead.x, rest.squares[0].y);
        }
    }

    fn drawn_corners(layout: &NodeLayout) -> Vec<[Vec2; 4]> {
        let mut canvas = RecordingCanvas::new(300.0, 600.0);
        layout.draw(&mut canvas, &paint());
        canvas.rects.iter().map(|r| r.corners).collect()
    }

    fn assert_corners(actual: &[Vec2; 4], expected: [Vec2; 4]) {
        for (a, e) in actual.iter().zip(expected) {
            assert!(
                (a.x - e.x).abs() < EPS && (a.y - e.y).abs() < EPS,
                "expected {:?}, got {:?}",
                expected,
                actual
            );
        }
    }

    #[test]
    fn rest_row_sits_in_its_slot() {
        let layout = NodeLayout::new(1, 5, 0.0, 300.0, 600.0);
        let origin = Vec2::new(150.0, 200.0);
        let drawn = drawn_corners(&layout);
        assert_eq!(drawn.len(), SQUARES);
        for (corners, square) in drawn.iter().zip(&layout.squares) {
            let expected = square.corners().map(|p| Vec2::new(origin.x + p.x, origin.y + p.y));
            assert_corners(corners, expected);
        }
    }

    #[test]
    fn settled_row_is_mirrored_through_its_slot() {
        let layout = NodeLayout::new(1, 5, 1.0, 300.0, 600.0);
        let origin = Vec2::new(150.0, 200.0);
        let drawn = drawn_corners(&layout);
        assert_eq!(drawn.len(), SQUARES);
        for (corners, square) in drawn.iter().zip(&layout.squares) {
            let expected = square.corners().map(|p| Vec2::new(origin.x - p.x, origin.y - p.y));
            assert_corners(corners, expected);
        }
    }

    #[test]
    fn draw_balances_save_and_restore() {
        let mut canvas = RecordingCanvas::new(300.0, 600.0);
        NodeLayout::new(0, 5, 0.8, 300.0, 600.0).draw(&mut canvas, &paint());
        assert_eq!(canvas.rects.len(), SQUARES);
        assert_eq!(canvas.depth(), 0);
        assert_eq!(canvas.max_depth, 1);
    }

    #[test]
    fn degenerate_surfaces_draw_nothing() {
        for (w, h) in [(0.0, 600.0), (300.0, 0.0), (0.0, 0.0), (-5.0, 10.0), (f32::NAN, 100.0)] {
            let layout = NodeLayout::new(3, 5, 0.6, w, h);
            assert!(layout.is_empty());
            for square in &layout.squares {
                assert!(square.x.is_finite() && square.y.is_finite());
            }

            let mut canvas = RecordingCanvas::new(w, h);
            layout.draw(&mut canvas, &paint());
            assert!(canvas.rects.is_empty());
        }
    }
}

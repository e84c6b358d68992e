use super::canvas::{Canvas, Paint};
use super::math::{Color, Rect, TransformStack};
use anyhow::Result;
use glow::HasContext;

#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub pos: [f32; 2],
}

/// GLES2 canvas. Transforms are applied on the CPU, so every rect reaches
/// the GPU as two triangles already in surface pixels.
pub struct DrawContext {
    gl: glow::Context,
    program: glow::Program,
    vbo: glow::Buffer,
    vertices: Vec<Vertex>,
    viewport: [f32; 2],
    transforms: TransformStack,

    u_viewport: Option<glow::UniformLocation>,
    u_color: Option<glow::UniformLocation>,
    a_pos: Option<u32>,
}

impl DrawContext {
    pub fn new(gl: glow::Context, program: glow::Program) -> Result<Self> {
        let vbo = unsafe {
            gl.create_buffer()
                .map_err(|e| anyhow::anyhow!("Failed to create buffer: {}", e))?
        };

        let u_viewport = unsafe { gl.get_uniform_location(program, "uViewport") };
        let u_color = unsafe { gl.get_uniform_location(program, "uColor") };
        let a_pos = unsafe { gl.get_attrib_location(program, "aPos") };

        Ok(Self {
            gl,
            program,
            vbo,
            vertices: Vec::with_capacity(64),
            viewport: [0.0, 0.0],
            transforms: TransformStack::new(),
            u_viewport,
            u_color,
            a_pos,
        })
    }

    pub fn begin(&mut self, viewport_px: [f32; 2]) {
        self.viewport = viewport_px;
        self.vertices.clear();
        self.transforms.reset();

        unsafe {
            self.gl.viewport(0, 0, viewport_px[0] as i32, viewport_px[1] as i32);
            self.gl.clear_color(0.0, 0.0, 0.0, 0.0);
            self.gl.clear(glow::COLOR_BUFFER_BIT);

            self.gl.enable(glow::BLEND);
            self.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);

            self.gl.use_program(Some(self.program));
            if let Some(loc) = &self.u_viewport {
                self.gl.uniform_2_f32(Some(loc), viewport_px[0].max(1.0), viewport_px[1].max(1.0));
            }
        }
    }

    fn set_color(&mut self, color: Color) {
        unsafe {
            if let Some(loc) = &self.u_color {
                self.gl.uniform_4_f32(Some(loc), color.r, color.g, color.b, color.a);
            }
        }
    }

    fn flush_batch(&mut self) {
        if self.vertices.is_empty() {
            return;
        }
        let Some(a_pos) = self.a_pos else {
            self.vertices.clear();
            return;
        };

        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            self.gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&self.vertices),
                glow::DYNAMIC_DRAW,
            );

            self.gl.enable_vertex_attrib_array(a_pos);
            self.gl.vertex_attrib_pointer_f32(
                a_pos,
                2,
                glow::FLOAT,
                false,
                std::mem::size_of::<Vertex>() as i32,
                0,
            );

            self.gl.draw_arrays(glow::TRIANGLES, 0, self.vertices.len() as i32);
        }

        self.vertices.clear();
    }

    pub fn flush(&mut self) {
        self.flush_batch();
        unsafe { self.gl.flush() };
    }
}

impl Canvas for DrawContext {
    fn width(&self) -> f32 {
        self.viewport[0]
    }

    fn height(&self) -> f32 {
        self.viewport[1]
    }

    fn fill_background(&mut self, color: Color) {
        unsafe {
            self.gl.clear_color(color.r, color.g, color.b, color.a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn save(&mut self) {
        self.transforms.save();
    }

    fn restore(&mut self) {
        self.transforms.restore();
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transforms.translate(dx, dy);
    }

    fn rotate(&mut self, degrees: f32) {
        self.transforms.rotate(degrees);
    }

    // Rects are filled, so stroke width and cap do not change the output.
    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let m = self.transforms.current();
        let [p0, p1, p2, p3] = rect.corners().map(|p| {
            let q = m.apply(p);
            Vertex { pos: [q.x, q.y] }
        });
        self.vertices.extend_from_slice(&[p0, p1, p2, p0, p2, p3]);

        self.set_color(paint.color);
        self.flush_batch();
    }
}

impl Drop for DrawContext {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_program(self.program);
        }
    }
}

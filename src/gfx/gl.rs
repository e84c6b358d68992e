use anyhow::Result;
use glow::HasContext;
use log::debug;

const VERT_SRC: &str = include_str!("../../assets/shaders/blocks.vert.glsl");
const FRAG_SRC: &str = include_str!("../../assets/shaders/blocks.frag.glsl");

pub fn compile_shader(
    gl: &glow::Context,
    shader_type: u32,
    source: &str,
) -> Result<glow::Shader> {
    unsafe {
        let shader = gl.create_shader(shader_type)
            .map_err(|e| anyhow::anyhow!("Failed to create shader: {}", e))?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let info = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            anyhow::bail!("Shader compilation failed: {}", info);
        }

        Ok(shader)
    }
}

pub fn link_program(
    gl: &glow::Context,
    vertex_shader: glow::Shader,
    fragment_shader: glow::Shader,
) -> Result<glow::Program> {
    unsafe {
        let program = gl.create_program()
            .map_err(|e| anyhow::anyhow!("Failed to create program: {}", e))?;
        gl.attach_shader(program, vertex_shader);
        gl.attach_shader(program, fragment_shader);
        gl.link_program(program);

        let linked = gl.get_program_link_status(program);
        gl.detach_shader(program, vertex_shader);
        gl.detach_shader(program, fragment_shader);
        gl.delete_shader(vertex_shader);
        gl.delete_shader(fragment_shader);

        if !linked {
            let info = gl.get_program_info_log(program);
            gl.delete_program(program);
            anyhow::bail!("Program linking failed: {}", info);
        }

        Ok(program)
    }
}

/// Builds the solid-fill program the blocks are drawn with.
pub fn load_blocks_program(gl: &glow::Context) -> Result<glow::Program> {
    let vertex_shader = compile_shader(gl, glow::VERTEX_SHADER, VERT_SRC)?;
    let fragment_shader = match compile_shader(gl, glow::FRAGMENT_SHADER, FRAG_SRC) {
        Ok(shader) => shader,
        Err(e) => {
            unsafe { gl.delete_shader(vertex_shader) };
            return Err(e);
        }
    };
    let program = link_program(gl, vertex_shader, fragment_shader)?;
    debug!("Blocks shader program linked");
    Ok(program)
}

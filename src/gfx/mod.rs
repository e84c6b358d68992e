pub mod anim;
pub mod canvas;
pub mod draw;
pub mod gl;
pub mod math;

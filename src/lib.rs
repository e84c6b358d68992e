pub mod app;
pub mod config;
pub mod features;
pub mod gfx;

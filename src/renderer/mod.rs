//! Rendering module
//!
//! The scene draws through `RenderAdapter`. `RenderState` is the WebGPU
//! implementation for a native window; `DrawList` records draw calls without
//! a GPU.

use glam::Vec2;

use crate::error::RenderError;

pub mod draw_list;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use draw_list::{DrawCommand, DrawList};
pub use pipeline::RenderState;

/// Linear RGBA
pub type Color = [f32; 4];

/// What the scene needs from a renderer
pub trait RenderAdapter {
    /// Filled circle, scene coordinates
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn draw_line(&mut self, p1: Vec2, p2: Vec2, thickness: f32, color: Color);

    /// Show everything drawn since the last present.
    fn present_frame(&mut self) -> Result<(), RenderError>;

    fn set_window_title(&mut self, title: &str);
}

//! Headless renderer that records draw calls per frame

use glam::Vec2;

use super::{Color, RenderAdapter};
use crate::error::RenderError;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Line {
        p1: Vec2,
        p2: Vec2,
        thickness: f32,
        color: Color,
    },
}

/// Records what would have been drawn.
#[derive(Debug, Default)]
pub struct DrawList {
    pending: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames_presented: u64,
    title: Option<String>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands drawn since the last present
    pub fn pending(&self) -> &[DrawCommand] {
        &self.pending
    }

    /// Commands of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl RenderAdapter for DrawList {
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.pending.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_line(&mut self, p1: Vec2, p2: Vec2, thickness: f32, color: Color) {
        self.pending.push(DrawCommand::Line {
            p1,
            p2,
            thickness,
            color,
        });
    }

    fn present_frame(&mut self) -> Result<(), RenderError> {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
        Ok(())
    }

    fn set_window_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_moves_pending_to_last_frame() {
        let mut list = DrawList::new();
        list.draw_circle(Vec2::new(1.0, 2.0), 3.0, [1.0; 4]);
        list.draw_line(Vec2::ZERO, Vec2::ONE, 5.0, [1.0; 4]);
        assert_eq!(list.pending().len(), 2);

        list.present_frame().unwrap();
        assert!(list.pending().is_empty());
        assert_eq!(list.last_frame().len(), 2);
        assert_eq!(list.frames_presented(), 1);

        // An empty frame replaces the previous one
        list.present_frame().unwrap();
        assert!(list.last_frame().is_empty());
    }
}

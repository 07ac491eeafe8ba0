//! Escape Ring - a ball escaping a rotating, segmented ring
//!
//! Core modules:
//! - `sim`: Scene lifecycle (boundary generation, registry, escape detection, removal, frame loop)
//! - `physics`: Rigid-body world behind the `PhysicsAdapter` trait (Rapier2D)
//! - `renderer`: WebGPU rendering behind the `RenderAdapter` trait
//! - `settings`: Scene configuration
//! - `error`: Error types shared by every layer

pub mod error;
pub mod physics;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{PhysicsError, RenderError, SimError};
pub use settings::{BallSettings, BoundarySettings, Settings};

use glam::Vec2;

/// Scene configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, independent of render time)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Target frame rate for pacing
    pub const TARGET_FPS: u32 = 60;

    /// Scene dimensions (pixels, y grows downward)
    pub const SCENE_WIDTH: u32 = 600;
    pub const SCENE_HEIGHT: u32 = 600;

    /// Downward gravity (pixels/s²)
    pub const GRAVITY: [f32; 2] = [0.0, 900.0];

    /// Ball defaults
    pub const BALL_START: [f32; 2] = [300.0, 200.0];
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_MASS: f32 = 1.0;
    pub const BALL_ELASTICITY: f32 = 0.9;
    pub const BALL_FRICTION: f32 = 0.1;

    /// Ring defaults
    pub const RING_CENTER: [f32; 2] = [300.0, 300.0];
    pub const RING_RADIUS: f32 = 250.0;
    pub const RING_SEGMENTS: i32 = 32;
    pub const RING_OPENING: i32 = 4;
    /// Segment elasticity is `bouncy / 10`
    pub const RING_BOUNCY: f32 = 15.0;
    pub const RING_FRICTION: f32 = 0.1;
    /// Capsule radius of each segment, also its drawn line width
    pub const RING_THICKNESS: f32 = 5.0;
    /// Ring spin per tick (degrees)
    pub const RING_ROTATION_DEG: f32 = 0.5;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(PI), -PI);
        assert!((normalize_angle(-PI / 2.0) + PI / 2.0).abs() < 1e-6);
        assert!((normalize_angle(2.0 * PI + 0.25) - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(2.0, PI / 2.0);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 2.0).abs() < 1e-6);
    }
}

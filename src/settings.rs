//! Scene settings
//!
//! Everything is fixed at startup; defaults come from `crate::consts`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;
use crate::sim::geometry;

/// The falling ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallSettings {
    /// Start position (scene pixels)
    pub position: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub elasticity: f32,
    pub friction: f32,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            position: Vec2::from(BALL_START),
            radius: BALL_RADIUS,
            mass: BALL_MASS,
            elasticity: BALL_ELASTICITY,
            friction: BALL_FRICTION,
        }
    }
}

/// The rotating ring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundarySettings {
    pub center: Vec2,
    pub radius: f32,
    pub segment_count: i32,
    /// Number of consecutive slices left open
    pub opening_size: i32,
    /// Segment elasticity is `bouncy / 10`
    pub bouncy: f32,
    pub friction: f32,
    pub thickness: f32,
}

impl Default for BoundarySettings {
    fn default() -> Self {
        Self {
            center: Vec2::from(RING_CENTER),
            radius: RING_RADIUS,
            segment_count: RING_SEGMENTS,
            opening_size: RING_OPENING,
            bouncy: RING_BOUNCY,
            friction: RING_FRICTION,
            thickness: RING_THICKNESS,
        }
    }
}

impl BoundarySettings {
    #[inline]
    pub fn elasticity(&self) -> f32 {
        self.bouncy / 10.0
    }
}

/// Scene settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Scene size in pixels (also the initial window size)
    pub width: u32,
    pub height: u32,
    pub target_fps: u32,
    /// Fixed physics timestep (seconds)
    pub dt: f32,
    pub gravity: Vec2,
    /// Ring spin per tick (degrees)
    pub rotation_speed_deg: f32,
    pub ball: BallSettings,
    pub boundary: BoundarySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: SCENE_WIDTH,
            height: SCENE_HEIGHT,
            target_fps: TARGET_FPS,
            dt: SIM_DT,
            gravity: Vec2::from(GRAVITY),
            rotation_speed_deg: RING_ROTATION_DEG,
            ball: BallSettings::default(),
            boundary: BoundarySettings::default(),
        }
    }
}

impl Settings {
    /// Ring spin per tick in radians
    #[inline]
    pub fn rotation_step(&self) -> f32 {
        self.rotation_speed_deg.to_radians()
    }

    /// Reject settings that would fail at scene construction.
    ///
    /// Runs before any window exists so a bad ring never opens one.
    pub fn validate(&self) -> Result<(), SimError> {
        let b = &self.boundary;
        geometry::validate(b.radius, b.segment_count, b.opening_size)?;
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimError::invalid_geometry("dt", format!("must be positive, got {}", self.dt)));
        }
        if self.target_fps == 0 {
            return Err(SimError::invalid_geometry("target_fps", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_scene() {
        let settings = Settings::default();
        assert_eq!(settings.boundary.segment_count, 32);
        assert_eq!(settings.boundary.opening_size, 4);
        assert!((settings.boundary.elasticity() - 1.5).abs() < 1e-6);
        assert!((settings.dt - 1.0 / 60.0).abs() < 1e-9);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_full_opening() {
        let mut settings = Settings::default();
        settings.boundary.opening_size = settings.boundary.segment_count;
        match settings.validate() {
            Err(SimError::InvalidGeometry { param, .. }) => assert_eq!(param, "opening_size"),
            other => panic!("expected InvalidGeometry, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_dt() {
        let settings = Settings {
            dt: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_serialize() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("\"segment_count\":32"));
    }
}

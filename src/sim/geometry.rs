//! Segmented ring geometry
//!
//! A ring of radius `r` is split into `segment_count` equal slices. The first
//! `segment_count - opening_size` slices (counter-clockwise from angle 0) get
//! a straight chord; the remaining slices are left open, forming one gap.
//! Chords are in the ring body's local frame, so spinning the body spins the
//! ring without regenerating anything.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::polar_to_cartesian;

/// One straight piece of the ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Chord {
    pub p1: Vec2,
    pub p2: Vec2,
}

impl Chord {
    #[inline]
    pub fn length(&self) -> f32 {
        (self.p2 - self.p1).length()
    }

    /// Endpoints transformed by a body pose
    pub fn to_world(&self, position: Vec2, angle: f32) -> (Vec2, Vec2) {
        let rot = Vec2::from_angle(angle);
        (position + rot.rotate(self.p1), position + rot.rotate(self.p2))
    }
}

/// Check ring parameters without generating anything.
pub fn validate(radius: f32, segment_count: i32, opening_size: i32) -> Result<(), SimError> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(SimError::invalid_geometry(
            "radius",
            format!("must be positive, got {radius}"),
        ));
    }
    if segment_count <= 0 {
        return Err(SimError::invalid_geometry(
            "segment_count",
            format!("must be positive, got {segment_count}"),
        ));
    }
    if !(0..segment_count).contains(&opening_size) {
        return Err(SimError::invalid_geometry(
            "opening_size",
            format!("must be in 0..{segment_count}, got {opening_size}"),
        ));
    }
    Ok(())
}

/// Generate the chords of a ring with one contiguous gap.
pub fn generate(radius: f32, segment_count: i32, opening_size: i32) -> Result<Vec<Chord>, SimError> {
    validate(radius, segment_count, opening_size)?;

    let slice = TAU / segment_count as f32;
    let chords = (0..segment_count - opening_size)
        .map(|i| Chord {
            p1: polar_to_cartesian(radius, i as f32 * slice),
            p2: polar_to_cartesian(radius, (i + 1) as f32 * slice),
        })
        .collect();
    Ok(chords)
}

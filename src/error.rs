//! Error types
//!
//! Nothing here is recoverable inside the frame loop: startup errors keep the
//! window from opening, steady-state errors end the process.

use crate::physics::{BodyHandle, ShapeHandle};

/// Top-level simulation error
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Bad ring generation parameters
    #[error("invalid boundary geometry: `{param}` {reason}")]
    InvalidGeometry { param: &'static str, reason: String },

    #[error("duplicate entity key `{0}`")]
    DuplicateKey(String),

    #[error("unknown entity key `{0}`")]
    UnknownKey(String),

    #[error(transparent)]
    Physics(#[from] PhysicsError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// The window system's event loop could not start or aborted
    #[error("event loop failed: {0}")]
    EventLoop(String),
}

impl SimError {
    pub(crate) fn invalid_geometry(param: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            param,
            reason: reason.into(),
        }
    }
}

/// Registry and physics world have drifted apart
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhysicsError {
    #[error("rigid body {0:?} is not in the physics world")]
    UnknownBody(BodyHandle),

    #[error("collider {0:?} is not in the physics world")]
    UnknownShape(ShapeHandle),
}

/// Presentation failure that cannot be fixed by reconfiguring the surface
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("GPU initialisation failed: {0}")]
    Init(String),

    #[error("GPU out of memory")]
    OutOfMemory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_loop_error_message() {
        let err = SimError::EventLoop("no display".into());
        assert_eq!(err.to_string(), "event loop failed: no display");
    }

    #[test]
    fn test_render_error_converts() {
        let err: SimError = RenderError::OutOfMemory.into();
        assert!(matches!(err, SimError::Render(RenderError::OutOfMemory)));
        assert_eq!(err.to_string(), "GPU out of memory");
    }
}

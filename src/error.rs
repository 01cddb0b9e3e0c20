use thiserror::Error as ThisError;

use crate::laser::LaserName;

/// Main error type for the library.
///
/// Every variant is a validation failure on the caller's input. They are
/// raised before any point is computed, so a projection either fully
/// succeeds or produces nothing.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    /// The return index is neither 0 (first return) nor 1 (second return).
    #[error("invalid return index {0}, expected 0 or 1")]
    InvalidReturnIndex(usize),

    /// A laser has range images but the frame has no calibration for it.
    #[error("missing calibration for laser {0:?}")]
    MissingCalibration(LaserName),

    /// The calibration exists but cannot produce a beam inclination table for the range image.
    #[error("invalid calibration for laser {laser:?}: {reason}")]
    InvalidCalibration { laser: LaserName, reason: String },

    /// A laser has range images but no camera projection grids.
    #[error("missing camera projection for laser {0:?}")]
    MissingCameraProjection(LaserName),

    /// A laser needs the per-pixel pose grid but none was given.
    #[error("laser {0:?} requires a per-pixel pose grid")]
    MissingTopPose(LaserName),

    /// Two grids that must be pixel-aligned have different shapes.
    #[error("shape mismatch on laser {laser:?}: {what} is {found:?}, range image is {expected:?}")]
    ShapeMismatch {
        laser: LaserName,
        what: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// A decoded tensor does not have the expected channel count.
    #[error("{what} expects {expected} channels, found {found}")]
    InvalidChannels {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

impl Error {
    /// Create a error with the kind `InvalidCalibration`.
    /// # Arguments
    /// * `laser` - The laser whose calibration is rejected.
    /// * `reason` - The error message.
    pub fn invalid_calibration<T: ToString>(laser: LaserName, reason: T) -> Self {
        Error::InvalidCalibration {
            laser,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

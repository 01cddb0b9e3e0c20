use nalgebra::Vector3;
use ndarray::{Array2, ArrayView3};

use crate::error::{Error, Result};
use crate::transform::Transform;

/// Vehicle pose at the instant a pixel was captured.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPose {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub translation: Vector3<f64>,
}

impl PixelPose {
    pub fn new(roll: f64, pitch: f64, yaw: f64, translation: Vector3<f64>) -> Self {
        Self {
            roll,
            pitch,
            yaw,
            translation,
        }
    }

    /// Vehicle (at capture time) to world transform.
    pub fn to_transform(&self) -> Transform {
        Transform::from_roll_pitch_yaw(self.roll, self.pitch, self.yaw, &self.translation)
    }
}

/// Per-pixel vehicle poses of the top laser range image. Compensates the
/// vehicle motion during the sweep: each column is captured at a different
/// instant.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeImageTopPose {
    /// Poses, as array with shape: (height, width)
    pub poses: Array2<PixelPose>,
}

impl RangeImageTopPose {
    pub const CHANNELS: usize = 6;

    pub fn new(poses: Array2<PixelPose>) -> Self {
        Self { poses }
    }

    /// Converts a decoded tensor with shape (height, width, 6), channels
    /// `(roll, pitch, yaw, x, y, z)`.
    pub fn from_array3(tensor: &ArrayView3<f32>) -> Result<Self> {
        let (height, width, channels) = tensor.dim();
        if channels != Self::CHANNELS {
            return Err(Error::InvalidChannels {
                what: "range image top pose",
                expected: Self::CHANNELS,
                found: channels,
            });
        }

        Ok(Self::new(Array2::from_shape_fn((height, width), |(row, col)| {
            let channel = |index: usize| tensor[[row, col, index]] as f64;
            PixelPose::new(
                channel(0),
                channel(1),
                channel(2),
                Vector3::new(channel(3), channel(4), channel(5)),
            )
        })))
    }

    /// Every pixel at the same pose.
    pub fn constant(height: usize, width: usize, pose: PixelPose) -> Self {
        Self::new(Array2::from_elem((height, width), pose))
    }

    /// (rows, cols) of the grid.
    pub fn shape(&self) -> (usize, usize) {
        self.poses.dim()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&PixelPose> {
        self.poses.get((row, col))
    }
}

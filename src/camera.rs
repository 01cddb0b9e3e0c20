use ndarray::{Array2, Array3, ArrayView3};

use crate::error::{Error, Result};

/// Identifier of a camera on the vehicle. `Unknown` (id 0) marks a missing projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum CameraName {
    #[default]
    Unknown = 0,
    Front = 1,
    FrontLeft = 2,
    FrontRight = 3,
    SideLeft = 4,
    SideRight = 5,
}

impl CameraName {
    /// Decodes a numeric camera id, unknown ids map to `Unknown`.
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => CameraName::Front,
            2 => CameraName::FrontLeft,
            3 => CameraName::FrontRight,
            4 => CameraName::SideLeft,
            5 => CameraName::SideRight,
            _ => CameraName::Unknown,
        }
    }
}

/// Where a lidar point lands in one camera image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CameraHit {
    pub camera: CameraName,
    /// Pixel column.
    pub x: i32,
    /// Pixel row.
    pub y: i32,
}

impl CameraHit {
    pub fn new(camera: CameraName, x: i32, y: i32) -> Self {
        Self { camera, x, y }
    }

    /// False for the "no projection" entry.
    pub fn is_valid(&self) -> bool {
        self.camera != CameraName::Unknown
    }
}

/// Primary and secondary camera hits of a lidar pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelProjection {
    pub primary: CameraHit,
    pub secondary: CameraHit,
}

impl PixelProjection {
    pub fn new(primary: CameraHit, secondary: CameraHit) -> Self {
        Self { primary, secondary }
    }

    /// Returns the first hit that lands in `camera`, checking the primary hit first.
    pub fn hit_in(&self, camera: CameraName) -> Option<CameraHit> {
        [self.primary, self.secondary]
            .into_iter()
            .find(|hit| hit.is_valid() && hit.camera == camera)
    }
}

/// Camera projections of every pixel of a range image, same (rows, cols) shape.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraProjection {
    pub projections: Array2<PixelProjection>,
}

impl CameraProjection {
    pub const CHANNELS: usize = 6;

    pub fn new(projections: Array2<PixelProjection>) -> Self {
        Self { projections }
    }

    /// Grid where no pixel projects into any camera.
    pub fn empty(height: usize, width: usize) -> Self {
        Self::new(Array2::default((height, width)))
    }

    /// Converts a decoded tensor with shape (height, width, 6), channels
    /// `(camera, x, y)` for the primary then the secondary hit.
    pub fn from_array3(tensor: &ArrayView3<i32>) -> Result<Self> {
        let (height, width, channels) = tensor.dim();
        if channels != Self::CHANNELS {
            return Err(Error::InvalidChannels {
                what: "camera projection",
                expected: Self::CHANNELS,
                found: channels,
            });
        }

        Ok(Self::new(Array2::from_shape_fn((height, width), |(row, col)| {
            let hit = |offset: usize| {
                CameraHit::new(
                    CameraName::from_id(tensor[[row, col, offset]]),
                    tensor[[row, col, offset + 1]],
                    tensor[[row, col, offset + 2]],
                )
            };
            PixelProjection::new(hit(0), hit(3))
        })))
    }

    /// Back to the (height, width, 6) tensor layout.
    pub fn to_array3(&self) -> Array3<i32> {
        let (height, width) = self.shape();
        Array3::from_shape_fn((height, width, Self::CHANNELS), |(row, col, channel)| {
            let pixel = &self.projections[[row, col]];
            let hit = if channel < 3 { &pixel.primary } else { &pixel.secondary };
            match channel % 3 {
                0 => hit.camera as i32,
                1 => hit.x,
                _ => hit.y,
            }
        })
    }

    /// (rows, cols) of the grid.
    pub fn shape(&self) -> (usize, usize) {
        self.projections.dim()
    }

    pub fn height(&self) -> usize {
        self.projections.nrows()
    }

    pub fn width(&self) -> usize {
        self.projections.ncols()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&PixelProjection> {
        self.projections.get((row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn should_decode_tensor() {
        let mut tensor = Array3::<i32>::zeros((2, 3, 6));
        tensor[[1, 2, 0]] = 1;
        tensor[[1, 2, 1]] = 640;
        tensor[[1, 2, 2]] = 480;
        tensor[[1, 2, 3]] = 2;
        tensor[[1, 2, 4]] = 12;
        tensor[[1, 2, 5]] = 7;

        let projection = CameraProjection::from_array3(&tensor.view()).unwrap();
        assert_eq!(projection.shape(), (2, 3));

        let pixel = projection.get(1, 2).unwrap();
        assert_eq!(pixel.primary, CameraHit::new(CameraName::Front, 640, 480));
        assert_eq!(pixel.secondary, CameraHit::new(CameraName::FrontLeft, 12, 7));
        assert!(!projection.get(0, 0).unwrap().primary.is_valid());

        assert_eq!(projection.to_array3(), tensor);
    }

    #[test]
    fn should_reject_wrong_channels() {
        let tensor = Array3::<i32>::zeros((2, 3, 3));
        assert_eq!(
            CameraProjection::from_array3(&tensor.view()),
            Err(Error::InvalidChannels {
                what: "camera projection",
                expected: 6,
                found: 3
            })
        );
    }

    #[test]
    fn should_find_hit_by_camera() {
        let pixel = PixelProjection::new(
            CameraHit::new(CameraName::Front, 10, 20),
            CameraHit::new(CameraName::SideLeft, 30, 40),
        );
        assert_eq!(pixel.hit_in(CameraName::Front).unwrap().x, 10);
        assert_eq!(pixel.hit_in(CameraName::SideLeft).unwrap().y, 40);
        assert!(pixel.hit_in(CameraName::Unknown).is_none());
        assert!(pixel.hit_in(CameraName::FrontRight).is_none());
    }
}

use ndarray::{Array2, Array3, ArrayView3};

use crate::error::{Error, Result};

/// Channels of one range image pixel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangePixel {
    /// Distance to the sensor in meters. Negative when the pulse had no return.
    pub range: f32,
    pub intensity: f32,
    pub elongation: f32,
    /// Whether the point falls in a no-label zone.
    pub in_nlz: bool,
}

impl RangePixel {
    pub fn new(range: f32, intensity: f32, elongation: f32, in_nlz: bool) -> Self {
        Self {
            range,
            intensity,
            elongation,
            in_nlz,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.range >= 0.0
    }
}

/// Which echo of the laser pulse a range image holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnIndex {
    First = 0,
    Second = 1,
}

impl ReturnIndex {
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl TryFrom<usize> for ReturnIndex {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        match value {
            0 => Ok(ReturnIndex::First),
            1 => Ok(ReturnIndex::Second),
            _ => Err(Error::InvalidReturnIndex(value)),
        }
    }
}

/// One return of one laser sweep. Rows are beams (top beam first) and
/// columns are azimuth bins.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeImage {
    /// Pixels, as array with shape: (height, width)
    pub pixels: Array2<RangePixel>,
}

impl RangeImage {
    pub const CHANNELS: usize = 4;

    pub fn new(pixels: Array2<RangePixel>) -> Self {
        Self { pixels }
    }

    /// Creates a range image with only the range channel set.
    pub fn from_ranges(ranges: &Array2<f32>) -> Self {
        Self::new(ranges.mapv(|range| RangePixel::new(range, 0.0, 0.0, false)))
    }

    /// Converts a decoded tensor with shape (height, width, 4), channels
    /// `(range, intensity, elongation, is_in_nlz)`. A positive NLZ channel
    /// marks the pixel as inside a no-label zone.
    pub fn from_array3(tensor: &ArrayView3<f32>) -> Result<Self> {
        let (height, width, channels) = tensor.dim();
        if channels != Self::CHANNELS {
            return Err(Error::InvalidChannels {
                what: "range image",
                expected: Self::CHANNELS,
                found: channels,
            });
        }

        Ok(Self::new(Array2::from_shape_fn((height, width), |(row, col)| {
            RangePixel::new(
                tensor[[row, col, 0]],
                tensor[[row, col, 1]],
                tensor[[row, col, 2]],
                tensor[[row, col, 3]] > 0.0,
            )
        })))
    }

    /// Back to the (height, width, 4) tensor layout, NLZ encoded as 1 / -1.
    pub fn to_array3(&self) -> Array3<f32> {
        let (height, width) = self.shape();
        Array3::from_shape_fn((height, width, Self::CHANNELS), |(row, col, channel)| {
            let pixel = &self.pixels[[row, col]];
            match channel {
                0 => pixel.range,
                1 => pixel.intensity,
                2 => pixel.elongation,
                _ => {
                    if pixel.in_nlz {
                        1.0
                    } else {
                        -1.0
                    }
                }
            }
        })
    }

    /// (rows, cols) of the grid.
    pub fn shape(&self) -> (usize, usize) {
        self.pixels.dim()
    }

    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Returns the number of pixels in the image, which is width*height.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Number of pixels with a return, this is usually less than width*height.
    pub fn valid_points_count(&self) -> usize {
        self.pixels.iter().filter(|pixel| pixel.is_valid()).count()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&RangePixel> {
        self.pixels.get((row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn should_parse_return_index() {
        assert_eq!(ReturnIndex::try_from(0usize), Ok(ReturnIndex::First));
        assert_eq!(ReturnIndex::try_from(1usize).map(|ri| ri.index()), Ok(1));
        assert_eq!(ReturnIndex::try_from(2usize), Err(Error::InvalidReturnIndex(2)));
    }

    #[test]
    fn should_count_valid_points() {
        let image = RangeImage::from_ranges(&array![[1.0, -1.0, 0.0], [4.5, -0.5, 12.0]]);
        assert_eq!(image.shape(), (2, 3));
        assert_eq!(image.len(), 6);
        assert_eq!(image.valid_points_count(), 4);
        assert!(!image.get(0, 1).unwrap().is_valid());
        assert!(image.get(0, 2).unwrap().is_valid());
        assert!(image.get(2, 0).is_none());
    }

    #[test]
    fn should_decode_tensor() {
        let tensor = array![
            [[10.0, 0.5, 0.1, -1.0], [-1.0, 0.0, 0.0, -1.0]],
            [[20.0, 0.25, 0.0, 1.0], [30.0, 0.75, 0.2, -1.0]]
        ];
        let image = RangeImage::from_array3(&tensor.view()).unwrap();

        assert_eq!(*image.get(0, 0).unwrap(), RangePixel::new(10.0, 0.5, 0.1, false));
        assert!(image.get(1, 0).unwrap().in_nlz);
        assert_eq!(image.valid_points_count(), 3);
        assert_eq!(image.to_array3(), tensor);
    }

    #[test]
    fn should_reject_wrong_channels() {
        let tensor = Array3::<f32>::zeros((4, 4, 3));
        assert!(matches!(
            RangeImage::from_array3(&tensor.view()),
            Err(Error::InvalidChannels { expected: 4, found: 3, .. })
        ));
    }
}

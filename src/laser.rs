use ndarray::Array1;

use crate::error::{Error, Result};
use crate::transform::Transform;

/// Identifier of a physical lidar on the vehicle. Ordered by its numeric id,
/// which is the order lasers appear in a projection result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LaserName {
    Unknown = 0,
    Top = 1,
    Front = 2,
    SideLeft = 3,
    SideRight = 4,
    Rear = 5,
}

impl LaserName {
    pub const ALL: [LaserName; 5] = [
        LaserName::Top,
        LaserName::Front,
        LaserName::SideLeft,
        LaserName::SideRight,
        LaserName::Rear,
    ];

    /// Decodes a numeric laser id, unknown ids map to `Unknown`.
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => LaserName::Top,
            2 => LaserName::Front,
            3 => LaserName::SideLeft,
            4 => LaserName::SideRight,
            5 => LaserName::Rear,
            _ => LaserName::Unknown,
        }
    }

    pub fn id(&self) -> i32 {
        *self as i32
    }
}

/// Vertical angles of the laser beams, in radians.
#[derive(Debug, Clone, PartialEq)]
pub enum BeamInclinations {
    /// Beams evenly spaced between `min` and `max`.
    Uniform { min: f64, max: f64 },
    /// One inclination per beam, ascending from the bottom beam to the top beam.
    Explicit(Vec<f64>),
}

impl BeamInclinations {
    /// Returns the inclination of each range image row. Row 0 is the top beam,
    /// so the table is in descending order.
    ///
    /// # Arguments
    ///
    /// * `laser` - Laser name, only used for error reporting.
    /// * `height` - Number of rows of the range image.
    ///
    /// # Returns
    ///
    /// * Array with shape (height), or `InvalidCalibration` if the table has
    ///   the wrong length or holds angles outside [-pi/2, pi/2].
    pub fn row_inclinations(&self, laser: LaserName, height: usize) -> Result<Array1<f64>> {
        let half_pi = std::f64::consts::FRAC_PI_2;
        let in_range = |angle: f64| angle.is_finite() && (-half_pi..=half_pi).contains(&angle);

        let ascending = match self {
            BeamInclinations::Uniform { min, max } => {
                if !in_range(*min) || !in_range(*max) {
                    return Err(Error::invalid_calibration(
                        laser,
                        format!("inclination bounds [{min}, {max}] out of range"),
                    ));
                }
                if min > max {
                    return Err(Error::invalid_calibration(
                        laser,
                        format!("inclination min {min} is greater than max {max}"),
                    ));
                }
                let diff = max - min;
                Array1::from_shape_fn(height, |row| {
                    min + (row as f64 + 0.5) / height as f64 * diff
                })
            }
            BeamInclinations::Explicit(values) => {
                if values.len() != height {
                    return Err(Error::invalid_calibration(
                        laser,
                        format!(
                            "{} beam inclinations for a range image with {} rows",
                            values.len(),
                            height
                        ),
                    ));
                }
                if let Some(angle) = values.iter().find(|angle| !in_range(**angle)) {
                    return Err(Error::invalid_calibration(
                        laser,
                        format!("beam inclination {angle} out of range"),
                    ));
                }
                Array1::from(values.clone())
            }
        };

        Ok(ascending.slice_move(ndarray::s![..;-1]))
    }
}

/// Static calibration of one laser.
#[derive(Debug, Clone)]
pub struct LaserCalibration {
    pub name: LaserName,
    /// Laser to vehicle frame.
    pub extrinsic: Transform,
    pub beam_inclinations: BeamInclinations,
    /// Whether the laser's returns come with a per-pixel vehicle pose. Only the top laser does.
    pub has_per_pixel_pose: bool,
}

impl LaserCalibration {
    /// Creates a calibration, setting `has_per_pixel_pose` for the top laser.
    pub fn new(name: LaserName, extrinsic: Transform, beam_inclinations: BeamInclinations) -> Self {
        Self {
            name,
            extrinsic,
            beam_inclinations,
            has_per_pixel_pose: name == LaserName::Top,
        }
    }

    pub fn with_per_pixel_pose(mut self, value: bool) -> Self {
        self.has_per_pixel_pose = value;
        self
    }
}

use nalgebra::Vector3;
use ndarray::Array1;

use crate::error::Result;
use crate::laser::LaserCalibration;

/// Returns the azimuth of each range image column, in radians.
///
/// Column 0 starts at +pi and azimuth decreases to the right, so the sweep
/// goes clockwise seen from above. `az_correction` is the laser yaw on the
/// vehicle, which is subtracted so that azimuths are expressed in the laser
/// frame.
pub fn column_azimuths(width: usize, az_correction: f64) -> Array1<f64> {
    let pi = std::f64::consts::PI;
    Array1::from_shape_fn(width, |col| {
        let ratio = (width as f64 - col as f64 - 0.5) / width as f64;
        (ratio * 2.0 - 1.0) * pi - az_correction
    })
}

/// Beam directions of one laser for a given range image size, with the
/// trigonometry of each row and column computed once.
#[derive(Debug, Clone)]
pub struct BeamGeometry {
    inclinations: Array1<f64>,
    azimuths: Array1<f64>,
    inclination_cos_sin: Vec<(f64, f64)>,
    azimuth_cos_sin: Vec<(f64, f64)>,
}

impl BeamGeometry {
    /// Builds the geometry of a `height` x `width` range image.
    ///
    /// # Arguments
    ///
    /// * `calibration` - Laser calibration, its inclination table must have `height` rows.
    /// * `height` - Number of rows.
    /// * `width` - Number of columns.
    pub fn new(calibration: &LaserCalibration, height: usize, width: usize) -> Result<Self> {
        let inclinations = calibration
            .beam_inclinations
            .row_inclinations(calibration.name, height)?;
        let azimuths = column_azimuths(width, calibration.extrinsic.yaw());

        let inclination_cos_sin = inclinations.iter().map(|angle| (angle.cos(), angle.sin())).collect();
        let azimuth_cos_sin = azimuths.iter().map(|angle| (angle.cos(), angle.sin())).collect();

        Ok(Self {
            inclinations,
            azimuths,
            inclination_cos_sin,
            azimuth_cos_sin,
        })
    }

    pub fn inclinations(&self) -> &Array1<f64> {
        &self.inclinations
    }

    pub fn azimuths(&self) -> &Array1<f64> {
        &self.azimuths
    }

    /// Unit direction of the beam at (row, col) in the laser frame.
    pub fn direction(&self, row: usize, col: usize) -> Vector3<f64> {
        let (cos_incl, sin_incl) = self.inclination_cos_sin[row];
        let (cos_az, sin_az) = self.azimuth_cos_sin[col];
        Vector3::new(cos_az * cos_incl, sin_az * cos_incl, sin_incl)
    }

    /// Point measured at (row, col) with the given range, in the laser frame.
    pub fn sensor_point(&self, row: usize, col: usize, range: f64) -> Vector3<f64> {
        self.direction(row, col) * range
    }
}

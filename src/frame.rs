use crate::laser::{LaserCalibration, LaserName};
use crate::transform::Transform;

/// Calibration and metadata of one sensor frame.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// One calibration per laser mounted on the vehicle.
    pub calibrations: Vec<LaserCalibration>,
    /// Frame reference timestamp, in microseconds.
    pub timestamp_micros: i64,
    /// Vehicle to world pose at the reference timestamp.
    pub pose: Transform,
    /// Lasers that reported data in this frame.
    pub lasers: Vec<LaserName>,
}

impl Frame {
    pub fn new(calibrations: Vec<LaserCalibration>, timestamp_micros: i64) -> Self {
        let lasers = calibrations.iter().map(|calib| calib.name).collect();
        Self {
            calibrations,
            timestamp_micros,
            pose: Transform::eye(),
            lasers,
        }
    }

    pub fn with_pose(mut self, pose: Transform) -> Self {
        self.pose = pose;
        self
    }

    /// Looks up the calibration of a laser.
    pub fn calibration(&self, laser: LaserName) -> Option<&LaserCalibration> {
        self.calibrations.iter().find(|calib| calib.name == laser)
    }
}

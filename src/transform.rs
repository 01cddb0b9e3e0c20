use nalgebra::{Isometry3, Matrix3, Matrix4, Point3, Rotation3, Translation3, UnitQuaternion, Vector3};
use ndarray::{Array2, Axis};

use std::ops;

/// Rigid transform, used for laser extrinsics, per-pixel poses and the frame pose.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform(Isometry3<f64>);

impl Default for Transform {
    fn default() -> Self {
        Self::eye()
    }
}

impl Transform {
    pub fn eye() -> Self {
        Self(Isometry3::identity())
    }

    pub fn new(translation: &Vector3<f64>, rotation: &UnitQuaternion<f64>) -> Self {
        Self(Isometry3::from_parts(
            Translation3::from(*translation),
            *rotation,
        ))
    }

    /// Creates a transform from a homogeneous 4x4 matrix stored row-major,
    /// the layout used by the calibration records.
    ///
    /// The upper-left 3x3 block is projected onto the closest rotation.
    pub fn from_row_major(values: &[f64; 16]) -> Self {
        Self::from_matrix4(&Matrix4::from_row_slice(values))
    }

    pub fn from_matrix4(matrix: &Matrix4<f64>) -> Self {
        let translation = Translation3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)]);
        let rotation: Matrix3<f64> = matrix.fixed_slice::<3, 3>(0, 0).into_owned();
        let so3 = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix(&rotation));
        Self(Isometry3::from_parts(translation, so3))
    }

    /// Creates a transform from a roll, pitch, yaw rotation (radians) and a translation.
    /// The rotation is applied as `Rz(yaw) * Ry(pitch) * Rx(roll)`.
    pub fn from_roll_pitch_yaw(roll: f64, pitch: f64, yaw: f64, translation: &Vector3<f64>) -> Self {
        Self(Isometry3::from_parts(
            Translation3::from(*translation),
            UnitQuaternion::from_euler_angles(roll, pitch, yaw),
        ))
    }

    pub fn inverse(&self) -> Self {
        Self(self.0.inverse())
    }

    pub fn translation(&self) -> Vector3<f64> {
        self.0.translation.vector
    }

    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        *self.0.rotation.to_rotation_matrix().matrix()
    }

    /// Heading of the transform's x-axis in the parent frame, `atan2(R[1][0], R[0][0])`.
    pub fn yaw(&self) -> f64 {
        let rotation = self.rotation_matrix();
        rotation[(1, 0)].atan2(rotation[(0, 0)])
    }

    pub fn is_identity(&self, epsilon: f64) -> bool {
        self.translation().norm() <= epsilon && self.0.rotation.angle() <= epsilon
    }

    /// Applies rotation and translation to a point given by its coordinates.
    pub fn transform_point(&self, point: &Vector3<f64>) -> Vector3<f64> {
        self.0.transform_point(&Point3::from(*point)).coords
    }

    /// Transforms an array of points with shape (N, 3) in place.
    pub fn transform(&self, mut rhs: Array2<f32>) -> Array2<f32> {
        for mut point in rhs.axis_iter_mut(Axis(0)) {
            let v = self.transform_point(&Vector3::new(
                point[0] as f64,
                point[1] as f64,
                point[2] as f64,
            ));
            point[0] = v[0] as f32;
            point[1] = v[1] as f32;
            point[2] = v[2] as f32;
        }

        rhs
    }
}

impl ops::Mul<&Vector3<f64>> for &Transform {
    type Output = Vector3<f64>;

    fn mul(self, rhs: &Vector3<f64>) -> Self::Output {
        self.transform_point(rhs)
    }
}

impl ops::Mul<&Transform> for &Transform {
    type Output = Transform;

    fn mul(self, rhs: &Transform) -> Self::Output {
        Transform(self.0 * rhs.0)
    }
}

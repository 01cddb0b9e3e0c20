use nalgebra::Vector3;
use ndarray::Array2;

use crate::camera::{CameraName, PixelProjection};
use crate::transform::Transform;

/// Range image channels carried along with a point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarFeatures {
    pub range: f32,
    pub intensity: f32,
    pub elongation: f32,
}

/// A lidar point seen by a camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPoint {
    /// Point in the vehicle frame.
    pub point: Vector3<f32>,
    /// Pixel column.
    pub x: i32,
    /// Pixel row.
    pub y: i32,
    /// Distance from the vehicle frame origin.
    pub distance: f32,
}

/// Points of one laser return, index-aligned with their camera projections:
/// `points[i]`, `projections[i]` and `features[i]` come from the same range image pixel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointCloud {
    pub points: Vec<Vector3<f32>>,
    pub projections: Vec<PixelProjection>,
    pub features: Option<Vec<PolarFeatures>>,
}

impl PointCloud {
    /// Creates an empty point cloud that can hold `capacity` points without reallocating.
    pub fn with_capacity(capacity: usize, with_features: bool) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            projections: Vec::with_capacity(capacity),
            features: with_features.then(|| Vec::with_capacity(capacity)),
        }
    }

    /// Appends a point, the features are dropped when the cloud doesn't keep them.
    pub fn push(&mut self, point: Vector3<f32>, projection: PixelProjection, features: PolarFeatures) {
        self.points.push(point);
        self.projections.push(projection);
        if let Some(all_features) = self.features.as_mut() {
            all_features.push(features);
        }
    }

    /// Appends all points of `other`. Features are kept only if both clouds have them.
    pub fn append(&mut self, other: &PointCloud) {
        self.points.extend_from_slice(&other.points);
        self.projections.extend_from_slice(&other.projections);
        self.features = match (self.features.take(), other.features.as_ref()) {
            (Some(mut features), Some(other_features)) => {
                features.extend_from_slice(other_features);
                Some(features)
            }
            _ => None,
        };
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points as an array with shape (N, 3).
    pub fn points_array(&self) -> Array2<f32> {
        Array2::from_shape_fn((self.len(), 3), |(i, axis)| self.points[i][axis])
    }

    /// Selects the points projecting into `camera`, using the primary hit
    /// and falling back to the secondary one.
    ///
    /// # Arguments
    ///
    /// * camera - The camera to select.
    ///
    /// # Returns
    ///
    /// * The points with their pixel coordinate and distance, in point order.
    pub fn camera_points(&self, camera: CameraName) -> Vec<CameraPoint> {
        self.points
            .iter()
            .zip(self.projections.iter())
            .filter_map(|(point, projection)| {
                projection.hit_in(camera).map(|hit| CameraPoint {
                    point: *point,
                    x: hit.x,
                    y: hit.y,
                    distance: point.norm(),
                })
            })
            .collect()
    }
}

impl std::ops::Mul<&PointCloud> for &Transform {
    type Output = PointCloud;
    fn mul(self, rhs: &PointCloud) -> PointCloud {
        PointCloud {
            points: rhs
                .points
                .iter()
                .map(|point| (self * &point.cast::<f64>()).cast::<f32>())
                .collect(),
            projections: rhs.projections.clone(),
            features: rhs.features.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraHit;
    use approx::assert_relative_eq;
    use rstest::*;

    #[fixture]
    fn sample_pcl() -> PointCloud {
        let mut pcl = PointCloud::with_capacity(3, true);
        let hit = |camera, x, y| CameraHit::new(camera, x, y);
        pcl.push(
            Vector3::new(3.0, 4.0, 0.0),
            PixelProjection::new(hit(CameraName::Front, 100, 200), CameraHit::default()),
            PolarFeatures { range: 5.0, intensity: 0.1, elongation: 0.0 },
        );
        pcl.push(
            Vector3::new(0.0, 0.0, 2.0),
            PixelProjection::default(),
            PolarFeatures { range: 2.0, intensity: 0.2, elongation: 0.0 },
        );
        pcl.push(
            Vector3::new(-1.0, 0.0, 0.0),
            PixelProjection::new(
                hit(CameraName::SideLeft, 5, 6),
                hit(CameraName::Front, 7, 8),
            ),
            PolarFeatures { range: 1.0, intensity: 0.3, elongation: 0.5 },
        );
        pcl
    }

    #[rstest]
    fn should_keep_alignment(sample_pcl: PointCloud) {
        assert_eq!(sample_pcl.len(), 3);
        assert_eq!(sample_pcl.projections.len(), 3);
        assert_eq!(sample_pcl.features.as_ref().unwrap().len(), 3);

        let array = sample_pcl.points_array();
        assert_eq!(array.shape(), &[3, 3]);
        assert_eq!(array[[2, 0]], -1.0);
    }

    #[rstest]
    fn should_select_camera_points(sample_pcl: PointCloud) {
        let front = sample_pcl.camera_points(CameraName::Front);
        assert_eq!(front.len(), 2);
        assert_eq!((front[0].x, front[0].y), (100, 200));
        assert_relative_eq!(front[0].distance, 5.0);
        assert_eq!((front[1].x, front[1].y), (7, 8));

        assert!(sample_pcl.camera_points(CameraName::SideRight).is_empty());
    }

    #[rstest]
    fn should_append(sample_pcl: PointCloud) {
        let mut merged = sample_pcl.clone();
        merged.append(&sample_pcl);
        assert_eq!(merged.len(), 6);
        assert_eq!(merged.features.as_ref().unwrap().len(), 6);
        assert_eq!(merged.points[4], sample_pcl.points[1]);

        let mut without_features = PointCloud::with_capacity(0, false);
        without_features.append(&sample_pcl);
        assert_eq!(without_features.len(), 3);
        assert!(without_features.features.is_none());
    }

    #[rstest]
    fn should_transform(sample_pcl: PointCloud) {
        let transform = Transform::new(&Vector3::new(1.0, 0.0, 0.0), &nalgebra::UnitQuaternion::identity());
        let moved = &transform * &sample_pcl;
        assert_relative_eq!(moved.points[0], Vector3::new(4.0, 4.0, 0.0));
        assert_eq!(moved.projections, sample_pcl.projections);
    }
}

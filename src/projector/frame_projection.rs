use std::collections::BTreeMap;

use nalgebra::Vector3;

use crate::camera::PixelProjection;
use crate::laser::LaserName;
use crate::pointcloud::PointCloud;
use crate::range_image::ReturnIndex;

/// Point clouds of every laser of a frame for one return, in ascending laser order.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameProjection {
    pub return_index: ReturnIndex,
    pub lasers: BTreeMap<LaserName, PointCloud>,
}

impl FrameProjection {
    pub fn get(&self, laser: LaserName) -> Option<&PointCloud> {
        self.lasers.get(&laser)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LaserName, &PointCloud)> + '_ {
        self.lasers.iter()
    }

    /// Number of points over all lasers.
    pub fn total_points(&self) -> usize {
        self.lasers.values().map(PointCloud::len).sum()
    }

    /// Concatenates all lasers into one cloud, in ascending laser order.
    pub fn merged(&self) -> PointCloud {
        let with_features = self.lasers.values().all(|pcl| pcl.features.is_some());
        let mut merged = PointCloud::with_capacity(self.total_points(), with_features);
        for pcl in self.lasers.values() {
            merged.append(pcl);
        }
        merged
    }

    /// Splits into the points and the camera projections of each laser.
    pub fn into_parts(
        self,
    ) -> (
        BTreeMap<LaserName, Vec<Vector3<f32>>>,
        BTreeMap<LaserName, Vec<PixelProjection>>,
    ) {
        let mut points = BTreeMap::new();
        let mut projections = BTreeMap::new();
        for (laser, pcl) in self.lasers {
            points.insert(laser, pcl.points);
            projections.insert(laser, pcl.projections);
        }
        (points, projections)
    }
}

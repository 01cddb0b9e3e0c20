use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use log::{debug, trace};
use nalgebra::Vector3;
use ndarray::Array2;
use rayon::prelude::*;

use crate::camera::CameraProjection;
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::laser::LaserName;
use crate::pointcloud::{PointCloud, PolarFeatures};
use crate::range_image::{BeamGeometry, RangeImage, RangeImageTopPose, ReturnIndex};
use crate::transform::Transform;

use super::{FrameProjection, ProjectorParams};

/// Range images of each laser, indexed by return.
pub type RangeImages = HashMap<LaserName, [RangeImage; 2]>;
/// Camera projections of each laser, indexed by return.
pub type CameraProjections = HashMap<LaserName, [CameraProjection; 2]>;

/// Per-pixel pose of a motion compensated laser.
struct PoseCorrection<'a> {
    poses: &'a RangeImageTopPose,
    /// Inverse of the frame pose, brings world points back to the vehicle frame.
    world_to_vehicle: Transform,
}

/// Everything needed to convert one laser's range image, validated upfront.
struct LaserPlan<'a> {
    laser: LaserName,
    range_image: &'a RangeImage,
    camera_projection: Option<&'a CameraProjection>,
    geometry: BeamGeometry,
    extrinsic: &'a Transform,
    pose_correction: Option<PoseCorrection<'a>>,
}

impl LaserPlan<'_> {
    fn vehicle_point(&self, row: usize, col: usize, range: f64) -> Vector3<f64> {
        let sensor_point = self.geometry.sensor_point(row, col, range);
        let vehicle_point = self.extrinsic * &sensor_point;

        match &self.pose_correction {
            Some(correction) => {
                let pixel_pose = correction.poses.poses[[row, col]].to_transform();
                let world_point = &pixel_pose * &vehicle_point;
                &correction.world_to_vehicle * &world_point
            }
            None => vehicle_point,
        }
    }

    fn point_cloud(&self, params: &ProjectorParams) -> PointCloud {
        let mut pcl = PointCloud::with_capacity(self.range_image.len(), params.keep_polar_features);

        for ((row, col), pixel) in self.range_image.pixels.indexed_iter() {
            if !pixel.is_valid() || (params.filter_no_label_zone && pixel.in_nlz) {
                continue;
            }

            let point = self.vehicle_point(row, col, pixel.range as f64).cast::<f32>();
            let projection = self
                .camera_projection
                .map(|cp| cp.projections[[row, col]])
                .unwrap_or_default();
            pcl.push(
                point,
                projection,
                PolarFeatures {
                    range: pixel.range,
                    intensity: pixel.intensity,
                    elongation: pixel.elongation,
                },
            );
        }

        debug!(
            "Laser {:?}: {} points out of {} pixels",
            self.laser,
            pcl.len(),
            self.range_image.len()
        );
        pcl
    }

    fn cartesian(&self) -> Array2<Vector3<f32>> {
        Array2::from_shape_fn(self.range_image.shape(), |(row, col)| {
            let range = self.range_image.pixels[[row, col]].range as f64;
            self.vehicle_point(row, col, range).cast::<f32>()
        })
    }
}

/// Converts the range images of a frame into vehicle frame point clouds
/// with their camera projections.
#[derive(Debug, Clone, Default)]
pub struct RangeImageProjector {
    pub params: ProjectorParams,
}

impl RangeImageProjector {
    pub fn new(params: ProjectorParams) -> Self {
        Self { params }
    }

    /// Projects one return of every laser.
    ///
    /// # Arguments
    ///
    /// * `frame` - Calibrations and pose of the frame. Needs one calibration per laser in `range_images`.
    /// * `range_images` - Range images of each laser, indexed by return.
    /// * `camera_projections` - Camera projections of each laser, same shapes as the range images.
    /// * `top_pose` - Per-pixel poses, required when a laser with `has_per_pixel_pose` is present.
    /// * `return_index` - 0 for the first return, 1 for the second.
    ///
    /// # Returns
    ///
    /// * The point cloud of each laser, in ascending laser order. Invalid pixels
    ///   (negative range) are dropped, the rest are kept in row-major order.
    ///   Nothing is computed if any input fails validation.
    pub fn project(
        &self,
        frame: &Frame,
        range_images: &RangeImages,
        camera_projections: &CameraProjections,
        top_pose: Option<&RangeImageTopPose>,
        return_index: usize,
    ) -> Result<FrameProjection> {
        let return_index = ReturnIndex::try_from(return_index)?;
        let plans = plan_lasers(
            frame,
            range_images,
            Some(camera_projections),
            top_pose,
            return_index,
        )?;

        let clouds: Vec<(LaserName, PointCloud)> = if self.params.parallel {
            plans
                .par_iter()
                .map(|plan| (plan.laser, plan.point_cloud(&self.params)))
                .collect()
        } else {
            plans
                .iter()
                .map(|plan| (plan.laser, plan.point_cloud(&self.params)))
                .collect()
        };

        Ok(FrameProjection {
            return_index,
            lasers: clouds.into_iter().collect(),
        })
    }

    /// Projects the first and the second return.
    pub fn project_returns(
        &self,
        frame: &Frame,
        range_images: &RangeImages,
        camera_projections: &CameraProjections,
        top_pose: Option<&RangeImageTopPose>,
    ) -> Result<[FrameProjection; 2]> {
        let first = self.project(frame, range_images, camera_projections, top_pose, 0)?;
        let second = self.project(frame, range_images, camera_projections, top_pose, 1)?;
        Ok([first, second])
    }

    /// Converts every pixel, valid or not, into a vehicle frame point.
    ///
    /// # Returns
    ///
    /// * One grid per laser with the range image shape: (height, width).
    pub fn cartesian(
        &self,
        frame: &Frame,
        range_images: &RangeImages,
        top_pose: Option<&RangeImageTopPose>,
        return_index: usize,
    ) -> Result<BTreeMap<LaserName, Array2<Vector3<f32>>>> {
        let return_index = ReturnIndex::try_from(return_index)?;
        let plans = plan_lasers(frame, range_images, None, top_pose, return_index)?;

        Ok(if self.params.parallel {
            plans
                .par_iter()
                .map(|plan| (plan.laser, plan.cartesian()))
                .collect::<Vec<_>>()
                .into_iter()
                .collect()
        } else {
            plans
                .iter()
                .map(|plan| (plan.laser, plan.cartesian()))
                .collect()
        })
    }
}

/// Validates the inputs of every laser and prepares their conversion, in ascending laser order.
fn plan_lasers<'a>(
    frame: &'a Frame,
    range_images: &'a RangeImages,
    camera_projections: Option<&'a CameraProjections>,
    top_pose: Option<&'a RangeImageTopPose>,
    return_index: ReturnIndex,
) -> Result<Vec<LaserPlan<'a>>> {
    let world_to_vehicle = frame.pose.inverse();

    range_images
        .iter()
        .sorted_by_key(|(laser, _)| **laser)
        .map(|(&laser, returns)| -> Result<LaserPlan<'a>> {
            let range_image = &returns[return_index.index()];
            let calibration = frame
                .calibration(laser)
                .ok_or(Error::MissingCalibration(laser))?;

            let camera_projection = match camera_projections {
                Some(projections) => {
                    let projection = &projections
                        .get(&laser)
                        .ok_or(Error::MissingCameraProjection(laser))?[return_index.index()];
                    check_shape(laser, "camera projection", range_image.shape(), projection.shape())?;
                    Some(projection)
                }
                None => None,
            };

            let pose_correction = if calibration.has_per_pixel_pose {
                let poses = top_pose.ok_or(Error::MissingTopPose(laser))?;
                check_shape(laser, "top pose", range_image.shape(), poses.shape())?;
                Some(PoseCorrection {
                    poses,
                    world_to_vehicle: world_to_vehicle.clone(),
                })
            } else {
                None
            };

            let geometry = BeamGeometry::new(calibration, range_image.height(), range_image.width())?;
            trace!(
                "Laser {:?}: {:?} range image, per-pixel pose: {}",
                laser,
                range_image.shape(),
                pose_correction.is_some()
            );

            Ok(LaserPlan {
                laser,
                range_image,
                camera_projection,
                geometry,
                extrinsic: &calibration.extrinsic,
                pose_correction,
            })
        })
        .collect()
}

fn check_shape(
    laser: LaserName,
    what: &'static str,
    expected: (usize, usize),
    found: (usize, usize),
) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::ShapeMismatch {
            laser,
            what,
            expected,
            found,
        })
    }
}

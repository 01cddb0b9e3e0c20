use std::collections::HashMap;

use nalgebra::Vector3;
use ndarray::Array2;
use rstest::fixture;

use crate::{
    camera::{CameraHit, CameraName, CameraProjection, PixelProjection},
    frame::Frame,
    laser::{BeamInclinations, LaserCalibration, LaserName},
    projector::{CameraProjections, RangeImages},
    range_image::{PixelPose, RangeImage, RangeImageTopPose, RangePixel},
    transform::Transform,
};

/// Inputs of a projection, as produced by the frame decoder.
#[derive(Clone, Debug)]
pub struct SampleFrameData {
    pub frame: Frame,
    pub range_images: RangeImages,
    pub camera_projections: CameraProjections,
    pub top_pose: RangeImageTopPose,
}

fn first_return(height: usize, width: usize) -> RangeImage {
    RangeImage::new(Array2::from_shape_fn((height, width), |(row, col)| {
        let range = if (row + col) % 5 == 0 {
            -1.0
        } else {
            5.0 + row as f32 + col as f32 * 0.5
        };
        RangePixel::new(range, 0.1 * col as f32, 0.01 * row as f32, row == 0 && col == 1)
    }))
}

fn second_return(height: usize, width: usize) -> RangeImage {
    RangeImage::new(Array2::from_shape_fn((height, width), |(row, col)| {
        let range = if col % 3 == 0 { 20.0 + row as f32 } else { -1.0 };
        RangePixel::new(range, 0.5, 0.0, false)
    }))
}

fn camera_projection(height: usize, width: usize) -> CameraProjection {
    CameraProjection::new(Array2::from_shape_fn((height, width), |(row, col)| {
        let primary = if col < width / 2 {
            CameraHit::new(CameraName::Front, col as i32 * 10, row as i32 * 10)
        } else {
            CameraHit::default()
        };
        let secondary = if row % 2 == 0 {
            CameraHit::new(CameraName::SideLeft, col as i32, row as i32)
        } else {
            CameraHit::default()
        };
        PixelProjection::new(primary, secondary)
    }))
}

/// A top laser with per-pixel pose (4x8 grid) and a front laser (4x6 grid).
/// Every fifth diagonal pixel of the first return has no return, the second
/// return only has every third column.
#[fixture]
pub fn sample_frame_data() -> SampleFrameData {
    let top = LaserCalibration::new(
        LaserName::Top,
        Transform::from_roll_pitch_yaw(0.0, 0.0, 0.1, &Vector3::new(1.4, 0.0, 2.2)),
        BeamInclinations::Uniform {
            min: -0.3,
            max: 0.05,
        },
    );
    let front = LaserCalibration::new(
        LaserName::Front,
        Transform::from_roll_pitch_yaw(0.0, 0.05, 0.0, &Vector3::new(4.0, 0.0, 0.5)),
        BeamInclinations::Explicit(vec![-1.2, -0.6, -0.2, 0.3]),
    );
    let frame = Frame::new(vec![top, front], 1_550_083_467_346_370);

    let mut range_images = HashMap::new();
    let mut camera_projections = HashMap::new();
    for (laser, (height, width)) in [(LaserName::Top, (4, 8)), (LaserName::Front, (4, 6))] {
        range_images.insert(
            laser,
            [first_return(height, width), second_return(height, width)],
        );
        camera_projections.insert(
            laser,
            [
                camera_projection(height, width),
                camera_projection(height, width),
            ],
        );
    }

    SampleFrameData {
        frame,
        range_images,
        camera_projections,
        top_pose: RangeImageTopPose::constant(4, 8, PixelPose::default()),
    }
}

/// One laser without per-pixel pose, identity extrinsic and the given ranges
/// on both returns. The primary camera hit of each pixel stores its row-major
/// index in `x`.
pub fn single_laser_data(ranges: &Array2<f32>, beam_inclinations: BeamInclinations) -> SampleFrameData {
    let (height, width) = ranges.dim();
    let laser = LaserName::Front;
    let frame = Frame::new(
        vec![LaserCalibration::new(laser, Transform::eye(), beam_inclinations)],
        0,
    );

    let range_image = RangeImage::from_ranges(ranges);
    let projection = CameraProjection::new(Array2::from_shape_fn((height, width), |(row, col)| {
        PixelProjection::new(
            CameraHit::new(CameraName::Front, (row * width + col) as i32, 0),
            CameraHit::default(),
        )
    }));

    SampleFrameData {
        frame,
        range_images: HashMap::from([(laser, [range_image.clone(), range_image])]),
        camera_projections: HashMap::from([(laser, [projection.clone(), projection])]),
        top_pose: RangeImageTopPose::constant(height, width, PixelPose::default()),
    }
}

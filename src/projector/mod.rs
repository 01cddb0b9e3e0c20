mod projector_params;
pub use projector_params::ProjectorParams;

mod frame_projection;
pub use frame_projection::FrameProjection;

mod range_image_projector;
pub use range_image_projector::{CameraProjections, RangeImageProjector, RangeImages};

use crate::error::Result;
use crate::frame::Frame;
use crate::range_image::RangeImageTopPose;

/// Projects one return of every laser with the default parameters.
/// See [`RangeImageProjector::project`].
pub fn project(
    frame: &Frame,
    range_images: &RangeImages,
    camera_projections: &CameraProjections,
    top_pose: Option<&RangeImageTopPose>,
    return_index: usize,
) -> Result<FrameProjection> {
    RangeImageProjector::default().project(
        frame,
        range_images,
        camera_projections,
        top_pose,
        return_index,
    )
}

pub mod camera;
pub mod error;
pub mod frame;
pub mod laser;
pub mod pointcloud;
pub mod projector;
pub mod range_image;
pub mod transform;

#[cfg(test)]
mod unit_test;

pub use crate::error::{Error, Result};
pub use crate::projector::{project, FrameProjection, ProjectorParams, RangeImageProjector};

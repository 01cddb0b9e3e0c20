mod range_image;
pub use range_image::{RangeImage, RangePixel, ReturnIndex};

mod pixel_pose;
pub use pixel_pose::{PixelPose, RangeImageTopPose};

mod polar;
pub use polar::{column_azimuths, BeamGeometry};

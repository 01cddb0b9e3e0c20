mod frames;
pub(crate) use frames::{sample_frame_data, single_laser_data, SampleFrameData};

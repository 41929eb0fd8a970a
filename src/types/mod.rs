pub mod motion_sample;

pub use motion_sample::{Acceleration, MotionSample, SampleError};

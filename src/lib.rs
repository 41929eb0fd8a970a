//! Shake gesture detection over a stream of device motion samples.
//!
//! A [`ShakeObserver`] listens on a [`MotionEventTarget`], remembers the
//! previous acceleration reading and fires its callback when at least two
//! axes change by more than `threshold` at once, no more often than every
//! `interval` milliseconds.
//!
//! ```
//! use std::rc::Rc;
//! use shake_observer::{ManualClock, MotionEventTarget, MotionSample, PartialConfig, ShakeObserver};
//!
//! let target = Rc::new(MotionEventTarget::new(true));
//! let observer = ShakeObserver::with_target(
//!     Rc::clone(&target),
//!     Rc::new(ManualClock::new(0)),
//!     |sample| println!("shake: {:?}", sample),
//!     Some(PartialConfig::new().interval(0)),
//! );
//!
//! target.dispatch(&MotionSample::new(0.0, 0.0, 9.8, 0));
//! target.dispatch(&MotionSample::new(20.0, 20.0, 9.8, 16));
//! observer.disconnect();
//! ```

pub mod config;
pub mod logger;
pub mod merge;
pub mod observer;
pub mod platform;
pub mod replay;
pub mod types;
pub mod utils;

pub use config::{Config, ConfigError, ConfigManager, PartialConfig};
pub use merge::{merge, Merge};
pub use observer::ShakeObserver;
pub use platform::{Clock, ManualClock, MotionEventTarget, SystemClock};
pub use types::{Acceleration, MotionSample, SampleError};

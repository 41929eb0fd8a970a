//! 样本回放：读取线程解析样本，经有界通道交给事件线程逐个分发
//!
//! Samples are stamped onto a [`ManualClock`] before dispatch so debounce
//! decisions follow the recorded timeline rather than replay speed.

pub mod reader;

use std::cell::Cell;
use std::rc::Rc;

use crossbeam_channel::Receiver;
use log::{debug, info, warn};

use crate::config::{Config, PartialConfig};
use crate::observer::ShakeObserver;
use crate::platform::{Clock, ManualClock, MotionEventTarget};
use crate::types::MotionSample;
use crate::utils::format_timestamp;

pub use reader::{read_samples, run_sample_reader, ReaderStats, ReplayError};

/// 通道容量
pub const SAMPLE_CHANNEL_CAPACITY: usize = 5000;
/// 样本不带时间戳时假定的采样间隔 (ms)，约 60Hz
pub const DEFAULT_SAMPLE_PERIOD_MS: i64 = 16;

/// 回放结果
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub dispatched: usize,
    pub shakes: usize,
}

/// Drives one observer with every sample from `receiver` until the channel
/// closes. A lazy configuration is honoured by starting observation only
/// once the first sample arrives.
pub fn replay(receiver: Receiver<MotionSample>, config: Config) -> ReplaySummary {
    let clock = ManualClock::new(0);
    let target = Rc::new(MotionEventTarget::new(true));
    let shakes = Rc::new(Cell::new(0usize));

    let observer = {
        let shakes = Rc::clone(&shakes);
        ShakeObserver::with_target(
            Rc::clone(&target),
            Rc::new(clock.clone()),
            move |sample: &MotionSample| {
                shakes.set(shakes.get() + 1);
                info!(
                    "Shake #{} detected at {}",
                    shakes.get(),
                    format_timestamp(sample.timestamp)
                );
            },
            Some(PartialConfig::from(config)),
        )
    };

    let mut summary = ReplaySummary::default();
    for sample in receiver.iter() {
        if sample.timestamp > 0 {
            clock.set(sample.timestamp);
        } else {
            clock.advance(DEFAULT_SAMPLE_PERIOD_MS);
            if clock.now_ms() == i64::MAX {
                warn!("Replay clock saturated, sample timestamps are out of range");
            }
        }

        if !observer.is_observing() {
            debug!("Lazy observer started at {}", clock.now_ms());
            observer.observe();
        }

        target.dispatch(&sample);
        summary.dispatched += 1;
    }

    summary.shakes = shakes.get();
    summary
}

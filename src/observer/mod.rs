//! 摇一摇观测器
//!
//! 订阅运动事件目标，保存上一次读数与上一次触发时间，对每个样本判定：
//! 至少两个轴的加速度变化量同时超过阈值，且距上次触发不少于 `interval`
//! 毫秒时，调用用户回调。

mod state;

use log::{debug, warn};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::config::{Config, PartialConfig};
use crate::merge::merge;
use crate::platform::{self, Clock, Listener, MotionEventTarget, SystemClock};
use crate::types::MotionSample;

use state::{Detection, ObserverState};

type Callback = Box<dyn FnMut(&MotionSample)>;

fn warn_unsupported() {
    warn!("This device does not support devicemotion events, ShakeObserver cannot work properly");
}

/// 监听器闭包与观测器共享的部分
struct Shared {
    config: Config,
    clock: Rc<dyn Clock>,
    state: RefCell<ObserverState>,
    callback: RefCell<Option<Callback>>,
    in_callback: Cell<bool>,
}

impl Shared {
    fn handle_motion(&self, sample: &MotionSample) {
        if self.in_callback.get() {
            debug!("Motion sample dispatched from inside the shake callback, dropped");
            return;
        }

        let Some(current) = sample.acceleration_including_gravity else {
            warn!("Motion sample carries no acceleration data, discarded");
            return;
        };

        let now = self.clock.now_ms();
        let detection = self.state.borrow_mut().evaluate(current, now, &self.config);

        match detection {
            Detection::Seeded => return,
            Detection::Quiet => {}
            Detection::Shake => {
                self.invoke_callback(sample);
                self.state.borrow_mut().mark_emitted(self.clock.now_ms());
            }
        }

        self.state.borrow_mut().remember(current);
    }

    fn invoke_callback(&self, sample: &MotionSample) {
        // 回调执行期间从槽中取出，这样回调内可以安全地替换回调或断开观测
        let taken = self.callback.borrow_mut().take();
        let Some(mut callback) = taken else {
            return;
        };

        self.in_callback.set(true);
        callback(sample);
        self.in_callback.set(false);

        let mut slot = self.callback.borrow_mut();
        if slot.is_none() {
            *slot = Some(callback);
        }
    }
}

/// Detects shake gestures on a motion event target.
///
/// The observer registers exactly one listener, created at construction and
/// reused for every `observe`/`disconnect`. Dropping the observer
/// unsubscribes it.
///
/// ```no_run
/// use shake_observer::{PartialConfig, ShakeObserver};
///
/// let observer = ShakeObserver::new(
///     |sample| println!("shake at {}", sample.timestamp),
///     Some(PartialConfig::new().threshold(20.0)),
/// );
/// assert!(observer.is_observing());
/// ```
pub struct ShakeObserver {
    shared: Rc<Shared>,
    target: Rc<MotionEventTarget>,
    listener: Listener,
}

impl ShakeObserver {
    /// 设备是否支持运动事件（进程内只探测一次）
    pub fn workable() -> bool {
        platform::motion_supported()
    }

    /// 在当前线程的默认事件目标上创建观测器，使用系统时间
    pub fn new<F>(callback: F, config: Option<PartialConfig>) -> Self
    where
        F: FnMut(&MotionSample) + 'static,
    {
        Self::with_target(platform::window(), Rc::new(SystemClock), callback, config)
    }

    pub fn with_target<F>(
        target: Rc<MotionEventTarget>,
        clock: Rc<dyn Clock>,
        callback: F,
        config: Option<PartialConfig>,
    ) -> Self
    where
        F: FnMut(&MotionSample) + 'static,
    {
        if !target.is_supported() {
            warn_unsupported();
        }

        let config = merge(&Config::default(), &config.unwrap_or_default());
        let shared = Rc::new(Shared {
            config,
            state: RefCell::new(ObserverState::new(clock.now_ms())),
            clock,
            callback: RefCell::new(Some(Box::new(callback))),
            in_callback: Cell::new(false),
        });

        let weak: Weak<Shared> = Rc::downgrade(&shared);
        let listener: Listener = Rc::new(move |sample: &MotionSample| {
            if let Some(shared) = weak.upgrade() {
                shared.handle_motion(sample);
            }
        });

        let observer = Self {
            shared,
            target,
            listener,
        };

        if !config.lazy {
            observer.observe();
        }

        observer
    }

    /// 开始监听运动事件
    pub fn observe(&self) {
        let mut state = self.shared.state.borrow_mut();
        if state.observing {
            return;
        }

        state.reset(self.shared.clock.now_ms());
        self.target.subscribe(&self.listener);
        state.observing = true;
        debug!("ShakeObserver started observing");
    }

    /// 取消监听运动事件
    pub fn disconnect(&self) {
        self.target.unsubscribe(&self.listener);
        let mut state = self.shared.state.borrow_mut();
        if state.observing {
            debug!("ShakeObserver disconnected");
        }
        state.observing = false;
    }

    pub fn is_observing(&self) -> bool {
        self.shared.state.borrow().observing
    }

    /// 生效配置
    pub fn config(&self) -> Config {
        self.shared.config
    }

    /// 替换回调，下一次触发时生效
    pub fn set_callback<F>(&self, callback: F)
    where
        F: FnMut(&MotionSample) + 'static,
    {
        *self.shared.callback.borrow_mut() = Some(Box::new(callback));
    }
}

impl Drop for ShakeObserver {
    fn drop(&mut self) {
        self.target.unsubscribe(&self.listener);
    }
}

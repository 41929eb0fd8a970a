//! 宿主平台抽象：事件目标、能力探测与时钟

pub mod capability;
pub mod clock;
pub mod target;

use std::rc::Rc;

pub use capability::motion_supported;
pub use clock::{Clock, ManualClock, SystemClock};
pub use target::{Listener, MotionEventTarget};

thread_local! {
    static WINDOW: Rc<MotionEventTarget> = Rc::new(MotionEventTarget::new(motion_supported()));
}

/// The default event target of the current thread.
pub fn window() -> Rc<MotionEventTarget> {
    WINDOW.with(Rc::clone)
}

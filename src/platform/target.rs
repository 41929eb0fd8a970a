use std::cell::RefCell;
use std::rc::Rc;

use crate::types::MotionSample;

/// 运动事件监听器，按引用身份注册与注销
pub type Listener = Rc<dyn Fn(&MotionSample)>;

fn same_listener(a: &Listener, b: &Listener) -> bool {
    Rc::as_ptr(a).cast::<()>() == Rc::as_ptr(b).cast::<()>()
}

/// Registry of motion listeners, the host's event target.
///
/// Registering the same listener twice is a no-op, and removal matches by
/// identity. Listeners may subscribe or unsubscribe while a dispatch is in
/// progress; a listener removed mid-dispatch is not called afterwards.
pub struct MotionEventTarget {
    supported: bool,
    listeners: RefCell<Vec<Listener>>,
}

impl MotionEventTarget {
    pub fn new(supported: bool) -> Self {
        Self {
            supported,
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// 该目标是否真的会产生运动事件
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    pub fn subscribe(&self, listener: &Listener) {
        let mut listeners = self.listeners.borrow_mut();
        if !listeners.iter().any(|l| same_listener(l, listener)) {
            listeners.push(Rc::clone(listener));
        }
    }

    pub fn unsubscribe(&self, listener: &Listener) {
        self.listeners
            .borrow_mut()
            .retain(|l| !same_listener(l, listener));
    }

    pub fn is_subscribed(&self, listener: &Listener) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|l| same_listener(l, listener))
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// 将样本分发给所有监听器，返回实际调用的监听器数量
    pub fn dispatch(&self, sample: &MotionSample) -> usize {
        let snapshot: Vec<Listener> = self.listeners.borrow().clone();
        let mut delivered = 0;

        for listener in &snapshot {
            // 分发过程中被注销的监听器不再调用
            if self.is_subscribed(listener) {
                listener(sample);
                delivered += 1;
            }
        }

        delivered
    }
}

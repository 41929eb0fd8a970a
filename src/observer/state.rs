use crate::config::Config;
use crate::types::Acceleration;

/// 单个样本的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Detection {
    /// 重置后的首个样本，只用于记录初始读数
    Seeded,
    Quiet,
    Shake,
}

/// 观测器的滚动状态，只由所属观测器修改
#[derive(Debug, Clone)]
pub(crate) struct ObserverState {
    pub last_sample: Option<Acceleration>,
    pub last_emit_time: i64,
    pub observing: bool,
}

impl ObserverState {
    pub fn new(now_ms: i64) -> Self {
        Self {
            last_sample: None,
            last_emit_time: now_ms,
            observing: false,
        }
    }

    /// 开始观测时重置
    pub fn reset(&mut self, now_ms: i64) {
        self.last_sample = None;
        self.last_emit_time = now_ms;
    }

    /// A stored triple with every axis missing counts as unset.
    pub fn is_seeded(&self) -> bool {
        self.last_sample.map_or(false, |last| !last.is_empty())
    }

    /// Seeds on the first reading; otherwise applies the threshold and
    /// interval rule. Does not record the reading: the caller does that via
    /// [`ObserverState::remember`] after any callback has run.
    pub fn evaluate(&mut self, current: Acceleration, now_ms: i64, config: &Config) -> Detection {
        let last = match self.last_sample {
            Some(last) if self.is_seeded() => last,
            _ => {
                self.last_sample = Some(current);
                return Detection::Seeded;
            }
        };

        let elapsed = now_ms.saturating_sub(self.last_emit_time);
        let interval = i64::try_from(config.interval).unwrap_or(i64::MAX);

        if elapsed >= interval && exceeds_on_two_axes(last.abs_delta(&current), config.threshold) {
            Detection::Shake
        } else {
            Detection::Quiet
        }
    }

    pub fn mark_emitted(&mut self, now_ms: i64) {
        self.last_emit_time = now_ms;
    }

    pub fn remember(&mut self, current: Acceleration) {
        self.last_sample = Some(current);
    }
}

/// 至少两个轴的变化量同时严格大于阈值
pub(crate) fn exceeds_on_two_axes(delta: [f64; 3], threshold: f64) -> bool {
    let [dx, dy, dz] = delta.map(|d| d > threshold);
    (dx && dy) || (dx && dz) || (dy && dz)
}

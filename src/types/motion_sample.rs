use serde::{Deserialize, Serialize};

/// 含重力加速度的三轴读数，任一分量都可能缺失
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Acceleration {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub z: Option<f64>,
}

impl Acceleration {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    /// True when no axis carries a value.
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none()
    }

    /// Absolute per-axis difference `[dx, dy, dz]`. A missing component reads as `0.0`.
    pub fn abs_delta(&self, other: &Acceleration) -> [f64; 3] {
        let axis = |a: Option<f64>, b: Option<f64>| (a.unwrap_or(0.0) - b.unwrap_or(0.0)).abs();
        [
            axis(self.x, other.x),
            axis(self.y, other.y),
            axis(self.z, other.z),
        ]
    }
}

/// 单个 devicemotion 样本
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MotionSample {
    #[serde(default)]
    pub acceleration_including_gravity: Option<Acceleration>,
    /// 毫秒时间戳，缺省为 0
    #[serde(default)]
    pub timestamp: i64,
}

impl MotionSample {
    pub fn new(x: f64, y: f64, z: f64, timestamp: i64) -> Self {
        Self {
            acceleration_including_gravity: Some(Acceleration::new(x, y, z)),
            timestamp,
        }
    }

    pub fn from_acceleration(acceleration: Acceleration, timestamp: i64) -> Self {
        Self {
            acceleration_including_gravity: Some(acceleration),
            timestamp,
        }
    }

    /// A sample whose sensor reported nothing, as some hosts deliver on startup.
    pub fn without_acceleration(timestamp: i64) -> Self {
        Self {
            acceleration_including_gravity: None,
            timestamp,
        }
    }

    /// 解析一条 JSON 格式的样本
    pub fn from_payload(payload: &[u8]) -> Result<Self, SampleError> {
        let payload_str = std::str::from_utf8(payload).map_err(SampleError::InvalidUtf8)?;

        serde_json::from_str::<MotionSample>(payload_str.trim()).map_err(SampleError::Json)
    }
}

/// 样本解析错误
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(std::str::Utf8Error),
    #[error("JSON parsing error: {0}")]
    Json(serde_json::Error),
}

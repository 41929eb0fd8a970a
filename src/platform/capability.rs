use log::debug;
use std::path::Path;
use std::sync::OnceLock;

/// Linux IIO 设备目录
const IIO_DEVICES_DIR: &str = "/sys/bus/iio/devices";
/// 加速度计通道文件
const ACCEL_CHANNEL: &str = "in_accel_x_raw";

static MOTION_SUPPORTED: OnceLock<bool> = OnceLock::new();

/// 当前主机是否提供运动传感器，进程内只探测一次
pub fn motion_supported() -> bool {
    *MOTION_SUPPORTED.get_or_init(|| {
        let supported = probe_accelerometer(Path::new(IIO_DEVICES_DIR));
        debug!("Motion sensor support probed: {}", supported);
        supported
    })
}

/// Looks for any IIO device exposing an accelerometer channel under `root`.
fn probe_accelerometer(root: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(root) else {
        return false;
    };

    entries
        .flatten()
        .any(|entry| entry.path().join(ACCEL_CHANNEL).exists())
}

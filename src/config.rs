use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::merge::{overlay_field, Merge};

/// 摇一摇检测配置管理模块
/// 提供默认值、部分配置叠加以及从 TOML 文件加载

/// 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "SHAKE_CONFIG";

/// 生效配置，三个字段总是完整的
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// 触发摇一摇的加速度差阈值
    pub threshold: f64,
    /// 两次触发之间的最小间隔 (ms)
    pub interval: u64,
    /// 为 true 时实例化后不自动开始观测
    pub lazy: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: 15.0,
            interval: 100,
            lazy: false,
        }
    }
}

/// 用户提供的部分配置，`None` 表示沿用默认值
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lazy: Option<bool>,
}

impl PartialConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn interval(mut self, interval: u64) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn lazy(mut self, lazy: bool) -> Self {
        self.lazy = Some(lazy);
        self
    }

    /// 解析 TOML 文本，未知的键会被忽略
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::ParseError)
    }

    /// 从文件加载部分配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;

        Self::from_toml_str(&content)
    }
}

impl From<Config> for PartialConfig {
    fn from(config: Config) -> Self {
        Self {
            threshold: Some(config.threshold),
            interval: Some(config.interval),
            lazy: Some(config.lazy),
        }
    }
}

impl Merge<PartialConfig> for Config {
    fn merge(&self, overlay: &PartialConfig) -> Self {
        Self {
            threshold: overlay_field(&self.threshold, &overlay.threshold),
            interval: overlay_field(&self.interval, &overlay.interval),
            lazy: overlay_field(&self.lazy, &overlay.lazy),
        }
    }
}

impl Config {
    /// 从文件加载：文件内容叠加到默认值之上，然后校验
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let overlay = PartialConfig::load_from_file(path)?;
        let config = Config::default().merge(&overlay);

        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;

        std::fs::write(path, content).map_err(ConfigError::IoError)?;

        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() {
            return Err(ConfigError::ValidationError(
                "Threshold must be a finite number".to_string(),
            ));
        }

        if self.threshold < 0.0 {
            return Err(ConfigError::ValidationError(
                "Threshold must not be negative".to_string(),
            ));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(toml::de::Error),
    #[error("Serialize error: {0}")]
    SerializeError(toml::ser::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// 配置管理器
pub struct ConfigManager {
    config: Config,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// 创建使用默认配置的管理器
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            config_path: None,
        }
    }

    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Config::load_from_file(&path)?;
        Ok(Self {
            config,
            config_path: Some(path.as_ref().to_path_buf()),
        })
    }

    /// 若设置了 `SHAKE_CONFIG` 则从该路径加载，否则使用默认配置
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::load_from_file(PathBuf::from(path)),
            None => Ok(Self::new()),
        }
    }

    /// 获取当前配置
    pub fn get_config(&self) -> &Config {
        &self.config
    }

    /// 配置来源文件
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merge;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.threshold, 15.0);
        assert_eq!(config.interval, 100);
        assert!(!config.lazy);
    }

    #[test]
    fn test_merge_identity() {
        let base = Config {
            threshold: 3.5,
            interval: 40,
            lazy: true,
        };
        assert_eq!(merge(&base, &PartialConfig::new()), base);
    }

    #[test]
    fn test_merge_override_single_key() {
        let base = Config::default();

        let merged = merge(&base, &PartialConfig::new().threshold(20.0));
        assert_eq!(merged.threshold, 20.0);
        assert_eq!(merged.interval, base.interval);
        assert_eq!(merged.lazy, base.lazy);

        let merged = merge(&base, &PartialConfig::new().interval(0));
        assert_eq!(merged.interval, 0);
        assert_eq!(merged.threshold, base.threshold);

        let merged = merge(&base, &PartialConfig::new().lazy(true));
        assert!(merged.lazy);
        assert_eq!(merged.interval, base.interval);
    }

    #[test]
    fn test_merge_skips_none() {
        let overlay = PartialConfig {
            threshold: None,
            interval: Some(250),
            lazy: None,
        };
        let merged = Config::default().merge(&overlay);
        assert_eq!(merged.threshold, 15.0);
        assert_eq!(merged.interval, 250);
        assert!(!merged.lazy);
    }

    #[test]
    fn test_overlay_only_keys_are_dropped() {
        let overlay = PartialConfig::from_toml_str("threshold = 9.5\nsensitivity = \"high\"\n").unwrap();
        assert_eq!(overlay, PartialConfig::new().threshold(9.5));

        let merged = Config::default().merge(&overlay);
        assert_eq!(merged.threshold, 9.5);
        assert_eq!(merged.interval, 100);
    }

    #[test]
    fn test_partial_from_full_config() {
        let config = Config {
            threshold: 1.0,
            interval: 2,
            lazy: true,
        };
        assert_eq!(Config::default().merge(&PartialConfig::from(config)), config);
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let config = Config {
            threshold: f64::NAN,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        let config = Config {
            threshold: -1.0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_load_config_success() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("shake.toml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "interval = 300\nlazy = true").unwrap();
        file.flush().unwrap();

        let manager = ConfigManager::load_from_file(&file_path).unwrap();
        let config = manager.get_config();
        assert_eq!(config.interval, 300);
        assert!(config.lazy);
        // 未给出的字段使用默认值
        assert_eq!(config.threshold, 15.0);
        assert_eq!(manager.config_path(), Some(file_path.as_path()));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = Config::load_from_file("nonexistent_shake.toml");
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bad.toml");
        std::fs::write(&file_path, "threshold = [").unwrap();
        assert!(matches!(
            Config::load_from_file(&file_path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_config_rejects_negative_threshold() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("negative.toml");
        std::fs::write(&file_path, "threshold = -4.0").unwrap();
        assert!(matches!(
            Config::load_from_file(&file_path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("saved.toml");
        let config = Config {
            threshold: 12.5,
            interval: 80,
            lazy: true,
        };
        config.save_to_file(&file_path).unwrap();
        assert_eq!(Config::load_from_file(&file_path).unwrap(), config);
    }
}

//! 协调器配置
//!
//! 所有节拍、阈值、速度和遥控键码都集中在 [`RoverConfig`] 中，
//! 可以从 TOML 文件加载。缺省的节或字段使用默认值：
//!
//! ```toml
//! [timing]
//! sensor_refresh_ms = 100
//! telemetry_ms = 30000
//!
//! [thresholds]
//! obstacle_cm = 25.0
//! light_level = 400
//!
//! [remote]
//! auto = 0xFF52AD
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rover_protocol::{REMOTE_NONE, REMOTE_REPEAT, RemoteKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// 协调器配置
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoverConfig {
    pub timing: TimingConfig,
    pub thresholds: ThresholdConfig,
    pub drive: DriveConfig,
    pub remote: RemoteKeymap,
    pub boot: BootConfig,
}

impl RoverConfig {
    /// 从 TOML 字符串解析并校验
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RoverConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载并校验
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// 序列化为 TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 校验取值范围
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timing.validate()?;
        self.thresholds.validate()?;
        self.drive.validate()?;
        self.remote.validate()?;
        Ok(())
    }
}

/// 周期任务节拍（毫秒）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// 传感器快照刷新
    pub sensor_refresh_ms: u64,
    /// 累计里程积分
    pub cumulative_metrics_ms: u64,
    /// 遥测帧发送
    pub telemetry_ms: u64,
    /// 等待链路时的提示刷新
    pub link_prompt_ms: u64,
    /// 行驶指示灯闪烁
    pub indicator_blink_ms: u64,
    /// 遥控指令失效窗口
    pub remote_decay_ms: u64,
    /// 启动画面停留时间（可以为 0）
    pub boot_logo_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            sensor_refresh_ms: 100,
            cumulative_metrics_ms: 20,
            telemetry_ms: 30_000,
            link_prompt_ms: 3_000,
            indicator_blink_ms: 200,
            remote_decay_ms: 150,
            boot_logo_ms: 2_000,
        }
    }
}

impl TimingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let intervals = [
            ("sensor_refresh_ms", self.sensor_refresh_ms),
            ("cumulative_metrics_ms", self.cumulative_metrics_ms),
            ("telemetry_ms", self.telemetry_ms),
            ("link_prompt_ms", self.link_prompt_ms),
            ("indicator_blink_ms", self.indicator_blink_ms),
            ("remote_decay_ms", self.remote_decay_ms),
        ];
        for (name, value) in intervals {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("timing.{} must be > 0", name)));
            }
        }
        Ok(())
    }
}

/// 判定阈值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// 障碍物距离阈值（cm），有效读数小于该值即视为障碍物
    pub obstacle_cm: f32,
    /// 环境光阈值，低于该值开启大灯（单阈值，无回差）
    pub light_level: u16,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            obstacle_cm: 25.0,
            light_level: 400,
        }
    }
}

impl ThresholdConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.obstacle_cm.is_finite() || self.obstacle_cm <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "thresholds.obstacle_cm must be a positive number, got {}",
                self.obstacle_cm
            )));
        }
        Ok(())
    }
}

/// 驱动参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// 手动模式 PWM
    pub manual_speed: u8,
    /// 自动巡线 PWM
    pub auto_speed: u8,
    /// PWM=255 时的实际速度（cm/s），用于里程估算，需按车体标定
    pub max_speed_cm_s: f64,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            manual_speed: 150,
            auto_speed: 200,
            max_speed_cm_s: 15.0,
        }
    }
}

impl DriveConfig {
    /// 标定速度上限（cm/s）
    pub const MAX_SPEED_LIMIT_CM_S: f64 = 1000.0;

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_speed_cm_s.is_finite()
            || !(0.0..=Self::MAX_SPEED_LIMIT_CM_S).contains(&self.max_speed_cm_s)
        {
            return Err(ConfigError::Invalid(format!(
                "drive.max_speed_cm_s must be within [0, {}], got {}",
                Self::MAX_SPEED_LIMIT_CM_S,
                self.max_speed_cm_s
            )));
        }
        Ok(())
    }
}

/// 遥控键码表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteKeymap {
    pub auto: u32,
    pub manual: u32,
    pub forward: u32,
    pub backward: u32,
    pub left: u32,
    pub right: u32,
    pub stop: u32,
    pub rotate_left: u32,
    pub rotate_right: u32,
    pub lights_on: u32,
    pub lights_off: u32,
}

impl Default for RemoteKeymap {
    fn default() -> Self {
        Self {
            auto: RemoteKey::AutoMode.default_code(),
            manual: RemoteKey::ManualMode.default_code(),
            forward: RemoteKey::Forward.default_code(),
            backward: RemoteKey::Backward.default_code(),
            left: RemoteKey::TurnLeft.default_code(),
            right: RemoteKey::TurnRight.default_code(),
            stop: RemoteKey::Stop.default_code(),
            rotate_left: RemoteKey::RotateLeft.default_code(),
            rotate_right: RemoteKey::RotateRight.default_code(),
            lights_on: RemoteKey::LightsOn.default_code(),
            lights_off: RemoteKey::LightsOff.default_code(),
        }
    }
}

impl RemoteKeymap {
    /// 按键对应的码值
    pub fn code_for(&self, key: RemoteKey) -> u32 {
        match key {
            RemoteKey::AutoMode => self.auto,
            RemoteKey::ManualMode => self.manual,
            RemoteKey::Forward => self.forward,
            RemoteKey::Backward => self.backward,
            RemoteKey::TurnLeft => self.left,
            RemoteKey::TurnRight => self.right,
            RemoteKey::Stop => self.stop,
            RemoteKey::RotateLeft => self.rotate_left,
            RemoteKey::RotateRight => self.rotate_right,
            RemoteKey::LightsOn => self.lights_on,
            RemoteKey::LightsOff => self.lights_off,
        }
    }

    /// 码值对应的按键，未登记的码返回 `None`
    pub fn key_for(&self, code: u32) -> Option<RemoteKey> {
        if code == REMOTE_NONE || code == REMOTE_REPEAT {
            return None;
        }
        RemoteKey::ALL
            .into_iter()
            .find(|key| self.code_for(*key) == code)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for key in RemoteKey::ALL {
            let code = self.code_for(key);
            if code == REMOTE_NONE || code == REMOTE_REPEAT {
                return Err(ConfigError::Invalid(format!(
                    "remote.{} uses reserved code 0x{:X}",
                    key.name(),
                    code
                )));
            }
            if !seen.insert(code) {
                return Err(ConfigError::Invalid(format!(
                    "remote.{} duplicates code 0x{:X}",
                    key.name(),
                    code
                )));
            }
        }
        Ok(())
    }
}

/// 启动阶段与点阵屏文字
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    /// 启动时滚动显示的字幕
    pub banner: String,
    /// 等待链路时显示的提示
    pub link_prompt: String,
    /// 滚动速度（每列毫秒数）
    pub scroll_speed: u16,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            banner: "Robot Start".to_string(),
            link_prompt: "Connect Bluetooth".to_string(),
            scroll_speed: 50,
        }
    }
}

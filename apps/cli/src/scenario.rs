//! 仿真场景脚本
//!
//! TOML 格式，每个 `[[step]]` 在虚拟时钟到达 `at_ms` 时生效：
//!
//! ```toml
//! name = "obstacle ahead"
//!
//! [[step]]
//! at_ms = 2500
//! link = "connect"
//!
//! [[step]]
//! at_ms = 4000
//! distance = 12.5
//! line = "010"
//!
//! [[step]]
//! at_ms = 6000
//! remote = "manual"
//! hold = 3
//! ```
//!
//! - `distance`：测距读数（cm），-1 表示超时
//! - `light`：环境光原始读数
//! - `line`：左中右三位，`1` 表示在线上
//! - `remote`：按键名（`auto`、`forward`……）或十六进制码值
//! - `hold`：按键之后追加的重复帧数
//! - `link`：`connect` / `lost`，或者任意一行原始串口通知

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use rover_control::RemoteKeymap;
use rover_hal::LineReading;
use rover_hal::mock::MockRig;
use rover_protocol::RemoteKey;
use rover_protocol::link::{NOTIFY_CONNECTED, NOTIFY_LOST};
use serde::Deserialize;

/// 场景脚本
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    /// 场景名称
    #[serde(default)]
    pub name: Option<String>,

    /// 按时间排序的步骤
    #[serde(default)]
    pub step: Vec<Step>,
}

/// 单个步骤
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Step {
    pub at_ms: u64,
    pub distance: Option<f32>,
    pub light: Option<u16>,
    pub line: Option<String>,
    pub remote: Option<String>,
    #[serde(default)]
    pub hold: usize,
    pub link: Option<String>,
}

impl Scenario {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid scenario {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut scenario: Scenario = toml::from_str(content)?;
        scenario.step.sort_by_key(|step| step.at_ms);
        Ok(scenario)
    }
}

impl Step {
    /// 把步骤注入 mock 外设
    pub fn apply(&self, rig: &MockRig, keymap: &RemoteKeymap) -> Result<()> {
        if let Some(distance) = self.distance {
            rig.distance.set(distance);
        }
        if let Some(light) = self.light {
            rig.light.set(light);
        }
        if let Some(line) = &self.line {
            rig.line.set(parse_line(line)?);
        }
        if let Some(remote) = &self.remote {
            rig.remote.press(parse_remote(remote, keymap)?);
            rig.remote.hold(self.hold);
        }
        if let Some(link) = &self.link {
            let notification = match link.as_str() {
                "connect" => NOTIFY_CONNECTED,
                "lost" => NOTIFY_LOST,
                raw => raw,
            };
            rig.link.notify(notification);
        }
        Ok(())
    }
}

/// `"010"` -> 左 off、中 on、右 off
pub fn parse_line(text: &str) -> Result<LineReading> {
    let bits: Vec<bool> = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => bail!("Invalid line sensor bit {:?} in {:?}", other, text),
        })
        .collect::<Result<_>>()?;

    match bits.as_slice() {
        [left, middle, right] => Ok(LineReading::new(*left, *middle, *right)),
        _ => bail!("Line reading must have 3 bits, got {:?}", text),
    }
}

/// 按键名或十六进制码值
pub fn parse_remote(text: &str, keymap: &RemoteKeymap) -> Result<u32> {
    if let Some(key) = RemoteKey::from_name(text) {
        return Ok(keymap.code_for(key));
    }
    let hex = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .with_context(|| format!("Unknown remote key {:?}", text))?;
    u32::from_str_radix(hex, 16).with_context(|| format!("Invalid remote code {:?}", text))
}

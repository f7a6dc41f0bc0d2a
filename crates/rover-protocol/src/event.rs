//! 事件通知
//!
//! 事件以字面量字符串 `event:<name>` 的形式立即发送，
//! 与遥测帧共用同一个出站发送原语。

use std::fmt;
use std::str::FromStr;

use crate::ProtocolError;

/// 事件消息前缀
pub const EVENT_PREFIX: &str = "event:";

/// 离散事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// 进入手动模式
    ManualMode,
    /// 进入自动模式
    AutoMode,
    /// 检测到障碍物
    ObstacleDetected,
    /// 环境光不足，自动开启大灯
    HeadlightsOn,
    /// 环境光恢复，自动关闭大灯
    HeadlightsOff,
    /// 遥控开灯
    LightsOn,
    /// 遥控关灯
    LightsOff,
    /// 遥控急停
    EmergencyStop,
}

impl Event {
    pub const ALL: [Event; 8] = [
        Event::ManualMode,
        Event::AutoMode,
        Event::ObstacleDetected,
        Event::HeadlightsOn,
        Event::HeadlightsOff,
        Event::LightsOn,
        Event::LightsOff,
        Event::EmergencyStop,
    ];

    /// 事件名（不含前缀）
    pub fn name(self) -> &'static str {
        match self {
            Event::ManualMode => "manual_mode",
            Event::AutoMode => "auto_mode",
            Event::ObstacleDetected => "obstacle_detected",
            Event::HeadlightsOn => "headlights_on",
            Event::HeadlightsOff => "headlights_off",
            Event::LightsOn => "lights_on",
            Event::LightsOff => "lights_off",
            Event::EmergencyStop => "emergency_stop",
        }
    }

    /// 编码为线上格式 `event:<name>`
    pub fn encode(self) -> String {
        format!("{}{}", EVENT_PREFIX, self.name())
    }

    /// 解析 `event:<name>`
    pub fn decode(line: &str) -> Result<Self, ProtocolError> {
        let name = line
            .trim()
            .strip_prefix(EVENT_PREFIX)
            .ok_or_else(|| ProtocolError::UnrecognizedMessage(line.to_string()))?;
        Event::from_name(name)
    }

    fn from_name(name: &str) -> Result<Self, ProtocolError> {
        Event::ALL
            .into_iter()
            .find(|event| event.name() == name)
            .ok_or_else(|| ProtocolError::UnknownEvent(name.to_string()))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", EVENT_PREFIX, self.name())
    }
}

impl FromStr for Event {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Event::decode(s)
    }
}

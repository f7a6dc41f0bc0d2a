//! 红外遥控键码
//!
//! 解码器输出 32 位 NEC 码。`0` 表示本次轮询没有新码，
//! `0xFFFFFFFF` 是按住按键时发射的重复帧。

/// 无新码
pub const REMOTE_NONE: u32 = 0;

/// 重复帧哨兵（按键持续按住）
pub const REMOTE_REPEAT: u32 = 0xFFFF_FFFF;

/// 默认键码（随车附带的 17 键遥控器）
pub mod codes {
    /// `#`
    pub const AUTO_MODE: u32 = 0xFF52AD;
    /// `*`
    pub const MANUAL_MODE: u32 = 0xFF42BD;
    /// 上箭头
    pub const FORWARD: u32 = 0xFF629D;
    /// 下箭头
    pub const BACKWARD: u32 = 0xFFA857;
    /// 左箭头
    pub const TURN_LEFT: u32 = 0xFF22DD;
    /// 右箭头
    pub const TURN_RIGHT: u32 = 0xFFC23D;
    /// OK
    pub const STOP: u32 = 0xFF02FD;
    /// 4
    pub const ROTATE_LEFT: u32 = 0xFF30CF;
    /// 6
    pub const ROTATE_RIGHT: u32 = 0xFF7A85;
    /// 1
    pub const LIGHTS_ON: u32 = 0xFFE21D;
    /// 2
    pub const LIGHTS_OFF: u32 = 0xFF926D;
}

/// 遥控按键的语义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteKey {
    AutoMode,
    ManualMode,
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    Stop,
    RotateLeft,
    RotateRight,
    LightsOn,
    LightsOff,
}

impl RemoteKey {
    pub const ALL: [RemoteKey; 11] = [
        RemoteKey::AutoMode,
        RemoteKey::ManualMode,
        RemoteKey::Forward,
        RemoteKey::Backward,
        RemoteKey::TurnLeft,
        RemoteKey::TurnRight,
        RemoteKey::Stop,
        RemoteKey::RotateLeft,
        RemoteKey::RotateRight,
        RemoteKey::LightsOn,
        RemoteKey::LightsOff,
    ];

    /// 出厂键码
    pub fn default_code(self) -> u32 {
        match self {
            RemoteKey::AutoMode => codes::AUTO_MODE,
            RemoteKey::ManualMode => codes::MANUAL_MODE,
            RemoteKey::Forward => codes::FORWARD,
            RemoteKey::Backward => codes::BACKWARD,
            RemoteKey::TurnLeft => codes::TURN_LEFT,
            RemoteKey::TurnRight => codes::TURN_RIGHT,
            RemoteKey::Stop => codes::STOP,
            RemoteKey::RotateLeft => codes::ROTATE_LEFT,
            RemoteKey::RotateRight => codes::ROTATE_RIGHT,
            RemoteKey::LightsOn => codes::LIGHTS_ON,
            RemoteKey::LightsOff => codes::LIGHTS_OFF,
        }
    }

    /// 配置文件与命令行中使用的名称
    pub fn name(self) -> &'static str {
        match self {
            RemoteKey::AutoMode => "auto",
            RemoteKey::ManualMode => "manual",
            RemoteKey::Forward => "forward",
            RemoteKey::Backward => "backward",
            RemoteKey::TurnLeft => "left",
            RemoteKey::TurnRight => "right",
            RemoteKey::Stop => "stop",
            RemoteKey::RotateLeft => "rotate_left",
            RemoteKey::RotateRight => "rotate_right",
            RemoteKey::LightsOn => "lights_on",
            RemoteKey::LightsOff => "lights_off",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        RemoteKey::ALL.into_iter().find(|key| key.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_codes_unique_and_not_reserved() {
        let codes: HashSet<u32> = RemoteKey::ALL.iter().map(|k| k.default_code()).collect();
        assert_eq!(codes.len(), RemoteKey::ALL.len());
        assert!(!codes.contains(&REMOTE_NONE));
        assert!(!codes.contains(&REMOTE_REPEAT));
    }

    #[test]
    fn test_names_roundtrip() {
        for key in RemoteKey::ALL {
            assert_eq!(RemoteKey::from_name(key.name()), Some(key));
        }
        assert_eq!(RemoteKey::from_name("turbo"), None);
    }
}

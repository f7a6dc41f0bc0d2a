//! 运行模式定义
//!
//! 协调器同一时刻只处于一个模式。模式的迁移规则由 `rover-control`
//! 负责，本模块只定义取值和遥测帧中使用的线上标签。

use std::fmt;
use std::str::FromStr;

use crate::ProtocolError;

/// 小车顶层运行模式
///
/// # 模式说明
///
/// - **Starting**: 上电初始状态，启动流程结束时离开，之后不再进入
/// - **WaitingLink**: 等待链路连接，电机停止
/// - **Manual**: 红外遥控驾驶
/// - **Auto**: 巡线自动驾驶
/// - **ObstacleDetected**: 自动模式下前方有障碍物，原地等待
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Starting,
    WaitingLink,
    Manual,
    Auto,
    ObstacleDetected,
}

impl Mode {
    /// 全部模式（按声明顺序）
    pub const ALL: [Mode; 5] = [
        Mode::Starting,
        Mode::WaitingLink,
        Mode::Manual,
        Mode::Auto,
        Mode::ObstacleDetected,
    ];

    /// 遥测帧 `mode` 字段使用的标签
    ///
    /// 标签与上位机已有的解析逻辑保持一致（`WAITING_BT`、`OBSTACLE`）。
    pub fn label(self) -> &'static str {
        match self {
            Mode::Starting => "STARTING",
            Mode::WaitingLink => "WAITING_BT",
            Mode::Manual => "MANUAL",
            Mode::Auto => "AUTO",
            Mode::ObstacleDetected => "OBSTACLE",
        }
    }

    /// 从线上标签解析
    pub fn from_label(label: &str) -> Result<Self, ProtocolError> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.label() == label)
            .ok_or_else(|| ProtocolError::UnknownMode(label.to_string()))
    }

    /// 是否处于自动驾驶相关模式（障碍物仲裁只在这些模式下运行）
    pub fn is_autonomous(self) -> bool {
        matches!(self, Mode::Auto | Mode::ObstacleDetected)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::from_label(s)
    }
}

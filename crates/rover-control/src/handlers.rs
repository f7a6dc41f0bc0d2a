//! 模式处理函数表
//!
//! 每个模式对应一个纯函数：输入本 tick 的遥控码、链路状态和巡线决策，
//! 返回目标模式与副作用列表。处理函数不持有状态、不访问外设，
//! 跨 tick 的状态（指示灯、上一条手动指令等）都由协调器保存。

use rover_hal::{DriveCommand, pattern};
use rover_protocol::{Event, Mode, RemoteKey};

use crate::config::{DriveConfig, RemoteKeymap};
use crate::decision::LineCorrection;
use crate::effect::{Activity, DisplayCommand, Effect, Outcome};

/// 处理函数输入
#[derive(Debug, Clone, Copy)]
pub struct HandlerInput<'a> {
    /// 本 tick 解码器的原始码值（未去抖）
    pub raw_command: u32,
    /// 去抖后的当前指令（仅手动模式有意义）
    pub active_command: u32,
    /// 上一个手动 tick 的去抖指令
    pub previous_command: u32,
    pub link_connected: bool,
    /// 本 tick 的巡线决策（仅自动模式有意义）
    pub line: LineCorrection,
    pub keymap: &'a RemoteKeymap,
    pub drive: &'a DriveConfig,
}

pub type Handler = fn(&HandlerInput<'_>) -> Outcome;

/// 按模式查表
pub fn handler_for(mode: Mode) -> Handler {
    match mode {
        Mode::Starting => starting,
        Mode::WaitingLink => waiting_link,
        Mode::Manual => manual,
        Mode::Auto => auto,
        Mode::ObstacleDetected => obstacle,
    }
}

fn is_manual_request(input: &HandlerInput<'_>) -> bool {
    input.raw_command == input.keymap.manual
}

/// 启动阶段：什么都不做，等待 `boot()` 完成
pub fn starting(_input: &HandlerInput<'_>) -> Outcome {
    Outcome::idle()
}

/// 等待链路
pub fn waiting_link(input: &HandlerInput<'_>) -> Outcome {
    if is_manual_request(input) {
        return Outcome::transition(Mode::Manual);
    }
    if input.link_connected {
        return Outcome::transition(Mode::Auto).with_effect(DisplayCommand::Clear);
    }
    Outcome::idle().with_activity(Activity::AwaitingLink)
}

/// 手动遥控
///
/// 切换自动的按键优先检查；其余按键先设定手动速度再执行动作。
/// 灯光与急停按键的事件只在指令变化时发送一次，按住期间不重复。
pub fn manual(input: &HandlerInput<'_>) -> Outcome {
    let key = input.keymap.key_for(input.active_command);

    if key == Some(RemoteKey::AutoMode) {
        let target = if input.link_connected {
            Mode::Auto
        } else {
            Mode::WaitingLink
        };
        return Outcome::transition(target);
    }

    let newly_pressed = input.active_command != input.previous_command;
    let mut outcome = Outcome::idle().with_effect(DriveCommand::SetSpeed(input.drive.manual_speed));

    let motion = match key {
        Some(RemoteKey::Forward) => Some(DriveCommand::Forward),
        Some(RemoteKey::Backward) => Some(DriveCommand::Backward),
        Some(RemoteKey::TurnLeft | RemoteKey::RotateLeft) => Some(DriveCommand::RotateLeft),
        Some(RemoteKey::TurnRight | RemoteKey::RotateRight) => Some(DriveCommand::RotateRight),
        _ => None,
    };
    if let Some(cmd) = motion {
        return with_drive(outcome, cmd);
    }

    let event = match key {
        Some(RemoteKey::LightsOn) => {
            outcome = outcome.with_effect(DisplayCommand::Pattern(pattern::FULL));
            Some(Event::LightsOn)
        }
        Some(RemoteKey::LightsOff) => {
            outcome = outcome.with_effect(DisplayCommand::Clear);
            Some(Event::LightsOff)
        }
        Some(RemoteKey::Stop) => {
            outcome = outcome.with_effect(DriveCommand::Stop);
            Some(Event::EmergencyStop)
        }
        // 无指令、未登记的码或重复按下手动键：停车
        _ => {
            outcome = outcome.with_effect(DriveCommand::Stop);
            None
        }
    };

    match event {
        Some(event) if newly_pressed => outcome.with_effect(event),
        _ => outcome,
    }
}

/// 自动巡线
pub fn auto(input: &HandlerInput<'_>) -> Outcome {
    if is_manual_request(input) {
        return Outcome::transition(Mode::Manual);
    }

    let outcome = Outcome::idle().with_effect(DriveCommand::SetSpeed(input.drive.auto_speed));
    let cmd = match input.line {
        LineCorrection::GoStraight => DriveCommand::Forward,
        LineCorrection::TurnLeft => DriveCommand::TurnLeft,
        LineCorrection::TurnRight => DriveCommand::TurnRight,
        LineCorrection::Stop => DriveCommand::Stop,
    };
    with_drive(outcome, cmd)
}

/// 追加驱动指令，车轮转动时标记为行驶
fn with_drive(outcome: Outcome, cmd: DriveCommand) -> Outcome {
    if cmd.is_motion() {
        outcome.with_effect(cmd).with_activity(Activity::Moving)
    } else {
        outcome.with_effect(cmd)
    }
}

/// 障碍物停车
///
/// 停车由入口动作完成，这里只保持警示灯与警示图案；
/// 退出由传感器刷新时的仲裁或手动键触发。
pub fn obstacle(input: &HandlerInput<'_>) -> Outcome {
    if is_manual_request(input) {
        return Outcome::transition(Mode::Manual);
    }
    Outcome::idle()
        .with_effect(Effect::Indicator(true))
        .with_effect(DisplayCommand::Pattern(pattern::WARNING))
}

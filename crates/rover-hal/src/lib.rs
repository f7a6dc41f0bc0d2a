//! # Rover HAL
//!
//! 外设能力抽象层。协调器只通过这里的 trait 访问硬件，
//! 底层驱动（PWM、超声波脉冲计时、红外解调、点阵屏时序、串口 AT 配置）
//! 在各自的实现中完成。
//!
//! 所有输出类操作都是"发出即忘"：不返回结果、不重试。
//! 读数类操作每次调用只采样一次，失败时返回约定的哨兵值。

use thiserror::Error;

pub use rover_protocol::LinkEvent;

pub mod clock;
pub mod pattern;

#[cfg(feature = "mock")]
pub mod mock;

pub use clock::{Clock, SystemClock};
pub use pattern::Pattern;

/// 测距超时/无回波时返回的哨兵值
pub const DISTANCE_TIMEOUT_CM: f32 = -1.0;

/// 链路层错误
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Link not connected")]
    NotConnected,
    #[error("Outbound buffer full")]
    BufferFull,
}

/// 电机驱动
///
/// 速度为开环 PWM，`u8` 本身即限定在 [0, 255]。
/// `stop()` 同时把当前速度清零。
pub trait Actuator {
    fn stop(&mut self);
    fn set_speed(&mut self, pwm: u8);
    fn move_forward(&mut self);
    fn move_backward(&mut self);
    /// 单侧驱动转弯（内侧轮停转）
    fn turn_left(&mut self);
    fn turn_right(&mut self);
    /// 原地旋转（两侧反向）
    fn rotate_left(&mut self);
    fn rotate_right(&mut self);
    fn current_speed(&self) -> u8;
}

/// 单条电机指令
///
/// 处理函数以数据形式返回指令，由执行器统一下发。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveCommand {
    Stop,
    SetSpeed(u8),
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    RotateLeft,
    RotateRight,
}

impl DriveCommand {
    /// 下发到电机
    pub fn apply(self, actuator: &mut dyn Actuator) {
        match self {
            DriveCommand::Stop => actuator.stop(),
            DriveCommand::SetSpeed(pwm) => actuator.set_speed(pwm),
            DriveCommand::Forward => actuator.move_forward(),
            DriveCommand::Backward => actuator.move_backward(),
            DriveCommand::TurnLeft => actuator.turn_left(),
            DriveCommand::TurnRight => actuator.turn_right(),
            DriveCommand::RotateLeft => actuator.rotate_left(),
            DriveCommand::RotateRight => actuator.rotate_right(),
        }
    }

    /// 是否会让车轮转动
    pub fn is_motion(self) -> bool {
        !matches!(self, DriveCommand::Stop | DriveCommand::SetSpeed(_))
    }
}

/// 超声波测距
pub trait DistanceSensor {
    /// 返回距离（cm），超时返回 [`DISTANCE_TIMEOUT_CM`]
    fn read_distance(&mut self) -> f32;
}

/// 光敏电阻
pub trait LightSensor {
    /// 原始 ADC 读数，越大越亮
    fn read_light_level(&mut self) -> u16;
}

/// 三路巡线传感器读数，`true` 表示该传感器位于线上
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineReading {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl LineReading {
    pub fn new(left: bool, middle: bool, right: bool) -> Self {
        Self {
            left,
            middle,
            right,
        }
    }
}

/// 巡线传感器
pub trait LineSensor {
    fn read_line(&mut self) -> LineReading;
}

/// 红外遥控解码器
pub trait RemoteDecoder {
    /// 返回本次轮询解码到的码值
    ///
    /// `0` 表示没有新码，[`rover_protocol::REMOTE_REPEAT`] 表示重复帧。
    fn read_command(&mut self) -> u32;
}

/// 16x8 点阵屏
pub trait Display {
    fn display_pattern(&mut self, pattern: &Pattern);
    fn clear(&mut self);
    /// 阻塞式滚动文字，只允许在启动阶段调用
    fn scroll_text(&mut self, text: &str, speed: u16);
    /// 非阻塞地显示一条状态提示（稳态循环中使用）
    fn show_status(&mut self, text: &str);
}

/// 警示灯
pub trait Indicator {
    fn set(&mut self, on: bool);
}

/// 文本链路
pub trait LinkTransport {
    /// 发送一行文本（不含换行符），发出即忘
    fn send(&mut self, line: &str) -> Result<(), LinkError>;

    /// 取出一条待处理的连接通知，没有时返回 `None`
    fn poll_event(&mut self) -> Option<LinkEvent>;
}

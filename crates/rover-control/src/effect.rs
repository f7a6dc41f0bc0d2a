//! 副作用描述
//!
//! 模式处理函数与入口动作不直接操作外设，而是返回 [`Effect`] 列表，
//! 由协调器按顺序执行。这样处理函数可以脱离硬件单独测试。

use rover_hal::{DriveCommand, Pattern};
use rover_protocol::{Event, Mode};
use smallvec::SmallVec;

/// 点阵屏指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCommand {
    Pattern(Pattern),
    Clear,
}

/// 单个副作用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Drive(DriveCommand),
    Display(DisplayCommand),
    Indicator(bool),
    /// 通过链路发送 `event:<name>`
    Notify(Event),
}

impl From<DriveCommand> for Effect {
    fn from(cmd: DriveCommand) -> Self {
        Effect::Drive(cmd)
    }
}

impl From<DisplayCommand> for Effect {
    fn from(cmd: DisplayCommand) -> Self {
        Effect::Display(cmd)
    }
}

impl From<Event> for Effect {
    fn from(event: Event) -> Self {
        Effect::Notify(event)
    }
}

/// 副作用列表，绝大多数情况不超过 4 个，不分配堆内存
pub type Effects = SmallVec<[Effect; 4]>;

/// 处理函数报告的活动状态，决定协调器的附加节拍任务
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    /// 车轮在转，行驶指示灯闪烁
    Moving,
    /// 等待链路，定期显示提示
    AwaitingLink,
}

/// 处理函数的返回值
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outcome {
    /// 请求迁移的目标模式
    pub next: Option<Mode>,
    pub effects: Effects,
    pub activity: Activity,
}

impl Outcome {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn transition(next: Mode) -> Self {
        Self {
            next: Some(next),
            ..Self::default()
        }
    }

    pub fn with_effect(mut self, effect: impl Into<Effect>) -> Self {
        self.effects.push(effect.into());
        self
    }

    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.activity = activity;
        self
    }

    /// 是否包含指定的副作用
    pub fn contains(&self, effect: &Effect) -> bool {
        self.effects.contains(effect)
    }
}

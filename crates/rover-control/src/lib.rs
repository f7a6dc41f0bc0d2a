//! 控制协调层
//!
//! 本 crate 实现小车的中央协调器：单线程、协作式的调度循环。每一次 tick
//! 按固定顺序完成：
//!
//! 1. 读取链路连接通知
//! 2. 到期时刷新传感器快照（含障碍物仲裁与大灯判断）
//! 3. 到期时积分累计里程
//! 4. 更新瞬时指标
//! 5. 到期时发送遥测帧
//! 6. 执行当前模式的处理函数
//!
//! 所有周期任务都由 [`TimerBank`] 以经过时间判断是否到期，循环中不存在阻塞点。
//! 阻塞操作（启动画面、滚动字幕、固定延时）只出现在 [`Rover::boot`] 中。
//!
//! # 使用示例
//!
//! ```rust,ignore
//! use rover_control::{RoverBuilder, RoverConfig};
//!
//! let mut rover = RoverBuilder::new()
//!     .config(RoverConfig::default())
//!     .clock(clock)
//!     .actuator(motors)
//!     // ... 其余外设
//!     .build()?;
//!
//! rover.boot()?;
//! loop {
//!     rover.tick();
//! }
//! ```

mod builder;
pub mod config;
pub mod debounce;
pub mod decision;
pub mod effect;
mod error;
pub mod handlers;
pub mod metrics;
pub mod mode;
mod rover;
pub mod snapshot;
pub mod timer;

pub use builder::RoverBuilder;
pub use config::{
    BootConfig, ConfigError, DriveConfig, RemoteKeymap, RoverConfig, ThresholdConfig,
    TimingConfig,
};
pub use debounce::RemoteDebouncer;
pub use decision::{HeadlightToggle, LineCorrection, LineFollower};
pub use effect::{Activity, DisplayCommand, Effect, Effects, Outcome};
pub use error::ControlError;
pub use metrics::MetricsAggregator;
pub use mode::{ModeMachine, Transition};
pub use rover::{Rover, TickReport};
pub use snapshot::SensorSnapshot;
pub use timer::{IntervalTimer, TimerBank, TimerId};

pub use rover_protocol::Mode;

//! # Rover Protocol
//!
//! 小车与上位机之间的文本链路协议定义（无硬件依赖）
//!
//! ## 模块
//!
//! - `mode`: 运行模式及其线上标签
//! - `event`: 离散事件通知（`event:<name>`）
//! - `telemetry`: 周期遥测帧的编码与解析
//! - `link`: 出站消息分类、入站连接通知识别
//! - `remote`: 红外遥控键码常量
//!
//! ## 帧格式
//!
//! 链路按行传输 UTF-8 文本，每行一条消息。接收方根据负载形状区分：
//!
//! ```text
//! {"uptime_s":12,"mode":"AUTO",...}   -> 遥测帧
//! event:obstacle_detected             -> 事件通知
//! ```

pub mod event;
pub mod link;
pub mod mode;
pub mod remote;
pub mod telemetry;

// 重新导出常用类型
pub use event::{EVENT_PREFIX, Event};
pub use link::{LinkEvent, LinkMessage};
pub use mode::Mode;
pub use remote::{REMOTE_NONE, REMOTE_REPEAT, RemoteKey};
pub use telemetry::TelemetryFrame;

use thiserror::Error;

/// 协议解析错误类型
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Unknown event name: {0}")]
    UnknownEvent(String),

    #[error("Unknown mode label: {0}")]
    UnknownMode(String),

    #[error("Malformed telemetry frame: {0}")]
    Telemetry(#[from] serde_json::Error),

    #[error("Invalid value for field {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Unrecognized message shape: {0:?}")]
    UnrecognizedMessage(String),
}

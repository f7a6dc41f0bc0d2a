//! 链路消息
//!
//! - 出站：`LinkMessage`（遥测帧或事件），接收方按负载形状区分
//! - 入站：`LinkEvent`（连接/断开通知），由串口模块的哨兵文本产生

use crate::{EVENT_PREFIX, Event, ProtocolError, TelemetryFrame};

/// 串口模块建立连接时输出的通知
pub const NOTIFY_CONNECTED: &str = "OK+CONN";
/// 串口模块连接丢失时输出的通知
pub const NOTIFY_LOST: &str = "OK+LOST";

/// 链路连接通知
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    Connected,
    Disconnected,
}

impl LinkEvent {
    /// 从串口模块输出的一行文本识别连接通知
    ///
    /// 只要行内包含哨兵文本即可识别，其它内容返回 `None`。
    pub fn from_notification(line: &str) -> Option<Self> {
        if line.contains(NOTIFY_CONNECTED) {
            Some(LinkEvent::Connected)
        } else if line.contains(NOTIFY_LOST) {
            Some(LinkEvent::Disconnected)
        } else {
            None
        }
    }
}

/// 出站消息
#[derive(Debug, Clone, PartialEq)]
pub enum LinkMessage {
    Telemetry(TelemetryFrame),
    Event(Event),
}

impl LinkMessage {
    /// 编码为单行文本（不含换行符）
    pub fn encode(&self) -> String {
        match self {
            LinkMessage::Telemetry(frame) => frame.encode(),
            LinkMessage::Event(event) => event.encode(),
        }
    }

    /// 按负载形状解析一行出站文本
    pub fn decode(line: &str) -> Result<Self, ProtocolError> {
        let line = line.trim();
        if line.starts_with('{') && line.ends_with('}') {
            Ok(LinkMessage::Telemetry(TelemetryFrame::decode(line)?))
        } else if line.starts_with(EVENT_PREFIX) {
            Ok(LinkMessage::Event(Event::decode(line)?))
        } else {
            Err(ProtocolError::UnrecognizedMessage(line.to_string()))
        }
    }
}

impl From<Event> for LinkMessage {
    fn from(event: Event) -> Self {
        LinkMessage::Event(event)
    }
}

impl From<TelemetryFrame> for LinkMessage {
    fn from(frame: TelemetryFrame) -> Self {
        LinkMessage::Telemetry(frame)
    }
}

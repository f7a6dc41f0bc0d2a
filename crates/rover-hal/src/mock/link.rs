use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{Receiver, Sender, unbounded};
use parking_lot::Mutex;
use tracing::trace;

use crate::{LinkError, LinkEvent, LinkTransport};

/// 内存中的文本链路
///
/// 入站：测试通过 `notify()` 注入串口模块输出的原始行，
/// `poll_event()` 只把其中的连接通知交给协调器，其余行丢弃。
/// 出站：`send()` 的每一行都保存在 `sent()` 中。
#[derive(Debug, Clone)]
pub struct MockLink {
    inbound_tx: Sender<String>,
    inbound_rx: Receiver<String>,
    sent: Arc<Mutex<Vec<String>>>,
    refuse_sends: Arc<AtomicBool>,
}

impl MockLink {
    pub fn new() -> Self {
        let (inbound_tx, inbound_rx) = unbounded();
        Self {
            inbound_tx,
            inbound_rx,
            sent: Arc::new(Mutex::new(Vec::new())),
            refuse_sends: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 模拟串口模块输出一行文本（如 `OK+CONN`）
    pub fn notify(&self, line: impl Into<String>) {
        // 接收端与发送端同属本对象，发送不会失败
        let _ = self.inbound_tx.send(line.into());
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    /// 取出并清空已发送的行
    pub fn take_sent(&self) -> Vec<String> {
        std::mem::take(&mut *self.sent.lock())
    }

    pub fn clear_sent(&self) {
        self.sent.lock().clear();
    }

    /// 让后续 `send()` 返回错误，用于验证发出即忘语义
    pub fn set_refuse_sends(&self, refuse: bool) {
        self.refuse_sends.store(refuse, Ordering::Relaxed);
    }
}

impl Default for MockLink {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkTransport for MockLink {
    fn send(&mut self, line: &str) -> Result<(), LinkError> {
        if self.refuse_sends.load(Ordering::Relaxed) {
            return Err(LinkError::NotConnected);
        }
        self.sent.lock().push(line.to_string());
        Ok(())
    }

    fn poll_event(&mut self) -> Option<LinkEvent> {
        while let Ok(line) = self.inbound_rx.try_recv() {
            if let Some(event) = LinkEvent::from_notification(&line) {
                return Some(event);
            }
            trace!("mock link: ignoring inbound line {:?}", line);
        }
        None
    }
}

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use rover_protocol::{REMOTE_NONE, REMOTE_REPEAT};

use crate::{Display, Indicator, Pattern, RemoteDecoder};

/// 遥控解码器 mock
///
/// 每次 `read_command` 取出一个排队的码值，队列为空时返回 0。
#[derive(Debug, Clone, Default)]
pub struct MockRemote {
    codes: Arc<Mutex<VecDeque<u32>>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// 下一次轮询返回 `code`
    pub fn press(&self, code: u32) {
        self.codes.lock().push_back(code);
    }

    /// 排入 `frames` 个重复帧
    pub fn hold(&self, frames: usize) {
        let mut codes = self.codes.lock();
        codes.extend(std::iter::repeat_n(REMOTE_REPEAT, frames));
    }

    /// 排入一次"无码"轮询
    pub fn idle(&self) {
        self.codes.lock().push_back(REMOTE_NONE);
    }

    pub fn pending(&self) -> usize {
        self.codes.lock().len()
    }
}

impl RemoteDecoder for MockRemote {
    fn read_command(&mut self) -> u32 {
        self.codes.lock().pop_front().unwrap_or(REMOTE_NONE)
    }
}

/// 点阵屏调用记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCall {
    Pattern(Pattern),
    Clear,
    Scroll(String),
    Status(String),
}

#[derive(Debug, Clone, Default)]
pub struct MockDisplay {
    log: Arc<Mutex<Vec<DisplayCall>>>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> Vec<DisplayCall> {
        self.log.lock().clone()
    }

    pub fn clear_log(&self) {
        self.log.lock().clear();
    }

    pub fn count(&self, call: &DisplayCall) -> usize {
        self.log.lock().iter().filter(|c| *c == call).count()
    }
}

impl Display for MockDisplay {
    fn display_pattern(&mut self, pattern: &Pattern) {
        self.log.lock().push(DisplayCall::Pattern(*pattern));
    }

    fn clear(&mut self) {
        self.log.lock().push(DisplayCall::Clear);
    }

    fn scroll_text(&mut self, text: &str, _speed: u16) {
        self.log.lock().push(DisplayCall::Scroll(text.to_string()));
    }

    fn show_status(&mut self, text: &str) {
        self.log.lock().push(DisplayCall::Status(text.to_string()));
    }
}

/// 警示灯 mock，记录每一次写入
#[derive(Debug, Clone, Default)]
pub struct MockIndicator {
    history: Arc<Mutex<Vec<bool>>>,
}

impl MockIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<bool> {
        self.history.lock().clone()
    }

    pub fn is_on(&self) -> bool {
        self.history.lock().last().copied().unwrap_or(false)
    }

    pub fn clear_log(&self) {
        self.history.lock().clear();
    }
}

impl Indicator for MockIndicator {
    fn set(&mut self, on: bool) {
        self.history.lock().push(on);
    }
}

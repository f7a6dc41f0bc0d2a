//! 遥控指令去抖
//!
//! 把解码器输出的原始码流（可能包含重复帧）转换成稳定的"当前指令"：
//!
//! - 重复帧只刷新时间戳，保留上一条指令
//! - 其它非零码替换当前指令并刷新时间戳
//! - 零码忽略（本身不触发失效）
//! - 距上次刷新超过失效窗口后，当前指令清零
//!
//! 按住按键时当前指令一直有效，松开约一个窗口后变为 0，与轮询频率无关。

use rover_protocol::{REMOTE_NONE, REMOTE_REPEAT};

#[derive(Debug, Clone)]
pub struct RemoteDebouncer {
    last_command: u32,
    last_refresh_ms: u64,
    decay_ms: u64,
}

impl RemoteDebouncer {
    pub fn new(decay_ms: u64) -> Self {
        Self {
            last_command: REMOTE_NONE,
            last_refresh_ms: 0,
            decay_ms,
        }
    }

    /// 处理一次轮询结果，返回当前有效指令
    pub fn poll(&mut self, raw: u32, now_ms: u64) -> u32 {
        if raw != REMOTE_NONE {
            if raw != REMOTE_REPEAT {
                self.last_command = raw;
            }
            self.last_refresh_ms = now_ms;
        }

        if now_ms.saturating_sub(self.last_refresh_ms) > self.decay_ms {
            self.last_command = REMOTE_NONE;
        }

        self.last_command
    }

    /// 当前有效指令（0 表示无）
    pub fn active(&self) -> u32 {
        self.last_command
    }

    /// 丢弃当前指令
    ///
    /// 进入手动模式时调用，避免上一次手动会话残留的指令被重复帧续期。
    pub fn reset(&mut self) {
        self.last_command = REMOTE_NONE;
    }
}

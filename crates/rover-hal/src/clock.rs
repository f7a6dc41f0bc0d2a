//! 单调时钟
//!
//! 所有周期任务都以"当前时间 - 上次触发时间"与间隔比较，
//! 不依赖墙上时间。计数器假定在进程生命周期内不回绕。

use std::time::{Duration, Instant};

/// 毫秒级单调时钟
pub trait Clock {
    /// 自时钟创建以来的毫秒数
    fn now_ms(&self) -> u64;

    /// 阻塞等待，仅用于启动阶段的固定延时
    fn delay_ms(&self, ms: u64);
}

/// 基于 `Instant` 的系统时钟
///
/// 以创建时刻为锚点，不受系统时间调整（NTP、手动修改）影响。
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn delay_ms(&self, ms: u64) {
        spin_sleep::sleep(Duration::from_millis(ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_monotonic() {
        let clock = SystemClock::new();
        let mut last = clock.now_ms();
        for _ in 0..5 {
            clock.delay_ms(2);
            let now = clock.now_ms();
            assert!(now >= last, "now={} last={}", now, last);
            last = now;
        }
    }

    #[test]
    fn test_delay_elapses() {
        let clock = SystemClock::new();
        let before = clock.now_ms();
        clock.delay_ms(10);
        assert!(clock.now_ms() - before >= 10);
    }
}

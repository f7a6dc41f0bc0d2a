//! 定时器组
//!
//! 每个周期任务由一个独立的 [`IntervalTimer`] 把关：经过时间超过间隔即到期，
//! 触发后把上次触发时间重置为当前时间。一个定时器触发不会影响其它定时器。
//!
//! 到期判断在每个 tick 采样一次，因此最多有一个 tick 的滞后；
//! 没有到期的任务本 tick 不执行，下个 tick 再判断，不排队也不补发。

use tracing::trace;

use crate::config::TimingConfig;

/// 周期任务标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    /// 传感器快照刷新（含障碍物仲裁、大灯判断）
    SensorRefresh,
    /// 累计里程积分
    CumulativeMetrics,
    /// 遥测帧发送
    Telemetry,
    /// 等待链路提示
    LinkPrompt,
    /// 行驶指示灯闪烁
    IndicatorBlink,
}

impl TimerId {
    pub const ALL: [TimerId; 5] = [
        TimerId::SensorRefresh,
        TimerId::CumulativeMetrics,
        TimerId::Telemetry,
        TimerId::LinkPrompt,
        TimerId::IndicatorBlink,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TimerId::SensorRefresh => "sensor_refresh",
            TimerId::CumulativeMetrics => "cumulative_metrics",
            TimerId::Telemetry => "telemetry",
            TimerId::LinkPrompt => "link_prompt",
            TimerId::IndicatorBlink => "indicator_blink",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn interval_from(self, timing: &TimingConfig) -> u64 {
        match self {
            TimerId::SensorRefresh => timing.sensor_refresh_ms,
            TimerId::CumulativeMetrics => timing.cumulative_metrics_ms,
            TimerId::Telemetry => timing.telemetry_ms,
            TimerId::LinkPrompt => timing.link_prompt_ms,
            TimerId::IndicatorBlink => timing.indicator_blink_ms,
        }
    }
}

/// 单个间隔定时器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    last_fired_ms: u64,
    interval_ms: u64,
}

impl IntervalTimer {
    pub fn new(interval_ms: u64, now_ms: u64) -> Self {
        Self {
            last_fired_ms: now_ms,
            interval_ms,
        }
    }

    /// 经过时间严格大于间隔时到期
    #[inline]
    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_fired_ms) > self.interval_ms
    }

    #[inline]
    pub fn fire(&mut self, now_ms: u64) {
        self.last_fired_ms = now_ms;
    }

    /// 到期则触发并返回 `true`
    #[inline]
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if self.is_due(now_ms) {
            self.fire(now_ms);
            true
        } else {
            false
        }
    }

    pub fn last_fired_ms(&self) -> u64 {
        self.last_fired_ms
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}

/// 按任务命名的定时器组
#[derive(Debug, Clone)]
pub struct TimerBank {
    timers: [IntervalTimer; 5],
}

impl TimerBank {
    /// 所有定时器以 `now_ms` 作为上次触发时间
    pub fn new(timing: &TimingConfig, now_ms: u64) -> Self {
        Self {
            timers: TimerId::ALL.map(|id| IntervalTimer::new(id.interval_from(timing), now_ms)),
        }
    }

    pub fn poll(&mut self, id: TimerId, now_ms: u64) -> bool {
        let fired = self.timers[id.index()].poll(now_ms);
        if fired {
            trace!("Timer {} fired at {}ms", id.name(), now_ms);
        }
        fired
    }

    pub fn get(&self, id: TimerId) -> &IntervalTimer {
        &self.timers[id.index()]
    }
}

//! 运行指标聚合
//!
//! 瞬时指标每个 tick 覆盖一次；累计里程按固定节拍用当前 PWM 积分。
//! 遥测帧按需从这些值构建，不单独保存。

use rover_protocol::{Mode, REMOTE_NONE, TelemetryFrame};
use tracing::trace;

use crate::snapshot::SensorSnapshot;

/// PWM 到线速度（cm/s）的换算
///
/// 先把 `[0, 255]` 整数映射到 `[0, max×100]`（截断），再除以 100，
/// 保持两位小数精度。负数或 NaN 标定按 0 处理，乘法饱和。
pub fn speed_cm_per_s(pwm: u8, max_speed_cm_s: f64) -> f64 {
    let scaled_max = (max_speed_cm_s.max(0.0) * 100.0) as i64;
    let mapped = i64::from(pwm).saturating_mul(scaled_max) / 255;
    mapped as f64 / 100.0
}

#[derive(Debug, Clone)]
pub struct MetricsAggregator {
    max_speed_cm_s: f64,
    uptime_s: u64,
    mode: Mode,
    distance_cm: f32,
    light_level: u16,
    last_ir_cmd: u32,
    speed_pwm: u8,
    dist_traveled_cm: f64,
    last_integration_ms: u64,
}

impl MetricsAggregator {
    pub fn new(max_speed_cm_s: f64, now_ms: u64) -> Self {
        Self {
            max_speed_cm_s,
            uptime_s: 0,
            mode: Mode::Starting,
            distance_cm: 0.0,
            light_level: 0,
            last_ir_cmd: REMOTE_NONE,
            speed_pwm: 0,
            dist_traveled_cm: 0.0,
            last_integration_ms: now_ms,
        }
    }

    /// 更新瞬时指标
    ///
    /// 遥控码只记录非零值，帧里始终是最后一次收到的有效码。
    pub fn update(
        &mut self,
        mode: Mode,
        snapshot: &SensorSnapshot,
        command: u32,
        speed_pwm: u8,
        now_ms: u64,
    ) {
        self.uptime_s = now_ms / 1000;
        self.mode = mode;
        self.distance_cm = snapshot.distance_cm;
        self.light_level = snapshot.light_level;
        self.speed_pwm = speed_pwm;
        if command != REMOTE_NONE {
            self.last_ir_cmd = command;
        }
    }

    /// 按当前速度积分一段里程
    pub fn update_cumulative(&mut self, speed_pwm: u8, now_ms: u64) {
        let delta_ms = now_ms.saturating_sub(self.last_integration_ms);
        self.last_integration_ms = now_ms;

        let speed = speed_cm_per_s(speed_pwm, self.max_speed_cm_s);
        let delta_cm = speed * (delta_ms as f64 / 1000.0);
        self.dist_traveled_cm += delta_cm;
        trace!(
            "Odometry: pwm={} dt={}ms +{:.3}cm total={:.3}cm",
            speed_pwm, delta_ms, delta_cm, self.dist_traveled_cm
        );
    }

    pub fn telemetry_frame(&self) -> TelemetryFrame {
        TelemetryFrame {
            uptime_s: self.uptime_s,
            mode: self.mode,
            distance_cm: self.distance_cm,
            last_ir_cmd: self.last_ir_cmd,
            light_level: self.light_level,
            speed_pwm: self.speed_pwm,
            dist_traveled_cm: self.dist_traveled_cm,
        }
    }

    /// 序列化后的遥测帧
    pub fn telemetry_packet(&self) -> String {
        self.telemetry_frame().encode()
    }

    pub fn dist_traveled_cm(&self) -> f64 {
        self.dist_traveled_cm
    }

    pub fn last_ir_cmd(&self) -> u32 {
        self.last_ir_cmd
    }
}

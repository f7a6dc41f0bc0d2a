//! 遥测帧
//!
//! 周期性状态快照，按需构建、不保留历史。字段顺序固定：
//!
//! ```text
//! {"uptime_s":<int>,"mode":"<MODE>","distance_cm":<float,2dp>,
//!  "last_ir_cmd":"0x<hex>","light_level":<int>,"speed_pwm":<int>,
//!  "dist_traveled_cm":<float,2dp>}
//! ```
//!
//! 编码手工拼接以保证两位小数和字段顺序；解析使用 `serde_json`。

use serde::Deserialize;

use crate::{Mode, ProtocolError};

/// 遥测快照
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryFrame {
    /// 运行时间（秒）
    pub uptime_s: u64,
    /// 当前模式
    pub mode: Mode,
    /// 最近一次测距（cm），-1 表示超时/无回波
    pub distance_cm: f32,
    /// 最近一次非零遥控码
    pub last_ir_cmd: u32,
    /// 环境光原始读数（越大越亮）
    pub light_level: u16,
    /// 当前电机 PWM
    pub speed_pwm: u8,
    /// 累计行驶距离（cm）
    pub dist_traveled_cm: f64,
}

impl TelemetryFrame {
    /// 编码为单行 JSON
    pub fn encode(&self) -> String {
        format!(
            concat!(
                "{{\"uptime_s\":{},\"mode\":\"{}\",\"distance_cm\":{:.2},",
                "\"last_ir_cmd\":\"0x{:x}\",\"light_level\":{},\"speed_pwm\":{},",
                "\"dist_traveled_cm\":{:.2}}}"
            ),
            self.uptime_s,
            self.mode.label(),
            finite_or_sentinel(self.distance_cm as f64),
            self.last_ir_cmd,
            self.light_level,
            self.speed_pwm,
            finite_or_sentinel(self.dist_traveled_cm),
        )
    }

    /// 从单行 JSON 解析（上位机侧使用）
    pub fn decode(line: &str) -> Result<Self, ProtocolError> {
        let raw: RawFrame = serde_json::from_str(line.trim())?;

        let hex = raw
            .last_ir_cmd
            .strip_prefix("0x")
            .or_else(|| raw.last_ir_cmd.strip_prefix("0X"))
            .ok_or_else(|| ProtocolError::InvalidValue {
                field: "last_ir_cmd",
                value: raw.last_ir_cmd.clone(),
            })?;
        let last_ir_cmd =
            u32::from_str_radix(hex, 16).map_err(|_| ProtocolError::InvalidValue {
                field: "last_ir_cmd",
                value: raw.last_ir_cmd.clone(),
            })?;

        Ok(Self {
            uptime_s: raw.uptime_s,
            mode: Mode::from_label(&raw.mode)?,
            distance_cm: raw.distance_cm as f32,
            last_ir_cmd,
            light_level: raw.light_level,
            speed_pwm: raw.speed_pwm,
            dist_traveled_cm: raw.dist_traveled_cm,
        })
    }
}

/// JSON 不支持 NaN/inf，非有限值按测距超时哨兵输出
fn finite_or_sentinel(value: f64) -> f64 {
    if value.is_finite() { value } else { -1.0 }
}

#[derive(Deserialize)]
struct RawFrame {
    uptime_s: u64,
    mode: String,
    distance_cm: f64,
    last_ir_cmd: String,
    light_level: u16,
    speed_pwm: u8,
    dist_traveled_cm: f64,
}

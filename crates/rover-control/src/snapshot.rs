//! 传感器快照
//!
//! 每次刷新原地覆盖，不保留历史。

use rover_hal::LineReading;

/// 最近一次采样的传感器读数
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorSnapshot {
    /// 距离（cm），-1 表示超时/无回波
    pub distance_cm: f32,
    /// 环境光原始读数
    pub light_level: u16,
    /// 巡线读数
    pub line: LineReading,
}

impl SensorSnapshot {
    /// 距离读数是否有效（非负）
    ///
    /// 超时哨兵视为"前方无障碍"。
    pub fn has_valid_distance(&self) -> bool {
        self.distance_cm >= 0.0
    }
}

//! Mock 外设
//!
//! 所有 mock 都通过 `Arc` 共享内部状态：`clone()` 得到的句柄与原对象
//! 指向同一份数据。测试把一份句柄交给协调器，另一份留在手里注入读数、
//! 检查下发的指令。

mod actuator;
mod clock;
mod link;
mod panel;
mod sensors;

pub use actuator::MockActuator;
pub use clock::MockClock;
pub use link::MockLink;
pub use panel::{DisplayCall, MockDisplay, MockIndicator, MockRemote};
pub use sensors::MockSensor;

use crate::LineReading;

/// 一整套 mock 外设
///
/// # 示例
///
/// ```rust
/// use rover_hal::mock::MockRig;
///
/// let rig = MockRig::new();
/// rig.distance.set(30.0);
/// rig.link.notify("OK+CONN");
/// rig.clock.advance(101);
/// ```
#[derive(Clone)]
pub struct MockRig {
    pub clock: MockClock,
    pub actuator: MockActuator,
    pub distance: MockSensor<f32>,
    pub light: MockSensor<u16>,
    pub line: MockSensor<LineReading>,
    pub remote: MockRemote,
    pub display: MockDisplay,
    pub indicator: MockIndicator,
    pub link: MockLink,
}

impl MockRig {
    /// 默认读数：无障碍（100cm）、明亮（800）、中间传感器在线上
    pub fn new() -> Self {
        Self {
            clock: MockClock::new(),
            actuator: MockActuator::new(),
            distance: MockSensor::new(100.0),
            light: MockSensor::new(800),
            line: MockSensor::new(LineReading::new(false, true, false)),
            remote: MockRemote::new(),
            display: MockDisplay::new(),
            indicator: MockIndicator::new(),
            link: MockLink::new(),
        }
    }

    /// 清空所有输出记录（保留读数与时钟）
    pub fn clear_logs(&self) {
        self.actuator.clear_log();
        self.display.clear_log();
        self.indicator.clear_log();
        self.link.clear_sent();
    }
}

impl Default for MockRig {
    fn default() -> Self {
        Self::new()
    }
}

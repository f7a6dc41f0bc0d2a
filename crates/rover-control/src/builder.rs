//! Builder 模式实现
//!
//! 提供链式构造 `Rover` 实例的便捷方式。

use rover_hal::{
    Actuator, Clock, Display, DistanceSensor, Indicator, LightSensor, LineSensor, LinkTransport,
    RemoteDecoder, SystemClock,
};

use crate::config::RoverConfig;
use crate::error::ControlError;
use crate::rover::{Peripherals, Rover};

/// Rover Builder（链式构造）
///
/// 所有外设都必须提供；配置缺省时使用 [`RoverConfig::default`]，
/// 时钟缺省时使用 [`SystemClock`]。
///
/// # Example
///
/// ```rust,ignore
/// use rover_control::RoverBuilder;
///
/// let rover = RoverBuilder::new()
///     .actuator(motors)
///     .distance_sensor(ultrasonic)
///     .light_sensor(photoresistor)
///     .line_sensor(tracker)
///     .remote(ir_receiver)
///     .display(matrix)
///     .indicator(warning_led)
///     .link(bluetooth)
///     .build()?;
/// ```
#[derive(Default)]
pub struct RoverBuilder {
    config: Option<RoverConfig>,
    clock: Option<Box<dyn Clock>>,
    actuator: Option<Box<dyn Actuator>>,
    distance: Option<Box<dyn DistanceSensor>>,
    light: Option<Box<dyn LightSensor>>,
    line: Option<Box<dyn LineSensor>>,
    remote: Option<Box<dyn RemoteDecoder>>,
    display: Option<Box<dyn Display>>,
    indicator: Option<Box<dyn Indicator>>,
    link: Option<Box<dyn LinkTransport>>,
}

impl RoverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置配置（可选）
    pub fn config(mut self, config: RoverConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// 设置时钟（可选，默认 [`SystemClock`]）
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn actuator(mut self, actuator: impl Actuator + 'static) -> Self {
        self.actuator = Some(Box::new(actuator));
        self
    }

    pub fn distance_sensor(mut self, sensor: impl DistanceSensor + 'static) -> Self {
        self.distance = Some(Box::new(sensor));
        self
    }

    pub fn light_sensor(mut self, sensor: impl LightSensor + 'static) -> Self {
        self.light = Some(Box::new(sensor));
        self
    }

    pub fn line_sensor(mut self, sensor: impl LineSensor + 'static) -> Self {
        self.line = Some(Box::new(sensor));
        self
    }

    pub fn remote(mut self, remote: impl RemoteDecoder + 'static) -> Self {
        self.remote = Some(Box::new(remote));
        self
    }

    pub fn display(mut self, display: impl Display + 'static) -> Self {
        self.display = Some(Box::new(display));
        self
    }

    pub fn indicator(mut self, indicator: impl Indicator + 'static) -> Self {
        self.indicator = Some(Box::new(indicator));
        self
    }

    pub fn link(mut self, link: impl LinkTransport + 'static) -> Self {
        self.link = Some(Box::new(link));
        self
    }

    /// 用一整套 mock 外设填充（共享状态，测试端保留 `rig` 的句柄）
    #[cfg(feature = "mock")]
    pub fn mock_rig(self, rig: &rover_hal::mock::MockRig) -> Self {
        self.clock(rig.clock.clone())
            .actuator(rig.actuator.clone())
            .distance_sensor(rig.distance.clone())
            .light_sensor(rig.light.clone())
            .line_sensor(rig.line.clone())
            .remote(rig.remote.clone())
            .display(rig.display.clone())
            .indicator(rig.indicator.clone())
            .link(rig.link.clone())
    }

    /// 构建 Rover 实例
    ///
    /// # Errors
    /// - `ControlError::Config`: 配置校验失败
    /// - `ControlError::MissingPeripheral`: 缺少外设
    pub fn build(self) -> Result<Rover, ControlError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let io = Peripherals {
            actuator: self
                .actuator
                .ok_or(ControlError::MissingPeripheral("actuator"))?,
            distance: self
                .distance
                .ok_or(ControlError::MissingPeripheral("distance_sensor"))?,
            light: self
                .light
                .ok_or(ControlError::MissingPeripheral("light_sensor"))?,
            line: self
                .line
                .ok_or(ControlError::MissingPeripheral("line_sensor"))?,
            remote: self
                .remote
                .ok_or(ControlError::MissingPeripheral("remote"))?,
            display: self
                .display
                .ok_or(ControlError::MissingPeripheral("display"))?,
            indicator: self
                .indicator
                .ok_or(ControlError::MissingPeripheral("indicator"))?,
            link: self.link.ok_or(ControlError::MissingPeripheral("link"))?,
        };
        let clock = self
            .clock
            .unwrap_or_else(|| Box::new(SystemClock::new()));

        Ok(Rover::new(config, clock, io))
    }
}

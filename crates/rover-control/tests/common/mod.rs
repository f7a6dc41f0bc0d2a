//! 测试辅助函数
//!
//! 提供快速创建测试环境的工具函数：mock 外设与协调器共享状态，
//! 测试端通过 `MockRig` 注入读数、推进时钟、检查输出。

#![allow(dead_code)]

use rover_control::{Mode, Rover, RoverBuilder, RoverConfig, TickReport};
use rover_hal::mock::MockRig;

/// 传感器刷新间隔之后再多 1ms，保证每个 tick 都刷新快照
pub const REFRESH_STEP_MS: u64 = 101;

/// 创建未启动的协调器
pub fn setup_rover() -> (MockRig, Rover) {
    setup_rover_with_config(RoverConfig::default())
}

pub fn setup_rover_with_config(config: RoverConfig) -> (MockRig, Rover) {
    let rig = MockRig::new();
    let rover = RoverBuilder::new()
        .config(config)
        .clock(rig.clock.clone())
        .actuator(rig.actuator.clone())
        .distance_sensor(rig.distance.clone())
        .light_sensor(rig.light.clone())
        .line_sensor(rig.line.clone())
        .remote(rig.remote.clone())
        .display(rig.display.clone())
        .indicator(rig.indicator.clone())
        .link(rig.link.clone())
        .build()
        .expect("mock rover should build");
    (rig, rover)
}

/// 创建已启动（处于 WaitingLink）的协调器，输出记录已清空
pub fn setup_booted() -> (MockRig, Rover) {
    let (rig, mut rover) = setup_rover();
    rover.boot().expect("boot should succeed");
    rig.clear_logs();
    (rig, rover)
}

/// 连接链路并进入 Auto，输出记录已清空
pub fn setup_auto() -> (MockRig, Rover) {
    let (rig, mut rover) = setup_booted();
    rig.link.notify("OK+CONN");
    let report = rover.tick();
    assert_eq!(report.mode, Mode::Auto);
    rig.clear_logs();
    (rig, rover)
}

/// 通过遥控手动键进入 Manual，输出记录已清空
pub fn setup_manual() -> (MockRig, Rover) {
    let (rig, mut rover) = setup_booted();
    rig.remote.press(rover.config().remote.manual);
    let report = rover.tick();
    assert_eq!(report.mode, Mode::Manual);
    rig.clear_logs();
    (rig, rover)
}

/// 推进时钟后执行一个 tick
pub fn step(rig: &MockRig, rover: &mut Rover, ms: u64) -> TickReport {
    rig.clock.advance(ms);
    rover.tick()
}

/// 统计链路上发出的某个事件
pub fn count_sent(rig: &MockRig, line: &str) -> usize {
    rig.link.sent().iter().filter(|sent| sent.as_str() == line).count()
}

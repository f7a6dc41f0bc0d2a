//! 决策引擎
//!
//! 三个互相独立的纯判断：
//!
//! - 巡线：三路读数到转向决策的查表
//! - 障碍物仲裁：驱动 Auto ↔ ObstacleDetected 两条边
//! - 大灯：环境光单阈值开关
//!
//! 这里只做判断，不接触外设，结果由协调器转成副作用。

use rover_hal::LineReading;
use rover_protocol::Mode;

use crate::snapshot::SensorSnapshot;

/// 巡线决策
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCorrection {
    GoStraight,
    TurnLeft,
    TurnRight,
    Stop,
}

/// 巡线查表
///
/// | middle | left | right | 结果 |
/// |---|---|---|---|
/// | on | on | off | TurnLeft |
/// | on | off | on | TurnRight |
/// | on | on | on | GoStraight |
/// | on | off | off | GoStraight |
/// | off | on | off | TurnLeft |
/// | off | off | on | TurnRight |
/// | off | off | off | Stop |
/// | off | on | on | Stop |
pub fn line_correction(reading: LineReading) -> LineCorrection {
    match (reading.middle, reading.left, reading.right) {
        (true, true, false) => LineCorrection::TurnLeft,
        (true, false, true) => LineCorrection::TurnRight,
        (true, _, _) => LineCorrection::GoStraight,
        (false, true, false) => LineCorrection::TurnLeft,
        (false, false, true) => LineCorrection::TurnRight,
        (false, _, _) => LineCorrection::Stop,
    }
}

/// 是否处于"丢线"状态（查表结果为 Stop）
pub fn is_line_lost(reading: LineReading) -> bool {
    !reading.middle && reading.left == reading.right
}

/// 巡线器
///
/// 在查表之外记录连续丢线的 tick 数。计数目前只是状态，
/// 丢线时的决策始终是 [`LineCorrection::Stop`]，不做原地搜索或倒车。
#[derive(Debug, Clone, Default)]
pub struct LineFollower {
    lost_ticks: u32,
}

impl LineFollower {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decide(&mut self, reading: LineReading) -> LineCorrection {
        if is_line_lost(reading) {
            self.lost_ticks = self.lost_ticks.saturating_add(1);
        } else {
            self.lost_ticks = 0;
        }
        line_correction(reading)
    }

    /// 连续丢线的 tick 数
    pub fn lost_ticks(&self) -> u32 {
        self.lost_ticks
    }

    pub fn reset(&mut self) {
        self.lost_ticks = 0;
    }
}

/// 障碍物仲裁
///
/// 只在 Auto / ObstacleDetected 下生效，返回需要迁移到的目标模式。
/// 负值（超时哨兵）视为前方无障碍。
pub fn arbitrate_obstacle(
    mode: Mode,
    snapshot: &SensorSnapshot,
    threshold_cm: f32,
) -> Option<Mode> {
    if !mode.is_autonomous() {
        return None;
    }
    let blocked = snapshot.has_valid_distance() && snapshot.distance_cm < threshold_cm;
    match mode {
        Mode::Auto if blocked => Some(Mode::ObstacleDetected),
        Mode::ObstacleDetected if !blocked => Some(Mode::Auto),
        _ => None,
    }
}

/// 大灯开关动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlightToggle {
    On,
    Off,
}

/// 大灯判断
///
/// 单阈值、无回差：低于阈值且当前关闭时开灯，不低于阈值且当前开启时关灯。
/// 读数在阈值附近抖动时会来回切换。
pub fn evaluate_headlights(
    light_level: u16,
    headlights_on: bool,
    threshold: u16,
) -> Option<HeadlightToggle> {
    if light_level < threshold && !headlights_on {
        Some(HeadlightToggle::On)
    } else if light_level >= threshold && headlights_on {
        Some(HeadlightToggle::Off)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(left: u8, middle: u8, right: u8) -> LineReading {
        LineReading::new(left == 1, middle == 1, right == 1)
    }

    #[test]
    fn test_line_table() {
        let cases = [
            // (left, middle, right) -> 结果
            ((1, 1, 0), LineCorrection::TurnLeft),
            ((0, 1, 1), LineCorrection::TurnRight),
            ((1, 1, 1), LineCorrection::GoStraight),
            ((0, 1, 0), LineCorrection::GoStraight),
            ((1, 0, 0), LineCorrection::TurnLeft),
            ((0, 0, 1), LineCorrection::TurnRight),
            ((0, 0, 0), LineCorrection::Stop),
            ((1, 0, 1), LineCorrection::Stop),
        ];
        for ((l, m, r), expected) in cases {
            assert_eq!(
                line_correction(reading(l, m, r)),
                expected,
                "left={} middle={} right={}",
                l,
                m,
                r
            );
        }
    }

    #[test]
    fn test_line_follower_lost_counter() {
        let mut follower = LineFollower::new();
        assert_eq!(follower.decide(reading(0, 0, 0)), LineCorrection::Stop);
        assert_eq!(follower.decide(reading(1, 0, 1)), LineCorrection::Stop);
        assert_eq!(follower.decide(reading(0, 0, 0)), LineCorrection::Stop);
        assert_eq!(follower.lost_ticks(), 3);

        // 计数不改变决策，重新找到线即清零
        assert_eq!(follower.decide(reading(0, 1, 0)), LineCorrection::GoStraight);
        assert_eq!(follower.lost_ticks(), 0);

        follower.decide(reading(0, 0, 0));
        follower.reset();
        assert_eq!(follower.lost_ticks(), 0);
    }

    fn at(distance_cm: f32) -> SensorSnapshot {
        SensorSnapshot {
            distance_cm,
            ..Default::default()
        }
    }

    #[test]
    fn test_obstacle_arbitration() {
        assert_eq!(
            arbitrate_obstacle(Mode::Auto, &at(20.0), 25.0),
            Some(Mode::ObstacleDetected)
        );
        assert_eq!(arbitrate_obstacle(Mode::Auto, &at(25.0), 25.0), None);
        assert_eq!(arbitrate_obstacle(Mode::Auto, &at(-1.0), 25.0), None);
        assert_eq!(arbitrate_obstacle(Mode::Auto, &at(f32::NAN), 25.0), None);
        assert_eq!(
            arbitrate_obstacle(Mode::Auto, &at(0.0), 25.0),
            Some(Mode::ObstacleDetected)
        );

        assert_eq!(arbitrate_obstacle(Mode::ObstacleDetected, &at(10.0), 25.0), None);
        assert_eq!(
            arbitrate_obstacle(Mode::ObstacleDetected, &at(25.0), 25.0),
            Some(Mode::Auto)
        );
        assert_eq!(
            arbitrate_obstacle(Mode::ObstacleDetected, &at(-1.0), 25.0),
            Some(Mode::Auto)
        );
    }

    #[test]
    fn test_obstacle_ignored_outside_autonomous_modes() {
        for mode in [Mode::Starting, Mode::WaitingLink, Mode::Manual] {
            assert_eq!(arbitrate_obstacle(mode, &at(5.0), 25.0), None);
            assert_eq!(arbitrate_obstacle(mode, &at(-1.0), 25.0), None);
        }
    }

    #[test]
    fn test_headlights() {
        assert_eq!(evaluate_headlights(399, false, 400), Some(HeadlightToggle::On));
        assert_eq!(evaluate_headlights(399, true, 400), None);
        assert_eq!(evaluate_headlights(400, true, 400), Some(HeadlightToggle::Off));
        assert_eq!(evaluate_headlights(400, false, 400), None);
        assert_eq!(evaluate_headlights(0, false, 0), None);
    }
}

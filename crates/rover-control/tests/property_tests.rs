//! 决策与去抖的属性测试
//!
//! 使用 proptest 验证对任意输入序列都成立的性质。

use proptest::prelude::*;
use rover_control::decision::{
    HeadlightToggle, LineCorrection, evaluate_headlights, line_correction,
};
use rover_control::metrics::MetricsAggregator;
use rover_control::RemoteDebouncer;
use rover_hal::LineReading;
use rover_protocol::{REMOTE_NONE, REMOTE_REPEAT};

const FORWARD: u32 = 0xFF629D;
const DECAY_MS: u64 = 150;

proptest! {
    /// 间隔不超过窗口的重复帧让指令一直有效
    #[test]
    fn held_command_never_decays(gaps in prop::collection::vec(1..=DECAY_MS, 1..50)) {
        let mut debouncer = RemoteDebouncer::new(DECAY_MS);
        let mut now = 1_000;
        prop_assert_eq!(debouncer.poll(FORWARD, now), FORWARD);
        for gap in gaps {
            now += gap;
            prop_assert_eq!(debouncer.poll(REMOTE_REPEAT, now), FORWARD);
        }
    }

    /// 松开后，指令在第一次经过时间超过窗口的轮询时清零，之前不清零
    #[test]
    fn release_decays_at_first_poll_past_window(
        polls in prop::collection::vec(1u64..60, 1..20),
    ) {
        let mut debouncer = RemoteDebouncer::new(DECAY_MS);
        let released_at = 5_000;
        debouncer.poll(FORWARD, released_at);

        let mut now = released_at;
        for gap in polls {
            now += gap;
            let active = debouncer.poll(REMOTE_NONE, now);
            if now - released_at > DECAY_MS {
                prop_assert_eq!(active, REMOTE_NONE);
            } else {
                prop_assert_eq!(active, FORWARD);
            }
        }
    }

    /// 巡线查表是三位输入的全函数，且只由左右是否对称与中间传感器决定
    #[test]
    fn line_table_is_total(left: bool, middle: bool, right: bool) {
        let result = line_correction(LineReading::new(left, middle, right));
        let expected = match (left, right) {
            (true, false) => LineCorrection::TurnLeft,
            (false, true) => LineCorrection::TurnRight,
            _ if middle => LineCorrection::GoStraight,
            _ => LineCorrection::Stop,
        };
        prop_assert_eq!(result, expected);
    }

    /// 大灯切换次数等于读数跨越阈值的次数，同侧保持不重复触发
    #[test]
    fn headlights_toggle_once_per_crossing(levels in prop::collection::vec(0u16..1024, 1..100)) {
        const THRESHOLD: u16 = 400;
        let mut on = false;
        let mut toggles = 0;
        let mut crossings = 0;
        // 初始状态等同于"明亮"一侧
        let mut was_dark = false;

        for level in levels {
            let dark = level < THRESHOLD;
            if dark != was_dark {
                crossings += 1;
            }
            was_dark = dark;

            match evaluate_headlights(level, on, THRESHOLD) {
                Some(HeadlightToggle::On) => {
                    on = true;
                    toggles += 1;
                }
                Some(HeadlightToggle::Off) => {
                    on = false;
                    toggles += 1;
                }
                None => {}
            }
            prop_assert_eq!(on, dark);
        }
        prop_assert_eq!(toggles, crossings);
    }

    /// 非负速度下累计里程单调不减
    #[test]
    fn odometry_is_monotonic(steps in prop::collection::vec((any::<u8>(), 0u64..500), 1..100)) {
        let mut metrics = MetricsAggregator::new(15.0, 0);
        let mut now = 0;
        let mut last = 0.0;
        for (pwm, gap) in steps {
            now += gap;
            metrics.update_cumulative(pwm, now);
            let total = metrics.dist_traveled_cm();
            prop_assert!(total >= last);
            last = total;
        }
    }
}

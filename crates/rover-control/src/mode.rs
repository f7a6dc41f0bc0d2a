//! 模式状态机
//!
//! 迁移表：
//!
//! ```text
//! Starting         -> WaitingLink                （启动结束，仅一次）
//! WaitingLink      -> Manual | Auto
//! Manual           -> Auto | WaitingLink
//! Auto             -> Manual | ObstacleDetected
//! ObstacleDetected -> Auto | Manual
//! ```
//!
//! 每次真实迁移执行且只执行一次入口动作；请求迁移到当前模式是空操作。

use rover_hal::DriveCommand;
use rover_protocol::{Event, Mode};
use smallvec::smallvec;
use tracing::info;

use crate::effect::{Effect, Effects};
use crate::error::ControlError;

/// 一次已生效的迁移
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
    /// 目标模式的入口动作
    pub entry: Effects,
}

/// 迁移表中是否存在 `from -> to`
pub fn is_allowed(from: Mode, to: Mode) -> bool {
    use Mode::*;
    matches!(
        (from, to),
        (Starting, WaitingLink)
            | (WaitingLink, Manual)
            | (WaitingLink, Auto)
            | (Manual, Auto)
            | (Manual, WaitingLink)
            | (Auto, Manual)
            | (Auto, ObstacleDetected)
            | (ObstacleDetected, Auto)
            | (ObstacleDetected, Manual)
    )
}

/// 进入 `mode` 时执行的动作
pub fn entry_effects(mode: Mode) -> Effects {
    let stop = Effect::Drive(DriveCommand::Stop);
    match mode {
        Mode::Starting => Effects::new(),
        Mode::WaitingLink => smallvec![stop],
        Mode::Manual => smallvec![stop, Effect::Notify(Event::ManualMode)],
        Mode::Auto => smallvec![stop, Effect::Notify(Event::AutoMode)],
        Mode::ObstacleDetected => smallvec![stop, Effect::Notify(Event::ObstacleDetected)],
    }
}

/// 当前模式的唯一持有者
#[derive(Debug, Clone, Default)]
pub struct ModeMachine {
    current: Mode,
    transitions: u64,
}

impl ModeMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    /// 已发生的迁移次数
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// 请求迁移
    ///
    /// - 目标等于当前模式：返回 `Ok(None)`，不产生入口动作
    /// - 目标不在迁移表中：返回 [`ControlError::IllegalTransition`]，模式不变
    /// - 否则切换模式并返回入口动作
    pub fn request(&mut self, target: Mode) -> Result<Option<Transition>, ControlError> {
        let from = self.current;
        if from == target {
            return Ok(None);
        }
        if !is_allowed(from, target) {
            return Err(ControlError::IllegalTransition { from, to: target });
        }

        self.current = target;
        self.transitions += 1;
        info!("Mode transition: {} -> {}", from, target);

        Ok(Some(Transition {
            from,
            to: target,
            entry: entry_effects(target),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_mode() {
        let machine = ModeMachine::new();
        assert_eq!(machine.current(), Mode::Starting);
        assert_eq!(machine.transitions(), 0);
    }

    #[test]
    fn test_transition_table() {
        let allowed = [
            (Mode::Starting, Mode::WaitingLink),
            (Mode::WaitingLink, Mode::Manual),
            (Mode::WaitingLink, Mode::Auto),
            (Mode::Manual, Mode::Auto),
            (Mode::Manual, Mode::WaitingLink),
            (Mode::Auto, Mode::Manual),
            (Mode::Auto, Mode::ObstacleDetected),
            (Mode::ObstacleDetected, Mode::Auto),
            (Mode::ObstacleDetected, Mode::Manual),
        ];
        for from in Mode::ALL {
            for to in Mode::ALL {
                assert_eq!(
                    is_allowed(from, to),
                    allowed.contains(&(from, to)),
                    "{} -> {}",
                    from,
                    to
                );
            }
        }
        // 启动状态不可再次进入
        for from in Mode::ALL {
            assert!(!is_allowed(from, Mode::Starting));
        }
    }

    #[test]
    fn test_entry_effects() {
        assert_eq!(
            entry_effects(Mode::WaitingLink).as_slice(),
            &[Effect::Drive(DriveCommand::Stop)]
        );
        assert_eq!(
            entry_effects(Mode::Manual).as_slice(),
            &[
                Effect::Drive(DriveCommand::Stop),
                Effect::Notify(Event::ManualMode)
            ]
        );
        assert_eq!(
            entry_effects(Mode::Auto).as_slice(),
            &[
                Effect::Drive(DriveCommand::Stop),
                Effect::Notify(Event::AutoMode)
            ]
        );
        assert_eq!(
            entry_effects(Mode::ObstacleDetected).as_slice(),
            &[
                Effect::Drive(DriveCommand::Stop),
                Effect::Notify(Event::ObstacleDetected)
            ]
        );
    }

    #[test]
    fn test_request_sequence() {
        let mut machine = ModeMachine::new();
        let t = machine.request(Mode::WaitingLink).unwrap().unwrap();
        assert_eq!((t.from, t.to), (Mode::Starting, Mode::WaitingLink));

        let t = machine.request(Mode::Auto).unwrap().unwrap();
        assert_eq!(t.entry, entry_effects(Mode::Auto));
        assert_eq!(machine.current(), Mode::Auto);
        assert_eq!(machine.transitions(), 2);
    }

    #[test]
    fn test_self_transition_is_noop() {
        let mut machine = ModeMachine::new();
        machine.request(Mode::WaitingLink).unwrap();
        assert!(machine.request(Mode::WaitingLink).unwrap().is_none());
        assert_eq!(machine.transitions(), 1);
    }

    #[test]
    fn test_illegal_transition_keeps_mode() {
        let mut machine = ModeMachine::new();
        let err = machine.request(Mode::Manual).unwrap_err();
        assert!(matches!(
            err,
            ControlError::IllegalTransition {
                from: Mode::Starting,
                to: Mode::Manual
            }
        ));
        assert_eq!(machine.current(), Mode::Starting);

        machine.request(Mode::WaitingLink).unwrap();
        assert!(machine.request(Mode::ObstacleDetected).is_err());
        assert_eq!(machine.current(), Mode::WaitingLink);
    }
}

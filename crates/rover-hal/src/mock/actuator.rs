use std::sync::Arc;

use parking_lot::Mutex;

use crate::{Actuator, DriveCommand};

#[derive(Debug, Default)]
struct ActuatorState {
    speed: u8,
    log: Vec<DriveCommand>,
}

/// 记录每一条指令的电机 mock
#[derive(Debug, Clone, Default)]
pub struct MockActuator {
    state: Arc<Mutex<ActuatorState>>,
}

impl MockActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 自上次清空以来下发的全部指令
    pub fn log(&self) -> Vec<DriveCommand> {
        self.state.lock().log.clone()
    }

    pub fn clear_log(&self) {
        self.state.lock().log.clear();
    }

    /// 记录中 `Stop` 指令的条数
    pub fn stop_count(&self) -> usize {
        self.state
            .lock()
            .log
            .iter()
            .filter(|cmd| **cmd == DriveCommand::Stop)
            .count()
    }

    pub fn last_command(&self) -> Option<DriveCommand> {
        self.state.lock().log.last().copied()
    }

    fn record(&self, cmd: DriveCommand) {
        let mut state = self.state.lock();
        match cmd {
            DriveCommand::Stop => state.speed = 0,
            DriveCommand::SetSpeed(pwm) => state.speed = pwm,
            _ => {}
        }
        state.log.push(cmd);
    }
}

impl Actuator for MockActuator {
    fn stop(&mut self) {
        self.record(DriveCommand::Stop);
    }

    fn set_speed(&mut self, pwm: u8) {
        self.record(DriveCommand::SetSpeed(pwm));
    }

    fn move_forward(&mut self) {
        self.record(DriveCommand::Forward);
    }

    fn move_backward(&mut self) {
        self.record(DriveCommand::Backward);
    }

    fn turn_left(&mut self) {
        self.record(DriveCommand::TurnLeft);
    }

    fn turn_right(&mut self) {
        self.record(DriveCommand::TurnRight);
    }

    fn rotate_left(&mut self) {
        self.record(DriveCommand::RotateLeft);
    }

    fn rotate_right(&mut self) {
        self.record(DriveCommand::RotateRight);
    }

    fn current_speed(&self) -> u8 {
        self.state.lock().speed
    }
}

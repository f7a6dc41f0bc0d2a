//! 控制层错误类型定义

use rover_protocol::Mode;
use thiserror::Error;

use crate::config::ConfigError;

/// 控制层错误类型
///
/// 稳态 tick 从不返回错误：外设读数尽力而为，链路发送失败只记录日志。
/// 错误只出现在构造、配置与启动阶段，以及非法的模式迁移请求。
#[derive(Error, Debug)]
pub enum ControlError {
    /// 构造协调器时缺少外设
    #[error("Missing peripheral: {0}")]
    MissingPeripheral(&'static str),

    /// 迁移不在模式迁移表中
    #[error("Illegal mode transition: {from} -> {to}")]
    IllegalTransition { from: Mode, to: Mode },

    /// 启动流程只能执行一次
    #[error("Already booted (current mode: {0})")]
    AlreadyBooted(Mode),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_error_display() {
        let err = ControlError::MissingPeripheral("actuator");
        assert_eq!(format!("{}", err), "Missing peripheral: actuator");

        let err = ControlError::IllegalTransition {
            from: Mode::WaitingLink,
            to: Mode::ObstacleDetected,
        };
        assert_eq!(
            format!("{}", err),
            "Illegal mode transition: WAITING_BT -> OBSTACLE"
        );

        let err = ControlError::AlreadyBooted(Mode::Auto);
        assert!(format!("{}", err).contains("AUTO"));
    }

    #[test]
    fn test_from_config_error() {
        let err: ControlError = ConfigError::Invalid("telemetry_ms must be > 0".into()).into();
        match err {
            ControlError::Config(ConfigError::Invalid(msg)) => assert!(msg.contains("telemetry_ms")),
            other => panic!("Expected Config variant, got {:?}", other),
        }
    }
}

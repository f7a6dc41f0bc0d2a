//! 命令定义和实现

pub mod config;
pub mod decode;
pub mod simulate;

pub use config::ConfigCommand;
pub use decode::DecodeCommand;
pub use simulate::SimulateCommand;

use std::path::Path;

use anyhow::{Context, Result};
use rover_control::RoverConfig;

/// 加载配置文件，未指定时使用默认配置
pub fn load_config(path: Option<&Path>) -> Result<RoverConfig> {
    match path {
        Some(path) => RoverConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(RoverConfig::default()),
    }
}

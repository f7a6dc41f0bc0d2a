//! 配置管理命令

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;

use super::load_config;

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 打印生效的配置（TOML）
    Show {
        /// 配置文件，缺省时打印默认配置
        file: Option<PathBuf>,
    },

    /// 校验配置文件
    Check {
        /// 配置文件，缺省时校验默认配置
        file: Option<PathBuf>,
    },
}

impl ConfigCommand {
    pub fn execute(self) -> Result<()> {
        match self {
            ConfigCommand::Show { file } => Self::show(file),
            ConfigCommand::Check { file } => Self::check(file),
        }
    }

    fn show(file: Option<PathBuf>) -> Result<()> {
        let config = load_config(file.as_deref())?;
        let text = config
            .to_toml_string()
            .context("Failed to serialize config")?;
        print!("{}", text);
        Ok(())
    }

    fn check(file: Option<PathBuf>) -> Result<()> {
        let config = load_config(file.as_deref())?;
        match &file {
            Some(path) => println!("✅ Config OK: {}", path.display()),
            None => println!("✅ Default config OK"),
        }
        println!(
            "  sensor refresh {}ms, telemetry {}ms, obstacle < {}cm, headlights < {}",
            config.timing.sensor_refresh_ms,
            config.timing.telemetry_ms,
            config.thresholds.obstacle_cm,
            config.thresholds.light_level
        );
        Ok(())
    }
}

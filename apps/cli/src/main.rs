//! # Rover CLI
//!
//! 小车协调器的命令行工具。
//!
//! ```bash
//! # 用 mock 外设跑一段场景脚本，打印模式迁移和链路输出
//! rover-cli simulate --scenario obstacle.toml --ticks 500 --tick-ms 10
//!
//! # 查看 / 校验配置
//! rover-cli config show rover.toml
//! rover-cli config check rover.toml
//!
//! # 解析一行链路输出
//! rover-cli decode 'event:obstacle_detected'
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod scenario;

use commands::{ConfigCommand, DecodeCommand, SimulateCommand};

/// Rover CLI - 小车协调器命令行工具
#[derive(Parser, Debug)]
#[command(name = "rover-cli")]
#[command(about = "Command-line interface for the rover coordinator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 用 mock 外设和虚拟时钟运行协调器
    Simulate {
        #[command(flatten)]
        args: SimulateCommand,
    },

    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),

    /// 解析一行链路输出（遥测帧或事件）
    Decode {
        #[command(flatten)]
        args: DecodeCommand,
    },
}

fn main() -> Result<()> {
    // 日志输出到 stderr，stdout 留给链路数据
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rover_cli=info,rover_control=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { args } => args.execute(),
        Commands::Config(cmd) => cmd.execute(),
        Commands::Decode { args } => args.execute(),
    }
}

//! 仿真命令
//!
//! 用 mock 外设和虚拟时钟驱动协调器：启动、按场景注入读数、逐 tick 运行，
//! 把模式迁移和链路上发出的每一行打印到 stdout。

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rover_control::RoverBuilder;
use rover_hal::Clock;
use rover_hal::mock::MockRig;
use tracing::{debug, info};

use super::load_config;
use crate::scenario::Scenario;

/// 仿真命令参数
#[derive(Args, Debug)]
pub struct SimulateCommand {
    /// 场景脚本（TOML）
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,

    /// 协调器配置（TOML）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 运行的 tick 数
    #[arg(short, long, default_value_t = 1000)]
    pub ticks: u64,

    /// 每个 tick 推进的虚拟时间（毫秒）
    #[arg(long, default_value_t = 10)]
    pub tick_ms: u64,

    /// 测距噪声幅度（cm），读数在 ±noise 内均匀抖动
    #[arg(long, default_value_t = 0.0)]
    pub noise: f32,

    /// 噪声随机种子
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl SimulateCommand {
    pub fn execute(self) -> Result<()> {
        ensure!(
            self.noise.is_finite() && self.noise >= 0.0,
            "--noise must be a finite, non-negative number, got {}",
            self.noise
        );
        let config = load_config(self.config.as_deref())?;
        let scenario = match &self.scenario {
            Some(path) => Scenario::load(path)?,
            None => Scenario::default(),
        };
        if let Some(name) = &scenario.name {
            info!("Scenario: {}", name);
        }

        let keymap = config.remote.clone();
        let rig = MockRig::new();
        let mut rover = RoverBuilder::new()
            .config(config)
            .mock_rig(&rig)
            .build()
            .context("Failed to build rover")?;

        rover.boot().context("Boot failed")?;
        println!("[{:>8}ms] booted, mode {}", rig.clock.now_ms(), rover.mode());

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut base_distance = 100.0_f32;
        let mut steps = scenario.step.iter().peekable();

        for _ in 0..self.ticks {
            rig.clock.advance(self.tick_ms);
            let now = rig.clock.now_ms();

            while let Some(step) = steps.next_if(|step| step.at_ms <= now) {
                debug!("Applying step at {}ms", step.at_ms);
                step.apply(&rig, &keymap)?;
                if let Some(distance) = step.distance {
                    base_distance = distance;
                }
            }

            if self.noise > 0.0 && base_distance >= 0.0 {
                let jitter = rng.gen_range(-self.noise..=self.noise);
                rig.distance.set((base_distance + jitter).max(0.0));
            }

            let report = rover.tick();
            for (from, to) in &report.transitions {
                println!("[{:>8}ms] mode {} -> {}", report.now_ms, from, to);
            }
            for line in rig.link.take_sent() {
                println!("[{:>8}ms] >> {}", report.now_ms, line);
            }
        }

        println!(
            "[{:>8}ms] done: {} ticks, mode {}, {} transitions, traveled {:.2}cm",
            rig.clock.now_ms(),
            rover.ticks(),
            rover.mode(),
            rover.transition_count(),
            rover.metrics().dist_traveled_cm()
        );
        Ok(())
    }
}

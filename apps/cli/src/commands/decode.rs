//! 链路输出解析命令

use anyhow::{Context, Result};
use clap::Args;
use rover_protocol::LinkMessage;

/// 解析命令参数
#[derive(Args, Debug)]
pub struct DecodeCommand {
    /// 一行链路输出，如 `event:auto_mode` 或遥测 JSON
    pub line: String,
}

impl DecodeCommand {
    pub fn execute(self) -> Result<()> {
        let message = LinkMessage::decode(&self.line)
            .with_context(|| format!("Cannot decode {:?}", self.line))?;

        match message {
            LinkMessage::Event(event) => {
                println!("event: {}", event.name());
            }
            LinkMessage::Telemetry(frame) => {
                println!("telemetry:");
                println!("  uptime:      {}s", frame.uptime_s);
                println!("  mode:        {}", frame.mode);
                println!("  distance:    {:.2}cm", frame.distance_cm);
                println!("  last remote: 0x{:x}", frame.last_ir_cmd);
                println!("  light:       {}", frame.light_level);
                println!("  speed:       {} pwm", frame.speed_pwm);
                println!("  traveled:    {:.2}cm", frame.dist_traveled_cm);
            }
        }
        Ok(())
    }
}

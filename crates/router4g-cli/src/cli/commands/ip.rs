//! `router4g ip` - Show the current WAN IP.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::config::TimingsConfig;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context) -> Result<()> {
    let controller = ctx.controller(TimingsConfig::default())?;
    let ip = controller.get_current_ip().await?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "ip": ip }));
        }
        OutputFormat::Yaml => {
            println!("ip: {ip}");
        }
        OutputFormat::Pretty => {
            println!("WAN IP: {}", ip.cyan().bold());
        }
    }

    Ok(())
}

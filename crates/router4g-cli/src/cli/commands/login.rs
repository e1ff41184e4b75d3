//! `router4g login` - Verify the admin credentials.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::config::TimingsConfig;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context) -> Result<()> {
    let controller = ctx.controller(TimingsConfig::default())?;
    controller.authenticate().await?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({ "authenticated": true, "username": ctx.username() })
            );
        }
        OutputFormat::Yaml => {
            println!("authenticated: true");
            println!("username: {}", ctx.username());
        }
        OutputFormat::Pretty => {
            println!(
                "{} Logged in to {} as {}.",
                "Success:".green().bold(),
                controller.client().base_url(),
                ctx.username().cyan()
            );
        }
    }

    Ok(())
}

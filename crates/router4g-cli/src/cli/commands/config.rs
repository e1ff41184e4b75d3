//! `router4g config` - CLI configuration management.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub fn execute(path: &Path, output_format: OutputFormat, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(path, output_format),
        ConfigCommands::Set { key, value } => set_config(path, &key, &value),
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn show_config(path: &Path, output_format: OutputFormat) -> Result<()> {
    let mut config = Config::load(path)?;
    if config.password.is_some() {
        config.password = Some("********".into());
    }

    if output_format.print_structured(&config)? {
        return Ok(());
    }

    let unset = || "(not set)".dimmed().to_string();
    let show = |value: &Option<String>| value.clone().unwrap_or_else(unset);

    println!("{}", "Current Configuration:".bold());
    println!();
    println!("  {} {}", "address:".bold(), show(&config.address));
    println!("  {} {}", "username:".bold(), show(&config.username));
    println!("  {} {}", "password:".bold(), show(&config.password));
    println!("  {} {}", "profile:".bold(), show(&config.profile));
    println!("  {} {}", "ip_source:".bold(), show(&config.ip_source));
    println!(
        "  {} {}",
        "output_format:".bold(),
        config.output_format.unwrap_or_default()
    );
    println!(
        "  {} {}",
        "log_dir:".bold(),
        config
            .log_dir
            .as_ref()
            .map_or_else(unset, |dir| dir.display().to_string())
    );

    let timings = [
        ("timings.settle_secs", config.timings.settle_secs.map(|v| v.to_string())),
        ("timings.interval_secs", config.timings.interval_secs.map(|v| v.to_string())),
        ("timings.max_attempts", config.timings.max_attempts.map(|v| v.to_string())),
        ("timings.cycle_pause_secs", config.timings.cycle_pause_secs.map(|v| v.to_string())),
    ];
    for (key, value) in timings {
        if let Some(value) = value {
            println!("  {} {}", format!("{key}:").bold(), value);
        }
    }

    let endpoints = [
        ("login", &config.endpoints.login),
        ("status", &config.endpoints.status),
        ("restart", &config.endpoints.restart),
        ("disconnect", &config.endpoints.disconnect),
        ("connect", &config.endpoints.connect),
    ];
    for (name, endpoint) in endpoints {
        if let Some(endpoint) = endpoint {
            let shown = if endpoint.is_empty() {
                "(disabled)".dimmed().to_string()
            } else {
                endpoint.clone()
            };
            println!("  {} {}", format!("endpoints.{name}:").bold(), shown);
        }
    }

    Ok(())
}

fn set_config(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load(path)?;
    config.set(key, value)?;
    config.save(path)?;

    if key == "password" && !value.is_empty() {
        println!("{} password set.", "Success:".green().bold());
    } else if value.is_empty() {
        println!("{} {} cleared.", "Success:".green().bold(), key);
    } else {
        println!("{} {} set to {}.", "Success:".green().bold(), key, value.cyan());
    }

    Ok(())
}

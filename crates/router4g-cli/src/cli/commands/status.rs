//! `router4g status` - Show the router's connection status.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::config::TimingsConfig;

pub async fn execute(ctx: Context) -> Result<()> {
    let controller = ctx.controller(TimingsConfig::default())?;
    let status = controller.check_connection_status().await?;

    if ctx.output_format.print_structured(&status)? {
        return Ok(());
    }

    let state = if status.is_connected {
        "connected".green().bold()
    } else {
        "disconnected".red().bold()
    };
    let ip = if status.has_ip() {
        status.current_ip.cyan().to_string()
    } else {
        "(none)".dimmed().to_string()
    };

    println!("{}", "Connection Status".bold().underline());
    println!();
    println!("  {} {}", "State:".bold(), state);
    println!("  {} {}", "WAN IP:".bold(), ip);
    println!("  {} {}", "Uptime:".bold(), format_uptime(status.uptime_seconds));
    match status.signal_strength {
        Some(signal) => println!("  {} {}", "Signal:".bold(), signal),
        None => println!("  {} {}", "Signal:".bold(), "N/A".dimmed()),
    }

    Ok(())
}

fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else {
        format!("{minutes}m {secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::format_uptime;

    #[test]
    fn uptime_formatting() {
        assert_eq!(format_uptime(42), "0m 42s");
        assert_eq!(format_uptime(3_725), "1h 2m 5s");
        assert_eq!(format_uptime(90_061), "1d 1h 1m");
    }
}

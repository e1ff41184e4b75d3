//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use router4g::ResetStrategy;
use std::path::PathBuf;

use crate::config::TimingsConfig;
use crate::output::OutputFormat;

/// Reset and verify the WAN IP of a 4G router
///
/// Logs in to the router's admin web interface, cycles the cellular link
/// or reboots the device, and waits until a new WAN IP shows up.
#[derive(Parser, Debug)]
#[command(name = "router4g")]
#[command(author, version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Router address: host, host:port or URL
    #[arg(short, long, env = "ROUTER4G_ADDRESS", global = true)]
    pub address: Option<String>,

    /// Admin username
    #[arg(short, long, env = "ROUTER4G_USERNAME", global = true)]
    pub username: Option<String>,

    /// Admin password (prompted for when missing)
    #[arg(short, long, env = "ROUTER4G_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Endpoint profile of the router model
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Where to read the WAN IP from: router, ipify or an echo service URL
    #[arg(long, env = "ROUTER4G_IP_SOURCE", global = true)]
    pub ip_source: Option<String>,

    /// Config file to use instead of the default location
    #[arg(short, long, env = "ROUTER4G_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Write a daily log file into this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the router's connection status
    Status,

    /// Show the current WAN IP
    Ip,

    /// Check that the admin credentials are accepted
    Login,

    /// Reset the WAN IP and wait for a new one
    Reset(ResetArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Reset command
// ============================================================================

/// Reset method choices.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum MethodArg {
    /// Connection cycle, then restart if the IP did not change
    #[default]
    Auto,
    /// Disconnect and reconnect the cellular link
    Connection,
    /// Reboot the router
    Restart,
}

impl From<MethodArg> for ResetStrategy {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Auto => Self::Auto,
            MethodArg::Connection => Self::ConnectionCycle,
            MethodArg::Restart => Self::Restart,
        }
    }
}

#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset method
    #[arg(short, long, value_enum, default_value_t = MethodArg::Auto)]
    pub method: MethodArg,

    /// Maximum number of IP polls per method
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Seconds between IP polls
    #[arg(long)]
    pub interval_secs: Option<u64>,

    /// Seconds to wait after the reset action before polling
    #[arg(long)]
    pub settle_secs: Option<u64>,

    /// Seconds between disconnect and reconnect
    #[arg(long)]
    pub cycle_pause_secs: Option<u64>,

    /// Double the poll interval after every poll
    #[arg(long)]
    pub backoff: bool,
}

impl ResetArgs {
    /// Timing overrides given on the command line.
    #[must_use]
    pub const fn timings(&self) -> TimingsConfig {
        TimingsConfig {
            settle_secs: self.settle_secs,
            interval_secs: self.interval_secs,
            max_attempts: self.max_attempts,
            cycle_pause_secs: self.cycle_pause_secs,
        }
    }
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Value to set (empty to clear)
        value: String,
    },

    /// Show config file path
    Path,
}

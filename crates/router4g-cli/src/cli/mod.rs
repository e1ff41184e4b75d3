//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use router4g::{IpSource, RouterProfile};

use crate::config::Config;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = Config::path(cli.config.as_deref())?;
    let config = Config::load(&config_path)?;

    let log_dir = cli.log_dir.clone().or_else(|| config.log_dir.clone());
    if let Some(path) = crate::logging::init(cli.verbose, log_dir.as_deref())? {
        tracing::debug!(path = %path.display(), "logging to file");
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Determine output format
    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Pretty);

    // Config commands must work even when the file holds bad values,
    // so the router context is only resolved for router commands
    let context = || -> Result<commands::Context> {
        let profile_name = cli
            .profile
            .as_deref()
            .or(config.profile.as_deref())
            .unwrap_or("generic");
        let profile = RouterProfile::by_name(profile_name)?.with_overrides(&config.endpoints);

        let ip_source: IpSource = cli
            .ip_source
            .as_deref()
            .or(config.ip_source.as_deref())
            .unwrap_or("router")
            .parse()?;

        // Flags and env (merged by clap) win over the config file
        Ok(commands::Context {
            address: cli.address.clone().or_else(|| config.address.clone()),
            username: cli.username.clone().or_else(|| config.username.clone()),
            password: cli.password.clone().or_else(|| config.password.clone()),
            profile,
            ip_source,
            timings: config.timings,
            output_format,
        })
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Config(args) => commands::config::execute(&config_path, output_format, args),
        Commands::Status => commands::status::execute(context()?).await,
        Commands::Ip => commands::ip::execute(context()?).await,
        Commands::Login => commands::login::execute(context()?).await,
        Commands::Reset(args) => commands::reset::execute(context()?, args).await,
    }
}

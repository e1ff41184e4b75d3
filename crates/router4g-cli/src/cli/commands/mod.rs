//! Command implementations.

pub mod config;
pub mod ip;
pub mod login;
pub mod reset;
pub mod status;

use std::io::IsTerminal;

use router4g::{
    IpResetController, IpSource, ResetTimings, RouterClient, RouterEndpoint, RouterProfile,
};

use crate::config::TimingsConfig;
use crate::output::OutputFormat;

/// Username used by most routers out of the box.
const DEFAULT_USERNAME: &str = "admin";

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Router address
    pub address: Option<String>,

    /// Admin username
    pub username: Option<String>,

    /// Admin password
    pub password: Option<String>,

    /// Endpoint profile, with config overrides applied
    pub profile: RouterProfile,

    /// Where the WAN IP is read from
    pub ip_source: IpSource,

    /// Timing overrides from the config file
    pub timings: TimingsConfig,

    /// Output format
    pub output_format: OutputFormat,
}

impl Context {
    /// Get the router address, returning an error if not set.
    pub fn require_address(&self) -> anyhow::Result<&str> {
        self.address.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Router address required.\n\n\
                 Set it with one of:\n  \
                 1. --address <ADDRESS>\n  \
                 2. ROUTER4G_ADDRESS environment variable\n  \
                 3. router4g config set address <ADDRESS>"
            )
        })
    }

    /// Admin username, falling back to the common default.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(DEFAULT_USERNAME)
    }

    /// Get the password, prompting on a terminal if none was configured.
    pub fn require_password(&self) -> anyhow::Result<String> {
        if let Some(password) = &self.password {
            return Ok(password.clone());
        }

        if !std::io::stdin().is_terminal() {
            anyhow::bail!(
                "Router password required.\n\n\
                 Set it with one of:\n  \
                 1. --password <PASSWORD>\n  \
                 2. ROUTER4G_PASSWORD environment variable (recommended)\n  \
                 3. router4g config set password <PASSWORD>"
            );
        }

        let password = dialoguer::Password::new()
            .with_prompt(format!(
                "Password for {}@{}",
                self.username(),
                self.require_address()?
            ))
            .interact()?;
        Ok(password)
    }

    /// Create a controller for the configured router.
    pub fn controller(&self, extra: TimingsConfig) -> anyhow::Result<IpResetController> {
        let endpoint = RouterEndpoint::new(
            self.require_address()?,
            self.username(),
            self.require_password()?,
        );
        let client = RouterClient::builder(endpoint)
            .profile(self.profile.clone())
            .build()?;

        let timings = self.timings.merged(extra).apply(ResetTimings::default());
        Ok(IpResetController::new(client)
            .with_timings(timings)
            .with_ip_source(self.ip_source.clone()))
    }
}

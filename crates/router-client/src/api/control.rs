//! Reboot and cellular connection endpoints.

use crate::RouterClient;
use router_core::Result;
use tracing::info;

/// Reboot and cellular connection endpoints
pub struct ControlApi<'a> {
    client: &'a RouterClient,
}

impl<'a> ControlApi<'a> {
    pub(crate) fn new(client: &'a RouterClient) -> Self {
        Self { client }
    }

    /// Ask the router to reboot
    pub async fn restart(&self) -> Result<()> {
        let profile = self.client.profile();
        let path = profile.require(&profile.restart, "restart")?;
        let params: Vec<(&str, &str)> = profile
            .restart_params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        self.client.post_form(path, &params).await?;
        info!("restart command sent");
        Ok(())
    }

    /// Drop the cellular link
    pub async fn disconnect(&self) -> Result<()> {
        let profile = self.client.profile();
        let path = profile.require(&profile.disconnect, "disconnect")?;

        self.client.post_form(path, &[]).await?;
        info!("cellular connection disconnected");
        Ok(())
    }

    /// Bring the cellular link back up
    pub async fn connect(&self) -> Result<()> {
        let profile = self.client.profile();
        let path = profile.require(&profile.connect, "connect")?;

        self.client.post_form(path, &[]).await?;
        info!("cellular connection reconnected");
        Ok(())
    }
}

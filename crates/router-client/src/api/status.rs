//! Status endpoint.

use crate::RouterClient;
use router_core::{ConnectionStatus, Result};

/// Status endpoint
pub struct StatusApi<'a> {
    client: &'a RouterClient,
}

impl<'a> StatusApi<'a> {
    pub(crate) fn new(client: &'a RouterClient) -> Self {
        Self { client }
    }

    /// Fetch a fresh connection status snapshot
    pub async fn fetch(&self) -> Result<ConnectionStatus> {
        let body = self.client.get_text(&self.client.profile().status).await?;
        ConnectionStatus::parse(&body)
    }
}

//! Login endpoint.

use crate::RouterClient;
use router_core::{Result, RouterError};
use tracing::debug;

/// Login endpoint
pub struct SessionApi<'a> {
    client: &'a RouterClient,
}

impl<'a> SessionApi<'a> {
    pub(crate) fn new(client: &'a RouterClient) -> Self {
        Self { client }
    }

    /// Submit the endpoint credentials to the login form
    ///
    /// Session cookies from the reply are kept by the client. An
    /// unreachable router is reported as [`RouterError::AuthFailed`] too,
    /// since no session could be established.
    pub async fn login(&self) -> Result<()> {
        let endpoint = self.client.endpoint();
        let params = [
            ("username", endpoint.username()),
            ("password", endpoint.password()),
        ];

        let body = match self
            .client
            .post_form(&self.client.profile().login, &params)
            .await
        {
            Ok(body) => body,
            Err(RouterError::Network(msg)) => {
                return Err(RouterError::AuthFailed(format!("router unreachable: {msg}")))
            }
            Err(e) => return Err(e),
        };

        if let Some(reason) = rejection(&body) {
            return Err(RouterError::AuthFailed(reason));
        }

        debug!(username = endpoint.username(), "logged in");
        Ok(())
    }
}

/// Some routers answer a bad login with 200 and a JSON verdict
fn rejection(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(message) = value
        .get("error")
        .and_then(|e| e.as_str())
        .filter(|e| !e.is_empty())
    {
        return Some(message.to_string());
    }

    match value.get("success").and_then(serde_json::Value::as_bool) {
        Some(false) => Some("login rejected by router".into()),
        _ => None,
    }
}

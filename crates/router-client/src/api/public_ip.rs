//! Public IP echo services.

use crate::RouterClient;
use router_core::{Result, RouterError};
use std::net::IpAddr;

/// Public IP echo service
pub struct PublicIpApi<'a> {
    client: &'a RouterClient,
}

impl<'a> PublicIpApi<'a> {
    pub(crate) fn new(client: &'a RouterClient) -> Self {
        Self { client }
    }

    /// Ask an echo service for the address our traffic leaves from
    ///
    /// Accepts a JSON `{"ip": "..."}` body or the bare address as text.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let body = self.client.get_url(url).await?;
        extract_ip(&body)
            .ok_or_else(|| RouterError::Network(format!("{url} returned no IP address")))
    }
}

fn extract_ip(body: &str) -> Option<String> {
    let candidate = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("ip").and_then(|ip| ip.as_str()).map(String::from))
        .unwrap_or_else(|| body.trim().to_string());

    candidate.parse::<IpAddr>().ok().map(|ip| ip.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_and_plain_bodies() {
        assert_eq!(extract_ip(r#"{"ip":"203.0.113.7"}"#).as_deref(), Some("203.0.113.7"));
        assert_eq!(extract_ip("203.0.113.8\n").as_deref(), Some("203.0.113.8"));
        assert_eq!(extract_ip("2001:db8::1").as_deref(), Some("2001:db8::1"));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(extract_ip("<html>rate limited</html>"), None);
        assert_eq!(extract_ip(r#"{"ip": 42}"#), None);
    }
}

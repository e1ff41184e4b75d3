use crate::{Result, RouterError};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Snapshot of the router's WAN link
///
/// Recomputed on every status check and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    /// Whether the cellular link is up
    pub is_connected: bool,

    /// Current WAN IP, empty when the router reports none
    pub current_ip: String,

    /// Seconds since the link (or device) came up
    #[serde(default)]
    pub uptime_seconds: u64,

    /// Signal strength as reported by the modem
    #[serde(default)]
    pub signal_strength: Option<i32>,
}

/// Vendor status body as loosely as routers tend to shape it
#[derive(Debug, Default, Deserialize)]
struct RawStatus {
    #[serde(default, alias = "connected", alias = "online")]
    is_connected: Option<bool>,

    #[serde(default, alias = "wan_ip", alias = "ip")]
    current_ip: Option<String>,

    #[serde(default, alias = "uptime")]
    uptime_seconds: Option<u64>,

    #[serde(default, alias = "signal", alias = "rssi")]
    signal_strength: Option<i32>,
}

impl ConnectionStatus {
    /// Parse a status response body
    ///
    /// A body without any WAN IP field is not something this client
    /// can work with and yields [`RouterError::UnsupportedRouter`].
    pub fn parse(body: &str) -> Result<Self> {
        let raw: RawStatus = serde_json::from_str(body)?;

        let current_ip = raw
            .current_ip
            .map(|ip| ip.trim().to_string())
            .ok_or_else(|| {
                RouterError::UnsupportedRouter("status response has no WAN IP field".into())
            })?;

        // Routers commonly report 0.0.0.0 while the link is down
        let current_ip = if current_ip == "0.0.0.0" {
            String::new()
        } else {
            current_ip
        };

        let is_connected = raw.is_connected.unwrap_or(!current_ip.is_empty());

        Ok(Self {
            is_connected,
            current_ip,
            uptime_seconds: raw.uptime_seconds.unwrap_or_default(),
            signal_strength: raw.signal_strength,
        })
    }

    /// Returns true if the router reports a WAN IP
    #[must_use]
    pub fn has_ip(&self) -> bool {
        !self.current_ip.is_empty()
    }

    /// Try to parse the WAN IP as an address
    #[must_use]
    pub fn ip_addr(&self) -> Option<IpAddr> {
        self.current_ip.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_fields() {
        let status = ConnectionStatus::parse(
            r#"{"is_connected": true, "current_ip": "10.0.0.5", "uptime_seconds": 120, "signal_strength": -71}"#,
        )
        .unwrap();

        assert!(status.is_connected);
        assert_eq!(status.current_ip, "10.0.0.5");
        assert_eq!(status.uptime_seconds, 120);
        assert_eq!(status.signal_strength, Some(-71));
        assert_eq!(status.ip_addr(), Some("10.0.0.5".parse().unwrap()));
    }

    #[test]
    fn parses_vendor_aliases() {
        let status =
            ConnectionStatus::parse(r#"{"connected": false, "wan_ip": "10.1.2.3", "uptime": 5, "rssi": -90}"#)
                .unwrap();

        assert!(!status.is_connected);
        assert_eq!(status.current_ip, "10.1.2.3");
        assert_eq!(status.uptime_seconds, 5);
        assert_eq!(status.signal_strength, Some(-90));
    }

    #[test]
    fn connectivity_inferred_from_ip_when_missing() {
        let up = ConnectionStatus::parse(r#"{"ip": "100.64.0.7"}"#).unwrap();
        assert!(up.is_connected);

        let down = ConnectionStatus::parse(r#"{"ip": "0.0.0.0"}"#).unwrap();
        assert!(!down.is_connected);
        assert!(!down.has_ip());
    }

    #[test]
    fn missing_ip_field_is_unsupported() {
        let err = ConnectionStatus::parse(r#"{"connected": true}"#).unwrap_err();
        assert!(matches!(err, RouterError::UnsupportedRouter(_)));
    }

    #[test]
    fn non_json_is_a_json_error() {
        let err = ConnectionStatus::parse("<html>login</html>").unwrap_err();
        assert!(matches!(err, RouterError::Json(_)));
    }
}

//! Admin endpoint paths per router model.

use router_core::{ResetMethod, Result, RouterError};
use serde::{Deserialize, Serialize};

/// Admin endpoint paths for one router model
///
/// Vendors do not agree on any of these; the `generic` profile matches the
/// layout most consumer 4G routers copied from each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterProfile {
    /// Profile name
    pub name: String,

    /// Login form endpoint (POST)
    pub login: String,

    /// Status endpoint (GET, JSON)
    pub status: String,

    /// Reboot endpoint (POST)
    pub restart: Option<String>,

    /// Form fields sent with the reboot request
    pub restart_params: Vec<(String, String)>,

    /// Cellular disconnect endpoint (POST)
    pub disconnect: Option<String>,

    /// Cellular connect endpoint (POST)
    pub connect: Option<String>,
}

impl Default for RouterProfile {
    fn default() -> Self {
        Self::generic()
    }
}

impl RouterProfile {
    /// Built-in profile names
    pub const BUILT_IN: &'static [&'static str] = &["generic"];

    /// Generic 4G router layout
    #[must_use]
    pub fn generic() -> Self {
        Self {
            name: "generic".into(),
            login: "/login".into(),
            status: "/status".into(),
            restart: Some("/restart".into()),
            restart_params: vec![("action".into(), "restart".into())],
            disconnect: Some("/connection/disconnect".into()),
            connect: Some("/connection/connect".into()),
        }
    }

    /// Look up a built-in profile
    pub fn by_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "generic" | "default" => Ok(Self::generic()),
            other => Err(RouterError::UnsupportedRouter(format!(
                "no profile named '{other}' (available: {})",
                Self::BUILT_IN.join(", ")
            ))),
        }
    }

    /// Apply path overrides on top of this profile
    #[must_use]
    pub fn with_overrides(mut self, overrides: &EndpointOverrides) -> Self {
        if let Some(login) = &overrides.login {
            self.login.clone_from(login);
        }
        if let Some(status) = &overrides.status {
            self.status.clone_from(status);
        }
        if let Some(restart) = &overrides.restart {
            self.restart = non_empty(restart);
        }
        if let Some(disconnect) = &overrides.disconnect {
            self.disconnect = non_empty(disconnect);
        }
        if let Some(connect) = &overrides.connect {
            self.connect = non_empty(connect);
        }
        if !overrides.is_empty() {
            self.name = format!("{}+custom", self.name);
        }
        self
    }

    /// Returns true if every endpoint the method needs is configured
    #[must_use]
    pub const fn supports(&self, method: ResetMethod) -> bool {
        match method {
            ResetMethod::Restart => self.restart.is_some(),
            ResetMethod::ConnectionCycle => self.disconnect.is_some() && self.connect.is_some(),
        }
    }

    /// Endpoint path for an optional action, or `UnsupportedRouter`
    pub(crate) fn require<'a>(&self, path: &'a Option<String>, action: &str) -> Result<&'a str> {
        path.as_deref().ok_or_else(|| {
            RouterError::UnsupportedRouter(format!(
                "profile '{}' has no {action} endpoint",
                self.name
            ))
        })
    }
}

/// An empty path in an override disables the endpoint
fn non_empty(path: &str) -> Option<String> {
    let path = path.trim();
    (!path.is_empty()).then(|| path.to_string())
}

/// Per-endpoint path overrides, usually read from a config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointOverrides {
    /// Login path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,

    /// Status path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Reboot path, empty to disable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart: Option<String>,

    /// Disconnect path, empty to disable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disconnect: Option<String>,

    /// Connect path, empty to disable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect: Option<String>,
}

impl EndpointOverrides {
    /// Returns true if no path is overridden
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.login.is_none()
            && self.status.is_none()
            && self.restart.is_none()
            && self.disconnect.is_none()
            && self.connect.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_supports_both_methods() {
        let profile = RouterProfile::generic();
        assert!(profile.supports(ResetMethod::Restart));
        assert!(profile.supports(ResetMethod::ConnectionCycle));
        assert_eq!(profile.login, "/login");
    }

    #[test]
    fn unknown_profile_is_unsupported() {
        let err = RouterProfile::by_name("huawei-e5577").unwrap_err();
        assert!(matches!(err, RouterError::UnsupportedRouter(_)));
        assert_eq!(RouterProfile::by_name("Generic").unwrap().name, "generic");
    }

    #[test]
    fn overrides_replace_and_disable_paths() {
        let overrides = EndpointOverrides {
            status: Some("/api/monitoring/status".into()),
            disconnect: Some(String::new()),
            ..EndpointOverrides::default()
        };
        let profile = RouterProfile::generic().with_overrides(&overrides);

        assert_eq!(profile.status, "/api/monitoring/status");
        assert_eq!(profile.disconnect, None);
        assert!(!profile.supports(ResetMethod::ConnectionCycle));
        assert!(profile.supports(ResetMethod::Restart));
        assert_eq!(profile.name, "generic+custom");
    }

    #[test]
    fn empty_overrides_keep_profile() {
        let profile = RouterProfile::generic().with_overrides(&EndpointOverrides::default());
        assert_eq!(profile, RouterProfile::generic());
    }

    #[test]
    fn require_names_the_missing_action() {
        let mut profile = RouterProfile::generic();
        profile.restart = None;
        let err = profile.require(&profile.restart, "restart").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported router: profile 'generic' has no restart endpoint"
        );
    }
}

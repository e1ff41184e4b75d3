use crate::{Result, RouterError};
use url::Url;

/// Address and admin credentials of one router
///
/// Owned by a single controller; there are no setters.
#[derive(Clone, PartialEq, Eq)]
pub struct RouterEndpoint {
    address: String,
    username: String,
    password: String,
}

impl RouterEndpoint {
    /// Create an endpoint from an address and admin credentials
    ///
    /// The address may be a bare host (`192.168.1.1`), a `host:port`
    /// pair or a full URL such as `https://router.lan:8443`.
    #[must_use]
    pub fn new(
        address: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// The address as given
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Admin username
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Admin password
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Base URL of the admin interface, without a trailing slash
    ///
    /// Plain HTTP is assumed when the address carries no scheme.
    pub fn base_url(&self) -> Result<String> {
        let address = self.address.trim().trim_end_matches('/');
        if address.is_empty() {
            return Err(RouterError::InvalidUrl("router address is empty".into()));
        }

        let candidate = if address.contains("://") {
            address.to_string()
        } else {
            format!("http://{address}")
        };

        let url = Url::parse(&candidate)
            .map_err(|e| RouterError::InvalidUrl(format!("{candidate}: {e}")))?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(RouterError::InvalidUrl(format!(
                    "unsupported scheme '{other}' in {candidate}"
                )))
            }
        }
        if url.host_str().is_none() {
            return Err(RouterError::InvalidUrl(format!("{candidate}: missing host")));
        }

        Ok(url.as_str().trim_end_matches('/').to_string())
    }
}

impl std::fmt::Debug for RouterEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterEndpoint")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

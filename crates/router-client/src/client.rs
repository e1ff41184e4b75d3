//! Router admin HTTP session.

use crate::api::{ControlApi, PublicIpApi, SessionApi, StatusApi};
use crate::profile::RouterProfile;
use reqwest::Client as HttpClient;
use router_core::{Result, RouterEndpoint, RouterError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP session against one router's admin interface
///
/// Cookies set by the login endpoint are kept for the lifetime of the
/// client. Clones share the same session.
#[derive(Clone)]
pub struct RouterClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    endpoint: RouterEndpoint,
    base_url: String,
    profile: RouterProfile,
}

impl RouterClient {
    /// Create a client for the endpoint using the generic profile
    pub fn new(endpoint: RouterEndpoint) -> Result<Self> {
        RouterClientBuilder::new(endpoint).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(endpoint: RouterEndpoint) -> RouterClientBuilder {
        RouterClientBuilder::new(endpoint)
    }

    /// Router address and credentials
    #[must_use]
    pub fn endpoint(&self) -> &RouterEndpoint {
        &self.inner.endpoint
    }

    /// Endpoint paths in use
    #[must_use]
    pub fn profile(&self) -> &RouterProfile {
        &self.inner.profile
    }

    /// Base URL of the admin interface
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Access login endpoints
    #[must_use]
    pub fn session(&self) -> SessionApi<'_> {
        SessionApi::new(self)
    }

    /// Access the status endpoint
    #[must_use]
    pub fn status(&self) -> StatusApi<'_> {
        StatusApi::new(self)
    }

    /// Access reboot and connection endpoints
    #[must_use]
    pub fn control(&self) -> ControlApi<'_> {
        ControlApi::new(self)
    }

    /// Access a public IP echo service
    #[must_use]
    pub fn public_ip(&self) -> PublicIpApi<'_> {
        PublicIpApi::new(self)
    }

    /// Perform a GET request against an admin path, returning the body
    pub(crate) async fn get_text(&self, path: &str) -> Result<String> {
        let url = self.build_url(path);
        self.get_url(&url).await
    }

    /// Perform a GET request against an absolute URL, returning the body
    pub(crate) async fn get_url(&self, url: &str) -> Result<String> {
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| RouterError::Network(e.to_string()))?;

        self.handle_response(url, response).await
    }

    /// Perform a POST request with form data, returning the body
    pub(crate) async fn post_form(&self, path: &str, params: &[(&str, &str)]) -> Result<String> {
        let url = self.build_url(path);
        debug!(url = %url, "POST form request");

        let response = self
            .inner
            .http
            .post(&url)
            .form(params)
            .send()
            .await
            .map_err(|e| RouterError::Network(e.to_string()))?;

        self.handle_response(&url, response).await
    }

    fn build_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.inner.base_url, path)
        } else {
            format!("{}/{}", self.inner.base_url, path)
        }
    }

    /// Read the body of a successful response or map the status to an error
    async fn handle_response(&self, url: &str, response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RouterError::Network(e.to_string()))?;

        if status.is_success() {
            return Ok(body);
        }

        let code = status.as_u16();
        match code {
            401 | 403 => Err(RouterError::AuthFailed(format!("HTTP {code} from {url}"))),
            404 => Err(RouterError::UnsupportedRouter(format!(
                "{url} not found (HTTP 404)"
            ))),
            _ => {
                warn!(url = %url, status = code, "unexpected router response");
                Err(RouterError::Api {
                    code,
                    message: body.trim().to_string(),
                })
            }
        }
    }
}

impl std::fmt::Debug for RouterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterClient")
            .field("endpoint", &self.inner.endpoint)
            .field("profile", &self.inner.profile.name)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring a [`RouterClient`]
pub struct RouterClientBuilder {
    endpoint: RouterEndpoint,
    profile: RouterProfile,
    timeout: Duration,
    user_agent: String,
}

impl RouterClientBuilder {
    /// Create a new builder for the given endpoint
    #[must_use]
    pub fn new(endpoint: RouterEndpoint) -> Self {
        Self {
            endpoint,
            profile: RouterProfile::generic(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("router4g/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the endpoint profile
    #[must_use]
    pub fn profile(mut self, profile: RouterProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Set the per-request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<RouterClient> {
        let base_url = self.endpoint.base_url()?;

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .cookie_store(true)
            .gzip(true)
            .build()
            .map_err(|e| RouterError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(RouterClient {
            inner: Arc::new(ClientInner {
                http,
                endpoint: self.endpoint,
                base_url,
                profile: self.profile,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_urls_from_profile_paths() {
        let client = RouterClient::new(RouterEndpoint::new("192.168.1.1", "admin", "pw")).unwrap();
        assert_eq!(client.base_url(), "http://192.168.1.1");
        assert_eq!(client.build_url("/status"), "http://192.168.1.1/status");
        assert_eq!(client.build_url("status"), "http://192.168.1.1/status");
    }

    #[test]
    fn invalid_address_fails_build() {
        let err = RouterClient::new(RouterEndpoint::new("", "admin", "pw")).unwrap_err();
        assert!(matches!(err, RouterError::InvalidUrl(_)));
    }

    #[test]
    fn debug_does_not_leak_password() {
        let client = RouterClient::new(RouterEndpoint::new("192.168.1.1", "admin", "s3cret")).unwrap();
        assert!(!format!("{client:?}").contains("s3cret"));
    }
}

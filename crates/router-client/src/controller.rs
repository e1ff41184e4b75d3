//! IP reset workflow: capture, act, poll, verify.

use crate::config::{IpSource, PollConfig, ResetTimings};
use crate::RouterClient;
use router_core::{
    ConnectionStatus, ResetAttempt, ResetMethod, ResetReport, ResetResult, ResetStrategy, Result,
    RouterEndpoint, RouterError,
};
use tracing::{debug, info, warn};

/// Connect requests sent before leaving the link to the router
const CONNECT_TRIES: u32 = 3;

/// Resets a router's WAN IP and verifies the change
///
/// Owns its credentials and HTTP session. Every operation runs its
/// requests one after another against a single router.
#[derive(Debug)]
pub struct IpResetController {
    client: RouterClient,
    timings: ResetTimings,
    ip_source: IpSource,
}

impl IpResetController {
    /// Create a controller around an existing client
    #[must_use]
    pub fn new(client: RouterClient) -> Self {
        Self {
            client,
            timings: ResetTimings::default(),
            ip_source: IpSource::default(),
        }
    }

    /// Create a controller for an endpoint with the generic profile
    pub fn for_endpoint(endpoint: RouterEndpoint) -> Result<Self> {
        Ok(Self::new(RouterClient::new(endpoint)?))
    }

    /// Set reset timings
    #[must_use]
    pub fn with_timings(mut self, timings: ResetTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Set where the current WAN IP is read from
    #[must_use]
    pub fn with_ip_source(mut self, source: IpSource) -> Self {
        self.ip_source = source;
        self
    }

    /// Underlying HTTP session
    #[must_use]
    pub fn client(&self) -> &RouterClient {
        &self.client
    }

    /// Reset timings in use
    #[must_use]
    pub fn timings(&self) -> &ResetTimings {
        &self.timings
    }

    /// Log in to the admin interface
    pub async fn authenticate(&self) -> Result<()> {
        self.client.session().login().await
    }

    /// Current WAN IP
    pub async fn get_current_ip(&self) -> Result<String> {
        match &self.ip_source {
            IpSource::RouterStatus => {
                let status = self.status_with_relogin().await?;
                if status.has_ip() {
                    Ok(status.current_ip)
                } else {
                    Err(RouterError::Network("router reports no WAN IP".into()))
                }
            }
            IpSource::Echo { url } => self.client.public_ip().fetch(url).await,
        }
    }

    /// Log in and take a status snapshot
    pub async fn check_connection_status(&self) -> Result<ConnectionStatus> {
        self.authenticate().await?;
        self.client.status().fetch().await
    }

    /// Reboot the router and wait for a new WAN IP
    pub async fn reset_ip_via_restart(&self) -> ResetAttempt {
        self.run(ResetMethod::Restart).await
    }

    /// Cycle the cellular link and wait for a new WAN IP
    pub async fn reset_ip_via_connection(&self) -> ResetAttempt {
        self.run(ResetMethod::ConnectionCycle).await
    }

    /// Run one method, or connection cycle then restart for `Auto`
    ///
    /// Stops at the first success. An authentication failure also stops the
    /// run since the next method would log in with the same credentials.
    pub async fn reset_ip(&self, strategy: ResetStrategy) -> ResetReport {
        let mut report = ResetReport::default();
        let methods = strategy.methods();

        for (i, &method) in methods.iter().enumerate() {
            let attempt = self.run(method).await;
            let stop = attempt.is_success() || attempt.result == ResetResult::AuthFailed;
            report.attempts.push(attempt);

            if stop {
                break;
            }
            if let Some(next) = methods.get(i + 1) {
                info!(failed = %method, next = %next, "falling back to next reset method");
            }
        }

        report
    }

    /// Status fetch that logs in again once if the session expired
    async fn status_with_relogin(&self) -> Result<ConnectionStatus> {
        match self.client.status().fetch().await {
            Err(e) if e.is_auth_error() => {
                debug!("session expired, logging in again");
                self.authenticate().await?;
                self.client.status().fetch().await
            }
            other => other,
        }
    }

    async fn run(&self, method: ResetMethod) -> ResetAttempt {
        let mut attempt = ResetAttempt::begin(method);
        info!(%method, router = self.client.base_url(), "starting IP reset");

        if !self.client.profile().supports(method) {
            let err = RouterError::UnsupportedRouter(format!(
                "profile '{}' cannot perform a {method}",
                self.client.profile().name
            ));
            return finish(attempt.fail_with(&err));
        }

        let previous = match self.get_current_ip().await {
            Ok(ip) => ip,
            Err(e) => {
                let result = ResetResult::from_error(&e);
                return finish(attempt.fail(result, format!("could not read IP before reset: {e}")));
            }
        };
        info!(ip = %previous, "current IP before reset");
        attempt.previous_ip = Some(previous.clone());

        if let Err(e) = self.authenticate().await {
            return finish(attempt.fail_with(&e));
        }
        if let Err(e) = self.trigger(method).await {
            return finish(attempt.fail_with(&e));
        }

        let poll = self.timings.for_method(method);
        finish(self.await_new_ip(attempt, &previous, poll).await)
    }

    async fn trigger(&self, method: ResetMethod) -> Result<()> {
        let control = self.client.control();
        match method {
            ResetMethod::Restart => match control.restart().await {
                // The router may go down before it answers
                Err(RouterError::Network(msg)) => {
                    warn!(error = %msg, "connection dropped while sending restart");
                    Ok(())
                }
                other => other,
            },
            ResetMethod::ConnectionCycle => {
                control.disconnect().await?;
                tokio::time::sleep(self.timings.cycle_pause).await;
                self.reconnect().await
            }
        }
    }

    /// Bring the link back up after a disconnect
    ///
    /// Only auth failures abort. Other errors are retried, then the link is
    /// left to the router and the poll loop.
    async fn reconnect(&self) -> Result<()> {
        let control = self.client.control();
        for n in 1..=CONNECT_TRIES {
            match control.connect().await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_auth_error() => return Err(e),
                Err(e) if n < CONNECT_TRIES => {
                    warn!(attempt = n, error = %e, "reconnect failed, retrying");
                    tokio::time::sleep(self.timings.cycle_pause).await;
                }
                Err(e) => warn!(error = %e, "reconnect failed, waiting for the router to redial"),
            }
        }
        Ok(())
    }

    async fn await_new_ip(
        &self,
        mut attempt: ResetAttempt,
        previous: &str,
        poll: &PollConfig,
    ) -> ResetAttempt {
        for n in 0..poll.max_attempts.max(1) {
            tokio::time::sleep(poll.delay_for(n)).await;
            attempt.polls += 1;

            let ip = match self.get_current_ip().await {
                Ok(ip) => ip,
                Err(e) => {
                    debug!(poll = attempt.polls, error = %e, "IP poll failed");
                    continue;
                }
            };

            if ip == previous {
                debug!(poll = attempt.polls, ip = %ip, "IP unchanged");
                attempt.current_ip = Some(ip);
                continue;
            }

            match self.check_connection_status().await {
                Ok(status) if status.is_connected => return attempt.succeed(ip),
                Ok(_) => debug!(poll = attempt.polls, ip = %ip, "new IP but link not up yet"),
                Err(e) => debug!(poll = attempt.polls, error = %e, "status check failed"),
            }
            attempt.current_ip = Some(ip);
        }

        let polls = attempt.polls;
        attempt.fail(
            ResetResult::TimedOut,
            format!(
                "no verified new IP after {polls} polls ({}s)",
                poll.max_wait().as_secs()
            ),
        )
    }
}

/// Log the finished attempt once
fn finish(attempt: ResetAttempt) -> ResetAttempt {
    let elapsed_ms = attempt.elapsed().num_milliseconds();
    if attempt.is_success() {
        info!(
            method = %attempt.method,
            previous_ip = attempt.previous_ip.as_deref().unwrap_or(""),
            new_ip = attempt.current_ip.as_deref().unwrap_or(""),
            polls = attempt.polls,
            elapsed_ms,
            "IP reset succeeded"
        );
    } else {
        warn!(
            method = %attempt.method,
            result = %attempt.result,
            previous_ip = attempt.previous_ip.as_deref().unwrap_or(""),
            polls = attempt.polls,
            elapsed_ms,
            error = attempt.error.as_deref().unwrap_or(""),
            "IP reset failed"
        );
    }
    attempt
}

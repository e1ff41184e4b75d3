use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::RouterError;

/// How the router is asked to pick up a new WAN IP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetMethod {
    /// Full device reboot
    Restart,
    /// Disconnect and reconnect the cellular link
    ConnectionCycle,
}

impl std::fmt::Display for ResetMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Restart => write!(f, "restart"),
            Self::ConnectionCycle => write!(f, "connection_cycle"),
        }
    }
}

/// Outcome of a single reset attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetResult {
    /// A new WAN IP was observed and the link is up
    Success,
    /// The poll bound elapsed without a verified new IP
    TimedOut,
    /// The router rejected the credentials or could not be logged in to
    AuthFailed,
    /// The router or IP source could not be reached
    NetworkError,
    /// The router profile lacks the endpoint this method needs
    Unsupported,
}

impl ResetResult {
    /// Classify an error that ended an attempt early
    #[must_use]
    pub const fn from_error(err: &RouterError) -> Self {
        match err {
            RouterError::AuthFailed(_) => Self::AuthFailed,
            RouterError::TimedOut(_) => Self::TimedOut,
            RouterError::UnsupportedRouter(_) => Self::Unsupported,
            _ => Self::NetworkError,
        }
    }
}

impl std::fmt::Display for ResetResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::TimedOut => write!(f, "timed out"),
            Self::AuthFailed => write!(f, "authentication failed"),
            Self::NetworkError => write!(f, "network error"),
            Self::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Record of one reset call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetAttempt {
    /// Reset method used
    pub method: ResetMethod,

    /// When the attempt began
    pub started_at: DateTime<Utc>,

    /// When the attempt ended
    pub finished_at: DateTime<Utc>,

    /// WAN IP captured before the reset action
    pub previous_ip: Option<String>,

    /// Last WAN IP observed while polling
    pub current_ip: Option<String>,

    /// Number of IP polls performed
    pub polls: u32,

    /// Outcome
    pub result: ResetResult,

    /// Error message for unsuccessful attempts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResetAttempt {
    /// Start recording an attempt now
    #[must_use]
    pub fn begin(method: ResetMethod) -> Self {
        let now = Utc::now();
        Self {
            method,
            started_at: now,
            finished_at: now,
            previous_ip: None,
            current_ip: None,
            polls: 0,
            result: ResetResult::TimedOut,
            error: None,
        }
    }

    /// Close the attempt with a verified new IP
    ///
    /// Falls back to `TimedOut` if the IP did not actually change, so a
    /// `Success` can never carry identical IPs.
    #[must_use]
    pub fn succeed(mut self, current_ip: impl Into<String>) -> Self {
        self.current_ip = Some(current_ip.into());
        self.finished_at = Utc::now();
        if self.ip_changed() {
            self.result = ResetResult::Success;
            self.error = None;
        } else {
            self.result = ResetResult::TimedOut;
            self.error = Some("WAN IP did not change".into());
        }
        self
    }

    /// Close the attempt with an unsuccessful outcome
    #[must_use]
    pub fn fail(mut self, result: ResetResult, error: impl Into<String>) -> Self {
        debug_assert!(result != ResetResult::Success);
        self.result = result;
        self.error = Some(error.into());
        self.finished_at = Utc::now();
        self
    }

    /// Close the attempt from an error that ended it early
    #[must_use]
    pub fn fail_with(self, err: &RouterError) -> Self {
        self.fail(ResetResult::from_error(err), err.to_string())
    }

    /// Returns true if the attempt produced a verified new IP
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result == ResetResult::Success
    }

    /// Returns true if both IPs are known and differ
    #[must_use]
    pub fn ip_changed(&self) -> bool {
        match (&self.previous_ip, &self.current_ip) {
            (Some(before), Some(after)) => !after.is_empty() && before != after,
            _ => false,
        }
    }

    /// Wall-clock duration of the attempt
    #[must_use]
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Which reset method(s) to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetStrategy {
    /// Full device reboot only
    Restart,
    /// Connection cycle only
    ConnectionCycle,
    /// Connection cycle first, restart if that did not work
    #[default]
    Auto,
}

impl ResetStrategy {
    /// Methods to try, in order
    #[must_use]
    pub const fn methods(self) -> &'static [ResetMethod] {
        match self {
            Self::Restart => &[ResetMethod::Restart],
            Self::ConnectionCycle => &[ResetMethod::ConnectionCycle],
            Self::Auto => &[ResetMethod::ConnectionCycle, ResetMethod::Restart],
        }
    }
}

impl FromStr for ResetStrategy {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "restart" | "reboot" => Ok(Self::Restart),
            "connection" | "connection_cycle" | "cycle" => Ok(Self::ConnectionCycle),
            "auto" => Ok(Self::Auto),
            _ => Err(RouterError::Config(format!(
                "unknown reset method '{s}' (expected auto, connection or restart)"
            ))),
        }
    }
}

impl std::fmt::Display for ResetStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Restart => write!(f, "restart"),
            Self::ConnectionCycle => write!(f, "connection"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

/// Attempts made by one strategy run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetReport {
    /// Attempts in the order they ran
    pub attempts: Vec<ResetAttempt>,
}

impl ResetReport {
    /// Returns true if the last attempt succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.last().is_some_and(ResetAttempt::is_success)
    }

    /// The attempt that decided the outcome
    #[must_use]
    pub fn last(&self) -> Option<&ResetAttempt> {
        self.attempts.last()
    }
}

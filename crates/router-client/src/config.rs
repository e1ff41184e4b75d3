//! Poll timing and IP source configuration.

use router_core::{ResetMethod, RouterError};
use std::str::FromStr;
use std::time::Duration;

/// Public IP echo service used by the original tooling
pub const IPIFY_URL: &str = "https://api.ipify.org?format=json";

/// Delay growth between polls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same interval between every poll
    Fixed,
    /// Interval doubles after every poll, capped at `max`
    Exponential {
        /// Upper bound for a single delay
        max: Duration,
    },
}

/// Bounded polling for a new WAN IP
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Wait after the reset action before the first poll
    pub settle: Duration,

    /// Delay between polls
    pub interval: Duration,

    /// Maximum number of polls
    pub max_attempts: u32,

    /// How the delay grows between polls
    pub backoff: Backoff,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::restart()
    }
}

impl PollConfig {
    /// Defaults for a full reboot
    #[must_use]
    pub const fn restart() -> Self {
        Self {
            settle: Duration::from_secs(30),
            interval: Duration::from_secs(5),
            max_attempts: 30,
            backoff: Backoff::Fixed,
        }
    }

    /// Defaults for a connection cycle
    #[must_use]
    pub const fn connection_cycle() -> Self {
        Self {
            settle: Duration::from_secs(5),
            interval: Duration::from_secs(3),
            max_attempts: 20,
            backoff: Backoff::Fixed,
        }
    }

    /// Set the settle delay
    #[must_use]
    pub const fn settle(mut self, duration: Duration) -> Self {
        self.settle = duration;
        self
    }

    /// Set the poll interval
    #[must_use]
    pub const fn interval(mut self, duration: Duration) -> Self {
        self.interval = duration;
        self
    }

    /// Set maximum polls
    #[must_use]
    pub const fn max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }

    /// Set the backoff strategy
    #[must_use]
    pub const fn backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Delay before the given poll (0-based)
    ///
    /// The first poll waits out the settle delay.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return self.settle;
        }

        match self.backoff {
            Backoff::Fixed => self.interval,
            Backoff::Exponential { max } => {
                let factor = 2u32.saturating_pow(attempt - 1);
                self.interval.saturating_mul(factor).min(max)
            }
        }
    }

    /// Total time spent sleeping across every poll
    #[must_use]
    pub fn max_wait(&self) -> Duration {
        (0..self.max_attempts.max(1)).map(|a| self.delay_for(a)).sum()
    }
}

/// Timing for both reset methods
#[derive(Debug, Clone)]
pub struct ResetTimings {
    /// Polling after a reboot
    pub restart: PollConfig,

    /// Polling after a connection cycle
    pub connection: PollConfig,

    /// Pause between disconnect and reconnect
    pub cycle_pause: Duration,
}

impl Default for ResetTimings {
    fn default() -> Self {
        Self {
            restart: PollConfig::restart(),
            connection: PollConfig::connection_cycle(),
            cycle_pause: Duration::from_secs(5),
        }
    }
}

impl ResetTimings {
    /// Use one poll configuration for both methods
    #[must_use]
    pub fn uniform(poll: PollConfig, cycle_pause: Duration) -> Self {
        Self {
            restart: poll.clone(),
            connection: poll,
            cycle_pause,
        }
    }

    /// Poll configuration for a method
    #[must_use]
    pub const fn for_method(&self, method: ResetMethod) -> &PollConfig {
        match method {
            ResetMethod::Restart => &self.restart,
            ResetMethod::ConnectionCycle => &self.connection,
        }
    }
}

/// Where the current WAN IP is read from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IpSource {
    /// The router's own status endpoint
    #[default]
    RouterStatus,
    /// A public IP echo service
    Echo {
        /// Service URL, answering JSON `{"ip": ...}` or plain text
        url: String,
    },
}

impl IpSource {
    /// The ipify echo service
    #[must_use]
    pub fn ipify() -> Self {
        Self::Echo {
            url: IPIFY_URL.to_string(),
        }
    }
}

impl FromStr for IpSource {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "router" | "status" => Ok(Self::RouterStatus),
            "ipify" => Ok(Self::ipify()),
            other => {
                let url = url::Url::parse(other)
                    .map_err(|e| RouterError::InvalidUrl(format!("{other}: {e}")))?;
                Ok(Self::Echo { url: url.into() })
            }
        }
    }
}

impl std::fmt::Display for IpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RouterStatus => write!(f, "router"),
            Self::Echo { url } => write!(f, "{url}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_delays() {
        let poll = PollConfig::restart()
            .settle(Duration::from_secs(10))
            .interval(Duration::from_secs(2))
            .max_attempts(4);

        assert_eq!(poll.delay_for(0), Duration::from_secs(10));
        assert_eq!(poll.delay_for(1), Duration::from_secs(2));
        assert_eq!(poll.delay_for(3), Duration::from_secs(2));
        assert_eq!(poll.max_wait(), Duration::from_secs(16));
    }

    #[test]
    fn exponential_delays_are_capped() {
        let poll = PollConfig::connection_cycle()
            .settle(Duration::ZERO)
            .interval(Duration::from_secs(1))
            .backoff(Backoff::Exponential {
                max: Duration::from_secs(5),
            });

        assert_eq!(poll.delay_for(1), Duration::from_secs(1));
        assert_eq!(poll.delay_for(2), Duration::from_secs(2));
        assert_eq!(poll.delay_for(3), Duration::from_secs(4));
        assert_eq!(poll.delay_for(4), Duration::from_secs(5));
        assert_eq!(poll.delay_for(40), Duration::from_secs(5));
    }

    #[test]
    fn zero_attempts_still_polls_once() {
        let poll = PollConfig::restart().max_attempts(0);
        assert_eq!(poll.max_wait(), poll.settle);
    }

    #[test]
    fn timings_per_method() {
        let timings = ResetTimings::default();
        assert_eq!(timings.for_method(ResetMethod::Restart).max_attempts, 30);
        assert_eq!(
            timings.for_method(ResetMethod::ConnectionCycle).interval,
            Duration::from_secs(3)
        );
    }

    #[test]
    fn ip_source_parsing() {
        assert_eq!("router".parse::<IpSource>().unwrap(), IpSource::RouterStatus);
        assert_eq!("ipify".parse::<IpSource>().unwrap(), IpSource::ipify());
        assert_eq!(
            "https://ifconfig.me/ip".parse::<IpSource>().unwrap(),
            IpSource::Echo {
                url: "https://ifconfig.me/ip".into()
            }
        );
        assert!("not a url".parse::<IpSource>().is_err());
    }
}

//! Reset and verify the WAN IP of 4G routers through their admin web interface.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use router4g::{IpResetController, ResetStrategy, RouterEndpoint};
//!
//! #[tokio::main]
//! async fn main() -> router4g::Result<()> {
//!     let password = std::env::var("ROUTER4G_PASSWORD").unwrap_or_default();
//!     let endpoint = RouterEndpoint::new("192.168.1.1", "admin", password);
//!     let controller = IpResetController::for_endpoint(endpoint)?;
//!
//!     let report = controller.reset_ip(ResetStrategy::Auto).await;
//!     if let Some(attempt) = report.last() {
//!         println!("{}: {:?} -> {:?}", attempt.result, attempt.previous_ip, attempt.current_ip);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/router4g/1.0.0")]

// Re-export core types
pub use router_core::*;

// Re-export client
pub use router_client::{
    api, Backoff, EndpointOverrides, IpResetController, IpSource, PollConfig, ResetTimings,
    RouterClient, RouterClientBuilder, RouterProfile, IPIFY_URL,
};

// Re-export runtime for convenience
pub use tokio;
pub use serde;
pub use serde_json;

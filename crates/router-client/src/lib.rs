//! HTTP session and IP reset controller for 4G router admin interfaces.
//!
//! [`RouterClient`] talks to the router's admin endpoints, and
//! [`IpResetController`] drives a reset and verifies the new WAN IP.

#![doc(html_root_url = "https://docs.rs/router-client/1.0.0")]

mod client;
mod config;
mod controller;
mod profile;
pub mod api;

pub use client::{RouterClient, RouterClientBuilder};
pub use config::*;
pub use controller::IpResetController;
pub use profile::{EndpointOverrides, RouterProfile};
pub use router_core::{Result, RouterError};

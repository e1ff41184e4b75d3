//! Core types and error taxonomy for 4G router IP management.
//!
//! This crate provides the foundational types used across the router4g library:
//!
//! - **Types**: The router endpoint, connection status snapshots and reset attempts
//! - **Errors**: The error taxonomy with [`RouterError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use router_core::{ResetAttempt, Result};
//!
//! fn report(attempt: &ResetAttempt) -> Result<()> {
//!     println!("{} -> {:?}", attempt.method, attempt.result);
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/router-core/1.0.0")]

mod error;
pub mod types;

pub use error::{Result, RouterError};
pub use types::*;

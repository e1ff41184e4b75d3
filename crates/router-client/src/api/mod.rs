//! Admin endpoint groups.

mod control;
mod public_ip;
mod session;
mod status;

pub use control::ControlApi;
pub use public_ip::PublicIpApi;
pub use session::SessionApi;
pub use status::StatusApi;

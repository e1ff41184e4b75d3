mod endpoint;
mod reset;
mod status;

pub use endpoint::*;
pub use reset::*;
pub use status::*;

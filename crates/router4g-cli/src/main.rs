//! router4g - reset and verify a 4G router's WAN IP.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    router4g_cli::run().await
}

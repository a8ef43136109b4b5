//! Minty CLI — NFT mint-input preparation tool.
//!
//! Pins image assets and metadata records to an IPFS-compatible store and
//! resolves the answer set a downstream minting step consumes.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}

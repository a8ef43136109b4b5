//! Mint-input preparation for Minty.
//!
//! Ties answer resolution and asset ingestion into the end-to-end
//! `prepare_mint` pipeline: pin the asset, assemble the metadata record,
//! pin the metadata, and hand everything to the (external) minting step.

pub mod metadata;
pub mod pipeline;

pub use metadata::{NftMetadata, assemble_metadata, gateway_url, ipfs_uri};
pub use pipeline::{MintInputs, ProgressReporter, SilentProgress, prepare_mint};

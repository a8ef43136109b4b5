//! Content-addressable store client and asset ingestion pipeline.
//!
//! Talks to an IPFS-compatible store over its HTTP API. Every asset is
//! added under the `/nft/` namespace with a fixed addressing configuration,
//! so byte-identical content always resolves to the same content identifier
//! regardless of its source name.

pub mod client;
pub mod ingest;

pub use client::{ADD_OPTIONS, AddOptions, StoreClient};
pub use ingest::{AssetRecord, DEFAULT_ASSET_NAME, STORE_NAMESPACE, ingest_bytes, ingest_file};

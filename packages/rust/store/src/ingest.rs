//! Asset ingestion: file or raw bytes → namespaced store path → [`AssetRecord`].

use std::path::Path;

use tracing::{debug, info, instrument};

use minty_shared::{MintyError, Result};

use crate::client::StoreClient;

/// Namespace under which every asset is added, isolating this tool's
/// additions from unrelated content in a shared store.
pub const STORE_NAMESPACE: &str = "/nft";

/// Placeholder base name used when the source name is empty.
pub const DEFAULT_ASSET_NAME: &str = "asset.bin";

/// Result of ingesting one asset.
///
/// `store_path` is the synthetic namespace path the content was added
/// under; `cid` is the content-derived identifier returned by the store and
/// is the authoritative, tamper-evident reference. Downstream consumers
/// must key by `cid` — two different payloads with the same base name share
/// a `store_path` but never a `cid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    /// Namespace path used for the add, e.g. `/nft/cat.png`.
    pub store_path: String,
    /// Content identifier returned by the store.
    pub cid: String,
}

/// Ingest the file at `path`: read it fully into memory, then add it to the
/// store under its base name.
///
/// Read failures surface as I/O errors carrying the path; the store is not
/// contacted unless the read succeeds.
#[instrument(skip_all, fields(path = %path.display()))]
pub async fn ingest_file(client: &StoreClient, path: &Path) -> Result<AssetRecord> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|e| MintyError::io(path, e))?;

    debug!(bytes = content.len(), "read asset file");

    ingest_bytes(client, content, &path.to_string_lossy()).await
}

/// Ingest raw bytes under a store path derived from `source_name`.
///
/// The source name affects only the store path; the content identifier
/// depends solely on the bytes and the fixed addressing options.
pub async fn ingest_bytes(
    client: &StoreClient,
    content: Vec<u8>,
    source_name: &str,
) -> Result<AssetRecord> {
    let store_path = store_path_for(source_name);
    let cid = client.add(&store_path, content).await?;

    info!(%store_path, %cid, "asset added to store");

    Ok(AssetRecord { store_path, cid })
}

/// Derive the namespaced store path from a source name's base name.
///
/// Directory components and trailing separators are stripped; an empty or
/// root-only name falls back to [`DEFAULT_ASSET_NAME`].
fn store_path_for(source_name: &str) -> String {
    let base = Path::new(source_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(DEFAULT_ASSET_NAME);

    format!("{STORE_NAMESPACE}/{base}")
}

//! NFT metadata assembly and content URI helpers.

use serde::{Deserialize, Serialize};
use url::Url;

use minty_resolve::AnswerSet;
use minty_shared::{MintyError, Result};

/// ERC-721-style metadata record pinned alongside the asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub name: String,
    pub description: String,
    /// `ipfs://` URI of the pinned asset.
    pub image: String,
}

/// Build the metadata record from resolved answers and the asset URI.
///
/// The resolver guarantees `name` and `description` are present; a missing
/// key here means the caller skipped resolution.
pub fn assemble_metadata(answers: &AnswerSet, asset_uri: &str) -> Result<NftMetadata> {
    let field = |key: &str| {
        answers
            .get(key)
            .map(str::to_string)
            .ok_or_else(|| MintyError::validation(format!("unresolved metadata field '{key}'")))
    };

    Ok(NftMetadata {
        name: field("name")?,
        description: field("description")?,
        image: asset_uri.to_string(),
    })
}

/// Canonical `ipfs://` URI for a content identifier.
pub fn ipfs_uri(cid: &str) -> String {
    format!("ipfs://{cid}")
}

/// Browsable gateway link for a content identifier.
pub fn gateway_url(gateway: &Url, cid: &str) -> String {
    format!("{}/ipfs/{}", gateway.as_str().trim_end_matches('/'), cid)
}

//! HTTP client for the content-addressable store's `add` API.

use std::time::Duration;

use reqwest::multipart;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use minty_shared::{MintyError, Result};

/// User-Agent string for store API requests.
const USER_AGENT: &str = concat!("Minty/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// AddOptions
// ---------------------------------------------------------------------------

/// Addressing configuration for `add` submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOptions {
    /// Content identifier version.
    pub cid_version: u8,
    /// Hash algorithm name, as understood by the store.
    pub hash_alg: &'static str,
}

/// The one addressing configuration used for the life of the process.
///
/// Fixing CID version and hash algorithm is what makes two runs ingesting
/// byte-identical content yield the same content identifier.
pub const ADD_OPTIONS: AddOptions = AddOptions {
    cid_version: 1,
    hash_alg: "sha2-256",
};

// ---------------------------------------------------------------------------
// StoreClient
// ---------------------------------------------------------------------------

/// Client for a single store endpoint, constructed once per invocation and
/// passed to whatever needs it. No hidden global handle.
pub struct StoreClient {
    http: reqwest::Client,
    api_url: Url,
}

impl StoreClient {
    /// Create a client for the store daemon at `api_url`.
    pub fn new(api_url: Url, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| MintyError::Store(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, api_url })
    }

    /// Submit `content` under `store_path` and return the resulting content
    /// identifier.
    ///
    /// Uses the process-wide [`ADD_OPTIONS`]; there is no per-call override.
    /// Transport errors, non-success statuses, and unparseable responses all
    /// surface as store errors, with no retry.
    #[instrument(skip_all, fields(store_path = %store_path, bytes = content.len()))]
    pub async fn add(&self, store_path: &str, content: Vec<u8>) -> Result<String> {
        // The store reports entry names without the leading separator.
        let entry_name = store_path.trim_start_matches('/').to_string();

        let mut endpoint = self
            .api_url
            .join("api/v0/add")
            .map_err(|e| MintyError::Store(format!("invalid store endpoint: {e}")))?;
        endpoint
            .query_pairs_mut()
            .append_pair("cid-version", &ADD_OPTIONS.cid_version.to_string())
            .append_pair("hash", ADD_OPTIONS.hash_alg);

        let part = multipart::Part::bytes(content)
            .file_name(entry_name.clone())
            .mime_str("application/octet-stream")
            .map_err(|e| MintyError::Store(format!("failed to build add request: {e}")))?;
        let form = multipart::Form::new().part("file", part);

        debug!(%endpoint, "submitting add request");

        let response = self
            .http
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MintyError::Store(format!("add request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MintyError::Store(format!(
                "store rejected add: HTTP {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| MintyError::Store(format!("add response read failed: {e}")))?;

        parse_add_response(&body, &entry_name)
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// One line of the store's newline-delimited JSON `add` response.
#[derive(Debug, Deserialize)]
struct AddEntry {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Hash")]
    hash: String,
}

/// Pick the content identifier for `entry_name` out of the `add` response.
///
/// A nested path makes the store emit one line per wrapping directory; the
/// file's own entry is the authoritative one.
fn parse_add_response(body: &str, entry_name: &str) -> Result<String> {
    let mut entries: Vec<AddEntry> = Vec::new();
    for line in body.lines().filter(|l| !l.trim().is_empty()) {
        let entry = serde_json::from_str(line)
            .map_err(|e| MintyError::Store(format!("unparseable add response: {e}")))?;
        entries.push(entry);
    }

    entries
        .iter()
        .find(|e| e.name == entry_name)
        .or_else(|| entries.first())
        .map(|e| e.hash.clone())
        .ok_or_else(|| MintyError::Store("store returned no entries for add".into()))
}

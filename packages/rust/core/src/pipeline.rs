//! End-to-end mint preparation: asset file + answers → pinned asset +
//! pinned metadata + URIs.
//!
//! The mint transaction itself (token IDs, signing, submission) is an
//! external collaborator; this pipeline stops at [`MintInputs`].

use std::path::Path;

use tracing::{info, instrument};
use url::Url;

use minty_resolve::AnswerSet;
use minty_shared::{MintyError, Result};
use minty_store::{AssetRecord, StoreClient, ingest_bytes, ingest_file};

use crate::metadata::{NftMetadata, assemble_metadata, gateway_url, ipfs_uri};

/// Base name under which the metadata record is added to the store.
const METADATA_NAME: &str = "metadata.json";

// ---------------------------------------------------------------------------
// MintInputs
// ---------------------------------------------------------------------------

/// Everything the downstream minting step consumes. Created per invocation,
/// never persisted.
#[derive(Debug, Clone)]
pub struct MintInputs {
    /// The pinned asset.
    pub asset: AssetRecord,
    /// `ipfs://` URI of the asset.
    pub asset_uri: String,
    /// Browsable gateway link for the asset.
    pub asset_gateway_url: String,
    /// The assembled metadata record.
    pub metadata: NftMetadata,
    /// The pinned metadata record.
    pub metadata_record: AssetRecord,
    /// `ipfs://` URI of the metadata record (the token URI candidate).
    pub metadata_uri: String,
    /// Browsable gateway link for the metadata record.
    pub metadata_gateway_url: String,
    /// Resolved answers, including pass-through options such as `owner`.
    pub answers: AnswerSet,
    /// Whether the mint step should record creator address and block number.
    pub include_creation_info: bool,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run the full mint-preparation pipeline.
///
/// 1. Ingest the asset file
/// 2. Assemble the metadata record
/// 3. Ingest the metadata record
/// 4. Build `ipfs://` and gateway URIs
///
/// Sequential, all-or-nothing: any failure propagates and no partial result
/// is exposed.
#[instrument(skip_all, fields(image_path = %image_path.display()))]
pub async fn prepare_mint(
    client: &StoreClient,
    gateway: &Url,
    image_path: &Path,
    answers: AnswerSet,
    include_creation_info: bool,
    progress: &dyn ProgressReporter,
) -> Result<MintInputs> {
    progress.phase("Pinning asset");
    let asset = ingest_file(client, image_path).await?;
    let asset_uri = ipfs_uri(&asset.cid);

    progress.phase("Assembling metadata");
    let metadata = assemble_metadata(&answers, &asset_uri)?;
    let metadata_bytes = serde_json::to_vec_pretty(&metadata)
        .map_err(|e| MintyError::validation(format!("metadata serialization failed: {e}")))?;

    progress.phase("Pinning metadata");
    let metadata_record = ingest_bytes(client, metadata_bytes, METADATA_NAME).await?;
    let metadata_uri = ipfs_uri(&metadata_record.cid);

    let inputs = MintInputs {
        asset_gateway_url: gateway_url(gateway, &asset.cid),
        metadata_gateway_url: gateway_url(gateway, &metadata_record.cid),
        asset,
        asset_uri,
        metadata,
        metadata_record,
        metadata_uri,
        answers,
        include_creation_info,
    };

    info!(
        asset_cid = %inputs.asset.cid,
        metadata_cid = %inputs.metadata_record.cid,
        "mint inputs prepared"
    );

    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const ASSET_CID: &str = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";
    const META_CID: &str = "bafybeihdwdcefgh4dqkjv67uzcmw7ojee6xedzdetojuzjevtenxquvyku";

    fn answers() -> AnswerSet {
        let mut set = AnswerSet::new();
        set.insert("name", "Cat");
        set.insert("description", "A very fine cat.");
        set.insert("owner", "0xABC");
        set
    }

    fn add_response(name: &str, cid: &str) -> wiremock::ResponseTemplate {
        wiremock::ResponseTemplate::new(200).set_body_string(
            serde_json::json!({"Name": name, "Hash": cid, "Size": "3"}).to_string(),
        )
    }

    async fn mock_store() -> (wiremock::MockServer, StoreClient) {
        let server = wiremock::MockServer::start().await;
        let client = StoreClient::new(
            Url::parse(&server.uri()).unwrap(),
            Duration::from_secs(5),
        )
        .unwrap();
        (server, client)
    }

    #[tokio::test]
    async fn prepares_full_mint_inputs() {
        let (server, client) = mock_store().await;

        // The multipart filename distinguishes the two add calls.
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path("/api/v0/add"))
            .and(wiremock::matchers::body_string_contains("nft/metadata.json"))
            .respond_with(add_response("nft/metadata.json", META_CID))
            .expect(1)
            .mount(&server)
            .await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path("/api/v0/add"))
            .respond_with(add_response("nft/cat.png", ASSET_CID))
            .expect(1)
            .mount(&server)
            .await;

        let dir = std::env::temp_dir().join(format!("minty-prep-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let image = dir.join("cat.png");
        std::fs::write(&image, b"ascii payload").unwrap();

        let gateway = Url::parse("http://localhost:8080").unwrap();
        let inputs = prepare_mint(&client, &gateway, &image, answers(), false, &SilentProgress)
            .await
            .unwrap();

        assert_eq!(inputs.asset.store_path, "/nft/cat.png");
        assert_eq!(inputs.asset.cid, ASSET_CID);
        assert_eq!(inputs.asset_uri, format!("ipfs://{ASSET_CID}"));
        assert_eq!(
            inputs.asset_gateway_url,
            format!("http://localhost:8080/ipfs/{ASSET_CID}")
        );

        assert_eq!(inputs.metadata_record.store_path, "/nft/metadata.json");
        assert_eq!(inputs.metadata_uri, format!("ipfs://{META_CID}"));
        assert_eq!(inputs.metadata.image, inputs.asset_uri);
        assert_eq!(inputs.metadata.name, "Cat");

        // Pass-through options survive the pipeline untouched.
        assert_eq!(inputs.answers.get("owner"), Some("0xABC"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn missing_image_fails_before_any_store_call() {
        let (server, client) = mock_store().await;

        let gateway = Url::parse("http://localhost:8080").unwrap();
        let err = prepare_mint(
            &client,
            &gateway,
            Path::new("/no/such/image.png"),
            answers(),
            false,
            &SilentProgress,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, MintyError::Io { .. }));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn store_failure_mid_pipeline_propagates() {
        let (server, client) = mock_store().await;

        // Asset add succeeds, metadata add fails.
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path("/api/v0/add"))
            .and(wiremock::matchers::body_string_contains("nft/metadata.json"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .mount(&server)
            .await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path("/api/v0/add"))
            .respond_with(add_response("nft/cat.png", ASSET_CID))
            .mount(&server)
            .await;

        let dir = std::env::temp_dir().join(format!("minty-fail-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let image = dir.join("cat.png");
        std::fs::write(&image, b"ascii payload").unwrap();

        let gateway = Url::parse("http://localhost:8080").unwrap();
        let result = prepare_mint(&client, &gateway, &image, answers(), false, &SilentProgress).await;
        assert!(matches!(result, Err(MintyError::Store(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }
}

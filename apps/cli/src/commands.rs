//! CLI command definitions, routing, and tracing setup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use minty_core::{MintInputs, ProgressReporter, prepare_mint};
use minty_resolve::{FieldSpec, StdinPrompt, resolve};
use minty_shared::{AppConfig, StoreConfig, init_config, load_config};
use minty_store::{StoreClient, ingest_file};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Minty — prepare NFT mint inputs.
#[derive(Parser)]
#[command(
    name = "minty",
    version,
    about = "Pin NFT assets to a content-addressable store and assemble mint inputs.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Prepare a new NFT from an image file.
    Mint {
        /// Path to the image file.
        image_path: PathBuf,

        /// The name of the NFT.
        #[arg(short, long)]
        name: Option<String>,

        /// A description of the NFT.
        #[arg(short, long)]
        description: Option<String>,

        /// The ethereum address that should own the NFT.
        /// If not provided, the mint step defaults to the first signing address.
        #[arg(short, long)]
        owner: Option<String>,

        /// Include the creator address and block number the NFT was minted.
        #[arg(short, long)]
        creation_info: bool,
    },

    /// Add a file to the store and report its path and content identifier.
    Add {
        /// Path to the file.
        file_path: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "minty=info",
        1 => "minty=debug",
        _ => "minty=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Mint {
            image_path,
            name,
            description,
            owner,
            creation_info,
        } => cmd_mint(&image_path, name, description, owner, creation_info).await,
        Command::Add { file_path } => cmd_add(&file_path).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

/// Declared answer fields for `mint`, in prompt order.
fn mint_field_specs() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("name", "Enter a name for your new NFT: "),
        FieldSpec::new("description", "Enter a description for your new NFT: "),
    ]
}

/// Build the CLI option map handed to the resolver. Flags left unset are
/// simply absent; `owner` is an undeclared pass-through key.
fn mint_cli_options(
    name: Option<String>,
    description: Option<String>,
    owner: Option<String>,
) -> HashMap<String, String> {
    let mut options = HashMap::new();
    for (key, value) in [("name", name), ("description", description), ("owner", owner)] {
        if let Some(value) = value {
            options.insert(key.to_string(), value);
        }
    }
    options
}

async fn cmd_mint(
    image_path: &Path,
    name: Option<String>,
    description: Option<String>,
    owner: Option<String>,
    creation_info: bool,
) -> Result<()> {
    let config = load_config()?;
    let (client, gateway) = store_client(&config.store)?;

    // Prompt for anything missing before any store traffic.
    let cli_options = mint_cli_options(name, description, owner);
    let answers = resolve(&cli_options, &mint_field_specs(), &mut StdinPrompt)?;

    info!(image_path = %image_path.display(), "preparing mint inputs");

    let reporter = CliProgress::new();
    let inputs = prepare_mint(
        &client,
        &gateway,
        image_path,
        answers,
        creation_info,
        &reporter,
    )
    .await?;
    reporter.finish();

    print_mint_inputs(&inputs)?;
    Ok(())
}

async fn cmd_add(file_path: &Path) -> Result<()> {
    let config = load_config()?;
    let (client, gateway) = store_client(&config.store)?;

    info!(file_path = %file_path.display(), "adding file to store");

    let reporter = CliProgress::new();
    reporter.phase("Pinning file");
    let record = ingest_file(&client, file_path).await?;
    reporter.finish();

    println!();
    align_output(&[
        ("Store Path:", record.store_path.clone()),
        ("Asset Address:", minty_core::ipfs_uri(&record.cid)),
        (
            "Gateway URL:",
            minty_core::gateway_url(&gateway, &record.cid),
        ),
    ]);
    println!();

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

/// Construct the store client and gateway base from config.
fn store_client(config: &StoreConfig) -> Result<(StoreClient, url::Url)> {
    let client = StoreClient::new(
        config.api_url()?,
        Duration::from_secs(config.timeout_secs),
    )?;
    Ok((client, config.gateway_url()?))
}

// ---------------------------------------------------------------------------
// Output formatting
// ---------------------------------------------------------------------------

fn print_mint_inputs(inputs: &MintInputs) -> Result<()> {
    println!();
    println!("  Prepared a new NFT mint!");

    let mut pairs = vec![
        ("Asset Address:", inputs.asset_uri.clone()),
        ("Asset Gateway URL:", inputs.asset_gateway_url.clone()),
        ("Metadata Address:", inputs.metadata_uri.clone()),
        ("Metadata Gateway URL:", inputs.metadata_gateway_url.clone()),
    ];
    if let Some(owner) = inputs.answers.get("owner") {
        pairs.push(("Owner:", owner.to_string()));
    }
    if inputs.include_creation_info {
        pairs.push(("Creation Info:", "included".to_string()));
    }
    align_output(&pairs);

    println!("NFT Metadata:");
    println!("{}", serde_json::to_string_pretty(&inputs.metadata)?);
    println!();

    Ok(())
}

/// Print label/value pairs with labels padded to a common width.
fn align_output(pairs: &[(&str, String)]) {
    let width = pairs.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in pairs {
        println!("  {label:<width$} {value}");
    }
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }
}

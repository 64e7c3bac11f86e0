use clap::{Parser, Subcommand};
use eyre::Result;
use gdrive_integrations::{auth, GoogleAuth};
use gdrive_mcp::config::Config;
use gdrive_mcp::providers::{
    CombinedProvider, GoogleDocsProvider, GoogleDriveProvider, GoogleSheetsProvider, ProviderType,
};
use rmcp::transport::stdio;
use rmcp::ServiceExt;
use tracing_subscriber;

#[derive(Parser)]
#[command(name = "gdrive_mcp")]
#[command(about = "Google Drive MCP Server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check credential configuration and prerequisites
    Check,
}

/// helper to check if provider should be enabled based on config
fn should_enable_provider(config: &Config, provider: ProviderType) -> bool {
    config.required_providers.contains(&provider)
}

/// check credential configuration and prerequisites
async fn check_environment() -> Result<()> {
    println!("🔍 Checking credential configuration...\n");

    let mut all_passed = true;

    print!("  OAuth client secret... ");
    let keys_path = auth::oauth_keys_path().map_err(|e| eyre::eyre!(e))?;
    if keys_path.exists() {
        println!("✓\n    {}", keys_path.display());
    } else {
        println!("✗\n    Not found at {}", keys_path.display());
        all_passed = false;
    }

    print!("  Token store... ");
    let token_path = auth::token_store_path().map_err(|e| eyre::eyre!(e))?;
    if token_path.exists() {
        println!("✓\n    {}", token_path.display());
    } else {
        println!("⚠ (will be created on first authorized request)");
    }

    if all_passed {
        print!("  Authenticator... ");
        match GoogleAuth::connect().await {
            Ok(_) => println!("✓"),
            Err(e) => {
                println!("✗\n    Error: {}", e);
                all_passed = false;
            }
        }
    }

    println!();

    if all_passed {
        println!("✅ All checks passed!");
        Ok(())
    } else {
        println!("❌ Some checks failed. Please review the errors above.");
        Err(eyre::eyre!("Environment check failed"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check) => check_environment().await,
        None => run_server().await,
    }
}

async fn run_server() -> Result<()> {
    // configure tracing to write to a file only if RUST_LOG is set
    // this prevents interference with stdio MCP transport
    if std::env::var("RUST_LOG").is_ok() {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/gdrive-mcp.log")?;

        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || log_file.try_clone().unwrap())
            .init();
    }

    let config = Config::load_from_dir()?;
    tracing::debug!("Loaded config: {:?}", config);

    // one authenticator shared by every provider
    let google_auth = GoogleAuth::connect().await.ok();
    if google_auth.is_none() {
        tracing::warn!("Google credentials unavailable, no providers will be configured");
    }

    let (drive, sheets, docs) = match &google_auth {
        Some(auth) => (
            should_enable_provider(&config, ProviderType::Drive)
                .then(|| GoogleDriveProvider::new(auth).ok())
                .flatten(),
            should_enable_provider(&config, ProviderType::Sheets)
                .then(|| GoogleSheetsProvider::new(auth).ok())
                .flatten(),
            should_enable_provider(&config, ProviderType::Docs)
                .then(|| GoogleDocsProvider::new(auth).ok())
                .flatten(),
        ),
        None => (None, None, None),
    };

    // print startup banner to stderr (won't interfere with stdio MCP transport)
    let mut providers_list = Vec::new();
    if drive.is_some() {
        providers_list.push("Google Drive");
    }
    if sheets.is_some() {
        providers_list.push("Google Sheets");
    }
    if docs.is_some() {
        providers_list.push("Google Docs");
    }

    eprintln!(
        "🚀 Google Drive MCP Server v{} - Drive, Sheets, and Docs tools over MCP\n\
         Configured providers: {}\n\
         Server running on stdio transport...",
        env!("CARGO_PKG_VERSION"),
        providers_list.join(", ")
    );

    let provider = CombinedProvider::new(drive, sheets, docs).map_err(|_| {
        eyre::eyre!(
            "No integrations available. Configure Google OAuth credentials:\n\
             - Client secret at ~/.config/gdrive-mcp/oauth.keys.json (or GDRIVE_OAUTH_PATH)\n\
             - Tokens persisted to ~/.config/gdrive-mcp/tokens.json (or GDRIVE_CREDENTIALS_PATH)"
        )
    })?;

    provider
        .check_availability(&config.required_providers)
        .map_err(|e| eyre::eyre!(e))?;

    let service = provider.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

//! Example MCP client that connects to the gdrive-mcp server in-process
//!
//! This demonstrates how to:
//! - Create provider instances directly
//! - Connect to them in-process using rmcp-in-process-transport
//! - Call tools exposed by the server
//!
//! Run with: cargo run --example client

use eyre::Result;
use gdrive_integrations::GoogleAuth;
use gdrive_mcp::providers::{
    CombinedProvider, GoogleDocsProvider, GoogleDriveProvider, GoogleSheetsProvider,
};
use rmcp::model::CallToolRequestParam;
use rmcp::ServiceExt;
use rmcp_in_process_transport::in_process::TokioInProcess;

#[tokio::main]
async fn main() -> Result<()> {
    // optionally initialize logging if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt::init();
    }

    println!("Starting gdrive-mcp server in-process...");

    // initialize providers from a shared authenticator
    let auth = GoogleAuth::connect().await.map_err(|e| {
        eyre::eyre!(
            "Google credentials unavailable ({e}). Place an OAuth client secret at \
             ~/.config/gdrive-mcp/oauth.keys.json"
        )
    })?;
    let drive = GoogleDriveProvider::new(&auth).ok();
    let sheets = GoogleSheetsProvider::new(&auth).ok();
    let docs = GoogleDocsProvider::new(&auth).ok();

    let provider = CombinedProvider::new(drive, sheets, docs)?;

    // create in-process service
    let tokio_in_process = TokioInProcess::new(provider).await?;
    let service = ().serve(tokio_in_process).await?;

    println!("Connected to server!\n");

    // get server info
    let server_info = service.peer_info();
    if let Some(info) = server_info {
        println!(
            "Server: {} v{}",
            info.server_info.name, info.server_info.version
        );
        if let Some(instructions) = &info.instructions {
            println!("Description: {}", instructions);
        }
        println!();
    }

    // list available tools
    println!("=== Listing available tools ===");
    let tools_response = service.list_tools(Default::default()).await?;
    for tool in &tools_response.tools {
        let desc = tool
            .description
            .as_ref()
            .map(|d| d.as_ref())
            .unwrap_or("No description");
        println!("- {}: {}", tool.name, desc);
    }
    println!();

    // example: search Drive (if available)
    if tools_response.tools.iter().any(|t| t.name == "gdrive_search") {
        println!("=== Example: Searching Google Drive ===");
        let result = service
            .call_tool(CallToolRequestParam {
                name: "gdrive_search".into(),
                arguments: serde_json::json!({ "query": "quarterly report" })
                    .as_object()
                    .cloned(),
            })
            .await?;

        // extract and display text content
        if let Some(content) = result.content.first() {
            if let Some(text) = content.as_text() {
                println!("{}", text.text);
            }
        }
        println!();
    }

    println!("Example complete!");

    // cleanup
    service.cancel().await?;

    Ok(())
}

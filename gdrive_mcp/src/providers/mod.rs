pub mod docs;
pub mod drive;
pub mod sheets;

pub use docs::GoogleDocsProvider;
pub use drive::GoogleDriveProvider;
pub use sheets::GoogleSheetsProvider;

use eyre::Result;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Implementation, PaginatedRequestParam, ProtocolVersion,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData, ServerHandler};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub enum ProviderType {
    Drive,
    Sheets,
    Docs,
}

enum TargetProvider {
    Drive(Arc<GoogleDriveProvider>),
    Sheets(Arc<GoogleSheetsProvider>),
    Docs(Arc<GoogleDocsProvider>),
}

#[derive(Clone)]
pub struct CombinedProvider {
    drive: Option<Arc<GoogleDriveProvider>>,
    sheets: Option<Arc<GoogleSheetsProvider>>,
    docs: Option<Arc<GoogleDocsProvider>>,
}

impl CombinedProvider {
    pub fn new(
        drive: Option<GoogleDriveProvider>,
        sheets: Option<GoogleSheetsProvider>,
        docs: Option<GoogleDocsProvider>,
    ) -> Result<Self> {
        if drive.is_none() && sheets.is_none() && docs.is_none() {
            return Err(eyre::eyre!("at least one provider must be available"));
        }
        Ok(Self {
            drive: drive.map(Arc::new),
            sheets: sheets.map(Arc::new),
            docs: docs.map(Arc::new),
        })
    }

    fn resolve_provider(&self, tool_name: &str) -> std::result::Result<TargetProvider, ErrorData> {
        if tool_name.starts_with("gdrive_") {
            let provider = self.drive.clone().ok_or_else(|| {
                ErrorData::invalid_params(
                    "Google Drive provider not configured. Provide OAuth credentials at ~/.config/gdrive-mcp/oauth.keys.json.",
                    None,
                )
            })?;
            return Ok(TargetProvider::Drive(provider));
        }

        if tool_name.starts_with("gsheets_") {
            let provider = self.sheets.clone().ok_or_else(|| {
                ErrorData::invalid_params(
                    "Google Sheets provider not configured. Provide OAuth credentials at ~/.config/gdrive-mcp/oauth.keys.json.",
                    None,
                )
            })?;
            return Ok(TargetProvider::Sheets(provider));
        }

        if tool_name.starts_with("gdocs_") {
            let provider = self.docs.clone().ok_or_else(|| {
                ErrorData::invalid_params(
                    "Google Docs provider not configured. Provide OAuth credentials at ~/.config/gdrive-mcp/oauth.keys.json.",
                    None,
                )
            })?;
            return Ok(TargetProvider::Docs(provider));
        }

        Err(ErrorData::invalid_params(
            format!("unknown tool: {}", tool_name),
            None,
        ))
    }

    pub fn check_availability(&self, required: &[ProviderType]) -> Result<()> {
        for provider in required {
            match provider {
                ProviderType::Drive => {
                    if self.drive.is_none() {
                        return Err(eyre::eyre!(
                            "Google Drive provider is required but not configured."
                        ));
                    }
                }
                ProviderType::Sheets => {
                    if self.sheets.is_none() {
                        return Err(eyre::eyre!(
                            "Google Sheets provider is required but not configured."
                        ));
                    }
                }
                ProviderType::Docs => {
                    if self.docs.is_none() {
                        return Err(eyre::eyre!(
                            "Google Docs provider is required but not configured."
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

impl ServerHandler for CombinedProvider {
    fn get_info(&self) -> ServerInfo {
        let mut providers = Vec::new();
        if self.drive.is_some() {
            providers.push("Google Drive");
        }
        if self.sheets.is_some() {
            providers.push("Google Sheets");
        }
        if self.docs.is_some() {
            providers.push("Google Docs");
        }

        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "gdrive-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Google Drive MCP Server".to_string()),
                website_url: None,
                icons: None,
            },
            instructions: Some(format!(
                "MCP server providing integrations for: {}",
                providers.join(", ")
            )),
        }
    }

    async fn call_tool(
        &self,
        params: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        match self.resolve_provider(&params.name)? {
            TargetProvider::Drive(provider) => provider.call_tool(params, context).await,
            TargetProvider::Sheets(provider) => provider.call_tool(params, context).await,
            TargetProvider::Docs(provider) => provider.call_tool(params, context).await,
        }
    }

    async fn list_tools(
        &self,
        params: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> std::result::Result<rmcp::model::ListToolsResult, ErrorData> {
        let mut tools = Vec::new();

        if let Some(ref drive) = self.drive {
            if let Ok(result) = drive.list_tools(params.clone(), context.clone()).await {
                tools.extend(result.tools);
            }
        }

        if let Some(ref sheets) = self.sheets {
            if let Ok(result) = sheets.list_tools(params.clone(), context.clone()).await {
                tools.extend(result.tools);
            }
        }

        if let Some(ref docs) = self.docs {
            if let Ok(result) = docs.list_tools(params.clone(), context.clone()).await {
                tools.extend(result.tools);
            }
        }

        Ok(rmcp::model::ListToolsResult {
            tools,
            next_cursor: None,
        })
    }
}

use eyre::Result;
use gdrive_integrations::{
    GetSpreadsheetMetadataRequest, GoogleAuth, GoogleSheetsClient, ReadRangeRequest,
    ToolResultDisplay, UpdateCellRequest,
};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler};
use std::sync::Arc;

#[derive(Clone)]
pub struct GoogleSheetsProvider {
    client: Arc<GoogleSheetsClient>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GoogleSheetsProvider {
    pub fn new(auth: &GoogleAuth) -> Result<Self> {
        let client = GoogleSheetsClient::new(auth)
            .map_err(|e| eyre::eyre!("Failed to create Google Sheets client: {}", e))?;
        Ok(Self {
            client: Arc::new(client),
            tool_router: Self::tool_router(),
        })
    }

    #[tool(name = "gsheets_get_metadata", description = "Get metadata for a Google Sheets spreadsheet")]
    pub async fn get_metadata(
        &self,
        Parameters(args): Parameters<GetSpreadsheetMetadataRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        match self.client.get_spreadsheet_metadata(&args).await {
            Ok(result) => Ok(CallToolResult::success(vec![Content::text(result.display())])),
            Err(e) => Err(ErrorData::internal_error(e.to_string(), None)),
        }
    }

    #[tool(name = "gsheets_read_range", description = "Read a specific range from a Google Sheets spreadsheet")]
    pub async fn read_range(
        &self,
        Parameters(args): Parameters<ReadRangeRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        match self.client.read_range(&args).await {
            Ok(result) => Ok(CallToolResult::success(vec![Content::text(result.display())])),
            Err(e) => Err(ErrorData::internal_error(e.to_string(), None)),
        }
    }

    #[tool(name = "gsheets_update_cell", description = "Update a single cell in a Google Sheets spreadsheet")]
    pub async fn update_cell(
        &self,
        Parameters(args): Parameters<UpdateCellRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        match self.client.update_cell(&args).await {
            Ok(result) => Ok(CallToolResult::success(vec![Content::text(result.display())])),
            Err(e) => Err(ErrorData::internal_error(e.to_string(), None)),
        }
    }
}

#[tool_handler]
impl ServerHandler for GoogleSheetsProvider {
    fn get_info(&self) -> ServerInfo {
        crate::mcp_helpers::service_server_info("Google Sheets")
    }
}

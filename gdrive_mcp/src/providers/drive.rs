use eyre::Result;
use gdrive_integrations::{
    GoogleAuth, GoogleDriveClient, ReadFileRequest, SearchFilesRequest, ToolResultDisplay,
};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler};
use std::sync::Arc;

#[derive(Clone)]
pub struct GoogleDriveProvider {
    client: Arc<GoogleDriveClient>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GoogleDriveProvider {
    pub fn new(auth: &GoogleAuth) -> Result<Self> {
        let client = GoogleDriveClient::new(auth)
            .map_err(|e| eyre::eyre!("Failed to create Google Drive client: {}", e))?;
        Ok(Self {
            client: Arc::new(client),
            tool_router: Self::tool_router(),
        })
    }

    #[tool(name = "gdrive_search", description = "Search for files in Google Drive")]
    pub async fn search(
        &self,
        Parameters(args): Parameters<SearchFilesRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        match self.client.search_files(&args).await {
            Ok(result) => Ok(CallToolResult::success(vec![Content::text(result.display())])),
            Err(e) => Err(ErrorData::internal_error(e.to_string(), None)),
        }
    }

    #[tool(
        name = "gdrive_read_file",
        description = "Read a file from Google Drive, exporting Google Workspace files to a readable format"
    )]
    pub async fn read_file(
        &self,
        Parameters(args): Parameters<ReadFileRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        match self.client.read_file(&args).await {
            Ok(result) => Ok(CallToolResult::success(vec![Content::text(result.display())])),
            Err(e) => Err(ErrorData::internal_error(e.to_string(), None)),
        }
    }
}

#[tool_handler]
impl ServerHandler for GoogleDriveProvider {
    fn get_info(&self) -> ServerInfo {
        crate::mcp_helpers::service_server_info("Google Drive")
    }
}

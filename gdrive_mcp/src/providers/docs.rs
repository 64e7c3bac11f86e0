use eyre::Result;
use gdrive_integrations::{
    GetDocumentSuggestionsRequest, GoogleAuth, GoogleDocsClient, ReadDocumentRequest,
    ToolResultDisplay,
};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler};
use std::fmt::Display;
use std::sync::Arc;

#[derive(Clone)]
pub struct GoogleDocsProvider {
    client: Arc<GoogleDocsClient>,
    tool_router: ToolRouter<Self>,
}

/// Fetch faults for the suggestions tool are reported in-band: a full error
/// payload with the protocol error flag set, never a protocol-level failure
/// and never partial results.
fn suggestion_error_result(error: impl Display) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!(
        "Error getting suggestions: {error}"
    ))])
}

#[tool_router]
impl GoogleDocsProvider {
    pub fn new(auth: &GoogleAuth) -> Result<Self> {
        let client = GoogleDocsClient::new(auth)
            .map_err(|e| eyre::eyre!("Failed to create Google Docs client: {}", e))?;
        Ok(Self {
            client: Arc::new(client),
            tool_router: Self::tool_router(),
        })
    }

    #[tool(name = "gdocs_read_document", description = "Read the plain text content of a Google Doc")]
    pub async fn read_document(
        &self,
        Parameters(args): Parameters<ReadDocumentRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        match self.client.read_document(&args).await {
            Ok(result) => Ok(CallToolResult::success(vec![Content::text(result.display())])),
            Err(e) => Err(ErrorData::internal_error(e.to_string(), None)),
        }
    }

    #[tool(
        name = "gdocs_get_suggestions",
        description = "List suggested edits in a Google Doc as a readable report with positional paths"
    )]
    pub async fn get_suggestions(
        &self,
        Parameters(args): Parameters<GetDocumentSuggestionsRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        match self.client.get_suggestions(&args).await {
            Ok(report) => Ok(CallToolResult::success(vec![Content::text(report.display())])),
            Err(e) => Ok(suggestion_error_result(e)),
        }
    }
}

#[tool_handler]
impl ServerHandler for GoogleDocsProvider {
    fn get_info(&self) -> ServerInfo {
        crate::mcp_helpers::service_server_info("Google Docs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_fault_becomes_flagged_error_payload() {
        let result = suggestion_error_result("permission denied");
        assert_eq!(result.is_error, Some(true));
        assert_eq!(result.content.len(), 1);
        let text = result.content[0].as_text().expect("text content");
        assert_eq!(text.text, "Error getting suggestions: permission denied");
    }
}

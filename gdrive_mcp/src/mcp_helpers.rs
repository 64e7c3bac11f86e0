use rmcp::model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo};

/// ServerInfo for a single Google service provider behind CombinedProvider.
/// Never exposed over MCP; clients only see CombinedProvider's ServerInfo,
/// which aggregates the configured services.
pub fn service_server_info(service: &str) -> ServerInfo {
    ServerInfo {
        protocol_version: ProtocolVersion::V_2024_11_05,
        capabilities: ServerCapabilities::builder().enable_tools().build(),
        server_info: Implementation {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            title: Some(format!("{service} provider")),
            website_url: None,
            icons: None,
        },
        instructions: Some(format!(
            "Internal {service} provider, routed through the combined gdrive-mcp server"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_info_names_the_service() {
        let info = service_server_info("Google Docs");
        assert_eq!(
            info.server_info.title.as_deref(),
            Some("Google Docs provider")
        );
        assert!(info.instructions.unwrap().contains("Google Docs"));
        assert!(info.capabilities.tools.is_some());
    }
}

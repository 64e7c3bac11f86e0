pub mod config;
pub mod mcp_helpers;
pub mod providers;

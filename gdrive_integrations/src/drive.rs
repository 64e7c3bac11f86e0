use crate::auth::{GoogleAuth, HttpsConnector};
use crate::ToolResultDisplay;
use anyhow::{anyhow, Result};
use base64::Engine as _;
use google_drive3::api::Scope;
use google_drive3::{hyper_util, DriveHub};
use http_body_util::BodyExt;
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const SEARCH_PAGE_SIZE: i32 = 10;
const FILE_LIST_FIELDS: &str = "files(id, name, mimeType)";

/// Export MIME type for Google Workspace files, which have no binary content
/// of their own and must be converted on download.
fn export_mime_type(mime_type: &str) -> Option<&'static str> {
    match mime_type {
        "application/vnd.google-apps.document" => Some("text/markdown"),
        "application/vnd.google-apps.spreadsheet" => Some("text/csv"),
        "application/vnd.google-apps.presentation" => Some("text/plain"),
        "application/vnd.google-apps.drawing" => Some("image/png"),
        other if other.starts_with("application/vnd.google-apps.") => Some("text/plain"),
        _ => None,
    }
}

fn is_textual(mime_type: &str) -> bool {
    mime_type.starts_with("text/") || mime_type == "application/json"
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SearchFilesRequest {
    /// Full-text search query matched against file content and names
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FileSummary {
    pub id: String,
    pub name: String,
    pub mime_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchFilesResult {
    pub files: Vec<FileSummary>,
}

impl ToolResultDisplay for SearchFilesResult {
    fn display(&self) -> String {
        if self.files.is_empty() {
            return "No files found.".to_string();
        }
        let mut lines = vec![format!("Found {} files:", self.files.len())];
        for file in &self.files {
            lines.push(format!("{} ({}) [{}]", file.name, file.id, file.mime_type));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ReadFileRequest {
    /// Drive file ID to read
    pub file_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub enum FileContent {
    Text(String),
    /// Base64-encoded bytes for non-textual files.
    Base64(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadFileResult {
    pub name: String,
    pub mime_type: String,
    pub content: FileContent,
}

impl ToolResultDisplay for ReadFileResult {
    fn display(&self) -> String {
        match &self.content {
            FileContent::Text(text) => format!("{} ({}):\n\n{}", self.name, self.mime_type, text),
            FileContent::Base64(encoded) => format!(
                "{} ({}), base64-encoded:\n\n{}",
                self.name, self.mime_type, encoded
            ),
        }
    }
}

pub struct GoogleDriveClient {
    hub: DriveHub<HttpsConnector>,
}

impl GoogleDriveClient {
    pub fn new(auth: &GoogleAuth) -> Result<Self> {
        let client = hyper_util::client::legacy::Client::builder(
            hyper_util::rt::TokioExecutor::new(),
        )
        .build(GoogleAuth::https_connector()?);
        Ok(Self {
            hub: DriveHub::new(client, auth.authenticator()),
        })
    }

    pub async fn search_files(&self, args: &SearchFilesRequest) -> Result<SearchFilesResult> {
        let escaped = args.query.replace('\\', "\\\\").replace('\'', "\\'");
        let query = format!("fullText contains '{escaped}'");
        debug!("Drive search query: {}", query);

        let (_, file_list) = self
            .hub
            .files()
            .list()
            .q(&query)
            .page_size(SEARCH_PAGE_SIZE)
            .param("fields", FILE_LIST_FIELDS)
            .add_scope(Scope::Readonly)
            .doit()
            .await
            .map_err(|e| anyhow!("Drive search failed: {e}"))?;

        let files = file_list
            .files
            .unwrap_or_default()
            .into_iter()
            .map(|file| FileSummary {
                id: file.id.unwrap_or_default(),
                name: file.name.unwrap_or_default(),
                mime_type: file.mime_type.unwrap_or_default(),
            })
            .collect();
        Ok(SearchFilesResult { files })
    }

    pub async fn read_file(&self, args: &ReadFileRequest) -> Result<ReadFileResult> {
        let (_, metadata) = self
            .hub
            .files()
            .get(&args.file_id)
            .param("fields", "id, name, mimeType")
            .add_scope(Scope::Readonly)
            .doit()
            .await
            .map_err(|e| anyhow!("Drive metadata fetch failed: {e}"))?;

        let name = metadata.name.unwrap_or_else(|| args.file_id.clone());
        let source_mime = metadata.mime_type.unwrap_or_default();

        let (mime_type, bytes) = match export_mime_type(&source_mime) {
            Some(export_mime) => {
                debug!("Exporting {} as {}", args.file_id, export_mime);
                let response = self
                    .hub
                    .files()
                    .export(&args.file_id, export_mime)
                    .add_scope(Scope::Readonly)
                    .doit()
                    .await
                    .map_err(|e| anyhow!("Drive export failed: {e}"))?;
                (export_mime.to_string(), read_body(response).await?)
            }
            None => {
                debug!("Downloading {} ({})", args.file_id, source_mime);
                let (response, _) = self
                    .hub
                    .files()
                    .get(&args.file_id)
                    .param("alt", "media")
                    .add_scope(Scope::Readonly)
                    .doit()
                    .await
                    .map_err(|e| anyhow!("Drive download failed: {e}"))?;
                (source_mime, read_body(response).await?)
            }
        };

        let content = if is_textual(&mime_type) {
            FileContent::Text(String::from_utf8_lossy(&bytes).into_owned())
        } else {
            FileContent::Base64(base64::engine::general_purpose::STANDARD.encode(&bytes))
        };

        Ok(ReadFileResult {
            name,
            mime_type,
            content,
        })
    }
}

async fn read_body(response: google_drive3::common::Response) -> Result<Vec<u8>> {
    let collected = response
        .into_body()
        .collect()
        .await
        .map_err(|e| anyhow!("failed to read response body: {e}"))?;
    Ok(collected.to_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_types_map_to_export_formats() {
        assert_eq!(
            export_mime_type("application/vnd.google-apps.document"),
            Some("text/markdown")
        );
        assert_eq!(
            export_mime_type("application/vnd.google-apps.spreadsheet"),
            Some("text/csv")
        );
        assert_eq!(
            export_mime_type("application/vnd.google-apps.drawing"),
            Some("image/png")
        );
        // unmapped workspace types fall back to plain text
        assert_eq!(
            export_mime_type("application/vnd.google-apps.form"),
            Some("text/plain")
        );
    }

    #[test]
    fn regular_mime_types_are_downloaded_directly() {
        assert_eq!(export_mime_type("application/pdf"), None);
        assert_eq!(export_mime_type("text/plain"), None);
    }

    #[test]
    fn textual_detection_covers_json() {
        assert!(is_textual("text/markdown"));
        assert!(is_textual("application/json"));
        assert!(!is_textual("image/png"));
    }
}

use crate::auth::{GoogleAuth, HttpsConnector};
use crate::document::DocumentSnapshot;
use crate::suggestions::{self, SuggestionRecord};
use crate::ToolResultDisplay;
use anyhow::{anyhow, Result};
use google_docs1::api::Scope;
use google_docs1::{hyper_util, Docs};
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ask the API to keep suggested changes visible in the returned document so
/// the extractor can see them.
const SUGGESTIONS_INLINE: &str = "SUGGESTIONS_INLINE";

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ReadDocumentRequest {
    /// Document ID from the document URL
    pub document_id: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetDocumentSuggestionsRequest {
    /// Document ID from the document URL
    pub document_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentText {
    pub title: String,
    pub text: String,
}

impl ToolResultDisplay for DocumentText {
    fn display(&self) -> String {
        format!("{}\n\n{}", self.title, self.text)
    }
}

/// Extracted suggestions for one document, rendered on display.
#[derive(Debug)]
pub struct SuggestionReport {
    pub title: String,
    pub records: Vec<SuggestionRecord>,
}

impl ToolResultDisplay for SuggestionReport {
    fn display(&self) -> String {
        suggestions::format_report(&self.title, &self.records)
    }
}

pub struct GoogleDocsClient {
    hub: Docs<HttpsConnector>,
}

impl GoogleDocsClient {
    pub fn new(auth: &GoogleAuth) -> Result<Self> {
        let client = hyper_util::client::legacy::Client::builder(
            hyper_util::rt::TokioExecutor::new(),
        )
        .build(GoogleAuth::https_connector()?);
        Ok(Self {
            hub: Docs::new(client, auth.authenticator()),
        })
    }

    async fn fetch_snapshot(&self, document_id: &str) -> Result<DocumentSnapshot> {
        debug!("Fetching document {}", document_id);
        let (_, document) = self
            .hub
            .documents()
            .get(document_id)
            .suggestions_view_mode(SUGGESTIONS_INLINE)
            .add_scope(Scope::DocumentReadonly)
            .doit()
            .await
            .map_err(|e| anyhow!("{e}"))?;
        Ok(document.into())
    }

    pub async fn read_document(&self, args: &ReadDocumentRequest) -> Result<DocumentText> {
        let snapshot = self.fetch_snapshot(&args.document_id).await?;
        Ok(DocumentText {
            text: snapshot.plain_text(),
            title: snapshot.title,
        })
    }

    pub async fn get_suggestions(
        &self,
        args: &GetDocumentSuggestionsRequest,
    ) -> Result<SuggestionReport> {
        let snapshot = self.fetch_snapshot(&args.document_id).await?;
        let records = suggestions::extract(&snapshot);
        debug!(
            "Extracted {} suggestions from {}",
            records.len(),
            args.document_id
        );
        Ok(SuggestionReport {
            title: snapshot.title,
            records,
        })
    }
}

pub mod auth;
pub mod docs;
pub mod document;
pub mod drive;
pub mod sheets;
pub mod suggestions;

// ============================================================================
// Shared Display Trait
// ============================================================================

pub trait ToolResultDisplay {
    fn display(&self) -> String;
}

pub use auth::GoogleAuth;
pub use docs::{
    DocumentText, GetDocumentSuggestionsRequest, GoogleDocsClient, ReadDocumentRequest,
    SuggestionReport,
};
pub use document::{BlockElement, DocumentSnapshot, InlineElement, Paragraph, TextRun};
pub use drive::{
    FileContent, FileSummary, GoogleDriveClient, ReadFileRequest, ReadFileResult,
    SearchFilesRequest, SearchFilesResult,
};
pub use sheets::{
    GetSpreadsheetMetadataRequest, GoogleSheetsClient, ReadRangeRequest, ReadRangeResult,
    SheetMetadata, SpreadsheetMetadata, UpdateCellRequest, UpdateCellResult,
};
pub use suggestions::{extract, format_report, SuggestionKind, SuggestionRecord};

use crate::auth::{GoogleAuth, HttpsConnector};
use crate::ToolResultDisplay;
use anyhow::{anyhow, Result};
use google_sheets4::api::{Scope, ValueRange};
use google_sheets4::{hyper_util, Sheets};
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetSpreadsheetMetadataRequest {
    /// Spreadsheet ID from the document URL
    pub spreadsheet_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SheetMetadata {
    pub title: String,
    pub sheet_id: i32,
    pub rows: i32,
    pub columns: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SpreadsheetMetadata {
    pub title: String,
    pub sheets: Vec<SheetMetadata>,
}

impl ToolResultDisplay for SpreadsheetMetadata {
    fn display(&self) -> String {
        let mut lines = vec![format!("Spreadsheet: {}", self.title)];
        for sheet in &self.sheets {
            lines.push(format!(
                "- {} (sheetId {}, {}x{})",
                sheet.title, sheet.sheet_id, sheet.rows, sheet.columns
            ));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ReadRangeRequest {
    /// Spreadsheet ID from the document URL
    pub spreadsheet_id: String,
    /// A1-notation range to read, e.g. "Sheet1!A1:C10"
    pub range: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadRangeResult {
    pub range: String,
    pub rows: Vec<Vec<String>>,
}

impl ToolResultDisplay for ReadRangeResult {
    fn display(&self) -> String {
        if self.rows.is_empty() {
            return format!("Range {} is empty.", self.range);
        }
        let mut lines = vec![format!("Values in {}:", self.range)];
        for row in &self.rows {
            lines.push(row.join(" | "));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct UpdateCellRequest {
    /// Spreadsheet ID from the document URL
    pub spreadsheet_id: String,
    /// A1-notation cell to update, e.g. "Sheet1!B2"
    pub range: String,
    /// New cell value, interpreted as if typed by the user
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateCellResult {
    pub updated_range: String,
    pub updated_cells: i32,
}

impl ToolResultDisplay for UpdateCellResult {
    fn display(&self) -> String {
        format!(
            "Updated {} ({} cell{})",
            self.updated_range,
            self.updated_cells,
            if self.updated_cells == 1 { "" } else { "s" }
        )
    }
}

fn format_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub struct GoogleSheetsClient {
    hub: Sheets<HttpsConnector>,
}

impl GoogleSheetsClient {
    pub fn new(auth: &GoogleAuth) -> Result<Self> {
        let client = hyper_util::client::legacy::Client::builder(
            hyper_util::rt::TokioExecutor::new(),
        )
        .build(GoogleAuth::https_connector()?);
        Ok(Self {
            hub: Sheets::new(client, auth.authenticator()),
        })
    }

    pub async fn get_spreadsheet_metadata(
        &self,
        args: &GetSpreadsheetMetadataRequest,
    ) -> Result<SpreadsheetMetadata> {
        debug!("Fetching spreadsheet metadata for {}", args.spreadsheet_id);
        let (_, spreadsheet) = self
            .hub
            .spreadsheets()
            .get(&args.spreadsheet_id)
            .add_scope(Scope::SpreadsheetReadonly)
            .doit()
            .await
            .map_err(|e| anyhow!("Sheets metadata fetch failed: {e}"))?;

        let title = spreadsheet
            .properties
            .and_then(|p| p.title)
            .unwrap_or_default();
        let sheets = spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .filter_map(|sheet| sheet.properties)
            .map(|props| {
                let grid = props.grid_properties.unwrap_or_default();
                SheetMetadata {
                    title: props.title.unwrap_or_default(),
                    sheet_id: props.sheet_id.unwrap_or_default(),
                    rows: grid.row_count.unwrap_or_default(),
                    columns: grid.column_count.unwrap_or_default(),
                }
            })
            .collect();

        Ok(SpreadsheetMetadata { title, sheets })
    }

    pub async fn read_range(&self, args: &ReadRangeRequest) -> Result<ReadRangeResult> {
        debug!("Reading range {} from {}", args.range, args.spreadsheet_id);
        let (_, value_range) = self
            .hub
            .spreadsheets()
            .values_get(&args.spreadsheet_id, &args.range)
            .add_scope(Scope::SpreadsheetReadonly)
            .doit()
            .await
            .map_err(|e| anyhow!("Sheets read failed: {e}"))?;

        let rows = value_range
            .values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.iter().map(format_cell).collect())
            .collect();

        Ok(ReadRangeResult {
            range: value_range.range.unwrap_or_else(|| args.range.clone()),
            rows,
        })
    }

    pub async fn update_cell(&self, args: &UpdateCellRequest) -> Result<UpdateCellResult> {
        debug!("Updating cell {} in {}", args.range, args.spreadsheet_id);
        let body = ValueRange {
            values: Some(vec![vec![Value::String(args.value.clone())]]),
            ..Default::default()
        };
        let (_, response) = self
            .hub
            .spreadsheets()
            .values_update(body, &args.spreadsheet_id, &args.range)
            .value_input_option("USER_ENTERED")
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map_err(|e| anyhow!("Sheets update failed: {e}"))?;

        Ok(UpdateCellResult {
            updated_range: response.updated_range.unwrap_or_else(|| args.range.clone()),
            updated_cells: response.updated_cells.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_render_without_json_quoting() {
        assert_eq!(format_cell(&Value::String("abc".to_string())), "abc");
        assert_eq!(format_cell(&serde_json::json!(42)), "42");
        assert_eq!(format_cell(&Value::Bool(true)), "true");
        assert_eq!(format_cell(&Value::Null), "");
    }

    #[test]
    fn read_range_display_lists_rows() {
        let result = ReadRangeResult {
            range: "Sheet1!A1:B2".to_string(),
            rows: vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
            ],
        };
        assert_eq!(result.display(), "Values in Sheet1!A1:B2:\na | b\nc | d");
    }
}

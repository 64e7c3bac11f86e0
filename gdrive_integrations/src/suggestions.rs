//! Extraction of suggestion markers from a [`DocumentSnapshot`] and rendering
//! of the human-readable report.
//!
//! Suggestions live scattered across the document tree: document-level style
//! maps, paragraph-style maps, and per-text-run insertion/deletion ids and
//! style maps, with tables nesting the whole structure recursively. Extraction
//! flattens them into one ordered list with positional paths; document-level
//! records come first, then a pre-order depth-first walk of the body, row-major
//! then column-major through tables.
//!
//! Paths are display-only identifiers, never parsed back: a body or cell
//! content index renders as `[i]`, entering a table cell appends
//! `.table[row][cell]`, and a text run inside a paragraph appends
//! `.elements[j]`.

use crate::document::{BlockElement, DocumentSnapshot, InlineElement, Paragraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    NamedStyle,
    DocumentStyle,
    ParagraphStyle,
    TextInsertion,
    TextDeletion,
    TextStyle,
}

impl SuggestionKind {
    fn label(self) -> &'static str {
        match self {
            SuggestionKind::NamedStyle => "Named style",
            SuggestionKind::DocumentStyle => "Document style",
            SuggestionKind::ParagraphStyle => "Paragraph style",
            SuggestionKind::TextInsertion => "Text insertion",
            SuggestionKind::TextDeletion => "Text deletion",
            SuggestionKind::TextStyle => "Text style",
        }
    }
}

/// One detected suggestion. `path` is `None` for document-scoped suggestions;
/// `snippet` is set only for insertions and deletions.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRecord {
    pub kind: SuggestionKind,
    pub path: Option<String>,
    pub snippet: Option<String>,
    pub id: String,
}

/// Flatten every suggestion in the snapshot into document order.
///
/// Pure and total: a snapshot with an empty body yields an empty list, even if
/// document-level suggestion maps are present.
pub fn extract(snapshot: &DocumentSnapshot) -> Vec<SuggestionRecord> {
    if snapshot.body.is_empty() {
        return Vec::new();
    }

    let mut records = Vec::new();
    for id in &snapshot.named_style_suggestions {
        records.push(SuggestionRecord {
            kind: SuggestionKind::NamedStyle,
            path: None,
            snippet: None,
            id: id.clone(),
        });
    }
    for id in &snapshot.document_style_suggestions {
        records.push(SuggestionRecord {
            kind: SuggestionKind::DocumentStyle,
            path: None,
            snippet: None,
            id: id.clone(),
        });
    }

    walk_blocks(&snapshot.body, "", &mut records);
    records
}

fn walk_blocks(blocks: &[BlockElement], prefix: &str, records: &mut Vec<SuggestionRecord>) {
    for (index, block) in blocks.iter().enumerate() {
        let path = format!("{prefix}[{index}]");
        match block {
            BlockElement::Paragraph(paragraph) => {
                collect_paragraph(paragraph, &path, records);
            }
            BlockElement::Table(table) => {
                for (row, table_row) in table.rows.iter().enumerate() {
                    for (cell, table_cell) in table_row.cells.iter().enumerate() {
                        let cell_path = format!("{path}.table[{row}][{cell}]");
                        walk_blocks(&table_cell.content, &cell_path, records);
                    }
                }
            }
            BlockElement::Other => {}
        }
    }
}

fn collect_paragraph(paragraph: &Paragraph, path: &str, records: &mut Vec<SuggestionRecord>) {
    for id in &paragraph.style_suggestions {
        records.push(SuggestionRecord {
            kind: SuggestionKind::ParagraphStyle,
            path: Some(path.to_string()),
            snippet: None,
            id: id.clone(),
        });
    }

    for (index, element) in paragraph.elements.iter().enumerate() {
        let InlineElement::TextRun(run) = element else {
            continue;
        };
        let run_path = format!("{path}.elements[{index}]");
        let snippet = run.content.trim();

        for id in &run.insertion_ids {
            records.push(SuggestionRecord {
                kind: SuggestionKind::TextInsertion,
                path: Some(run_path.clone()),
                snippet: Some(snippet.to_string()),
                id: id.clone(),
            });
        }
        for id in &run.deletion_ids {
            records.push(SuggestionRecord {
                kind: SuggestionKind::TextDeletion,
                path: Some(run_path.clone()),
                snippet: Some(snippet.to_string()),
                id: id.clone(),
            });
        }
        for id in &run.style_suggestions {
            records.push(SuggestionRecord {
                kind: SuggestionKind::TextStyle,
                path: Some(run_path.clone()),
                snippet: None,
                id: id.clone(),
            });
        }
    }
}

/// Render the extracted records into the final report text.
pub fn format_report(title: &str, records: &[SuggestionRecord]) -> String {
    if records.is_empty() {
        return format!("Document \"{title}\" has no suggestions.");
    }

    let mut lines = vec![format!(
        "Found {} suggestions in \"{title}\":",
        records.len()
    )];
    for (index, record) in records.iter().enumerate() {
        lines.push(format_record(index + 1, record));
    }
    lines.join("\n")
}

fn format_record(number: usize, record: &SuggestionRecord) -> String {
    match record.kind {
        SuggestionKind::TextInsertion | SuggestionKind::TextDeletion => {
            let action = match record.kind {
                SuggestionKind::TextInsertion => "insertion",
                _ => "deletion",
            };
            format!(
                "{number}. Text {action} at {}: \"{}\" (ID: {})",
                record.path.as_deref().unwrap_or(""),
                record.snippet.as_deref().unwrap_or(""),
                record.id
            )
        }
        kind => match &record.path {
            Some(path) => format!(
                "{number}. {} suggestion at {path} (ID: {})",
                kind.label(),
                record.id
            ),
            None => format!("{number}. {} suggestion (ID: {})", kind.label(), record.id),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Table, TableCell, TableRow, TextRun};

    fn text_run_paragraph(run: TextRun) -> BlockElement {
        BlockElement::Paragraph(Paragraph {
            style_suggestions: Vec::new(),
            elements: vec![InlineElement::TextRun(run)],
        })
    }

    fn plain_paragraph(text: &str) -> BlockElement {
        text_run_paragraph(TextRun {
            content: text.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn empty_body_yields_no_records_despite_document_level_maps() {
        let snapshot = DocumentSnapshot {
            title: "Draft".to_string(),
            named_style_suggestions: vec!["suggest.1".to_string()],
            document_style_suggestions: vec!["suggest.2".to_string()],
            body: Vec::new(),
        };
        assert!(extract(&snapshot).is_empty());
    }

    #[test]
    fn document_level_records_precede_body_records() {
        let snapshot = DocumentSnapshot {
            title: "Draft".to_string(),
            named_style_suggestions: vec!["named.a".to_string(), "named.b".to_string()],
            document_style_suggestions: vec!["doc.a".to_string()],
            body: vec![text_run_paragraph(TextRun {
                content: "body".to_string(),
                insertion_ids: vec!["ins.1".to_string()],
                ..Default::default()
            })],
        };

        let records = extract(&snapshot);
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].kind, SuggestionKind::NamedStyle);
        assert_eq!(records[0].id, "named.a");
        assert!(records[0].path.is_none());
        assert_eq!(records[1].kind, SuggestionKind::NamedStyle);
        assert_eq!(records[2].kind, SuggestionKind::DocumentStyle);
        assert_eq!(records[2].id, "doc.a");
        assert_eq!(records[3].kind, SuggestionKind::TextInsertion);
    }

    #[test]
    fn run_emits_insertions_then_deletions_with_shared_trimmed_snippet() {
        let snapshot = DocumentSnapshot {
            title: "Draft".to_string(),
            body: vec![text_run_paragraph(TextRun {
                content: "  new wording \n".to_string(),
                insertion_ids: vec!["ins.1".to_string(), "ins.2".to_string()],
                deletion_ids: vec!["del.1".to_string()],
                ..Default::default()
            })],
            ..Default::default()
        };

        let records = extract(&snapshot);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].kind, SuggestionKind::TextInsertion);
        assert_eq!(records[0].id, "ins.1");
        assert_eq!(records[1].kind, SuggestionKind::TextInsertion);
        assert_eq!(records[1].id, "ins.2");
        assert_eq!(records[2].kind, SuggestionKind::TextDeletion);
        assert_eq!(records[2].id, "del.1");
        for record in &records {
            assert_eq!(record.snippet.as_deref(), Some("new wording"));
            assert_eq!(record.path.as_deref(), Some("[0].elements[0]"));
        }
    }

    #[test]
    fn table_cell_path_encodes_row_and_column() {
        let suggested_cell = TableCell {
            content: vec![BlockElement::Paragraph(Paragraph {
                style_suggestions: vec!["para.1".to_string()],
                elements: Vec::new(),
            })],
        };
        let make_table = |filler: &str| {
            let plain_cell = TableCell {
                content: vec![plain_paragraph(filler)],
            };
            BlockElement::Table(Table {
                rows: vec![
                    TableRow {
                        cells: vec![plain_cell.clone(), plain_cell.clone()],
                    },
                    TableRow {
                        cells: vec![plain_cell.clone(), suggested_cell.clone()],
                    },
                ],
            })
        };

        let snapshot = DocumentSnapshot {
            title: "Draft".to_string(),
            body: vec![plain_paragraph("intro"), make_table("x")],
            ..Default::default()
        };
        let records = extract(&snapshot);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, SuggestionKind::ParagraphStyle);
        assert_eq!(records[0].path.as_deref(), Some("[1].table[1][1][0]"));

        // permuting unrelated cell content does not move the path
        let permuted = DocumentSnapshot {
            title: "Draft".to_string(),
            body: vec![plain_paragraph("intro"), make_table("different filler")],
            ..Default::default()
        };
        assert_eq!(extract(&permuted)[0].path, records[0].path);
    }

    #[test]
    fn nested_table_recurses_into_inner_cells() {
        let inner = BlockElement::Table(Table {
            rows: vec![TableRow {
                cells: vec![TableCell {
                    content: vec![text_run_paragraph(TextRun {
                        content: "deep".to_string(),
                        insertion_ids: vec!["ins.deep".to_string()],
                        ..Default::default()
                    })],
                }],
            }],
        });
        let outer = BlockElement::Table(Table {
            rows: vec![TableRow {
                cells: vec![TableCell {
                    content: vec![inner],
                }],
            }],
        });
        let snapshot = DocumentSnapshot {
            title: "Draft".to_string(),
            body: vec![outer],
            ..Default::default()
        };

        let records = extract(&snapshot);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].path.as_deref(),
            Some("[0].table[0][0][0].table[0][0][0].elements[0]")
        );
    }

    #[test]
    fn extract_is_idempotent() {
        let snapshot = DocumentSnapshot {
            title: "Draft".to_string(),
            named_style_suggestions: vec!["named.a".to_string()],
            body: vec![text_run_paragraph(TextRun {
                content: "text".to_string(),
                insertion_ids: vec!["ins.1".to_string()],
                style_suggestions: vec!["style.1".to_string()],
                ..Default::default()
            })],
            ..Default::default()
        };
        assert_eq!(extract(&snapshot), extract(&snapshot));
    }

    #[test]
    fn empty_report_renders_single_sentence() {
        assert_eq!(
            format_report("Report", &[]),
            "Document \"Report\" has no suggestions."
        );
    }

    #[test]
    fn report_lines_are_one_indexed() {
        let records = vec![
            SuggestionRecord {
                kind: SuggestionKind::NamedStyle,
                path: None,
                snippet: None,
                id: "named.a".to_string(),
            },
            SuggestionRecord {
                kind: SuggestionKind::TextInsertion,
                path: Some("[0].elements[1]".to_string()),
                snippet: Some("hello".to_string()),
                id: "ins.1".to_string(),
            },
        ];
        let report = format_report("Report", &records);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Found 2 suggestions in \"Report\":");
        assert_eq!(lines[1], "1. Named style suggestion (ID: named.a)");
        assert_eq!(
            lines[2],
            "2. Text insertion at [0].elements[1]: \"hello\" (ID: ins.1)"
        );
    }

    #[test]
    fn style_record_with_path_names_its_location() {
        let records = vec![SuggestionRecord {
            kind: SuggestionKind::ParagraphStyle,
            path: Some("[2]".to_string()),
            snippet: None,
            id: "para.1".to_string(),
        }];
        let report = format_report("Report", &records);
        assert!(report.ends_with("1. Paragraph style suggestion at [2] (ID: para.1)"));
    }
}

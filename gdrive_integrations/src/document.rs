//! Snapshot model for a fetched Google Doc.
//!
//! The Docs API represents structure through optional fields on every node
//! (`paragraph` vs `table` on a structural element, `text_run` on a paragraph
//! element, and so on). Converting into an explicit sum type up front keeps the
//! traversal code exhaustive and free of option probing: every absent optional
//! collection becomes an empty one here, never a branch later.

use google_docs1::api;
use std::collections::HashMap;

/// One fetched document: title, document-level suggestion ids, and body blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentSnapshot {
    pub title: String,
    /// Change ids from the document-level named-styles suggestion map, sorted.
    pub named_style_suggestions: Vec<String>,
    /// Change ids from the document-level document-style suggestion map, sorted.
    pub document_style_suggestions: Vec<String>,
    pub body: Vec<BlockElement>,
}

/// A structural element of the document body or of a table cell.
///
/// `Other` covers structural elements that carry no suggestions (section
/// breaks, tables of contents). They still occupy an index in the content
/// sequence, so they are kept to preserve positional paths.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockElement {
    Paragraph(Paragraph),
    Table(Table),
    Other,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    /// Change ids from the paragraph-style suggestion map, sorted.
    pub style_suggestions: Vec<String>,
    pub elements: Vec<InlineElement>,
}

/// An inline element of a paragraph. Only text runs carry suggestions; the
/// rest (page breaks, inline objects, footnote references...) keep their index
/// slot via `Other`.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineElement {
    TextRun(TextRun),
    Other,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRun {
    /// Raw run content, untrimmed.
    pub content: String,
    pub insertion_ids: Vec<String>,
    pub deletion_ids: Vec<String>,
    /// Change ids from the text-style suggestion map, sorted.
    pub style_suggestions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// A table cell nests the same block structure as the document body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableCell {
    pub content: Vec<BlockElement>,
}

/// Flatten a suggestion-change map to its change ids, sorted for deterministic
/// output. Absent map means no suggestions of that kind.
fn change_ids<V>(changes: Option<HashMap<String, V>>) -> Vec<String> {
    let mut ids: Vec<String> = changes.map(|m| m.into_keys().collect()).unwrap_or_default();
    ids.sort();
    ids
}

impl From<api::Document> for DocumentSnapshot {
    fn from(doc: api::Document) -> Self {
        Self {
            title: doc.title.unwrap_or_default(),
            named_style_suggestions: change_ids(doc.suggested_named_styles_changes),
            document_style_suggestions: change_ids(doc.suggested_document_style_changes),
            body: doc
                .body
                .and_then(|body| body.content)
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl From<api::StructuralElement> for BlockElement {
    fn from(element: api::StructuralElement) -> Self {
        if let Some(paragraph) = element.paragraph {
            BlockElement::Paragraph(paragraph.into())
        } else if let Some(table) = element.table {
            BlockElement::Table(table.into())
        } else {
            BlockElement::Other
        }
    }
}

impl From<api::Paragraph> for Paragraph {
    fn from(paragraph: api::Paragraph) -> Self {
        Self {
            style_suggestions: change_ids(paragraph.suggested_paragraph_style_changes),
            elements: paragraph
                .elements
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl From<api::ParagraphElement> for InlineElement {
    fn from(element: api::ParagraphElement) -> Self {
        match element.text_run {
            Some(run) => InlineElement::TextRun(run.into()),
            None => InlineElement::Other,
        }
    }
}

impl From<api::TextRun> for TextRun {
    fn from(run: api::TextRun) -> Self {
        Self {
            content: run.content.unwrap_or_default(),
            insertion_ids: run.suggested_insertion_ids.unwrap_or_default(),
            deletion_ids: run.suggested_deletion_ids.unwrap_or_default(),
            style_suggestions: change_ids(run.suggested_text_style_changes),
        }
    }
}

impl From<api::Table> for Table {
    fn from(table: api::Table) -> Self {
        Self {
            rows: table
                .table_rows
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl From<api::TableRow> for TableRow {
    fn from(row: api::TableRow) -> Self {
        Self {
            cells: row
                .table_cells
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl From<api::TableCell> for TableCell {
    fn from(cell: api::TableCell) -> Self {
        Self {
            content: cell
                .content
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl DocumentSnapshot {
    /// Concatenate all text-run content in document order, descending into
    /// table cells row-major. Used by the plain read tool.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        append_blocks(&self.body, &mut text);
        text
    }
}

fn append_blocks(blocks: &[BlockElement], out: &mut String) {
    for block in blocks {
        match block {
            BlockElement::Paragraph(paragraph) => {
                for element in &paragraph.elements {
                    if let InlineElement::TextRun(run) = element {
                        out.push_str(&run.content);
                    }
                }
            }
            BlockElement::Table(table) => {
                for row in &table.rows {
                    for cell in &row.cells {
                        append_blocks(&cell.content, out);
                    }
                }
            }
            BlockElement::Other => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_text_run(content: &str) -> api::TextRun {
        api::TextRun {
            content: Some(content.to_string()),
            ..Default::default()
        }
    }

    fn api_paragraph(runs: Vec<api::TextRun>) -> api::StructuralElement {
        api::StructuralElement {
            paragraph: Some(api::Paragraph {
                elements: Some(
                    runs.into_iter()
                        .map(|run| api::ParagraphElement {
                            text_run: Some(run),
                            ..Default::default()
                        })
                        .collect(),
                ),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn absent_optionals_convert_to_empty_collections() {
        let snapshot = DocumentSnapshot::from(api::Document::default());
        assert_eq!(snapshot.title, "");
        assert!(snapshot.named_style_suggestions.is_empty());
        assert!(snapshot.document_style_suggestions.is_empty());
        assert!(snapshot.body.is_empty());
    }

    #[test]
    fn suggestion_map_keys_are_sorted() {
        let mut changes = HashMap::new();
        changes.insert("suggest.b".to_string(), api::SuggestedNamedStyles::default());
        changes.insert("suggest.a".to_string(), api::SuggestedNamedStyles::default());
        changes.insert("suggest.c".to_string(), api::SuggestedNamedStyles::default());

        let doc = api::Document {
            suggested_named_styles_changes: Some(changes),
            ..Default::default()
        };
        let snapshot = DocumentSnapshot::from(doc);
        assert_eq!(
            snapshot.named_style_suggestions,
            vec!["suggest.a", "suggest.b", "suggest.c"]
        );
    }

    #[test]
    fn section_breaks_keep_their_index_slot() {
        let doc = api::Document {
            body: Some(api::Body {
                content: Some(vec![
                    api::StructuralElement {
                        section_break: Some(api::SectionBreak::default()),
                        ..Default::default()
                    },
                    api_paragraph(vec![api_text_run("hello")]),
                ]),
            }),
            ..Default::default()
        };
        let snapshot = DocumentSnapshot::from(doc);
        assert_eq!(snapshot.body.len(), 2);
        assert_eq!(snapshot.body[0], BlockElement::Other);
        assert!(matches!(snapshot.body[1], BlockElement::Paragraph(_)));
    }

    #[test]
    fn plain_text_walks_tables_row_major() {
        let cell = |text: &str| api::TableCell {
            content: Some(vec![api_paragraph(vec![api_text_run(text)])]),
            ..Default::default()
        };
        let doc = api::Document {
            body: Some(api::Body {
                content: Some(vec![
                    api_paragraph(vec![api_text_run("intro\n")]),
                    api::StructuralElement {
                        table: Some(api::Table {
                            table_rows: Some(vec![
                                api::TableRow {
                                    table_cells: Some(vec![cell("a"), cell("b")]),
                                    ..Default::default()
                                },
                                api::TableRow {
                                    table_cells: Some(vec![cell("c"), cell("d")]),
                                    ..Default::default()
                                },
                            ]),
                            ..Default::default()
                        }),
                        ..Default::default()
                    },
                ]),
            }),
            ..Default::default()
        };
        let snapshot = DocumentSnapshot::from(doc);
        assert_eq!(snapshot.plain_text(), "intro\nabcd");
    }
}

//! Project configuration and annotation records.
//!
//! A project is described by an annotations file: a JSON document
//! naming the user and project plus the list of remote documents and
//! the labeled spans recorded against them. These records are inputs
//! only; nothing in the pipeline ever mutates an annotation.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level annotations file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectConfig {
    /// Owner of the project; first path segment of the config layout.
    pub user_name: String,
    /// Project name; second path segment of the config layout.
    pub project_name: String,
    /// Documents annotated in this project.
    #[serde(default)]
    pub documents: Vec<DocumentRef>,
}

/// One annotated document inside a project.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentRef {
    /// URL the document is fetched from; its basename is the local
    /// file name under the project's `documents/` directory.
    pub file: String,
    /// Labeled spans recorded against this document.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// A labeled span in some textual view of a document.
///
/// Offsets are character offsets, and they are not guaranteed to be
/// measured against the raw source: annotation tools commonly unescape
/// HTML entities before presenting text, so `offset_end - offset_start`
/// can be shorter than the raw span it names. `selection`, when
/// present, is the literal text the annotator saw.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Annotation {
    /// First character of the span.
    pub offset_start: usize,
    /// One past the last character of the span.
    pub offset_end: usize,
    /// Entity label, e.g. `"DATE"` or `"AMOUNT"`.
    pub label: String,
    /// Literal selection text as the annotator saw it, if recorded.
    #[serde(default)]
    pub selection: Option<String>,
}

/// A resolved entity span in raw-source character offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSpan {
    /// First character of the span in the raw source.
    pub start: usize,
    /// One past the last character of the span in the raw source.
    pub end: usize,
    /// Entity label carried over from the annotation.
    pub label: String,
}

/// One training example: a document's raw text plus its resolved spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingRecord {
    /// Local file name of the document.
    pub document: String,
    /// Raw document text the spans index into.
    pub text: String,
    /// Resolved entity spans.
    pub entities: Vec<ResolvedSpan>,
}

impl ProjectConfig {
    /// Load a project configuration from a JSON annotations file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::NercError::Io`] if the file cannot be read and
    /// [`crate::NercError::Json`] if it is not a valid annotations
    /// document.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "user_name": "djtalo85",
        "project_name": "Lloyds",
        "documents": [
            {
                "file": "https://example.com/statements/2017_September_Statement_2.html",
                "annotations": [
                    {
                        "offset_start": 24485,
                        "offset_end": 24502,
                        "label": "MERCHANT",
                        "selection": "SAINSBURY'S S/MKT"
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn parses_annotations_file() {
        let config: ProjectConfig = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(config.user_name, "djtalo85");
        assert_eq!(config.project_name, "Lloyds");
        assert_eq!(config.documents.len(), 1);
        let ann = &config.documents[0].annotations[0];
        assert_eq!(ann.label, "MERCHANT");
        assert_eq!(ann.selection.as_deref(), Some("SAINSBURY'S S/MKT"));
    }

    #[test]
    fn missing_optional_fields_default() {
        let config: ProjectConfig = serde_json::from_str(
            r#"{"user_name": "u", "project_name": "p"}"#,
        )
        .unwrap();
        assert!(config.documents.is_empty());

        let ann: Annotation = serde_json::from_str(
            r#"{"offset_start": 0, "offset_end": 3, "label": "X"}"#,
        )
        .unwrap();
        assert!(ann.selection.is_none());
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = ProjectConfig::load(file.path()).unwrap();
        assert_eq!(config.project_name, "Lloyds");
    }
}

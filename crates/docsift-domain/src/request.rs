//! Inbound analysis request

use serde::{Deserialize, Serialize};

/// A document submitted for analysis
///
/// Field names follow the JSON wire format (`documentContent`, `uploadTime`).
/// Every field is optional at the type level so that a missing document can be
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Caller-supplied identifier; a random one is generated when absent
    #[serde(default)]
    pub id: Option<String>,

    /// Full text of the document
    #[serde(default)]
    pub document_content: Option<String>,

    /// Optional descriptive metadata
    #[serde(default)]
    pub metadata: Option<DocumentMetadata>,
}

/// Descriptive metadata attached to a request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Display name of the document
    #[serde(default)]
    pub name: Option<String>,

    /// When the caller uploaded the document (free-form timestamp string)
    #[serde(default)]
    pub upload_time: Option<String>,
}

impl AnalysisRequest {
    /// Create a request for the given document text
    pub fn new(document_content: impl Into<String>) -> Self {
        Self {
            id: None,
            document_content: Some(document_content.into()),
            metadata: None,
        }
    }

    /// Set the caller-supplied identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach metadata
    pub fn with_metadata(mut self, metadata: DocumentMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// The document text, if present and non-empty
    pub fn content(&self) -> Option<&str> {
        self.document_content
            .as_deref()
            .filter(|content| !content.is_empty())
    }

    /// Metadata name, if supplied
    pub fn document_name(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.name.as_deref())
    }

    /// Metadata upload time, if supplied
    pub fn upload_time(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.upload_time.as_deref())
    }
}

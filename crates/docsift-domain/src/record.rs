//! The record produced for each processed request

use crate::flat::FlatRecord;
use serde::{Deserialize, Serialize};

/// Complete result of one analysis request
///
/// Built only after every pipeline stage succeeded; there is no partially
/// populated form. `raw_content` holds at most the configured number of leading
/// characters of the document, so long documents do not round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    /// Request identifier (caller-supplied or generated)
    pub id: String,

    /// Document display name
    pub document_name: String,

    /// Upload time as supplied by the caller, or receipt time
    pub upload_time: String,

    /// Flattened analysis
    pub analysis_result: FlatRecord,

    /// Truncated document text
    pub raw_content: String,

    /// Always true for records that leave the pipeline
    pub processed: bool,

    /// When processing finished (RFC 3339)
    pub processing_time: String,
}

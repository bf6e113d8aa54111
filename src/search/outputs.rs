//! Output types for search tools
//!
//! These types are used as the return values from search tool methods.
//! They are serialized to JSON strings for the MCP protocol, and can be
//! deserialized in tests for type-safe validation.

use serde::{Deserialize, Serialize};

use crate::index::{CrateIndex, IndexEntry};
use crate::search::Hit;

/// Individual search result item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    /// Crate the item belongs to
    pub crate_name: String,
    /// Item name
    pub name: String,
    /// Name qualified with the owning type, e.g. `Error::IO`
    pub display_name: String,
    /// Item kind
    pub kind: String,
    /// Module path
    pub path: String,
    /// How the query matched
    pub matched: String,
    /// One-line documentation summary (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Owning type or trait (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Rendered call signature (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl From<&Hit<'_>> for SearchHit {
    fn from(hit: &Hit<'_>) -> Self {
        Self {
            crate_name: hit.crate_name.to_string(),
            name: hit.entry.name.clone(),
            display_name: hit.display_name(),
            kind: hit.entry.kind.to_string(),
            path: hit.entry.path.clone(),
            matched: format!("{:?}", hit.rank),
            summary: summary_of(hit.entry),
            parent: hit.parent.map(|parent| parent.name.clone()),
            signature: hit.entry.signature.as_ref().map(ToString::to_string),
        }
    }
}

/// Output from search_items operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchItemsOutput {
    pub results: Vec<SearchHit>,
    pub query: String,
    pub total_results: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crate_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind_filter: Option<String>,
}

impl SearchItemsOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }

    /// Check if there are any results
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }
}

/// Crate overview for list_crates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrateSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    pub item_count: usize,
    pub path_count: usize,
}

impl CrateSummary {
    pub fn new(name: &str, krate: &CrateIndex) -> Self {
        Self {
            name: name.to_string(),
            doc: (!krate.doc.is_empty()).then(|| krate.doc.clone()),
            item_count: krate.items.len(),
            path_count: krate.paths.len(),
        }
    }
}

/// Output from list_crates operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ListCratesOutput {
    pub crates: Vec<CrateSummary>,
    pub total_items: usize,
}

impl ListCratesOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// Lightweight item listing entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemPreview {
    pub name: String,
    pub display_name: String,
    pub kind: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl ItemPreview {
    pub fn new(krate: &CrateIndex, entry: &IndexEntry) -> Self {
        Self {
            name: entry.name.clone(),
            display_name: krate.qualified_name(entry),
            kind: entry.kind.to_string(),
            path: entry.path.clone(),
            summary: summary_of(entry),
        }
    }
}

/// Pagination information
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaginationInfo {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

/// Output from list_crate_items operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ListCrateItemsOutput {
    pub crate_name: String,
    pub items: Vec<ItemPreview>,
    pub pagination: PaginationInfo,
}

impl ListCrateItemsOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// Error output for search tools
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchErrorOutput {
    pub error: String,
}

impl SearchErrorOutput {
    /// Create a new error output
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize error"}"#.to_string())
    }
}

fn summary_of(entry: &IndexEntry) -> Option<String> {
    (!entry.summary.is_empty()).then(|| entry.plain_summary())
}

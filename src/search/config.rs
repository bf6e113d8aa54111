//! # Search Configuration Module
//!
//! Limits applied to search requests coming in through the service and CLI.

/// Default limit for search results
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Maximum allowed limit for search results
pub const MAX_SEARCH_LIMIT: usize = 1000;

/// Maximum allowed query length in characters
pub const MAX_QUERY_LENGTH: usize = 1000;

/// Default page size when listing a crate's items
pub const DEFAULT_LIST_LIMIT: usize = 100;

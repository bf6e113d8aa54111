//! # Search Module
//!
//! Case-insensitive substring search over loaded search indices, and the
//! tool layer that exposes it.
//!
//! ## Key Components
//!
//! - [`query`] - Matching, ranking and result sequences
//! - [`tools`] - Tool implementations backing the MCP service and CLI
//! - [`outputs`] - JSON response types
//! - [`config`] - Request limits

pub mod config;
pub mod outputs;
pub mod query;
pub mod tools;

pub use query::{Hit, Hits, MatchRank, SearchQuery};
pub use tools::SearchTools;

//! Process-lifetime holder for a loaded search index.

use std::sync::Arc;

use crate::index::{CrateIndex, IndexError, SearchIndex};
use crate::search::{Hits, SearchQuery};

/// Read-only, cheaply cloneable handle to a loaded index.
///
/// The index is never mutated after construction, so clones may be handed
/// to any number of concurrent readers without locking.
#[derive(Debug, Clone)]
pub struct IndexStore {
    index: Arc<SearchIndex>,
}

impl IndexStore {
    pub fn new(index: SearchIndex) -> Self {
        tracing::info!(
            "Search index ready: {} crates, {} items",
            index.len(),
            index.total_items()
        );
        Self {
            index: Arc::new(index),
        }
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn get_crate(&self, name: &str) -> Result<&CrateIndex, IndexError> {
        self.index
            .get(name)
            .ok_or_else(|| IndexError::CrateNotFound(name.to_string()))
    }

    pub fn crate_names(&self) -> Vec<&str> {
        self.index.crate_names().collect()
    }

    pub fn search(&self, query: &SearchQuery) -> Result<Hits<'_>, IndexError> {
        self.index.search(query)
    }
}

//! Where the search index is loaded from at startup.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::bundled::bundled_index;
use crate::index::SearchIndex;

/// Index sources resolved from the command line and environment
#[derive(Debug, Clone)]
pub struct IndexSources {
    /// Extra `search-index.js` or JSON files
    pub files: Vec<PathBuf>,
    /// Whether to include the index compiled into the binary
    pub include_bundled: bool,
}

impl Default for IndexSources {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            include_bundled: true,
        }
    }
}

impl IndexSources {
    /// Load and merge every configured source. Any malformed source aborts
    /// the whole load.
    pub fn load(&self) -> Result<SearchIndex> {
        if !self.include_bundled && self.files.is_empty() {
            bail!("No search index sources configured: pass --index or drop --no-bundled");
        }

        let mut index = if self.include_bundled {
            bundled_index().context("Failed to load bundled search index")?
        } else {
            SearchIndex::default()
        };

        for path in &self.files {
            let loaded = load_index_file(path)?;
            index = index
                .merge(loaded)
                .with_context(|| format!("Failed to merge index from {}", path.display()))?;
        }

        Ok(index)
    }
}

/// Read and validate a single index file
pub fn load_index_file(path: &Path) -> Result<SearchIndex> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read index file: {}", path.display()))?;
    let index = SearchIndex::load(&source)
        .with_context(|| format!("Failed to load index file: {}", path.display()))?;
    tracing::info!("Loaded {} crate(s) from {}", index.len(), path.display());
    Ok(index)
}

//! The `lsio` search index shipped inside the binary.

use crate::index::{IndexError, SearchIndex};

pub const BUNDLED_SEARCH_INDEX: &str = include_str!("../data/search-index.js");

pub fn bundled_index() -> Result<SearchIndex, IndexError> {
    SearchIndex::from_js(BUNDLED_SEARCH_INDEX)
}

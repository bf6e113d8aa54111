use anyhow::{Result, bail};
use rmcp::schemars;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::index::ItemKind;
use crate::search::SearchQuery;
use crate::search::config::{
    DEFAULT_LIST_LIMIT, DEFAULT_SEARCH_LIMIT, MAX_QUERY_LENGTH, MAX_SEARCH_LIMIT,
};
use crate::search::outputs::{
    CrateSummary, ItemPreview, ListCrateItemsOutput, ListCratesOutput, PaginationInfo,
    SearchErrorOutput, SearchHit, SearchItemsOutput,
};
use crate::store::IndexStore;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchItemsParams {
    #[schemars(
        description = "Text to look for in item names and module paths (case-insensitive substring). An empty query returns no results."
    )]
    pub query: String,
    #[schemars(description = "Restrict the search to one crate (default: all loaded crates)")]
    pub crate_name: Option<String>,
    #[schemars(
        description = "Optional filter by item kind (e.g., 'fn', 'enum', 'variant', 'macro')"
    )]
    pub kind_filter: Option<String>,
    #[schemars(description = "Maximum number of results to return (default: 50)")]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListCrateItemsParams {
    #[schemars(description = "The name of the crate")]
    pub crate_name: String,
    #[schemars(
        description = "Optional filter by item kind (e.g., 'fn', 'enum', 'variant', 'macro')"
    )]
    pub kind_filter: Option<String>,
    #[schemars(description = "Maximum number of items to return (default: 100)")]
    pub limit: Option<usize>,
    #[schemars(description = "Starting position for pagination (default: 0)")]
    pub offset: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct SearchTools {
    store: IndexStore,
}

impl SearchTools {
    pub fn new(store: IndexStore) -> Self {
        Self { store }
    }

    /// Search items across loaded crates
    pub fn search_items(&self, params: SearchItemsParams) -> String {
        match self.run_search(&params) {
            Ok(output) => output.to_json(),
            Err(e) => {
                tracing::warn!("Search for '{}' failed: {}", params.query, e);
                SearchErrorOutput::new(format!("Search failed: {e}")).to_json()
            }
        }
    }

    /// Validate parameters and run the search, keeping the typed output
    pub fn run_search(&self, params: &SearchItemsParams) -> Result<SearchItemsOutput> {
        if params.query.chars().count() > MAX_QUERY_LENGTH {
            bail!("Query must not exceed {MAX_QUERY_LENGTH} characters");
        }

        let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        if limit > MAX_SEARCH_LIMIT {
            bail!("Limit must not exceed {MAX_SEARCH_LIMIT}");
        }

        let mut query = SearchQuery::new(params.query.clone());
        if let Some(crate_name) = &params.crate_name {
            query = query.in_crate(crate_name.clone());
        }
        if let Some(kind) = &params.kind_filter {
            query = query.with_kind(parse_kind(kind)?);
        }

        let hits = self.store.search(&query)?;
        let results = hits.iter().take(limit).map(SearchHit::from).collect();

        Ok(SearchItemsOutput {
            results,
            query: params.query.clone(),
            total_results: hits.len(),
            crate_name: params.crate_name.clone(),
            kind_filter: params.kind_filter.clone(),
        })
    }

    /// Summaries of every loaded crate
    pub fn list_crates(&self) -> String {
        let index = self.store.index();
        ListCratesOutput {
            crates: index
                .crates()
                .map(|(name, krate)| CrateSummary::new(name, krate))
                .collect(),
            total_items: index.total_items(),
        }
        .to_json()
    }

    /// Page through a crate's items in index order
    pub fn list_crate_items(&self, params: ListCrateItemsParams) -> String {
        match self.run_list_crate_items(&params) {
            Ok(output) => output.to_json(),
            Err(e) => {
                tracing::warn!("Listing items of '{}' failed: {}", params.crate_name, e);
                SearchErrorOutput::new(format!("Failed to list items: {e}")).to_json()
            }
        }
    }

    fn run_list_crate_items(
        &self,
        params: &ListCrateItemsParams,
    ) -> Result<ListCrateItemsOutput> {
        let krate = self.store.get_crate(&params.crate_name)?;

        let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);
        if limit > MAX_SEARCH_LIMIT {
            bail!("Limit must not exceed {MAX_SEARCH_LIMIT}");
        }
        let offset = params.offset.unwrap_or(0);
        let kind = params.kind_filter.as_deref().map(parse_kind).transpose()?;

        let matching: Vec<_> = match kind {
            Some(kind) => krate.items_of_kind(kind).collect(),
            None => krate.items.iter().collect(),
        };
        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|entry| ItemPreview::new(krate, entry))
            .collect();

        Ok(ListCrateItemsOutput {
            crate_name: params.crate_name.clone(),
            items,
            pagination: PaginationInfo {
                total,
                limit,
                offset,
                has_more: offset.saturating_add(limit) < total,
            },
        })
    }
}

fn parse_kind(kind: &str) -> Result<ItemKind> {
    kind.parse::<ItemKind>().map_err(anyhow::Error::msg)
}

use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::search::SearchTools;
use crate::search::tools::{ListCrateItemsParams, SearchItemsParams};
use crate::store::IndexStore;

#[derive(Debug, Clone)]
pub struct SearchIndexService {
    search_tools: SearchTools,
    tool_router: ToolRouter<Self>,
}

impl SearchIndexService {
    pub fn new(store: IndexStore) -> Self {
        Self {
            search_tools: SearchTools::new(store),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl SearchIndexService {
    #[tool(
        description = "Search documented items (functions, types, traits, enum variants, methods, macros) by case-insensitive substring of their name or module path. Results are ordered by shorter name first, then alphabetically; each result reports whether it matched by name or only through its module path. Associated items are shown with their owner, e.g. 'Error::FileNotFound'. Optionally restrict to one crate and/or one item kind."
    )]
    pub async fn search_items(&self, params: Parameters<SearchItemsParams>) -> String {
        self.search_tools.search_items(params.0)
    }

    #[tool(
        description = "List every crate in the loaded search index with its description and item counts. Use this first to find valid crate names for the other tools."
    )]
    pub async fn list_crates(&self) -> String {
        self.search_tools.list_crates()
    }

    #[tool(
        description = "Page through all items of one crate in index order, optionally filtered by kind (e.g. 'fn', 'enum', 'variant', 'macro'). Useful for browsing a crate without a search term."
    )]
    pub async fn list_crate_items(&self, params: Parameters<ListCrateItemsParams>) -> String {
        self.search_tools.list_crate_items(params.0)
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for SearchIndexService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            instructions: Some(
                "MCP server for searching generated rustdoc search indices. Use list_crates to see which crates are loaded, search_items to find items by name or module path, and list_crate_items to browse a crate page by page.".to_string(),
            ),
            ..Default::default()
        }
    }
}

pub mod bundled;
pub mod config;
pub mod index;
pub mod search;
pub mod service;
pub mod store;

pub use index::{IndexError, SearchIndex};
pub use service::SearchIndexService;
pub use store::IndexStore;

use thiserror::Error as ThisError;

use crate::index::ItemKind;

///
/// IndexError
///

#[derive(Debug, ThisError)]
pub enum IndexError {
    #[error("malformed search index: {0}")]
    Malformed(#[from] MalformedIndex),

    #[error("crate '{0}' not found in search index")]
    CrateNotFound(String),
}

///
/// MalformedIndex
/// structural violations detected while loading; the data is generated,
/// so any of these points at a broken build rather than bad user input
///

#[derive(Debug, ThisError)]
pub enum MalformedIndex {
    #[error("invalid index JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unrecognized statement on line {line}: {snippet}")]
    UnexpectedStatement { line: usize, snippet: String },

    #[error("crate '{krate}' is defined more than once")]
    DuplicateCrate { krate: String },

    #[error("crate '{krate}', item {position}: unknown kind code {code}")]
    UnknownItemKind {
        krate: String,
        position: usize,
        code: u64,
    },

    #[error("crate '{krate}', path {position}: unknown kind code {code}")]
    UnknownPathKind {
        krate: String,
        position: usize,
        code: u64,
    },

    #[error(
        "crate '{krate}', item {position}: parent index {parent} is out of bounds ({len} paths)"
    )]
    DanglingParent {
        krate: String,
        position: usize,
        parent: usize,
        len: usize,
    },

    #[error("crate '{krate}', item {position}: {kind} items cannot carry a signature")]
    UnexpectedSignature {
        krate: String,
        position: usize,
        kind: ItemKind,
    },
}

impl IndexError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, IndexError::Malformed(_))
    }
}

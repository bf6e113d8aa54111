//! # Index Module
//!
//! Typed model of a generated rustdoc search index and the loader that
//! produces it.
//!
//! ## Key Components
//!
//! - [`kind`] - Closed set of item kind codes
//! - [`raw`] - Positional wire rows as written by the generator
//! - [`loader`] - Parsing, validation and re-serialization
//! - [`types`] - Validated entries, crates and the index itself
//! - [`error`] - Load and lookup errors

pub mod error;
pub mod kind;
pub mod loader;
pub mod raw;
pub mod types;

pub use error::{IndexError, MalformedIndex};
pub use kind::{ItemKind, UnknownKindCode};
pub use types::{CrateIndex, IndexEntry, ParentRef, PathEntry, SearchIndex, Signature};

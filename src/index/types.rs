use std::collections::BTreeMap;
use std::fmt;

use crate::index::ItemKind;

/// Validated reference from an item into its crate's `paths` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParentRef(pub(crate) usize);

impl ParentRef {
    pub fn position(self) -> usize {
        self.0
    }
}

/// Call signature metadata attached to functions and methods
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub inputs: Vec<String>,
    pub output: Option<String>,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.inputs.join(", "))?;
        if let Some(output) = &self.output {
            write!(f, " -> {output}")?;
        }
        Ok(())
    }
}

/// One documented item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub kind: ItemKind,
    pub name: String,
    /// Fully resolved module path, e.g. `lsio::error`
    pub path: String,
    /// First paragraph of the docs, HTML-escaped as generated
    pub summary: String,
    pub parent: Option<ParentRef>,
    pub signature: Option<Signature>,
}

impl IndexEntry {
    /// Summary with the generator's HTML escapes undone
    pub fn plain_summary(&self) -> String {
        unescape_html(&self.summary)
    }
}

/// A type or trait that owns child items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub kind: ItemKind,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateIndex {
    pub doc: String,
    pub items: Vec<IndexEntry>,
    pub paths: Vec<PathEntry>,
}

impl CrateIndex {
    /// Resolve an entry's parent. Parent references are checked at load time.
    pub fn parent_of(&self, entry: &IndexEntry) -> Option<&PathEntry> {
        entry.parent.and_then(|parent| self.paths.get(parent.0))
    }

    /// Display name with the owning type prepended, e.g. `Error::FileNotFound`
    pub fn qualified_name(&self, entry: &IndexEntry) -> String {
        match self.parent_of(entry) {
            Some(parent) => format!("{}::{}", parent.name, entry.name),
            None => entry.name.clone(),
        }
    }

    pub fn items_of_kind(&self, kind: ItemKind) -> impl Iterator<Item = &IndexEntry> {
        self.items.iter().filter(move |entry| entry.kind == kind)
    }
}

/// Every loaded crate, keyed by crate name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    pub(crate) crates: BTreeMap<String, CrateIndex>,
}

impl SearchIndex {
    pub fn get(&self, name: &str) -> Option<&CrateIndex> {
        self.crates.get(name)
    }

    pub fn crates(&self) -> impl Iterator<Item = (&str, &CrateIndex)> {
        self.crates.iter().map(|(name, krate)| (name.as_str(), krate))
    }

    pub fn crate_names(&self) -> impl Iterator<Item = &str> {
        self.crates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.crates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crates.is_empty()
    }

    pub fn total_items(&self) -> usize {
        self.crates.values().map(|krate| krate.items.len()).sum()
    }
}

fn unescape_html(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

//! Loading and re-serializing search indices.
//!
//! The generator emits a small JavaScript file:
//!
//! ```text
//! var searchIndex = {};
//! searchIndex["lsio"] = {"doc":"","items":[...],"paths":[...]};
//! initSearch(searchIndex);
//! ```
//!
//! Each crate record is plain JSON, so the loader only has to recognise the
//! handful of statement shapes around it. Everything is validated here; the
//! rest of the crate works with typed values only.

use std::collections::btree_map::Entry;

use crate::index::raw::{RawCrate, RawItem, RawPath, RawSearchIndex, RawSignature, RawType};
use crate::index::{
    CrateIndex, IndexEntry, IndexError, ItemKind, MalformedIndex, ParentRef, PathEntry,
    SearchIndex, Signature, UnknownKindCode,
};

const DECLARATION: &str = "var searchIndex";
const ASSIGNMENT: &str = "searchIndex[";
const INIT_CALL: &str = "initSearch(";

/// Longest statement excerpt quoted in an error message
const SNIPPET_LEN: usize = 60;

impl SearchIndex {
    /// Load either the JavaScript artifact or a bare JSON mapping
    pub fn load(source: &str) -> Result<Self, IndexError> {
        if source.trim_start().starts_with('{') {
            Self::from_json(source)
        } else {
            Self::from_js(source)
        }
    }

    /// Load a JSON mapping of crate name to crate record
    pub fn from_json(source: &str) -> Result<Self, IndexError> {
        let raw: RawSearchIndex = serde_json::from_str(source).map_err(MalformedIndex::from)?;
        Self::from_raw(raw)
    }

    /// Load the `search-index.js` artifact.
    ///
    /// Statements are read one per line, the way the generator writes them:
    /// a crate record split over several lines, or several statements sharing
    /// one line, is rejected as [`MalformedIndex::UnexpectedStatement`].
    pub fn from_js(source: &str) -> Result<Self, IndexError> {
        let mut raw = RawSearchIndex::new();

        for (idx, line) in source.lines().enumerate() {
            let statement = line.trim();
            if statement.is_empty() || statement.starts_with("//") {
                continue;
            }
            let statement = statement.strip_suffix(';').unwrap_or(statement).trim_end();
            let unexpected = || MalformedIndex::UnexpectedStatement {
                line: idx + 1,
                snippet: statement.chars().take(SNIPPET_LEN).collect(),
            };

            if let Some(rest) = statement.strip_prefix(DECLARATION) {
                let value = assigned_value(rest).ok_or_else(unexpected)?;
                let crates: RawSearchIndex =
                    serde_json::from_str(value).map_err(MalformedIndex::from)?;
                for (name, krate) in crates {
                    insert_unique(&mut raw, name, krate)?;
                }
            } else if let Some(rest) = statement.strip_prefix(ASSIGNMENT) {
                // the key is a JSON string and may itself contain `]`
                let mut keys = serde_json::Deserializer::from_str(rest).into_iter::<String>();
                let name = keys.next().and_then(Result::ok).ok_or_else(unexpected)?;
                let rest = rest[keys.byte_offset()..]
                    .trim_start()
                    .strip_prefix(']')
                    .ok_or_else(unexpected)?;
                let value = assigned_value(rest).ok_or_else(unexpected)?;
                let krate: RawCrate = serde_json::from_str(value).map_err(MalformedIndex::from)?;
                insert_unique(&mut raw, name, krate)?;
            } else if statement.starts_with(INIT_CALL) {
                continue;
            } else {
                return Err(unexpected().into());
            }
        }

        Self::from_raw(raw)
    }

    /// Validate raw rows into a typed index
    pub fn from_raw(raw: RawSearchIndex) -> Result<Self, IndexError> {
        let mut crates = std::collections::BTreeMap::new();
        for (name, krate) in raw {
            let index = build_crate(&name, krate)?;
            tracing::debug!(
                "Loaded crate '{}' ({} items, {} paths)",
                name,
                index.items.len(),
                index.paths.len()
            );
            crates.insert(name, index);
        }
        Ok(Self { crates })
    }

    /// Convert back to wire rows, re-compressing repeated item paths
    pub fn to_raw(&self) -> RawSearchIndex {
        self.crates
            .iter()
            .map(|(name, krate)| (name.clone(), crate_to_raw(krate)))
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.to_raw())
    }

    /// Write the index in the generator's JavaScript layout
    pub fn to_js(&self) -> serde_json::Result<String> {
        let mut out = format!("{DECLARATION} = {{}};\n");
        for (name, krate) in self.to_raw() {
            out.push_str(&format!(
                "{ASSIGNMENT}{}] = {};\n",
                serde_json::to_string(&name)?,
                serde_json::to_string(&krate)?
            ));
        }
        out.push_str(&format!("{INIT_CALL}searchIndex);\n"));
        Ok(out)
    }

    /// Combine two indices; crate names must not overlap
    pub fn merge(mut self, other: SearchIndex) -> Result<Self, IndexError> {
        for (name, krate) in other.crates {
            match self.crates.entry(name) {
                Entry::Occupied(occupied) => {
                    return Err(MalformedIndex::DuplicateCrate {
                        krate: occupied.key().clone(),
                    }
                    .into());
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(krate);
                }
            }
        }
        Ok(self)
    }
}

fn assigned_value(rest: &str) -> Option<&str> {
    rest.trim_start().strip_prefix('=').map(str::trim)
}

fn insert_unique(
    raw: &mut RawSearchIndex,
    name: String,
    krate: RawCrate,
) -> Result<(), MalformedIndex> {
    match raw.entry(name) {
        Entry::Occupied(occupied) => Err(MalformedIndex::DuplicateCrate {
            krate: occupied.key().clone(),
        }),
        Entry::Vacant(vacant) => {
            vacant.insert(krate);
            Ok(())
        }
    }
}

fn build_crate(name: &str, raw: RawCrate) -> Result<CrateIndex, MalformedIndex> {
    let paths = raw
        .paths
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(position, RawPath(code, path_name))| {
            let kind = ItemKind::try_from(code).map_err(|UnknownKindCode(code)| {
                MalformedIndex::UnknownPathKind {
                    krate: name.to_string(),
                    position,
                    code,
                }
            })?;
            Ok(PathEntry {
                kind,
                name: path_name,
            })
        })
        .collect::<Result<Vec<_>, MalformedIndex>>()?;

    let mut items = Vec::with_capacity(raw.items.len());
    // An empty path repeats the previous item's path
    let mut current_path = String::new();

    for (position, item) in raw.items.into_iter().enumerate() {
        let kind = ItemKind::try_from(item.kind).map_err(|UnknownKindCode(code)| {
            MalformedIndex::UnknownItemKind {
                krate: name.to_string(),
                position,
                code,
            }
        })?;

        if let Some(parent) = item.parent {
            if parent >= paths.len() {
                return Err(MalformedIndex::DanglingParent {
                    krate: name.to_string(),
                    position,
                    parent,
                    len: paths.len(),
                });
            }
        }

        if item.signature.is_some() && !kind.is_callable() {
            return Err(MalformedIndex::UnexpectedSignature {
                krate: name.to_string(),
                position,
                kind,
            });
        }

        if !item.path.is_empty() {
            current_path = item.path;
        }

        items.push(IndexEntry {
            kind,
            name: item.name,
            path: current_path.clone(),
            summary: item.summary.unwrap_or_default(),
            parent: item.parent.map(ParentRef),
            signature: item.signature.map(Signature::from),
        });
    }

    Ok(CrateIndex {
        doc: raw.doc,
        items,
        paths,
    })
}

fn crate_to_raw(krate: &CrateIndex) -> RawCrate {
    let mut previous = "";
    let items = krate
        .items
        .iter()
        .map(|entry| {
            let path = if entry.path == previous {
                String::new()
            } else {
                entry.path.clone()
            };
            previous = entry.path.as_str();
            RawItem {
                kind: u64::from(entry.kind.code()),
                name: entry.name.clone(),
                path,
                summary: Some(entry.summary.clone()),
                parent: entry.parent.map(ParentRef::position),
                signature: entry.signature.as_ref().map(RawSignature::from),
            }
        })
        .collect();

    let paths = krate
        .paths
        .iter()
        .map(|path| RawPath(u64::from(path.kind.code()), path.name.clone()))
        .collect::<Vec<_>>();

    RawCrate {
        doc: krate.doc.clone(),
        items,
        paths: (!paths.is_empty()).then_some(paths),
    }
}

impl From<RawSignature> for Signature {
    fn from(raw: RawSignature) -> Self {
        Self {
            inputs: raw.inputs.into_iter().map(|ty| ty.name).collect(),
            output: raw.output.map(|ty| ty.name),
        }
    }
}

impl From<&Signature> for RawSignature {
    fn from(signature: &Signature) -> Self {
        Self {
            inputs: signature
                .inputs
                .iter()
                .map(|name| RawType { name: name.clone() })
                .collect(),
            output: signature
                .output
                .as_ref()
                .map(|name| RawType { name: name.clone() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundled::BUNDLED_SEARCH_INDEX;

    fn malformed(result: Result<SearchIndex, IndexError>) -> MalformedIndex {
        match result {
            Err(IndexError::Malformed(inner)) => inner,
            other => panic!("expected malformed index, got {other:?}"),
        }
    }

    #[test]
    fn test_load_bundled_index() {
        let index = SearchIndex::load(BUNDLED_SEARCH_INDEX).unwrap();
        assert_eq!(index.crate_names().collect::<Vec<_>>(), vec!["lsio"]);

        let lsio = index.get("lsio").unwrap();
        assert_eq!(lsio.items.len(), 42);
        assert_eq!(lsio.paths.len(), 3);
        assert_eq!(lsio.paths[0].kind, ItemKind::Enum);
        assert_eq!(lsio.paths[0].name, "Error");
    }

    #[test]
    fn test_empty_paths_inherit_previous() {
        let index = SearchIndex::load(BUNDLED_SEARCH_INDEX).unwrap();
        let lsio = index.get("lsio").unwrap();

        let commands = &lsio.items[1];
        assert_eq!(commands.name, "commands");
        assert_eq!(commands.path, "lsio");

        let run_cli = lsio.items.iter().find(|e| e.name == "run_cli").unwrap();
        assert_eq!(run_cli.path, "lsio::commands");
        assert_eq!(run_cli.signature.as_ref().unwrap().to_string(), "(string) -> result");

        let variant = lsio.items.iter().find(|e| e.name == "FileNotFound").unwrap();
        assert_eq!(variant.path, "lsio::error");
        assert_eq!(variant.kind, ItemKind::Variant);
    }

    #[test]
    fn test_every_parent_resolves() {
        let index = SearchIndex::load(BUNDLED_SEARCH_INDEX).unwrap();
        for (_, krate) in index.crates() {
            for entry in &krate.items {
                if entry.parent.is_some() {
                    assert!(krate.parent_of(entry).is_some(), "{entry:?}");
                }
            }
        }
    }

    #[test]
    fn test_round_trip_js_and_json() {
        let index = SearchIndex::load(BUNDLED_SEARCH_INDEX).unwrap();

        let js = index.to_js().unwrap();
        assert!(js.starts_with("var searchIndex = {};\nsearchIndex[\"lsio\"] = "));
        assert!(js.ends_with("initSearch(searchIndex);\n"));
        assert_eq!(SearchIndex::from_js(&js).unwrap(), index);

        let json = index.to_json().unwrap();
        assert_eq!(SearchIndex::load(&json).unwrap(), index);
    }

    #[test]
    fn test_crate_name_with_bracket_round_trips() {
        let index = SearchIndex::load(r#"{"a]b":{"doc":"","items":[]}}"#).unwrap();
        let js = index.to_js().unwrap();
        assert!(js.contains("searchIndex[\"a]b\"] = "));
        assert_eq!(SearchIndex::from_js(&js).unwrap(), index);
    }

    #[test]
    fn test_assignment_key_must_be_string() {
        let source = "searchIndex[lsio] = {\"doc\":\"\",\"items\":[]};\n";
        assert!(matches!(
            malformed(SearchIndex::from_js(source)),
            MalformedIndex::UnexpectedStatement { line: 1, .. }
        ));
    }

    #[test]
    fn test_record_split_across_lines() {
        let source = concat!(
            "var searchIndex = {};\n",
            "searchIndex[\"a\"] = {\"doc\":\"\",\n",
            "\"items\":[]};\n",
        );
        assert!(matches!(
            malformed(SearchIndex::from_js(source)),
            MalformedIndex::Json(_)
        ));
        let source = "searchIndex[\"a\"]\n= {\"doc\":\"\",\"items\":[]};\n";
        assert!(matches!(
            malformed(SearchIndex::from_js(source)),
            MalformedIndex::UnexpectedStatement { line: 1, .. }
        ));
    }

    #[test]
    fn test_single_statement_declaration() {
        let source = r#"var searchIndex = {"demo":{"doc":"Demo crate","items":[[5,"run","demo","",null,null]]}};"#;
        let index = SearchIndex::from_js(source).unwrap();
        let demo = index.get("demo").unwrap();
        assert_eq!(demo.doc, "Demo crate");
        assert!(demo.paths.is_empty());
    }

    #[test]
    fn test_unknown_item_kind() {
        let source = r#"{"lsio":{"doc":"","items":[[999,"Error","lsio::error","",null,null]]}}"#;
        match malformed(SearchIndex::load(source)) {
            MalformedIndex::UnknownItemKind { krate, position, code } => {
                assert_eq!(krate, "lsio");
                assert_eq!(position, 0);
                assert_eq!(code, 999);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_path_kind() {
        let source = r#"{"lsio":{"doc":"","items":[],"paths":[[4,"Error"],[42,"Bogus"]]}}"#;
        assert!(matches!(
            malformed(SearchIndex::load(source)),
            MalformedIndex::UnknownPathKind { position: 1, code: 42, .. }
        ));
    }

    #[test]
    fn test_dangling_parent() {
        let source = r#"{"lsio":{"doc":"","items":[[13,"IO","lsio::error","",1,null]],"paths":[[4,"Error"]]}}"#;
        assert!(matches!(
            malformed(SearchIndex::load(source)),
            MalformedIndex::DanglingParent { parent: 1, len: 1, .. }
        ));
    }

    #[test]
    fn test_parent_without_paths_table() {
        let source = r#"{"lsio":{"doc":"","items":[[13,"IO","lsio::error","",0,null]]}}"#;
        assert!(matches!(
            malformed(SearchIndex::load(source)),
            MalformedIndex::DanglingParent { parent: 0, len: 0, .. }
        ));
    }

    #[test]
    fn test_signature_on_variant_rejected() {
        let source = r#"{"lsio":{"doc":"","items":[[13,"IO","lsio::error","",0,{"inputs":[]}]],"paths":[[4,"Error"]]}}"#;
        assert!(matches!(
            malformed(SearchIndex::load(source)),
            MalformedIndex::UnexpectedSignature { kind: ItemKind::Variant, .. }
        ));
    }

    #[test]
    fn test_missing_items_field() {
        let source = r#"{"lsio":{"doc":""}}"#;
        assert!(matches!(
            malformed(SearchIndex::load(source)),
            MalformedIndex::Json(_)
        ));
    }

    #[test]
    fn test_unrecognized_statement() {
        let source = "var searchIndex = {};\nconsole.log(searchIndex);\n";
        match malformed(SearchIndex::from_js(source)) {
            MalformedIndex::UnexpectedStatement { line, snippet } => {
                assert_eq!(line, 2);
                assert_eq!(snippet, "console.log(searchIndex)");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_crate_statements() {
        let source = concat!(
            "var searchIndex = {};\n",
            "searchIndex[\"a\"] = {\"doc\":\"\",\"items\":[]};\n",
            "searchIndex[\"a\"] = {\"doc\":\"\",\"items\":[]};\n",
        );
        assert!(matches!(
            malformed(SearchIndex::from_js(source)),
            MalformedIndex::DuplicateCrate { krate } if krate == "a"
        ));
    }

    #[test]
    fn test_merge_rejects_overlap() {
        let a = SearchIndex::load(r#"{"a":{"doc":"","items":[]}}"#).unwrap();
        let b = SearchIndex::load(r#"{"b":{"doc":"","items":[]}}"#).unwrap();
        let merged = a.clone().merge(b).unwrap();
        assert_eq!(merged.len(), 2);

        let err = merged.merge(a).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("'a'"));
    }

    #[test]
    fn test_empty_name_allowed() {
        let index = SearchIndex::load(r#"{"a":{"doc":"","items":[[2,"","a","",null,null]]}}"#).unwrap();
        assert_eq!(index.get("a").unwrap().items[0].name, "");
    }
}

//! Substring search over a loaded index.
//!
//! A term matches an entry when it occurs, ignoring case, in the entry's name
//! or in its resolved module path. Every match counts the same: results are
//! ordered by shorter name, then by name. Remaining ties keep crate order and
//! the order the generator wrote the items in. Each hit still records how the
//! term matched, for display.

use crate::index::{CrateIndex, IndexEntry, IndexError, ItemKind, PathEntry, SearchIndex};

/// A search request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    /// Crates to search; empty means every loaded crate
    pub crates: Vec<String>,
    pub kind: Option<ItemKind>,
    pub limit: Option<usize>,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Default::default()
        }
    }

    pub fn in_crate(mut self, name: impl Into<String>) -> Self {
        self.crates.push(name.into());
        self
    }

    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn needle(&self) -> String {
        self.term.trim().to_lowercase()
    }
}

/// How a term matched an entry; reported with each hit, not used for ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchRank {
    ExactName,
    NamePrefix,
    NameSubstring,
    PathOnly,
}

impl MatchRank {
    fn of(entry: &IndexEntry, needle: &str) -> Option<Self> {
        let name = entry.name.to_lowercase();
        if name == needle {
            Some(MatchRank::ExactName)
        } else if name.starts_with(needle) {
            Some(MatchRank::NamePrefix)
        } else if name.contains(needle) {
            Some(MatchRank::NameSubstring)
        } else if entry.path.to_lowercase().contains(needle) {
            Some(MatchRank::PathOnly)
        } else {
            None
        }
    }
}

/// One matching entry with the context needed to display it
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    pub crate_name: &'a str,
    pub entry: &'a IndexEntry,
    pub parent: Option<&'a PathEntry>,
    pub rank: MatchRank,
}

impl Hit<'_> {
    /// `Error::FileNotFound` for associated items, the bare name otherwise
    pub fn display_name(&self) -> String {
        match self.parent {
            Some(parent) => format!("{}::{}", parent.name, self.entry.name),
            None => self.entry.name.clone(),
        }
    }
}

/// Ordered search results; iterate as often as needed
#[derive(Debug, Clone, Default)]
pub struct Hits<'a> {
    hits: Vec<Hit<'a>>,
}

impl<'a> Hits<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, Hit<'a>> {
        self.hits.iter()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn first(&self) -> Option<&Hit<'a>> {
        self.hits.first()
    }
}

impl<'a> IntoIterator for Hits<'a> {
    type Item = Hit<'a>;
    type IntoIter = std::vec::IntoIter<Hit<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.into_iter()
    }
}

impl<'h, 'a> IntoIterator for &'h Hits<'a> {
    type Item = &'h Hit<'a>;
    type IntoIter = std::slice::Iter<'h, Hit<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.iter()
    }
}

impl SearchIndex {
    /// Crates selected by a query, in the order they will be scanned
    fn targets<'a>(
        &'a self,
        query: &SearchQuery,
    ) -> Result<Vec<(&'a str, &'a CrateIndex)>, IndexError> {
        if query.crates.is_empty() {
            return Ok(self.crates().collect());
        }
        query
            .crates
            .iter()
            .map(|name| {
                self.crates
                    .get_key_value(name.as_str())
                    .map(|(name, krate)| (name.as_str(), krate))
                    .ok_or_else(|| IndexError::CrateNotFound(name.clone()))
            })
            .collect()
    }

    /// Lazily scan for matching entries, unordered and unlimited.
    ///
    /// Fails only when the query names a crate that is not loaded. A blank
    /// term yields nothing.
    pub fn matches<'a>(
        &'a self,
        query: &SearchQuery,
    ) -> Result<impl Iterator<Item = Hit<'a>> + use<'a>, IndexError> {
        let mut targets = self.targets(query)?;
        let needle = query.needle();
        if needle.is_empty() {
            targets.clear();
        }
        let kind = query.kind;

        Ok(targets.into_iter().flat_map(move |(crate_name, krate)| {
            let needle = needle.clone();
            krate.items.iter().filter_map(move |entry| {
                if kind.is_some_and(|kind| kind != entry.kind) {
                    return None;
                }
                let rank = MatchRank::of(entry, &needle)?;
                Some(Hit {
                    crate_name,
                    entry,
                    parent: krate.parent_of(entry),
                    rank,
                })
            })
        }))
    }

    /// Ordered search honoring the query's limit
    pub fn search<'a>(&'a self, query: &SearchQuery) -> Result<Hits<'a>, IndexError> {
        let mut hits: Vec<Hit<'a>> = self.matches(query)?.collect();

        // Stable sort keeps crate and item order for full ties
        hits.sort_by(|a, b| {
            a.entry
                .name
                .len()
                .cmp(&b.entry.name.len())
                .then_with(|| a.entry.name.cmp(&b.entry.name))
        });

        if let Some(limit) = query.limit {
            hits.truncate(limit);
        }

        tracing::debug!("Search for '{}' returned {} hits", query.term, hits.len());
        Ok(Hits { hits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundled::bundled_index;

    fn lsio() -> SearchIndex {
        bundled_index().unwrap()
    }

    #[test]
    fn test_single_entry_fixture() {
        let index = SearchIndex::load(
            r#"{"lsio":{"doc":"","items":[[4,"Error","lsio::error","Core error types",null,null]]}}"#,
        )
        .unwrap();

        let hits = index.search(&SearchQuery::new("Error").in_crate("lsio")).unwrap();
        assert_eq!(hits.len(), 1);

        let hit = hits.first().unwrap();
        assert_eq!(hit.crate_name, "lsio");
        assert_eq!(hit.entry.kind, ItemKind::Enum);
        assert_eq!(hit.entry.name, "Error");
        assert_eq!(hit.entry.path, "lsio::error");
        assert_eq!(hit.rank, MatchRank::ExactName);
    }

    #[test]
    fn test_variant_resolves_parent() {
        let index = lsio();
        let hits = index.search(&SearchQuery::new("FileNotFound")).unwrap();

        assert_eq!(hits.len(), 1);
        let hit = hits.first().unwrap();
        assert_eq!(hit.entry.kind, ItemKind::Variant);
        assert_eq!(hit.entry.path, "lsio::error");
        assert_eq!(hit.parent.unwrap().name, "Error");
        assert_eq!(hit.display_name(), "Error::FileNotFound");
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let index = lsio();
        let hits = index
            .search(&SearchQuery::new("nonexistent_symbol_xyz").in_crate("lsio"))
            .unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_blank_term_is_empty() {
        let index = lsio();
        assert!(index.search(&SearchQuery::new("")).unwrap().is_empty());
        assert!(index.search(&SearchQuery::new("   ")).unwrap().is_empty());
        assert_eq!(index.matches(&SearchQuery::new("")).unwrap().count(), 0);
    }

    #[test]
    fn test_unknown_crate() {
        let index = lsio();
        let err = index
            .search(&SearchQuery::new("Error").in_crate("serde"))
            .unwrap_err();
        assert!(matches!(err, IndexError::CrateNotFound(ref name) if name == "serde"));
    }

    #[test]
    fn test_hits_contain_term() {
        let index = lsio();
        for term in ["err", "Config", "FROM", "lsio", "run", "e", "::"] {
            let needle = term.to_lowercase();
            let hits = index.search(&SearchQuery::new(term)).unwrap();
            assert!(!hits.is_empty(), "no hits for {term}");
            for hit in &hits {
                assert!(
                    hit.entry.name.to_lowercase().contains(&needle)
                        || hit.entry.path.to_lowercase().contains(&needle),
                    "{term} matched {:?}",
                    hit.entry
                );
            }
        }
    }

    #[test]
    fn test_shorter_name_wins_over_name_match() {
        let index = SearchIndex::load(
            r#"{"lsio":{"doc":"","items":[[4,"Error","lsio::error","",null,null],[13,"IO","","",0,null]],"paths":[[4,"Error"]]}}"#,
        )
        .unwrap();

        let hits = index.search(&SearchQuery::new("error")).unwrap();
        let names: Vec<_> = hits.iter().map(|hit| hit.entry.name.as_str()).collect();
        assert_eq!(names, vec!["IO", "Error"]);
        assert_eq!(hits.first().unwrap().rank, MatchRank::PathOnly);
    }

    #[test]
    fn test_ordering_by_length_then_name() {
        let index = lsio();
        let hits = index.search(&SearchQuery::new("Error")).unwrap();
        assert_eq!(hits.len(), 22);

        let order: Vec<(ItemKind, &str)> = hits
            .iter()
            .map(|hit| (hit.entry.kind, hit.entry.name.as_str()))
            .collect();
        assert_eq!(
            order[..10].to_vec(),
            vec![
                (ItemKind::Variant, "IO"),
                (ItemKind::Method, "fmt"),
                (ItemKind::Method, "fmt"),
                (ItemKind::Method, "from"),
                (ItemKind::Method, "from"),
                (ItemKind::Method, "from"),
                (ItemKind::Method, "from"),
                (ItemKind::Enum, "Error"),
                (ItemKind::AssociatedType, "Error"),
                (ItemKind::Module, "error"),
            ]
        );

        for pair in order.windows(2) {
            let (a, b) = (pair[0].1, pair[1].1);
            assert!((a.len(), a) <= (b.len(), b), "{a} sorted before {b}");
        }
    }

    #[test]
    fn test_kind_filter_and_limit() {
        let index = lsio();

        let methods = index
            .search(&SearchQuery::new("from").with_kind(ItemKind::Method))
            .unwrap();
        assert_eq!(methods.len(), 5);
        assert!(methods.iter().all(|hit| hit.entry.kind == ItemKind::Method));
        assert_eq!(methods.first().unwrap().display_name(), "Error::from");

        let limited = index.search(&SearchQuery::new("e").with_limit(3)).unwrap();
        assert_eq!(limited.len(), 3);
    }

    #[test]
    fn test_results_are_restartable() {
        let index = lsio();
        let hits = index.search(&SearchQuery::new("color")).unwrap();
        let first: Vec<_> = hits.iter().map(|hit| hit.entry.name.clone()).collect();
        let second: Vec<_> = hits.iter().map(|hit| hit.entry.name.clone()).collect();
        assert_eq!(first, second);
        assert_eq!(
            index.matches(&SearchQuery::new("color")).unwrap().count(),
            hits.len()
        );
    }

    #[test]
    fn test_crate_filter_across_crates() {
        let other = SearchIndex::load(
            r#"{"prompt":{"doc":"","items":[[5,"confirm","prompt","Ask yes or no",null,null]]}}"#,
        )
        .unwrap();
        let index = lsio().merge(other).unwrap();

        let all = index.search(&SearchQuery::new("confirm")).unwrap();
        assert_eq!(all.len(), 2);
        // equal length and name: crate order decides
        assert_eq!(all.first().unwrap().crate_name, "lsio");

        let only = index
            .search(&SearchQuery::new("confirm").in_crate("prompt"))
            .unwrap();
        assert_eq!(only.len(), 1);
        assert_eq!(only.first().unwrap().crate_name, "prompt");
    }
}

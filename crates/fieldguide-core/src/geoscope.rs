//! Geographic-scope ranking.
//!
//! Topic metadata carries a free-form scope identifier ("country", "poi", …)
//! that orders catalogue content from most to least locally specific. The
//! level set is server-defined, so the rank table is configuration a caller
//! can replace, not a hardcoded enum.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Canonical level set, broad → specific. Rank is the index.
const DEFAULT_LEVELS: &[&str] = &["continent", "country", "region", "city", "district", "poi"];

static DEFAULT_RANKS: Lazy<HashMap<String, u32>> = Lazy::new(|| {
    DEFAULT_LEVELS
        .iter()
        .enumerate()
        .map(|(rank, level)| (level.to_string(), rank as u32))
        .collect()
});

/// Lookup table from scope identifier to specificity rank.
/// Higher rank = more locally specific. Unknown identifiers have no rank.
#[derive(Debug, Clone)]
pub struct GeoScopeTable {
    ranks: HashMap<String, u32>,
}

impl GeoScopeTable {
    /// Build a table from explicit (identifier, rank) pairs.
    pub fn new(levels: impl IntoIterator<Item = (String, u32)>) -> Self {
        Self {
            ranks: levels
                .into_iter()
                .map(|(id, rank)| (id.trim().to_lowercase(), rank))
                .collect(),
        }
    }

    /// Rank for an identifier, tolerant of case and surrounding whitespace.
    pub fn rank(&self, identifier: &str) -> Option<u32> {
        self.ranks.get(&identifier.trim().to_lowercase()).copied()
    }
}

impl Default for GeoScopeTable {
    fn default() -> Self {
        Self {
            ranks: DEFAULT_RANKS.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poi_outranks_country() {
        let table = GeoScopeTable::default();
        assert!(table.rank("poi").unwrap() > table.rank("country").unwrap());
    }

    #[test]
    fn test_lookup_is_lenient() {
        let table = GeoScopeTable::default();
        assert_eq!(table.rank(" City "), table.rank("city"));
        assert_eq!(table.rank("POI"), table.rank("poi"));
    }

    #[test]
    fn test_unknown_has_no_rank() {
        let table = GeoScopeTable::default();
        assert_eq!(table.rank("galaxy"), None);
        assert_eq!(table.rank(""), None);
    }

    #[test]
    fn test_custom_table_overrides_default() {
        let table = GeoScopeTable::new([
            ("valley".to_string(), 0),
            ("trailhead".to_string(), 1),
        ]);
        assert!(table.rank("trailhead").unwrap() > table.rank("valley").unwrap());
        assert_eq!(table.rank("country"), None);
    }
}

//! Content tree resolution: catalogue document → ordered content blocks.
//!
//! The server sends one of two document shapes with no schema. A "flat"
//! document carries `markdown`/`cards` at the top level and resolves to a
//! single block. A "topic-keyed" document nests one object per topic, each
//! optionally carrying a `_metadata` object with presentation hints and a
//! geographic scope used for ordering. Malformed structure never errors —
//! it degrades to fewer blocks.

use std::cmp::Reverse;

use tracing::debug;

use crate::types::{ContentBlock, ContentMetadata};
use fieldguide_core::{GeoScopeTable, JsonValue};

/// Resolves catalogue documents against a geo-scope rank table.
pub struct Resolver {
    scopes: GeoScopeTable,
}

impl Resolver {
    pub fn new(scopes: GeoScopeTable) -> Self {
        Self { scopes }
    }

    /// Resolve a document into renderable blocks, most locally specific
    /// first. Blocks with no resolvable scope sort after all ranked blocks.
    pub fn resolve(&self, document: &JsonValue) -> Vec<ContentBlock> {
        let entries = match document.as_object() {
            Some(e) => e,
            None => {
                debug!("document root is not an object, no blocks resolved");
                return Vec::new();
            }
        };

        if is_flat(document) {
            return vec![ContentBlock {
                id: "root".to_string(),
                header: document.get("header").cloned(),
                markdown: markdown_field(document),
                cards: cards_field(document),
                interface: None,
            }];
        }

        // Key-ordered intermediate so the rank sort below is deterministic.
        let mut topics: Vec<(&String, &JsonValue)> = entries
            .iter()
            .filter(|(key, value)| !key.starts_with('_') && value.as_object().is_some())
            .collect();
        topics.sort_by(|a, b| a.0.cmp(b.0));

        let mut ranked: Vec<(i64, ContentBlock)> = Vec::new();
        for (key, topic) in topics {
            let meta = ContentMetadata::from_topic(topic);

            let header = topic.get("header").cloned();
            let markdown = markdown_field(topic);
            let cards = cards_field(topic);
            if header.is_none() && markdown.is_none() && cards.is_none() {
                debug!("Topic {} has no header, markdown, or cards; skipped", key);
                continue;
            }

            let rank = meta
                .geo_scope
                .as_deref()
                .and_then(|scope| self.scopes.rank(scope))
                .map_or(-1, i64::from);

            ranked.push((
                rank,
                ContentBlock {
                    id: key.clone(),
                    header,
                    markdown,
                    cards,
                    interface: meta.interface,
                },
            ));
        }

        ranked.sort_by_key(|(rank, _)| Reverse(*rank));
        debug!("Resolved {} blocks", ranked.len());
        ranked.into_iter().map(|(_, block)| block).collect()
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(GeoScopeTable::default())
    }
}

/// Resolve with the canonical geo-scope table.
pub fn resolve(document: &JsonValue) -> Vec<ContentBlock> {
    Resolver::default().resolve(document)
}

/// A document is flat when it carries content at the top level: a `markdown`
/// string or a non-empty `cards` array.
fn is_flat(document: &JsonValue) -> bool {
    if document.get("markdown").and_then(JsonValue::as_str).is_some() {
        return true;
    }
    document
        .get("cards")
        .and_then(JsonValue::as_array)
        .is_some_and(|cards| !cards.is_empty())
}

fn markdown_field(source: &JsonValue) -> Option<String> {
    source
        .get("markdown")
        .and_then(JsonValue::as_str)
        .map(str::to_string)
}

fn cards_field(source: &JsonValue) -> Option<Vec<JsonValue>> {
    source
        .get("cards")
        .and_then(JsonValue::as_array)
        .filter(|cards| !cards.is_empty())
        .map(<[JsonValue]>::to_vec)
}

//! Resolver types.

use fieldguide_core::JsonValue;
use serde::Serialize;

/// A resolved, orderable unit of catalogue content.
///
/// Value object, rebuilt from scratch on every resolution pass; carries no
/// identity beyond `id`. `header` and `interface` are opaque pass-through
/// for the rendering layer. `markdown` is pre-rewrite text — semantic link
/// rewriting happens at render time so a block can be re-rendered with
/// updated link behavior without re-resolving.
#[derive(Debug, Clone, Serialize)]
pub struct ContentBlock {
    /// Topic key, or `"root"` for flat documents.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    /// Non-empty when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<JsonValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<JsonValue>,
}

/// Per-topic presentation metadata, read from the reserved `_metadata` key.
/// Consumed during resolution; never appears in the resolved block's content.
#[derive(Debug, Clone, Default)]
pub struct ContentMetadata {
    /// Opaque presentation hints, passed through to the block untouched.
    pub interface: Option<JsonValue>,
    /// Geographic-scope identifier used as the ordering key.
    pub geo_scope: Option<String>,
}

impl ContentMetadata {
    /// Extract metadata from a topic object. Collaborator schemas disagree
    /// on where the scope string lives; both `geo_scope` and
    /// `location.geoscope` are accepted.
    pub fn from_topic(topic: &JsonValue) -> Self {
        let meta = match topic.get("_metadata") {
            Some(m) => m,
            None => return Self::default(),
        };

        let geo_scope = meta
            .get("geo_scope")
            .and_then(JsonValue::as_str)
            .or_else(|| {
                meta.get("location")
                    .and_then(|l| l.get("geoscope"))
                    .and_then(JsonValue::as_str)
            })
            .map(str::to_string);

        Self {
            interface: meta.get("interface").cloned(),
            geo_scope,
        }
    }
}

/// Card renderer selection, read from `interface.card.render_type` by the
/// rendering collaborator. Unrecognized values degrade to the generic grid
/// via `Other` rather than erroring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderType {
    /// Generic card grid (the default).
    Grid,
    Carousel,
    List,
    MapPreview,
    /// Server sent a render type this client does not know.
    Other(String),
}

impl RenderType {
    /// Read the render type from a block's interface config.
    pub fn from_interface(interface: &JsonValue) -> RenderType {
        match interface
            .get("card")
            .and_then(|c| c.get("render_type"))
            .and_then(JsonValue::as_str)
        {
            None => RenderType::Grid,
            Some("grid") => RenderType::Grid,
            Some("carousel") => RenderType::Carousel,
            Some("list") => RenderType::List,
            Some("map_preview") => RenderType::MapPreview,
            Some(other) => RenderType::Other(other.to_string()),
        }
    }
}

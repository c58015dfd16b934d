//! Semantic reference parsing.
//!
//! Catalogue prose links to domain entities with `scheme://encoded-term`
//! references. The scheme set is closed; anything else is a normal URL and
//! none of this crate's business.

use serde::Serialize;

/// Domain entity categories a semantic reference can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticScheme {
    Landscape,
    Cuisine,
    Dish,
    Place,
}

impl SemanticScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticScheme::Landscape => "landscape",
            SemanticScheme::Cuisine => "cuisine",
            SemanticScheme::Dish => "dish",
            SemanticScheme::Place => "place",
        }
    }

    /// Parse a scheme name, case-insensitively.
    pub fn parse(scheme: &str) -> Option<SemanticScheme> {
        match scheme.to_ascii_lowercase().as_str() {
            "landscape" => Some(SemanticScheme::Landscape),
            "cuisine" => Some(SemanticScheme::Cuisine),
            "dish" => Some(SemanticScheme::Dish),
            "place" => Some(SemanticScheme::Place),
            _ => None,
        }
    }
}

/// A parsed semantic reference: category plus percent-decoded term.
///
/// Transient — produced when the UI intercepts a tap on a rewritten link
/// destination and needs the typed domain reference back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemanticLink {
    pub scheme: SemanticScheme,
    pub term: String,
}

impl SemanticLink {
    /// Parse a link destination of the form `scheme://encoded-term`.
    /// Unrecognized schemes and empty terms parse to `None`.
    pub fn parse(url: &str) -> Option<SemanticLink> {
        let (scheme, encoded) = url.split_once("://")?;
        let scheme = SemanticScheme::parse(scheme)?;
        if encoded.is_empty() {
            return None;
        }
        Some(SemanticLink {
            scheme,
            term: decode_term(encoded),
        })
    }
}

/// Percent-decode a reference term, falling back to the raw text when the
/// encoding is invalid.
pub(crate) fn decode_term(encoded: &str) -> String {
    match urlencoding::decode(encoded) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => encoded.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_destination() {
        let link = SemanticLink::parse("place://Afonso%20I").unwrap();
        assert_eq!(link.scheme, SemanticScheme::Place);
        assert_eq!(link.term, "Afonso I");
    }

    #[test]
    fn test_parse_is_case_insensitive_on_scheme() {
        let link = SemanticLink::parse("Dish://bacalhau").unwrap();
        assert_eq!(link.scheme, SemanticScheme::Dish);
        assert_eq!(link.term, "bacalhau");
    }

    #[test]
    fn test_unknown_scheme_is_not_semantic() {
        assert!(SemanticLink::parse("weather://Lisbon").is_none());
        assert!(SemanticLink::parse("https://example.com").is_none());
        assert!(SemanticLink::parse("no scheme here").is_none());
    }

    #[test]
    fn test_empty_term_is_rejected() {
        assert!(SemanticLink::parse("place://").is_none());
    }

    #[test]
    fn test_invalid_escape_falls_back_to_raw() {
        let link = SemanticLink::parse("place://Lisb%ff").unwrap();
        assert_eq!(link.term, "Lisb%ff");
    }

    #[test]
    fn test_scheme_round_trip() {
        for scheme in [
            SemanticScheme::Landscape,
            SemanticScheme::Cuisine,
            SemanticScheme::Dish,
            SemanticScheme::Place,
        ] {
            assert_eq!(SemanticScheme::parse(scheme.as_str()), Some(scheme));
        }
    }
}

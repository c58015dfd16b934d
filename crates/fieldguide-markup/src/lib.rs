//! Semantic markup — domain reference parsing and markdown link rewriting.
//!
//! Pure string transformations: no I/O, no shared state, safe to run once
//! per visible block. The rewriter prefers leaving text close to its
//! original form over guessing destructively.

pub mod link;
pub mod rewrite;

pub use link::{SemanticLink, SemanticScheme};
pub use rewrite::rewrite;

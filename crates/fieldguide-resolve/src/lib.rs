//! Content tree resolution — catalogue document → ordered content blocks.
//!
//! The resolver tolerates both server document shapes (flat and
//! topic-keyed), strips private metadata keys, and orders the resulting
//! blocks by geographic specificity.

pub mod resolver;
pub mod types;

pub use resolver::{resolve, Resolver};
pub use types::*;

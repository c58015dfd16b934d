//! Fieldguide Core — JSON value algebra, geo-scope ranking, error types.

pub mod error;
pub mod geoscope;
pub mod value;

pub use error::{Error, Result};
pub use geoscope::GeoScopeTable;
pub use value::JsonValue;

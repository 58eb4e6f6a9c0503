//! Dataset construction for aidsift.
//!
//! Merges raw message records with raw category records, expands the packed
//! category encoding into one boolean field per category, and removes
//! duplicate rows. Also owns the read/write contract for the raw CSV inputs
//! and the clean-dataset store.

pub mod builder;
pub mod encoding;
pub mod io;
pub mod record;

// Re-export commonly used types
pub use builder::*;
pub use encoding::*;
pub use io::*;
pub use record::*;

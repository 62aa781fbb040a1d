//! Catalog boundary - section records and social toggles
//!
//! The catalog itself lives in an external store; this module models the
//! record shape it hands out and the membership-toggle semantics behind
//! likes and bookmarks.

pub mod model;
pub mod store;

pub use model::{Identity, SectionRecord, ToggleOutcome};
pub use store::Catalog;

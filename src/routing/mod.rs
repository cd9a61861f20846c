//! Request routing
//!
//! Exact-path route tables and the static asset resolver consulted when no
//! GET route matches.

pub mod router;
pub mod static_files;

pub use router::{Handler, Router};
pub use static_files::{AssetStore, StaticAsset, StaticFiles};

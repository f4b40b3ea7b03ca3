//! Port traits defining external boundaries.
//!
//! The scanners only see the repositories through these traits.
//! Implementations live in `src/adapters/`.

pub mod filesystem;

pub use filesystem::{DirListing, FileSystem};

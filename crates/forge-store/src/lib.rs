//! Manifest persistence for Asset Forge
//!
//! One project, one JSON manifest. This crate owns the on-disk format
//! (camelCase fields, `$schema` marker, pretty-printed for review in
//! version control) and the durability discipline: every save is
//! write-temp-then-rename under an advisory lock, and a malformed manifest
//! loads as "no project" instead of failing, so callers can offer
//! re-initialization.

pub mod error;
pub mod store;

pub use error::{Error, Result};
pub use store::{ManifestStore, SCHEMA_URL};

//! Hierarchical region index
//!
//! This module joins population records to their administrative hierarchy
//! (SA2 within SA3 within state) and exposes read-only lookup structures
//! for the aggregate queries. The index is built once per analysis run and
//! never mutated afterwards, so queries may run in any order or in
//! parallel without coordination.

pub mod builder;
pub mod core;

pub use builder::{IngestReport, RegionIndexBuilder};
pub use core::RegionIndex;

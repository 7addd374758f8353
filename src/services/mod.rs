//! Derived views over the loaded resource snapshots.
//!
//! Every function in these modules is a pure function of immutable
//! resource data; callers fetch the snapshots and pass references in.
//! The one stateful piece is the per-pair detail cache in [`detail`].

pub mod assays;
pub mod breakdown;
pub mod detail;
pub mod map;
pub mod metadata;
pub mod stats;
pub mod summary;

//! `dp-core` — foundational types for the delivery planner.
//!
//! This crate is a dependency of every other `dp-*` crate.  It intentionally
//! has no `dp-*` dependencies and minimal external ones (`rustc-hash`,
//! `thiserror`, and the `log` facade).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`geo`]         | `Coordinate`, haversine distance, bearings            |
//! | [`segment`]     | `Segment` (directed, named street edge), turn angles  |
//! | [`store`]       | `AssociativeStore<K, V>`, `StoreKey`, `StoreConfig`   |
//! | [`error`]       | `CoreError`, `CoreResult`                             |

pub mod error;
pub mod geo;
pub mod segment;
pub mod store;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Coordinate, bearing_deg, distance_miles};
pub use segment::{Segment, turn_angle_deg};
pub use store::{AssociativeStore, StoreConfig, StoreKey};

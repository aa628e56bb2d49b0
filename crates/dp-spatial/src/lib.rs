//! `dp-spatial` — road graph, map loading, spatial snapping, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`network`] | `RoadGraph` (keyed adjacency + R-tree), `RoadGraphBuilder`        |
//! | [`loader`]  | `load_map`, `load_map_reader` (text street records)               |
//! | [`router`]  | `Router` trait, `Route`, `AStarRouter`, `Relaxation`              |
//! | [`error`]   | `SpatialError`, `RouteError`, result aliases                      |

pub mod error;
pub mod loader;
pub mod network;
pub mod router;


pub use error::{RouteError, RouteResult, SpatialError, SpatialResult};
pub use loader::{load_map, load_map_reader, load_map_with_config};
pub use network::{RoadGraph, RoadGraphBuilder};
pub use router::{AStarRouter, Relaxation, Route, Router};

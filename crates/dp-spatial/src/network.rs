//! Road graph representation and builder.
//!
//! # Data layout
//!
//! Adjacency lives in an [`AssociativeStore`] keyed by [`Coordinate`]:
//!
//! ```text
//! adjacency[c] = [ Segment(c → x, name), Segment(c → y, name), ... ]
//! ```
//!
//! Each value lists the directed segments leaving `c` in insertion order.
//! Streets are always added in both directions, so every node that appears
//! anywhere in the graph has at least one outgoing segment.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest known node.  Used
//! to snap delivery addresses that were not digitised exactly on a street
//! vertex.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use dp_core::{AssociativeStore, Coordinate, CoreResult, Segment, StoreConfig};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lat, lon]` point with
/// the node it belongs to.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    coord: Coordinate,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Sufficient for
    /// nearest-node queries within a city.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Directed street graph keyed by exact coordinate text.
///
/// Read-only once built; share it by reference across any number of
/// sequential routing queries.  Use [`RoadGraphBuilder`] (or the text
/// [`loader`](crate::loader)) to construct one.
pub struct RoadGraph {
    adjacency:     AssociativeStore<Coordinate, Vec<Segment>>,
    segment_count: usize,
    spatial_idx:   RTree<NodeEntry>,
}

impl RoadGraph {
    /// A graph with no nodes.  Every non-trivial query against it fails with
    /// `BAD_COORD`.
    pub fn empty() -> Self {
        RoadGraphBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.adjacency.size()
    }

    /// Number of directed segments (twice the number of street segments).
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Segments leaving `coord`, or `None` if `coord` was never inserted.
    ///
    /// `None` ("unknown node") is distinct from `Some(&[])`, although the
    /// builder never produces a known node with no segments.
    #[inline]
    pub fn neighbors(&self, coord: &Coordinate) -> Option<&[Segment]> {
        self.adjacency.find(coord).map(Vec::as_slice)
    }

    #[inline]
    pub fn contains(&self, coord: &Coordinate) -> bool {
        self.adjacency.contains_key(coord)
    }

    /// All known nodes, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &Coordinate> {
        self.adjacency.keys()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The known node nearest to `(lat, lon)`.
    ///
    /// Returns `None` only if the graph has no nodes.
    pub fn snap(&self, lat: f64, lon: f64) -> Option<&Coordinate> {
        self.spatial_idx
            .nearest_neighbor(&[lat, lon])
            .map(|e| &e.coord)
    }

    /// Up to `k` nearest nodes to `(lat, lon)`, sorted by ascending distance.
    pub fn k_nearest_nodes(&self, lat: f64, lon: f64, k: usize) -> Vec<&Coordinate> {
        self.spatial_idx
            .nearest_neighbor_iter(&[lat, lon])
            .take(k)
            .map(|e| &e.coord)
            .collect()
    }
}

// ── RoadGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`RoadGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use dp_core::Coordinate;
/// use dp_spatial::RoadGraphBuilder;
///
/// let mut b = RoadGraphBuilder::new();
/// let a = Coordinate::parse("34.0625329 -118.4470263").unwrap();
/// let c = Coordinate::parse("34.0624753 -118.4471186").unwrap();
/// b.add_street_segment(a.clone(), c, "Broxton Avenue");
/// let graph = b.build();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.segment_count(), 2); // both directions
/// assert_eq!(graph.neighbors(&a).unwrap()[0].name.as_ref(), "Broxton Avenue");
/// ```
pub struct RoadGraphBuilder {
    adjacency:     AssociativeStore<Coordinate, Vec<Segment>>,
    segment_count: usize,
}

impl RoadGraphBuilder {
    pub fn new() -> Self {
        Self { adjacency: AssociativeStore::new(), segment_count: 0 }
    }

    /// Builder whose adjacency store uses a custom load factor.
    pub fn with_store_config(config: StoreConfig) -> CoreResult<Self> {
        Ok(Self {
            adjacency:     AssociativeStore::with_config(config)?,
            segment_count: 0,
        })
    }

    /// Add a street segment in **both** directions.
    pub fn add_street_segment(&mut self, start: Coordinate, end: Coordinate, name: &str) {
        let forward = Segment::new(start, end, name);
        let reverse = forward.reversed();
        self.add_directed_segment(forward);
        self.add_directed_segment(reverse);
    }

    /// Add a single **directed** segment.
    ///
    /// Only the loader's two-way insertion guarantees the reverse-edge
    /// invariant; callers using this directly take responsibility for it.
    pub fn add_directed_segment(&mut self, segment: Segment) {
        self.adjacency
            .get_or_insert_with(segment.start.clone(), Vec::new)
            .push(segment);
        self.segment_count += 1;
    }

    pub fn node_count(&self) -> usize { self.adjacency.size() }
    pub fn segment_count(&self) -> usize { self.segment_count }

    /// Consume the builder and produce a [`RoadGraph`].
    ///
    /// Time complexity: O(N log N) for the R-tree bulk load, N = nodes.
    pub fn build(self) -> RoadGraph {
        let entries: Vec<NodeEntry> = self
            .adjacency
            .keys()
            .map(|c| NodeEntry { point: [c.lat(), c.lon()], coord: c.clone() })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadGraph {
            adjacency:     self.adjacency,
            segment_count: self.segment_count,
            spatial_idx,
        }
    }
}

impl Default for RoadGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

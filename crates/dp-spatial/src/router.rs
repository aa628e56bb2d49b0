//! Routing trait and the A* point-to-point router.
//!
//! # Pluggability
//!
//! `dp-plan` calls routing via the [`Router`] trait, so applications can swap
//! in other search strategies without touching the planner.  The default
//! [`AStarRouter`] uses straight-line distance to the goal as its heuristic.
//!
//! # Cost units
//!
//! All costs are great-circle **miles** (`f64`).  A route's total is the sum
//! of its segments' lengths, so it always agrees with the geometry used to
//! compute it.
//!
//! # Per-query state
//!
//! The open heap, closed set, best-g table and parent table are created at
//! the start of each [`route`](Router::route) call and dropped when it
//! returns.  The graph itself is only ever read.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use dp_core::{AssociativeStore, Coordinate, Segment, distance_miles};

use crate::network::RoadGraph;
use crate::{RouteError, RouteResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a successful routing query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    /// Segments to traverse in order.  `segments[i].end == segments[i + 1].start`.
    pub segments: Vec<Segment>,
    /// Sum of the segments' great-circle lengths, in miles.
    pub total_miles: f64,
}

impl Route {
    /// The empty route returned when start and goal coincide.
    pub fn trivial() -> Self {
        Self::default()
    }

    /// `true` if the start and goal are the same node.
    pub fn is_trivial(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable point-to-point routing engine.
///
/// Implementations must be `Send + Sync`; the graph is shared read-only.
pub trait Router: Send + Sync {
    /// Compute a route from `start` to `goal`.
    ///
    /// `start == goal` is always `Ok` with an empty route, even for
    /// coordinates that are not in the graph.
    fn route(&self, graph: &RoadGraph, start: &Coordinate, goal: &Coordinate) -> RouteResult<Route>;
}

// ── AStarRouter ───────────────────────────────────────────────────────────────

/// When a rediscovered node's parent link is rewritten.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Relaxation {
    /// Canonical A*: update a node's parent, cost, and open entry only when
    /// the new path to it is strictly shorter.  Routes are optimal.
    #[default]
    BestG,
    /// Overwrite the parent link every time a node is rediscovered from a
    /// newly expanded neighbour, even along a longer path.  A new open
    /// entry is still pushed only for strictly shorter paths.  Reproduces
    /// the routes of older planners; can return a longer-than-optimal path
    /// when several near-equal routes exist.
    LastWins,
}

/// A* search over a [`RoadGraph`] using great-circle distance as heuristic.
///
/// The heuristic never overestimates road distance, so with
/// [`Relaxation::BestG`] the returned route has minimum total length.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStarRouter {
    pub relaxation: Relaxation,
}

impl AStarRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_relaxation(relaxation: Relaxation) -> Self {
        Self { relaxation }
    }
}

impl Router for AStarRouter {
    fn route(&self, graph: &RoadGraph, start: &Coordinate, goal: &Coordinate) -> RouteResult<Route> {
        astar(graph, start, goal, self.relaxation)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// Open-heap entry.  Ordered by `f`, then by discovery sequence so that among
/// equal-`f` nodes the one found first is expanded first.  Two entries never
/// compare equal unless they are the same push.
struct OpenEntry {
    f:     f64,
    seq:   u64,
    g:     f64,
    coord: Coordinate,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap (a max-heap) pops the smallest (f, seq).
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

fn astar(
    graph: &RoadGraph,
    start: &Coordinate,
    goal: &Coordinate,
    relaxation: Relaxation,
) -> RouteResult<Route> {
    if start == goal {
        return Ok(Route::trivial());
    }
    if !graph.contains(start) {
        return Err(bad_coord(start, "start is not in the road graph"));
    }
    if !graph.contains(goal) {
        return Err(bad_coord(goal, "goal is not in the road graph"));
    }

    let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
    let mut closed: AssociativeStore<Coordinate, ()> = AssociativeStore::new();
    // best_g[c] = lowest g of any entry pushed for c (the open-set membership map).
    let mut best_g: AssociativeStore<Coordinate, f64> = AssociativeStore::new();
    // parent[c] = node c was reached from.
    let mut parent: AssociativeStore<Coordinate, Coordinate> = AssociativeStore::new();

    let mut seq = 0u64;
    let mut expanded = 0usize;

    best_g.associate(start.clone(), 0.0);
    open.push(OpenEntry {
        f:     distance_miles(start, goal),
        seq,
        g:     0.0,
        coord: start.clone(),
    });

    while let Some(current) = open.pop() {
        // Skip superseded duplicates of already-expanded nodes.
        if closed.contains_key(&current.coord) {
            continue;
        }
        closed.associate(current.coord.clone(), ());
        expanded += 1;

        if current.coord == *goal {
            let route = reconstruct(graph, &parent, start, goal)?;
            debug!(
                "A* {start} -> {goal}: expanded {expanded} nodes, {} segments, {:.4} mi",
                route.segment_count(),
                route.total_miles
            );
            return Ok(route);
        }

        let Some(segments) = graph.neighbors(&current.coord) else {
            return Err(bad_coord(&current.coord, "expanded node is not in the road graph"));
        };

        for segment in segments {
            let next = &segment.end;
            if closed.contains_key(next) {
                continue;
            }

            let g = current.g + segment.length_miles();
            let improves = best_g.find(next).is_none_or(|&known| g < known);

            match relaxation {
                Relaxation::BestG => {
                    if !improves {
                        continue;
                    }
                    parent.associate(next.clone(), current.coord.clone());
                }
                Relaxation::LastWins => {
                    parent.associate(next.clone(), current.coord.clone());
                    if !improves {
                        continue;
                    }
                }
            }

            best_g.associate(next.clone(), g);
            seq += 1;
            open.push(OpenEntry {
                f: g + distance_miles(next, goal),
                seq,
                g,
                coord: next.clone(),
            });
        }
    }

    debug!("A* {start} -> {goal}: no route after expanding {expanded} nodes");
    Err(RouteError::NoRoute { from: start.clone(), to: goal.clone() })
}

/// Walk the parent table back from `goal` to `start`, recovering the segment
/// used for every hop.
fn reconstruct(
    graph: &RoadGraph,
    parent: &AssociativeStore<Coordinate, Coordinate>,
    start: &Coordinate,
    goal: &Coordinate,
) -> RouteResult<Route> {
    let mut segments = Vec::new();
    let mut total_miles = 0.0;
    let mut cur = goal.clone();

    while cur != *start {
        let Some(prev) = parent.find(&cur) else {
            return Err(bad_coord(&cur, "broken parent chain"));
        };
        let hop = graph
            .neighbors(prev)
            .and_then(|segs| segs.iter().find(|s| s.end == cur))
            .ok_or_else(|| bad_coord(prev, "no segment matches parent link"))?;

        total_miles += hop.length_miles();
        segments.push(hop.clone());
        cur = prev.clone();
    }

    segments.reverse();
    Ok(Route { segments, total_miles })
}

fn bad_coord(coord: &Coordinate, reason: &'static str) -> RouteError {
    RouteError::BadCoord { coord: coord.clone(), reason }
}

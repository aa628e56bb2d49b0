//! Delivery-order heuristic.
//!
//! Greedy nearest neighbour on straight-line distance: from the depot, always
//! drive to the closest remaining delivery.  No road routing is involved, so
//! this is cheap enough to run before every plan.

use dp_core::{Coordinate, distance_miles};

use crate::DeliveryRequest;

/// Straight-line tour lengths before and after reordering.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrderStats {
    pub old_crow_miles: f64,
    pub new_crow_miles: f64,
}

/// Crow-flies length of the tour depot → each request in order → depot.
pub fn crow_distance(depot: &Coordinate, requests: &[DeliveryRequest]) -> f64 {
    let mut total = 0.0;
    let mut here = depot;
    for r in requests {
        total += distance_miles(here, &r.location);
        here = &r.location;
    }
    total + distance_miles(here, depot)
}

/// Reorder `requests` in place by nearest neighbour from `depot`.
///
/// Ties keep the request that appeared earlier.  The result is always a
/// permutation of the input.
pub fn optimize_order(depot: &Coordinate, requests: &mut Vec<DeliveryRequest>) -> OrderStats {
    let old_crow_miles = crow_distance(depot, requests);

    let mut remaining = std::mem::take(requests);
    let mut here = depot.clone();
    while !remaining.is_empty() {
        let mut best = 0;
        let mut best_miles = distance_miles(&here, &remaining[0].location);
        for (i, r) in remaining.iter().enumerate().skip(1) {
            let miles = distance_miles(&here, &r.location);
            if miles < best_miles {
                best = i;
                best_miles = miles;
            }
        }
        let next = remaining.remove(best);
        here = next.location.clone();
        requests.push(next);
    }

    OrderStats {
        old_crow_miles,
        new_crow_miles: crow_distance(depot, requests),
    }
}

//! Delivery plan generation.
//!
//! A plan visits every delivery once, starting and ending at the depot:
//!
//! 1. Optionally reorder the deliveries ([`optimize_order`]).
//! 2. Route each leg depot → d₁ → … → dₙ → depot with the configured
//!    [`Router`].
//! 3. Translate each leg's segments into commands: consecutive segments on
//!    the same street become one `Proceed`, a street change may add a `Turn`,
//!    and each delivery leg ends with `Deliver`.
//!
//! Any routing failure aborts the whole plan.

use log::info;

use dp_core::{Coordinate, turn_angle_deg};
use dp_spatial::{AStarRouter, RoadGraph, Route, Router};

use crate::command::{CompassDirection, DeliveryCommand, TurnDirection};
use crate::optimizer::{OrderStats, crow_distance, optimize_order};
use crate::{DeliveryRequest, PlanError, PlanResult};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Planner behaviour switches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannerConfig {
    /// Reorder deliveries by nearest neighbour before routing.  Default: true.
    pub optimize_order: bool,

    /// Street changes whose turn angle is within this many degrees of
    /// straight ahead produce no `Turn` command.  Default: 1.0.
    pub turn_threshold_deg: f64,
}

impl PlannerConfig {
    pub fn validate(&self) -> PlanResult<()> {
        if (0.0..180.0).contains(&self.turn_threshold_deg) {
            Ok(())
        } else {
            Err(PlanError::Config(format!(
                "turn_threshold_deg must be in [0, 180), got {}",
                self.turn_threshold_deg
            )))
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { optimize_order: true, turn_threshold_deg: 1.0 }
    }
}

// ── DeliveryPlan ──────────────────────────────────────────────────────────────

/// A complete round trip.
#[derive(Clone, Debug, Default)]
pub struct DeliveryPlan {
    pub commands: Vec<DeliveryCommand>,
    /// Routed road distance of every leg, including the return to the depot.
    pub total_miles: f64,
    pub order: OrderStats,
    /// Deliveries in the order they are made.
    pub deliveries: Vec<DeliveryRequest>,
}

// ── DeliveryPlanner ───────────────────────────────────────────────────────────

/// Turns a depot and a list of deliveries into driver commands.
pub struct DeliveryPlanner<'g, R: Router = AStarRouter> {
    graph:  &'g RoadGraph,
    router: R,
    config: PlannerConfig,
}

impl<'g> DeliveryPlanner<'g, AStarRouter> {
    /// Planner with the default A* router and configuration.
    pub fn new(graph: &'g RoadGraph) -> Self {
        Self { graph, router: AStarRouter::new(), config: PlannerConfig::default() }
    }
}

impl<'g, R: Router> DeliveryPlanner<'g, R> {
    pub fn with_router(graph: &'g RoadGraph, router: R, config: PlannerConfig) -> PlanResult<Self> {
        config.validate()?;
        Ok(Self { graph, router, config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan a round trip from `depot` through every delivery and back.
    ///
    /// # Errors
    ///
    /// [`PlanError::Route`] with the first leg's `BAD_COORD` / `NO_ROUTE`.
    pub fn generate_plan(
        &self,
        depot: &Coordinate,
        deliveries: &[DeliveryRequest],
    ) -> PlanResult<DeliveryPlan> {
        let mut ordered = deliveries.to_vec();
        let order = if self.config.optimize_order {
            optimize_order(depot, &mut ordered)
        } else {
            let miles = crow_distance(depot, &ordered);
            OrderStats { old_crow_miles: miles, new_crow_miles: miles }
        };

        let mut commands = Vec::new();
        let mut total_miles = 0.0;
        let mut here = depot;

        for request in &ordered {
            let route = self.router.route(self.graph, here, &request.location)?;
            total_miles += route.total_miles;
            commands.extend(route_commands(&route, self.config.turn_threshold_deg));
            commands.push(DeliveryCommand::Deliver { item: request.item.clone() });
            here = &request.location;
        }

        let home = self.router.route(self.graph, here, depot)?;
        total_miles += home.total_miles;
        commands.extend(route_commands(&home, self.config.turn_threshold_deg));

        info!(
            "planned {} deliveries: {} commands, {:.2} mi routed (crow {:.2} -> {:.2} mi)",
            ordered.len(),
            commands.len(),
            total_miles,
            order.old_crow_miles,
            order.new_crow_miles
        );

        Ok(DeliveryPlan { commands, total_miles, order, deliveries: ordered })
    }
}

/// Proceed/turn commands for one routed leg.
///
/// Consecutive segments sharing a street name collapse into one `Proceed`
/// whose heading is that of the street's first segment.  Between streets a
/// `Turn` is emitted unless the angle from the previous street's last
/// segment to the next street's first segment is within `threshold_deg` of
/// straight ahead.
pub fn route_commands(route: &Route, threshold_deg: f64) -> Vec<DeliveryCommand> {
    let mut commands = Vec::new();
    let mut previous = None;

    for run in route.segments.chunk_by(|a, b| a.name == b.name) {
        let first = &run[0];
        if let Some(prev) = previous {
            if let Some(direction) = TurnDirection::from_angle(turn_angle_deg(prev, first), threshold_deg) {
                commands.push(DeliveryCommand::Turn { direction, street: first.name.clone() });
            }
        }
        commands.push(DeliveryCommand::Proceed {
            direction: CompassDirection::from_bearing(first.bearing_deg()),
            street:    first.name.clone(),
            miles:     run.iter().map(|s| s.length_miles()).sum(),
        });
        previous = run.last();
    }

    commands
}

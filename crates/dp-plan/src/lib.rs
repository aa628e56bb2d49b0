//! `dp-plan` — turns a depot and a list of deliveries into driver commands.
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`request`]   | `DeliveryRequest`, `DeliveryManifest`, deliveries loader |
//! | [`optimizer`] | nearest-neighbour ordering, `OrderStats`                 |
//! | [`command`]   | `DeliveryCommand`, compass and turn classification       |
//! | [`planner`]   | `DeliveryPlanner`, `PlannerConfig`, `DeliveryPlan`       |
//! | [`output`]    | text and CSV plan writers                                |
//! | [`error`]     | `PlanError`, `PlanResult`                                |

pub mod command;
pub mod error;
pub mod optimizer;
pub mod output;
pub mod planner;
pub mod request;


pub use command::{CompassDirection, DeliveryCommand, TurnDirection};
pub use error::{PlanError, PlanResult};
pub use optimizer::{OrderStats, crow_distance, optimize_order};
pub use output::{CommandRow, write_plan_csv, write_plan_csv_to, write_plan_text};
pub use planner::{DeliveryPlan, DeliveryPlanner, PlannerConfig, route_commands};
pub use request::{DeliveryManifest, DeliveryRequest, load_deliveries, load_deliveries_reader};

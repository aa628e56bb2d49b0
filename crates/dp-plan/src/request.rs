//! Delivery requests and the deliveries-file loader.
//!
//! # File format
//!
//! The first non-blank line is the depot; every later non-blank line is one
//! delivery as `lat lon:item`.
//!
//! ```text
//! 34.0625329 -118.4470263
//! 34.0712323 -118.4505969:Chicken tenders (Sproul Landing)
//! 34.0687443 -118.4449195:B-Plate salmon (Eng IV)
//! ```
//!
//! The item text runs from the first `:` to the end of the line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use dp_core::Coordinate;
use dp_spatial::RoadGraph;

use crate::{PlanError, PlanResult};

/// One item to drop off at one location.
#[derive(Clone, Debug, PartialEq)]
pub struct DeliveryRequest {
    pub item:     String,
    pub location: Coordinate,
}

impl DeliveryRequest {
    pub fn new(item: impl Into<String>, location: Coordinate) -> Self {
        Self { item: item.into(), location }
    }
}

/// A depot plus the deliveries to make from it, as read from a file.
#[derive(Clone, Debug, PartialEq)]
pub struct DeliveryManifest {
    pub depot:    Coordinate,
    pub requests: Vec<DeliveryRequest>,
}

impl DeliveryManifest {
    /// Copy of this manifest with the depot and every delivery moved to the
    /// nearest node of `graph`.
    ///
    /// Returns `None` only if the graph has no nodes.
    pub fn snapped_to(&self, graph: &RoadGraph) -> Option<DeliveryManifest> {
        let snap = |c: &Coordinate| -> Option<Coordinate> {
            let node = graph.snap(c.lat(), c.lon())?;
            if node != c {
                debug!("snapped {c} to {node}");
            }
            Some(node.clone())
        };
        let depot = snap(&self.depot)?;
        let requests = self
            .requests
            .iter()
            .map(|r| Some(DeliveryRequest::new(r.item.clone(), snap(&r.location)?)))
            .collect::<Option<Vec<_>>>()?;
        Some(DeliveryManifest { depot, requests })
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load a depot and its deliveries from a file.
pub fn load_deliveries(path: &Path) -> PlanResult<DeliveryManifest> {
    let file = File::open(path)?;
    load_deliveries_reader(BufReader::new(file))
}

/// Like [`load_deliveries`] but accepts any buffered reader.
pub fn load_deliveries_reader<R: BufRead>(reader: R) -> PlanResult<DeliveryManifest> {
    let mut depot: Option<Coordinate> = None;
    let mut requests = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        if depot.is_none() {
            depot = Some(Coordinate::parse(text).map_err(|e| parse_error(line_no, e.to_string()))?);
            continue;
        }

        let Some((coords, item)) = text.split_once(':') else {
            return Err(parse_error(line_no, format!("expected \"<lat> <lon>:<item>\", got {text:?}")));
        };
        let item = item.trim();
        if item.is_empty() {
            return Err(parse_error(line_no, "delivery has no item".to_string()));
        }
        let location = Coordinate::parse(coords).map_err(|e| parse_error(line_no, e.to_string()))?;
        requests.push(DeliveryRequest::new(item, location));
    }

    let depot = depot.ok_or_else(|| parse_error(1, "missing depot line".to_string()))?;
    info!("loaded {} deliveries from depot {depot}", requests.len());
    Ok(DeliveryManifest { depot, requests })
}

fn parse_error(line: usize, message: String) -> PlanError {
    PlanError::Parse { line, message }
}

//! Text map loader.
//!
//! # Format
//!
//! Repeated street records.  Each record is the street name on its own line,
//! the number of segments on the next, then one line per segment with four
//! whitespace-separated tokens: start latitude, start longitude, end
//! latitude, end longitude.
//!
//! ```text
//! 10th Helena Drive
//! 1
//! 34.0547000 -118.4794734 34.0544590 -118.4801137
//! 12th Helena Drive
//! 2
//! 34.0549621 -118.4809217 34.0550772 -118.4807112
//! 34.0550772 -118.4807112 34.0551359 -118.4805816
//! ```
//!
//! Every segment is inserted in both directions.  Blank lines are ignored.
//! Coordinate tokens are kept verbatim as node identity, so the same
//! intersection must be spelled identically wherever it appears.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{info, warn};

use dp_core::{Coordinate, StoreConfig};

use crate::network::{RoadGraph, RoadGraphBuilder};
use crate::{SpatialError, SpatialResult};

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a road graph from a map file.
///
/// # Errors
///
/// [`SpatialError::Io`] on file errors, [`SpatialError::Parse`] (with a
/// 1-based line number) on malformed records.
pub fn load_map(path: &Path) -> SpatialResult<RoadGraph> {
    load_map_with_config(path, StoreConfig::default())
}

/// Like [`load_map`] but with a custom adjacency-store configuration.
pub fn load_map_with_config(path: &Path, config: StoreConfig) -> SpatialResult<RoadGraph> {
    let file = File::open(path)?;
    let mut builder = RoadGraphBuilder::with_store_config(config)?;
    read_streets(BufReader::new(file), &mut builder)?;
    Ok(builder.build())
}

/// Like [`load_map`] but accepts any buffered reader.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded map data.
pub fn load_map_reader<R: BufRead>(reader: R) -> SpatialResult<RoadGraph> {
    let mut builder = RoadGraphBuilder::new();
    read_streets(reader, &mut builder)?;
    Ok(builder.build())
}

/// Append every street record from `reader` to `builder`.
///
/// Returns the number of street records read.
pub fn read_streets<R: BufRead>(reader: R, builder: &mut RoadGraphBuilder) -> SpatialResult<usize> {
    let mut lines = NumberedLines { inner: reader.lines(), line_no: 0 };
    let mut streets = 0usize;

    while let Some((_, name_line)) = lines.next_non_blank()? {
        let name = name_line.trim();

        let (count_line_no, count_line) = lines
            .next_non_blank()?
            .ok_or_else(|| parse_error(lines.line_no, format!("missing segment count for street {name:?}")))?;
        let count: usize = count_line.trim().parse().map_err(|_| {
            parse_error(count_line_no, format!("invalid segment count {:?}", count_line.trim()))
        })?;
        if count == 0 {
            warn!("street {name:?} (line {count_line_no}) has no segments");
        }

        for _ in 0..count {
            let (line_no, seg_line) = lines.next_non_blank()?.ok_or_else(|| {
                parse_error(lines.line_no, format!("street {name:?} ended before {count} segments"))
            })?;
            let (start, end) = parse_segment_line(&seg_line)
                .map_err(|message| parse_error(line_no, message))?;
            builder.add_street_segment(start, end, name);
        }
        streets += 1;
    }

    info!(
        "loaded {streets} streets: {} nodes, {} directed segments",
        builder.node_count(),
        builder.segment_count()
    );
    Ok(streets)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

struct NumberedLines<R> {
    inner:   std::io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> NumberedLines<R> {
    /// Next line with visible content, with its 1-based line number.
    fn next_non_blank(&mut self) -> SpatialResult<Option<(usize, String)>> {
        for line in self.inner.by_ref() {
            self.line_no += 1;
            let line = line?;
            if !line.trim().is_empty() {
                return Ok(Some((self.line_no, line)));
            }
        }
        Ok(None)
    }
}

fn parse_segment_line(line: &str) -> Result<(Coordinate, Coordinate), String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [start_lat, start_lon, end_lat, end_lon] = tokens[..] else {
        return Err(format!("expected 4 coordinate tokens, found {}", tokens.len()));
    };
    let start = Coordinate::new(start_lat, start_lon).map_err(|e| e.to_string())?;
    let end = Coordinate::new(end_lat, end_lon).map_err(|e| e.to_string())?;
    Ok((start, end))
}

fn parse_error(line: usize, message: String) -> SpatialError {
    SpatialError::Parse { line, message }
}

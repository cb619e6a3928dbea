//! CSV rail network loader.
//!
//! # CSV format
//!
//! One row per piece of track.
//!
//! ```csv
//! x1,y1,z1,x2,y2,z2,length,rail_type,one_way
//! 0,64,0,40,64,0,40,siding,false
//! 40,64,0,140,64,0,100,iron,false
//! 140,64,0,180,64,0,40,platform,
//! ```
//!
//! `rail_type` is one of the [`RailType`] labels (`wooden`, `iron`,
//! `platform`, `turn_back`, …).  `one_way` defaults to `false`, meaning the
//! row adds rails in both directions.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use sd_core::RailPos;

use crate::{RailError, RailNetwork, RailNetworkBuilder, RailResult, RailType};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RailRecord {
    x1:        i32,
    y1:        i32,
    z1:        i32,
    x2:        i32,
    y2:        i32,
    z2:        i32,
    length:    f32,
    rail_type: String,
    #[serde(default)]
    one_way:   Option<bool>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`RailNetwork`] from a CSV file.
pub fn load_network_csv(path: &Path) -> RailResult<RailNetwork> {
    let file = std::fs::File::open(path)?;
    load_network_reader(file)
}

/// Like [`load_network_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for networks embedded in
/// a binary.
pub fn load_network_reader<R: Read>(reader: R) -> RailResult<RailNetwork> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut builder = RailNetworkBuilder::new();

    for (line, result) in csv_reader.deserialize::<RailRecord>().enumerate() {
        let row = result.map_err(|e| RailError::Parse(e.to_string()))?;
        let rail_type = RailType::from_name(&row.rail_type)
            .ok_or_else(|| RailError::UnknownRailType(row.rail_type.clone()))?;

        let a = RailPos::new(row.x1, row.y1, row.z1);
        let b = RailPos::new(row.x2, row.y2, row.z2);
        let added = if row.one_way.unwrap_or(false) {
            builder.add_rail(a, b, row.length, rail_type)
        } else {
            builder.add_track(a, b, row.length, rail_type)
        };
        added.map_err(|e| RailError::Parse(format!("row {}: {e}", line + 1)))?;
    }

    let network = builder.build();
    log::debug!("loaded rail network: {} rails over {} positions", network.rail_count(), network.node_count());
    Ok(network)
}

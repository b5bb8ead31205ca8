use std::collections::BTreeSet;

use anyhow::Result;
use geom::{GPSBounds, LonLat, Pt2D};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The short code a station is known by in the trip log, like "A32000".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StationID(pub String);

pub struct Station {
    pub id: StationID,
    pub name: Option<String>,
    pub capacity: Option<usize>,
    /// None if the roster had a missing or non-numeric coordinate
    pub lon_lat: Option<LonLat>,
    /// Map-space position, filled in once the GPS bounds are known
    pub pos: Option<Pt2D>,
}

impl Station {
    pub(crate) fn set_pos(&mut self, gps_bounds: &GPSBounds) {
        self.pos = self.lon_lat.as_ref().map(|gps| gps.to_pt(gps_bounds));
    }
}

/// Parses the roster JSON, shaped like `{"data": {"stations": [...]}}`. Positions aren't projected
/// yet.
pub fn load(bytes: &[u8]) -> Result<Vec<Station>> {
    let roster: Roster = serde_json::from_slice(bytes)?;

    let mut seen = BTreeSet::new();
    let mut stations = Vec::new();
    let mut invalid_pos = 0;
    let mut missing_id = 0;
    for rec in roster.data.stations {
        let id = match station_id(&rec.short_name) {
            Some(id) => id,
            None => {
                missing_id += 1;
                continue;
            }
        };
        if !seen.insert(id.clone()) {
            warn!("Duplicate station {:?}, ignoring all but the first", id);
            continue;
        }

        let lon_lat = match (coordinate(&rec.lon, 180.0), coordinate(&rec.lat, 90.0)) {
            (Some(lon), Some(lat)) => Some(LonLat::new(lon, lat)),
            _ => {
                invalid_pos += 1;
                None
            }
        };
        stations.push(Station {
            id,
            name: rec.name.as_str().map(|x| x.to_string()),
            capacity: capacity(&rec.capacity),
            lon_lat,
            pos: None,
        });
    }
    if missing_id > 0 {
        warn!("Skipped {missing_id} stations without a usable short_name");
    }
    if invalid_pos > 0 {
        warn!("{invalid_pos} stations have an invalid position and won't be placed on the map");
    }
    Ok(stations)
}

// Trip logs refer to stations by this code, so a numeric one is kept in its printed form
fn station_id(value: &Value) -> Option<StationID> {
    let id = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if id.is_empty() {
        return None;
    }
    Some(StationID(id))
}

fn capacity(value: &Value) -> Option<usize> {
    if let Some(x) = value.as_u64() {
        return usize::try_from(x).ok();
    }
    let x = value.as_f64()?;
    if x >= 0.0 && x.fract() == 0.0 && x <= u32::MAX as f64 {
        Some(x as usize)
    } else {
        None
    }
}

// The roster sometimes quotes numbers
fn coordinate(value: &Value, limit: f64) -> Option<f64> {
    let x = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if in_range(x, limit) {
        Some(x)
    } else {
        None
    }
}

/// Finite and within [-limit, limit]. 180 for longitude, 90 for latitude.
pub(crate) fn in_range(x: f64, limit: f64) -> bool {
    x.is_finite() && x.abs() <= limit
}

#[derive(Deserialize)]
struct Roster {
    data: RosterData,
}

#[derive(Deserialize)]
struct RosterData {
    stations: Vec<Record>,
}

#[derive(Deserialize)]
struct Record {
    // Any JSON type is accepted here; each field is checked per station
    #[serde(default)]
    short_name: Value,
    #[serde(default)]
    name: Value,
    #[serde(default)]
    capacity: Value,
    #[serde(default)]
    lat: Value,
    #[serde(default)]
    lon: Value,
}

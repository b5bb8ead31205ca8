use anyhow::Result;
use geojson::{GeoJson, Geometry, Value};
use geom::{GPSBounds, LonLat, PolyLine};

use crate::station::in_range;

/// One source of bike lane geometry, like a city's bike network.
pub struct BikeLanes {
    pub name: String,
    pub lines: Vec<Vec<LonLat>>,
    /// Map-space, filled in once the GPS bounds are known. Degenerate lines are skipped.
    pub polylines: Vec<PolyLine>,
}

impl BikeLanes {
    pub(crate) fn set_polylines(&mut self, gps_bounds: &GPSBounds) {
        self.polylines = self
            .lines
            .iter()
            .filter_map(|line| PolyLine::deduping_new(gps_bounds.convert(line)).ok())
            .collect();
    }
}

/// Keeps every LineString and MultiLineString; other geometry is ignored.
pub fn load(name: String, bytes: &[u8]) -> Result<BikeLanes> {
    let geojson: GeoJson = std::str::from_utf8(bytes)?.parse()?;
    let mut lines = Vec::new();
    match geojson {
        GeoJson::FeatureCollection(collection) => {
            for feature in collection.features {
                if let Some(geometry) = feature.geometry {
                    extract_lines(&geometry, &mut lines);
                }
            }
        }
        GeoJson::Feature(feature) => {
            if let Some(geometry) = feature.geometry {
                extract_lines(&geometry, &mut lines);
            }
        }
        GeoJson::Geometry(geometry) => {
            extract_lines(&geometry, &mut lines);
        }
    }
    info!("{name} has {} bike lane lines", lines.len());
    Ok(BikeLanes {
        name,
        lines,
        polylines: Vec::new(),
    })
}

fn extract_lines(geometry: &Geometry, lines: &mut Vec<Vec<LonLat>>) {
    match geometry.value {
        Value::LineString(ref pts) => {
            lines.extend(to_lon_lats(pts));
        }
        Value::MultiLineString(ref list) => {
            for pts in list {
                lines.extend(to_lon_lats(pts));
            }
        }
        Value::GeometryCollection(ref list) => {
            for geometry in list {
                extract_lines(geometry, lines);
            }
        }
        _ => {}
    }
}

// None if any position is broken or not in degrees, or there aren't enough points for a line
fn to_lon_lats(pts: &[Vec<f64>]) -> Option<Vec<LonLat>> {
    let mut result = Vec::new();
    for pt in pts {
        if pt.len() < 2 || !in_range(pt[0], 180.0) || !in_range(pt[1], 90.0) {
            return None;
        }
        result.push(LonLat::new(pt[0], pt[1]));
    }
    if result.len() < 2 {
        return None;
    }
    Some(result)
}

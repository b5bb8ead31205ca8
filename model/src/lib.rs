#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

pub mod controller;
mod lanes;
mod scale;
mod station;
mod time_filter;
pub mod traffic;
mod trip;
pub mod viewport;

use abstutil::Timer;
use anyhow::Result;
use geom::{Bounds, GPSBounds, LonLat};

pub use self::controller::{Controller, Event, Update};
pub use self::lanes::BikeLanes;
pub use self::scale::{SqrtScale, RADIUS_RANGE};
pub use self::station::{Station, StationID};
pub use self::time_filter::{TimeFilter, MINUTES_PER_DAY, WINDOW_MINUTES};
pub use self::traffic::Traffic;
pub use self::trip::Trip;

/// Where the map starts, between Boston and Cambridge
pub fn default_center() -> LonLat {
    LonLat::new(-71.09415, 42.36027)
}

pub struct Model {
    pub bounds: Bounds,
    pub gps_bounds: GPSBounds,
    pub stations: Vec<Station>,
    /// Never filtered in place
    pub trips: Vec<Trip>,
    pub lanes: Vec<BikeLanes>,
    /// Fixed by the unfiltered trips, so circles are comparable across filters
    pub radius_scale: SqrtScale,
}

/// The raw bytes of every source, or why each couldn't be fetched
pub struct RawInputs {
    pub stations: Result<Vec<u8>>,
    pub trips: Result<Vec<u8>>,
    /// (name, bytes)
    pub lanes: Vec<(String, Result<Vec<u8>>)>,
}

impl Model {
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }

    /// Each source is independent. Anything that fails to fetch or parse is logged and left
    /// empty.
    pub fn load(inputs: RawInputs, timer: &mut Timer) -> Self {
        let stations = match inputs.stations.and_then(|bytes| station::load(&bytes)) {
            Ok(stations) => stations,
            Err(err) => {
                error!("Error loading stations: {err}");
                Vec::new()
            }
        };

        let trips = match inputs
            .trips
            .and_then(|bytes| trip::load(bytes.as_slice(), timer))
        {
            Ok(trips) => trips,
            Err(err) => {
                error!("Error loading trips: {err}");
                Vec::new()
            }
        };

        let mut layers = Vec::new();
        for (name, bytes) in inputs.lanes {
            match bytes.and_then(|bytes| lanes::load(name.clone(), &bytes)) {
                Ok(layer) => layers.push(layer),
                Err(err) => {
                    error!("Error loading {name} bike lanes: {err}");
                }
            }
        }

        Self::new(stations, trips, layers)
    }

    pub fn new(mut stations: Vec<Station>, trips: Vec<Trip>, mut lanes: Vec<BikeLanes>) -> Self {
        // Always cover some area around the default center, even with no data
        let mut gps_bounds = GPSBounds::new();
        let center = default_center();
        gps_bounds.update(LonLat::new(center.x() - 0.02, center.y() - 0.01));
        gps_bounds.update(LonLat::new(center.x() + 0.02, center.y() + 0.01));
        for station in &stations {
            if let Some(gps) = station.lon_lat {
                gps_bounds.update(gps);
            }
        }
        for layer in &lanes {
            for line in &layer.lines {
                for gps in line {
                    gps_bounds.update(*gps);
                }
            }
        }

        for station in &mut stations {
            station.set_pos(&gps_bounds);
        }
        for layer in &mut lanes {
            layer.set_polylines(&gps_bounds);
        }

        info!(
            "Model has {} stations, {} trips, {} bike lane layers",
            abstutil::prettyprint_usize(stations.len()),
            abstutil::prettyprint_usize(trips.len()),
            lanes.len()
        );

        let mut model = Self {
            bounds: gps_bounds.to_bounds(),
            gps_bounds,
            stations,
            trips,
            lanes,
            radius_scale: SqrtScale::radius(0),
        };
        model.update_radius_scale();
        model
    }

    /// Swaps in a different trip log, keeping stations and lanes. On error, nothing changes.
    pub fn replace_trips(&mut self, bytes: &[u8], timer: &mut Timer) -> Result<()> {
        let trips = trip::load(bytes, timer)?;
        if trips.is_empty() {
            bail!("The file has no trips");
        }
        self.trips = trips;
        self.update_radius_scale();
        Ok(())
    }

    fn update_radius_scale(&mut self) {
        let unfiltered = traffic::aggregate(&self.stations, &self.trips);
        self.radius_scale = SqrtScale::radius(traffic::max_total(&unfiltered));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::NaiveDateTime;

    use super::*;

    pub fn station(id: &str, lat: f64, lon: f64) -> Station {
        Station {
            id: StationID(id.to_string()),
            name: None,
            capacity: None,
            lon_lat: Some(LonLat::new(lon, lat)),
            pos: None,
        }
    }

    /// Times are "HH:MM" on an arbitrary day
    pub fn trip(from: &str, to: &str, started_at: &str, ended_at: &str) -> Trip {
        let parse = |x: &str| {
            NaiveDateTime::parse_from_str(&format!("2024-03-01 {x}:00"), "%Y-%m-%d %H:%M:%S")
                .unwrap()
        };
        Trip {
            ride_id: None,
            start_station: StationID(from.to_string()),
            end_station: StationID(to.to_string()),
            started_at: parse(started_at),
            ended_at: parse(ended_at),
        }
    }

    pub fn model(stations: Vec<Station>, trips: Vec<Trip>) -> Model {
        Model::new(stations, trips, Vec::new())
    }

    const ROSTER: &str = r#"{"data": {"stations": [
        {"short_name": "A", "name": "Kendall", "lat": 42.36, "lon": -71.09},
        {"short_name": "B", "name": "Nowhere", "lat": "unknown", "lon": -71.1}
    ]}}"#;
    const TRIPS: &str = "started_at,ended_at,start_station_id,end_station_id\n\
                         2024-03-01 00:10:00,2024-03-01 00:20:00,A,A\n\
                         2024-03-01 08:00:00,2024-03-01 08:20:00,A,B\n";
    const LANES: &str = r#"{"type": "LineString", "coordinates": [[-71.09, 42.36], [-71.08, 42.37]]}"#;

    fn load(inputs: RawInputs) -> Model {
        Model::load(inputs, &mut Timer::throwaway())
    }

    #[test]
    fn loads_everything() {
        let model = load(RawInputs {
            stations: Ok(ROSTER.as_bytes().to_vec()),
            trips: Ok(TRIPS.as_bytes().to_vec()),
            lanes: vec![("boston".to_string(), Ok(LANES.as_bytes().to_vec()))],
        });
        assert_eq!(model.stations.len(), 2);
        assert_eq!(model.trips.len(), 2);
        assert_eq!(model.lanes.len(), 1);
        assert_eq!(model.lanes[0].polylines.len(), 1);

        assert!(model.stations[0].pos.is_some());
        assert!(model.stations[1].pos.is_none());

        // A has 3 total trips, the max
        assert_eq!(model.radius_scale, SqrtScale::radius(3));
    }

    #[test]
    fn failures_are_independent() {
        let model = load(RawInputs {
            stations: Err(anyhow!("connection refused")),
            trips: Ok(TRIPS.as_bytes().to_vec()),
            lanes: vec![
                ("boston".to_string(), Ok(b"<html>".to_vec())),
                ("cambridge".to_string(), Ok(LANES.as_bytes().to_vec())),
            ],
        });
        assert!(model.stations.is_empty());
        assert_eq!(model.trips.len(), 2);
        assert_eq!(model.lanes.len(), 1);
        assert_eq!(model.lanes[0].name, "cambridge");
        assert_eq!(model.radius_scale, SqrtScale::radius(0));

        let model = load(RawInputs {
            stations: Ok(ROSTER.as_bytes().to_vec()),
            trips: Ok(b"not,a,trip,log\n1,2,3,4\n".to_vec()),
            lanes: Vec::new(),
        });
        assert_eq!(model.stations.len(), 2);
        assert!(model.trips.is_empty());
    }

    #[test]
    fn empty_model_has_bounds() {
        let model = Model::empty();
        assert!(model.stations.is_empty());
        assert!(model.bounds.max_x > model.bounds.min_x);
        assert!(model.bounds.max_y > model.bounds.min_y);
    }

    #[test]
    fn replacing_trips_updates_the_scale() {
        let mut model = model(
            vec![station("A", 42.36, -71.09)],
            vec![trip("A", "A", "00:10", "00:20")],
        );
        assert_eq!(model.radius_scale, SqrtScale::radius(2));

        let csv = "started_at,ended_at,start_station_id,end_station_id\n\
                   2024-03-01 00:10:00,2024-03-01 00:20:00,A,A\n\
                   2024-03-01 01:10:00,2024-03-01 01:20:00,A,A\n";
        model
            .replace_trips(csv.as_bytes(), &mut Timer::throwaway())
            .unwrap();
        assert_eq!(model.trips.len(), 2);
        assert_eq!(model.radius_scale, SqrtScale::radius(4));

        // A bad file leaves things alone
        assert!(model
            .replace_trips(b"garbage", &mut Timer::throwaway())
            .is_err());
        assert_eq!(model.trips.len(), 2);
    }
}

use abstutil::Counter;

use crate::{Station, StationID, Trip};

/// The departure ratio of a station nobody used. Shown as balanced, rather than left out.
pub const BALANCED_RATIO: f64 = 0.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Traffic {
    pub departures: usize,
    pub arrivals: usize,
}

impl Traffic {
    pub fn total(&self) -> usize {
        self.departures + self.arrivals
    }

    /// What fraction of traffic leaves from here, in [0, 1]
    pub fn departure_ratio(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            BALANCED_RATIO
        } else {
            self.departures as f64 / total as f64
        }
    }
}

/// Counts departures and arrivals for every station, in the same order as `stations`. Trips
/// touching unknown stations are ignored.
pub fn aggregate<'a, I: IntoIterator<Item = &'a Trip>>(
    stations: &[Station],
    trips: I,
) -> Vec<Traffic> {
    let mut departures: Counter<&StationID> = Counter::new();
    let mut arrivals: Counter<&StationID> = Counter::new();
    for trip in trips {
        departures.inc(&trip.start_station);
        arrivals.inc(&trip.end_station);
    }

    stations
        .iter()
        .map(|station| Traffic {
            departures: departures.get(&station.id),
            arrivals: arrivals.get(&station.id),
        })
        .collect()
}

pub fn max_total(traffic: &[Traffic]) -> usize {
    traffic.iter().map(|t| t.total()).max().unwrap_or(0)
}

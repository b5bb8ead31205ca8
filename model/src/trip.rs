use abstutil::Timer;
use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, Timelike};
use serde::Deserialize;

use crate::StationID;

pub struct Trip {
    pub ride_id: Option<String>,
    pub start_station: StationID,
    pub end_station: StationID,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
}

impl Trip {
    pub fn start_minute(&self) -> u16 {
        minute_of_day(&self.started_at)
    }

    pub fn end_minute(&self) -> u16 {
        minute_of_day(&self.ended_at)
    }
}

// Ignores the date and seconds
fn minute_of_day(datetime: &NaiveDateTime) -> u16 {
    (datetime.hour() * 60 + datetime.minute()) as u16
}

pub fn load<R: std::io::Read>(reader: R, timer: &mut Timer) -> Result<Vec<Trip>> {
    timer.start("parse trips");
    // Row lengths are checked per row below, not for the whole file
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            timer.stop("parse trips");
            bail!("Trip log is missing the {column} column");
        }
    }

    let mut trips = Vec::new();
    let mut bad_rows = 0;
    let mut bad_times = 0;
    for rec in reader.deserialize() {
        let rec: Record = match rec {
            Ok(rec) => rec,
            Err(err) => {
                debug!("Skipping trip row: {err}");
                bad_rows += 1;
                continue;
            }
        };
        match (parse_time(&rec.started_at), parse_time(&rec.ended_at)) {
            (Ok(started_at), Ok(ended_at)) => {
                trips.push(Trip {
                    ride_id: rec.ride_id,
                    start_station: rec.start_station_id,
                    end_station: rec.end_station_id,
                    started_at,
                    ended_at,
                });
            }
            _ => {
                bad_times += 1;
            }
        }
    }
    timer.stop("parse trips");

    if bad_rows > 0 {
        warn!("Skipped {bad_rows} malformed trip rows");
    }
    if bad_times > 0 {
        warn!("Skipped {bad_times} trips with unparseable times");
    }
    info!("Loaded {} trips", abstutil::prettyprint_usize(trips.len()));
    Ok(trips)
}

const REQUIRED_COLUMNS: [&str; 4] = [
    "started_at",
    "ended_at",
    "start_station_id",
    "end_station_id",
];

fn parse_time(x: &str) -> Result<NaiveDateTime> {
    let x = x.trim();
    for format in [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
    ] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(x, format) {
            return Ok(datetime);
        }
    }
    match DateTime::parse_from_rfc3339(x) {
        Ok(datetime) => Ok(datetime.naive_local()),
        Err(_) => bail!("Unknown time format: {x}"),
    }
}

#[derive(Deserialize)]
struct Record {
    ride_id: Option<String>,
    started_at: String,
    ended_at: String,
    start_station_id: StationID,
    end_station_id: StationID,
}

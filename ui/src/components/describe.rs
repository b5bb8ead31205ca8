use widgetry::{Line, Text};

use model::{Station, Traffic};

pub fn station(station: &Station, traffic: Traffic) -> Text {
    let mut txt = Text::from(format!(
        "{} trips ({} departures, {} arrivals)",
        traffic.total(),
        traffic.departures,
        traffic.arrivals
    ));
    if let Some(ref name) = station.name {
        txt.add_line(Line(format!("Name: {name}")).secondary());
    }
    txt.add_line(Line(format!("Station: {}", station.id.0)).secondary());
    if let Some(capacity) = station.capacity {
        txt.add_line(Line(format!("Docks: {capacity}")).secondary());
    }
    txt
}

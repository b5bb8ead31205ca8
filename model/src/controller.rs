use crate::{traffic, Model, TimeFilter, Traffic};

/// Everything that can happen to the view
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// The time slider moved
    FilterChanged(TimeFilter),
    /// The camera panned, zoomed, or the window resized
    ViewportChanged,
}

/// What the renderer has to do after an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Update {
    /// Radius, color, and tooltips changed, then positions
    Restyle,
    /// Only positions changed; counts didn't
    RepositionOnly,
}

/// Owns the filter and the traffic computed from it. The loaded data lives in `Model`.
pub struct Controller {
    filter: TimeFilter,
    traffic: Vec<Traffic>,
    num_filtered_trips: usize,
}

impl Controller {
    pub fn new(model: &Model, filter: TimeFilter) -> Self {
        let mut controller = Self {
            filter,
            traffic: Vec::new(),
            num_filtered_trips: 0,
        };
        controller.recalculate(model);
        controller
    }

    pub fn handle(&mut self, model: &Model, event: Event) -> Update {
        match event {
            Event::FilterChanged(filter) => {
                self.filter = filter;
                self.recalculate(model);
                Update::Restyle
            }
            Event::ViewportChanged => Update::RepositionOnly,
        }
    }

    /// Call after the model's trips or stations change
    pub fn recalculate(&mut self, model: &Model) {
        let trips = self.filter.apply(&model.trips);
        self.num_filtered_trips = trips.len();
        self.traffic = traffic::aggregate(&model.stations, trips);
    }

    pub fn filter(&self) -> TimeFilter {
        self.filter
    }

    /// One per station, in the same order as `Model::stations`
    pub fn traffic(&self) -> &[Traffic] {
        &self.traffic
    }

    pub fn num_filtered_trips(&self) -> usize {
        self.num_filtered_trips
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{model, station, trip};

    #[test]
    fn starts_unfiltered() {
        let model = model(
            vec![station("A", 42.36, -71.09)],
            vec![trip("A", "A", "00:10", "00:20")],
        );
        let controller = Controller::new(&model, TimeFilter::Any);
        assert_eq!(controller.filter(), TimeFilter::Any);
        assert_eq!(controller.num_filtered_trips(), 1);
        let t = controller.traffic()[0];
        assert_eq!((t.departures, t.arrivals, t.total()), (1, 1, 2));
    }

    #[test]
    fn filter_then_clear() {
        let model = model(
            vec![station("A", 42.36, -71.09), station("B", 42.37, -71.1)],
            vec![
                trip("A", "A", "00:10", "00:20"),
                trip("A", "B", "09:30", "09:45"),
                trip("B", "A", "17:00", "17:30"),
            ],
        );
        let mut controller = Controller::new(&model, TimeFilter::Any);
        let unfiltered = controller.traffic().to_vec();

        assert_eq!(
            controller.handle(&model, Event::FilterChanged(TimeFilter::Around(600))),
            Update::Restyle
        );
        assert_eq!(controller.num_filtered_trips(), 1);
        assert_eq!(controller.traffic()[0].departures, 1);
        assert_eq!(controller.traffic()[0].arrivals, 0);
        assert_eq!(controller.traffic()[1].arrivals, 1);

        controller.handle(&model, Event::FilterChanged(TimeFilter::Any));
        assert_eq!(controller.traffic(), unfiltered.as_slice());
    }

    #[test]
    fn nothing_in_the_window() {
        let model = model(
            vec![station("A", 42.36, -71.09)],
            vec![trip("A", "A", "00:10", "00:20")],
        );
        let mut controller = Controller::new(&model, TimeFilter::Any);
        controller.handle(&model, Event::FilterChanged(TimeFilter::Around(600)));
        let t = controller.traffic()[0];
        assert_eq!((t.departures, t.arrivals, t.total()), (0, 0, 0));
        assert_eq!(t.departure_ratio(), 0.5);
    }

    #[test]
    fn viewport_changes_dont_touch_traffic() {
        let model = model(
            vec![station("A", 42.36, -71.09)],
            vec![trip("A", "A", "00:10", "00:20")],
        );
        let mut controller = Controller::new(&model, TimeFilter::Around(15));
        let before = controller.traffic().to_vec();
        assert_eq!(
            controller.handle(&model, Event::ViewportChanged),
            Update::RepositionOnly
        );
        assert_eq!(controller.filter(), TimeFilter::Around(15));
        assert_eq!(controller.traffic(), before.as_slice());
    }
}

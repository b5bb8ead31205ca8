use serde::{Deserialize, Serialize};

use crate::Trip;

/// Trips within this many minutes of the chosen time, at either end, are kept.
pub const WINDOW_MINUTES: u16 = 60;
pub const MINUTES_PER_DAY: u16 = 24 * 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFilter {
    Any,
    /// Minutes since midnight, in [0, 1440)
    Around(u16),
}

impl TimeFilter {
    /// The slider produces -1 for no filter, or a minute of the day.
    pub fn from_slider_value(value: i32) -> Self {
        if value < 0 {
            TimeFilter::Any
        } else {
            TimeFilter::Around(value.min(MINUTES_PER_DAY as i32 - 1) as u16)
        }
    }

    pub fn slider_value(&self) -> i32 {
        match self {
            TimeFilter::Any => -1,
            TimeFilter::Around(minute) => *minute as i32,
        }
    }

    /// Pulls a minute from outside this crate, like an old savestate, back into the day.
    pub fn clamped(self) -> Self {
        Self::from_slider_value(self.slider_value())
    }

    pub fn matches(&self, trip: &Trip) -> bool {
        match self {
            TimeFilter::Any => true,
            TimeFilter::Around(minute) => {
                trip.start_minute().abs_diff(*minute) <= WINDOW_MINUTES
                    || trip.end_minute().abs_diff(*minute) <= WINDOW_MINUTES
            }
        }
    }

    /// Keeps the original order
    pub fn apply<'a>(&self, trips: &'a [Trip]) -> Vec<&'a Trip> {
        trips.iter().filter(|trip| self.matches(trip)).collect()
    }

    /// Like "9:05 AM", or None when there's no filter
    pub fn label(&self) -> Option<String> {
        match self {
            TimeFilter::Any => None,
            TimeFilter::Around(minute) => {
                let (hour, minute) = (minute / 60, minute % 60);
                let suffix = if hour < 12 { "AM" } else { "PM" };
                let hour = match hour % 12 {
                    0 => 12,
                    h => h,
                };
                Some(format!("{hour}:{minute:02} {suffix}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::trip;

    fn sample() -> Vec<Trip> {
        vec![
            trip("A", "A", "00:10", "00:20"),
            trip("A", "B", "08:30", "08:50"),
            trip("B", "C", "09:00", "11:30"),
            trip("C", "A", "11:01", "11:20"),
            trip("C", "A", "23:30", "23:59"),
        ]
    }

    fn summarize(trips: &[&Trip]) -> Vec<String> {
        trips
            .iter()
            .map(|t| format!("{:?}->{:?}@{}", t.start_station, t.end_station, t.start_minute()))
            .collect()
    }

    #[test]
    fn any_is_identity() {
        let trips = sample();
        let filtered = TimeFilter::Any.apply(&trips);
        assert_eq!(filtered.len(), trips.len());
        for (a, b) in filtered.iter().zip(trips.iter()) {
            assert!(std::ptr::eq(*a, b));
        }
    }

    #[test]
    fn window_is_inclusive_at_either_end() {
        let trips = sample();
        // 10:00. The 09:00 start is exactly 60 minutes away; 11:01 is 61 away.
        let filtered = TimeFilter::Around(600).apply(&trips);
        assert_eq!(summarize(&filtered), summarize(&[&trips[2]]));

        // 12:20. Only matches by end time.
        let filtered = TimeFilter::Around(12 * 60 + 20).apply(&trips);
        assert_eq!(summarize(&filtered), summarize(&[&trips[2], &trips[3]]));
    }

    #[test]
    fn results_are_a_subset_within_the_window() {
        let trips = sample();
        for t in (0..MINUTES_PER_DAY).step_by(7) {
            for trip in TimeFilter::Around(t).apply(&trips) {
                assert!(trips.iter().any(|x| std::ptr::eq(x, trip)));
                assert!(
                    trip.start_minute().abs_diff(t) <= WINDOW_MINUTES
                        || trip.end_minute().abs_diff(t) <= WINDOW_MINUTES
                );
            }
        }
    }

    #[test]
    fn no_wraparound_at_midnight() {
        let trips = sample();
        // 23:30 is only 40 minutes before 00:10 across midnight, but that doesn't count
        let filtered = TimeFilter::Around(0).apply(&trips);
        assert_eq!(summarize(&filtered), summarize(&[&trips[0]]));
    }

    #[test]
    fn outside_the_window() {
        let trips = vec![trip("A", "A", "00:10", "00:20")];
        assert!(TimeFilter::Around(600).apply(&trips).is_empty());
    }

    #[test]
    fn slider_values() {
        assert_eq!(TimeFilter::from_slider_value(-1), TimeFilter::Any);
        assert_eq!(TimeFilter::from_slider_value(0), TimeFilter::Around(0));
        assert_eq!(TimeFilter::from_slider_value(600), TimeFilter::Around(600));
        assert_eq!(TimeFilter::from_slider_value(5000), TimeFilter::Around(1439));
        assert_eq!(TimeFilter::Any.slider_value(), -1);
        assert_eq!(TimeFilter::Around(75).slider_value(), 75);
    }

    #[test]
    fn clamping_stale_filters() {
        let filter: TimeFilter = serde_json::from_str(r#"{"Around": 5000}"#).unwrap();
        assert_eq!(filter.clamped(), TimeFilter::Around(1439));
        assert_eq!(TimeFilter::Around(600).clamped(), TimeFilter::Around(600));
        assert_eq!(TimeFilter::Any.clamped(), TimeFilter::Any);
    }

    #[test]
    fn labels() {
        assert_eq!(TimeFilter::Any.label(), None);
        assert_eq!(TimeFilter::Around(0).label().unwrap(), "12:00 AM");
        assert_eq!(TimeFilter::Around(9 * 60 + 5).label().unwrap(), "9:05 AM");
        assert_eq!(TimeFilter::Around(12 * 60).label().unwrap(), "12:00 PM");
        assert_eq!(TimeFilter::Around(1439).label().unwrap(), "11:59 PM");
    }
}

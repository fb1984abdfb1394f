use crate::model::WeatherSample;
use crate::timefmt::{DateStyle, format_unix};

/// Forecast samples bucketed by weekday label.
///
/// Labels keep first-seen order and samples keep arrival order within
/// each bucket. The label is the only key, so two calendar dates that
/// share a weekday share a bucket; this lossy merge is the intended
/// behavior of the day cards. Samples without a timestamp are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayGroups {
    groups: Vec<(String, Vec<WeatherSample>)>,
}

impl DayGroups {
    pub fn from_samples(samples: &[WeatherSample]) -> Self {
        let mut groups: Vec<(String, Vec<WeatherSample>)> = Vec::new();

        for sample in samples {
            let Some(dt) = sample.dt else { continue };
            let label = format_unix(dt, DateStyle::WeekdayShort);

            match groups.iter_mut().find(|(key, _)| *key == label) {
                Some((_, bucket)) => bucket.push(sample.clone()),
                None => groups.push((label, vec![sample.clone()])),
            }
        }

        Self { groups }
    }

    /// Group labels in first-seen order. Drives the day-card row.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(label, _)| label.as_str())
    }

    /// The label selected right after a forecast load.
    pub fn first_label(&self) -> Option<&str> {
        self.groups.first().map(|(label, _)| label.as_str())
    }

    /// One `(label, leading sample)` pair per group, used to render the
    /// day cards.
    pub fn day_cards(&self) -> impl Iterator<Item = (&str, &WeatherSample)> {
        self.groups
            .iter()
            .filter_map(|(label, bucket)| bucket.first().map(|sample| (label.as_str(), sample)))
    }

    /// Case-insensitive lookup of one group's samples. Unknown labels
    /// yield an empty slice.
    pub fn samples_for(&self, label: &str) -> &[WeatherSample] {
        self.groups
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(label))
            .map(|(_, bucket)| bucket.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;
    const BASE: i64 = 1_736_935_200;

    fn sample(dt: Option<i64>, temp: f64) -> WeatherSample {
        WeatherSample {
            temp,
            feels_like: temp,
            humidity: 50,
            wind_speed: 2.0,
            weather: "Clear".to_string(),
            description: "clear sky".to_string(),
            weather_icon: "01d".to_string(),
            dt,
            dt_txt: None,
        }
    }

    fn label(dt: i64) -> String {
        format_unix(dt, DateStyle::WeekdayShort)
    }

    #[test]
    fn groups_keep_first_seen_day_order() {
        let samples = vec![
            sample(Some(BASE + 2 * DAY), 1.0),
            sample(Some(BASE), 2.0),
            sample(Some(BASE), 3.0),
            sample(Some(BASE + DAY), 4.0),
        ];

        let groups = DayGroups::from_samples(&samples);

        let labels: Vec<&str> = groups.labels().collect();
        assert_eq!(labels, vec![label(BASE + 2 * DAY), label(BASE), label(BASE + DAY)]);
        assert_eq!(groups.first_label(), Some(labels[0]));
    }

    #[test]
    fn samples_keep_arrival_order_within_a_day() {
        let samples =
            vec![sample(Some(BASE), 1.0), sample(Some(BASE), 2.0), sample(Some(BASE), 3.0)];

        let groups = DayGroups::from_samples(&samples);

        let temps: Vec<f64> =
            groups.samples_for(&label(BASE)).iter().map(|s| s.temp).collect();
        assert_eq!(temps, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn samples_without_timestamp_are_dropped() {
        let samples = vec![sample(None, 1.0), sample(Some(BASE), 2.0), sample(None, 3.0)];

        let groups = DayGroups::from_samples(&samples);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups.samples_for(&label(BASE)).len(), 1);
    }

    #[test]
    fn dates_a_week_apart_share_a_bucket() {
        // Same weekday, different calendar date: the lossy label merge.
        let samples = vec![sample(Some(BASE), 1.0), sample(Some(BASE + 7 * DAY), 2.0)];

        let groups = DayGroups::from_samples(&samples);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups.samples_for(&label(BASE)).len(), 2);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let samples = vec![sample(Some(BASE), 1.0)];
        let groups = DayGroups::from_samples(&samples);

        let upper = label(BASE).to_uppercase();
        assert_eq!(groups.samples_for(&upper).len(), 1);
        assert!(groups.samples_for("nonexistent").is_empty());
    }

    #[test]
    fn day_cards_use_the_leading_sample() {
        let samples = vec![
            sample(Some(BASE), 1.0),
            sample(Some(BASE), 2.0),
            sample(Some(BASE + DAY), 3.0),
        ];

        let groups = DayGroups::from_samples(&samples);
        let cards: Vec<(&str, f64)> =
            groups.day_cards().map(|(label, sample)| (label, sample.temp)).collect();

        assert_eq!(cards, vec![(label(BASE).as_str(), 1.0), (label(BASE + DAY).as_str(), 3.0)]);
    }

    #[test]
    fn empty_input_yields_empty_groups() {
        let groups = DayGroups::from_samples(&[]);
        assert!(groups.is_empty());
        assert_eq!(groups.first_label(), None);
    }
}

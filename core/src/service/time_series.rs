use chrono::{Months, NaiveDate};
use log::debug;
use serde::Serialize;

use crate::error::{Result, SymptomLogError};
use crate::model::symptom_log::SymptomLog;
use crate::time::CalendarDay;

/// Symptom names to chart, kept in the order they were first inserted.
///
/// An empty filter lets every symptom through. The insertion order decides the
/// order of zero-filled points, so output is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymptomFilter {
    names: Vec<String>,
}

impl SymptomFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the name was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    /// Adds the name if missing, removes it otherwise.
    pub fn toggle(&mut self, name: &str) {
        if !self.remove(name) {
            self.names.push(name.to_string());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn allows(&self, name: &str) -> bool {
        self.names.is_empty() || self.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SymptomFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut filter = SymptomFilter::new();
        for name in iter {
            filter.insert(name);
        }
        filter
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TimeSeriesPoint {
    pub symptom: String,
    pub date: NaiveDate,
    pub count: u32,
}

/// All points of one symptom, for drawing a single line.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SymptomSeries {
    pub symptom: String,
    pub points: Vec<(NaiveDate, u32)>,
}

pub struct TimeSeriesBuilder<'a> {
    log: &'a SymptomLog,
}

impl<'a> TimeSeriesBuilder<'a> {
    pub fn new(log: &'a SymptomLog) -> Self {
        Self { log }
    }

    /// Chart points for every day in `start..=end`.
    ///
    /// A day with entries yields one point per entry that passes `filter`,
    /// counted by severity, in the order the entries were logged. A day with
    /// no entries yields a zero point for each filtered symptom so lines stay
    /// continuous; with an empty filter it yields nothing. An inverted range
    /// yields an empty series.
    pub fn build(
        &self,
        start: impl CalendarDay,
        end: impl CalendarDay,
        filter: &SymptomFilter,
    ) -> Vec<TimeSeriesPoint> {
        match self.try_build(start, end, filter) {
            Ok(points) => points,
            Err(e) => {
                debug!("empty time series: {}", e);
                Vec::new()
            }
        }
    }

    pub fn try_build(
        &self,
        start: impl CalendarDay,
        end: impl CalendarDay,
        filter: &SymptomFilter,
    ) -> Result<Vec<TimeSeriesPoint>> {
        let start = start.calendar_day();
        let end = end.calendar_day();
        if start > end {
            return Err(SymptomLogError::InvalidRange { start, end });
        }

        let mut points = Vec::new();
        for date in start.iter_days().take_while(|d| *d <= end) {
            let entries = self.log.entries_on(date);
            if entries.is_empty() {
                points.extend(filter.iter().map(|symptom| TimeSeriesPoint {
                    symptom: symptom.to_string(),
                    date,
                    count: 0,
                }));
                continue;
            }

            points.extend(
                entries
                    .iter()
                    .filter(|entry| filter.allows(&entry.symptom))
                    .map(|entry| TimeSeriesPoint {
                        symptom: entry.symptom.clone(),
                        date,
                        count: u32::from(entry.severity),
                    }),
            );
        }
        Ok(points)
    }
}

/// Splits points into one series per symptom, in order of first appearance.
pub fn group_by_symptom(points: &[TimeSeriesPoint]) -> Vec<SymptomSeries> {
    let mut series: Vec<SymptomSeries> = Vec::new();
    for point in points {
        let pos = match series.iter().position(|s| s.symptom == point.symptom) {
            Some(pos) => pos,
            None => {
                series.push(SymptomSeries {
                    symptom: point.symptom.clone(),
                    points: Vec::new(),
                });
                series.len() - 1
            }
        };
        series[pos].points.push((point.date, point.count));
    }
    series
}

/// One month back from `today` through `today`.
pub fn default_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today.checked_sub_months(Months::new(1)).unwrap_or(today);
    (start, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::symptom::SymptomEntry;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn point(symptom: &str, date: NaiveDate, count: u32) -> TimeSeriesPoint {
        TimeSeriesPoint {
            symptom: symptom.to_string(),
            date,
            count,
        }
    }

    #[test]
    fn test_single_day_no_filter_returns_entries_in_order() {
        let mut log = SymptomLog::new();
        let d = day(2024, 9, 26);
        log.append(d, SymptomEntry::new("Weight loss", 3));
        log.append(d, SymptomEntry::new("Increased fatigue", 8));
        log.append(d, SymptomEntry::new("Weight loss", 5));

        let points = TimeSeriesBuilder::new(&log).build(d, d, &SymptomFilter::new());
        assert_eq!(
            points,
            vec![
                point("Weight loss", d, 3),
                point("Increased fatigue", d, 8),
                point("Weight loss", d, 5),
            ]
        );
    }

    #[test]
    fn test_single_entry_severity_is_count() {
        let mut log = SymptomLog::new();
        let d = day(2024, 9, 26);
        log.append(d, SymptomEntry::new("Weight loss", 7));

        let points = TimeSeriesBuilder::new(&log).build(d, d, &SymptomFilter::new());
        assert_eq!(points, vec![point("Weight loss", d, 7)]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let mut log = SymptomLog::new();
        log.append(day(2024, 9, 26), SymptomEntry::new("Weight loss", 7));
        let builder = TimeSeriesBuilder::new(&log);
        let filter: SymptomFilter = ["Weight loss"].into_iter().collect();

        assert!(builder.build(day(2024, 9, 27), day(2024, 9, 26), &filter).is_empty());
        assert!(matches!(
            builder.try_build(day(2024, 9, 27), day(2024, 9, 26), &filter),
            Err(SymptomLogError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_empty_log_zero_fills_each_day() {
        let log = SymptomLog::new();
        let filter: SymptomFilter = ["Fatigue"].into_iter().collect();

        let points = TimeSeriesBuilder::new(&log).build(day(2024, 2, 28), day(2024, 3, 1), &filter);
        assert_eq!(
            points,
            vec![
                point("Fatigue", day(2024, 2, 28), 0),
                point("Fatigue", day(2024, 2, 29), 0),
                point("Fatigue", day(2024, 3, 1), 0),
            ]
        );
    }

    #[test]
    fn test_empty_filter_on_empty_day_emits_nothing() {
        let log = SymptomLog::new();
        let points = TimeSeriesBuilder::new(&log).build(day(2024, 9, 1), day(2024, 9, 30), &SymptomFilter::new());
        assert!(points.is_empty());
    }

    #[test]
    fn test_mixed_days_follow_filter_order() {
        let mut log = SymptomLog::new();
        log.append(day(2024, 9, 2), SymptomEntry::new("Weight loss", 4));
        log.append(day(2024, 9, 2), SymptomEntry::new("Other", 9));
        log.append(day(2024, 9, 3), SymptomEntry::new("Other", 2));

        let filter: SymptomFilter = ["Increased fatigue", "Weight loss", "Increased fatigue"]
            .into_iter()
            .collect();
        let points = TimeSeriesBuilder::new(&log).build(day(2024, 9, 1), day(2024, 9, 3), &filter);

        assert_eq!(
            points,
            vec![
                point("Increased fatigue", day(2024, 9, 1), 0),
                point("Weight loss", day(2024, 9, 1), 0),
                point("Weight loss", day(2024, 9, 2), 4),
                // 9/3 has entries, none selected: no zero fill
            ]
        );
    }

    #[test]
    fn test_build_is_repeatable() {
        let mut log = SymptomLog::new();
        log.append(day(2024, 9, 2), SymptomEntry::new("Weight loss", 4));
        let filter: SymptomFilter = ["Weight loss", "Other"].into_iter().collect();
        let builder = TimeSeriesBuilder::new(&log);

        let first = builder.build(day(2024, 9, 1), day(2024, 9, 5), &filter);
        let second = builder.build(day(2024, 9, 1), day(2024, 9, 5), &filter);
        assert_eq!(first, second);
        assert_eq!(first.len(), 9);
    }

    #[test]
    fn test_filter_toggle_keeps_order() {
        let mut filter = SymptomFilter::new();
        filter.toggle("a");
        filter.toggle("b");
        filter.toggle("c");
        filter.toggle("b");
        assert_eq!(filter.iter().collect::<Vec<_>>(), vec!["a", "c"]);
        filter.toggle("b");
        assert_eq!(filter.iter().collect::<Vec<_>>(), vec!["a", "c", "b"]);
        assert!(!filter.insert("a"));
        assert_eq!(filter.len(), 3);
    }

    #[test]
    fn test_group_by_symptom() {
        let d1 = day(2024, 9, 1);
        let d2 = day(2024, 9, 2);
        let points = vec![
            point("b", d1, 0),
            point("a", d1, 0),
            point("b", d2, 3),
            point("a", d2, 1),
        ];

        let series = group_by_symptom(&points);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].symptom, "b");
        assert_eq!(series[0].points, vec![(d1, 0), (d2, 3)]);
        assert_eq!(series[1].points, vec![(d1, 0), (d2, 1)]);
    }

    #[test]
    fn test_default_range() {
        assert_eq!(default_range(day(2024, 3, 31)), (day(2024, 2, 29), day(2024, 3, 31)));
        assert_eq!(default_range(day(2024, 1, 15)), (day(2023, 12, 15), day(2024, 1, 15)));
    }
}

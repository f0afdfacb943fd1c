//! Forecast aggregation: 3-hour samples grouped into daily summaries.

use crate::models::{DailySummary, WeatherSample};
use chrono::NaiveDate;
use std::collections::HashMap;

const DAY_LABEL_FORMAT: &str = "%A, %B %d";

/// Group samples by the calendar date of their local timestamp.
///
/// Days appear in the order their first sample was seen; nothing is sorted.
/// `temp_min`/`temp_max` are the extrema over the day, while description,
/// icon, humidity and wind speed stay those of the day's first sample.
pub fn aggregate(samples: &[WeatherSample]) -> Vec<DailySummary> {
    let mut days: Vec<DailySummary> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for sample in samples {
        let date = sample.timestamp.date_naive();

        if let Some(day) = index.get(&date).and_then(|&i| days.get_mut(i)) {
            day.temp_min = day.temp_min.min(sample.temp_min);
            day.temp_max = day.temp_max.max(sample.temp_max);
            continue;
        }

        index.insert(date, days.len());
        days.push(DailySummary {
            calendar_date: date,
            display_label: date.format(DAY_LABEL_FORMAT).to_string(),
            temp_min: sample.temp_min,
            temp_max: sample.temp_max,
            description: sample.description.clone(),
            icon: sample.icon.clone(),
            humidity: sample.humidity,
            wind_speed: sample.wind_speed,
        });
    }

    days
}

//! Reduction of 3-hour forecast samples into daily summaries.

use chrono::{NaiveDate, TimeZone};

use crate::model::{DailyForecast, ForecastSample};

/// Most days a forecast summary will ever contain.
pub const MAX_DAYS: usize = 7;

struct DayBucket<'a> {
    date: NaiveDate,
    first: &'a ForecastSample,
    temps: Vec<f64>,
    humidity_sum: u32,
    wind_sum: f64,
}

/// Group samples by calendar day in `tz` and summarize each day.
///
/// Days keep the order in which they first appear in `samples`; the description
/// and icon of a day come from its first sample. Only the first [`MAX_DAYS`]
/// distinct days are returned.
pub fn aggregate<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> Vec<DailyForecast> {
    let mut buckets: Vec<DayBucket<'_>> = Vec::new();

    for sample in samples {
        let date = sample.time.with_timezone(tz).date_naive();

        let idx = match buckets.iter().position(|b| b.date == date) {
            Some(idx) => idx,
            None => {
                buckets.push(DayBucket {
                    date,
                    first: sample,
                    temps: Vec::new(),
                    humidity_sum: 0,
                    wind_sum: 0.0,
                });
                buckets.len() - 1
            }
        };

        let bucket = &mut buckets[idx];
        bucket.temps.push(sample.temperature_c);
        bucket.humidity_sum += u32::from(sample.humidity_pct);
        bucket.wind_sum += sample.wind_speed_mps;
    }

    buckets.truncate(MAX_DAYS);
    buckets.into_iter().map(summarize).collect()
}

fn summarize(bucket: DayBucket<'_>) -> DailyForecast {
    let count = bucket.temps.len() as f64;
    let sum: f64 = bucket.temps.iter().sum();
    let min = bucket.temps.iter().copied().fold(f64::INFINITY, f64::min);
    let max = bucket.temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    DailyForecast {
        date: bucket.date,
        label: day_label(bucket.date),
        avg_temp_c: round1(sum / count),
        min_temp_c: round1(min),
        max_temp_c: round1(max),
        avg_humidity_pct: (f64::from(bucket.humidity_sum) / count).round() as u8,
        avg_wind_speed_mps: round1(bucket.wind_sum / count),
        description: bucket.first.description.clone(),
        icon: bucket.first.icon.clone(),
    }
}

/// "Mon, Jan 5"
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

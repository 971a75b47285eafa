//! Feature assembly for the two external models.

use crate::models::{AqiFeatureVector, PollutantReading, TimeFeatureBatch, TimeFeatureRow};

// ---

/// Build the regressor input row.
///
/// The order PM2.5, PM10, NO, NO2, NOx, CO, SO2 must match the order the
/// regressor was trained on; a swapped pair still produces a prediction,
/// just a wrong one.
pub fn build_aqi_features(reading: &PollutantReading) -> AqiFeatureVector {
    // ---
    AqiFeatureVector::new([
        reading.pm25,
        reading.pm10,
        reading.no,
        reading.no2,
        reading.nox,
        reading.co,
        reading.so2,
    ])
}

/// Build one row per time slot for a `(city, month, day)` triple.
///
/// `day` is passed through as-is, so impossible dates such as February 30
/// are not rejected here.
pub fn build_time_features(city_index: usize, month: u32, day: u32) -> TimeFeatureBatch {
    // ---
    TimeFeatureBatch::new(std::array::from_fn(|slot| TimeFeatureRow {
        city: city_index,
        month,
        day,
        time_slot: slot as u8,
    }))
}

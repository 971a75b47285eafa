//! Data models for the prediction pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PredictionError, Result};

// ---

/// Sensor range ceiling for particulate matter (PM2.5, PM10).
pub const PARTICULATE_CEILING: f64 = 500.0;

/// Sensor range ceiling for gaseous pollutants (NO, NO2, NOx, CO, SO2).
pub const GAS_CEILING: f64 = 1500.0;

/// Number of time slots the best-time classifier chooses between.
pub const TIME_SLOTS: usize = 5;

/// Cities known to the best-time classifier.
///
/// The position of each name is the `City` feature the classifier was
/// trained on. Reordering, inserting or removing entries is a breaking change.
pub const CITY_NAMES: [&str; 26] = [
    "Ahmedabad",
    "Aizawl",
    "Amaravati",
    "Amritsar",
    "Bengaluru",
    "Bhopal",
    "Brajrajnagar",
    "Chandigarh",
    "Chennai",
    "Coimbatore",
    "Delhi",
    "Ernakulam",
    "Gurugram",
    "Guwahati",
    "Hyderabad",
    "Jaipur",
    "Jorapokhar",
    "Kochi",
    "Kolkata",
    "Lucknow",
    "Mumbai",
    "Patna",
    "Shillong",
    "Talcher",
    "Thiruvananthapuram",
    "Visakhapatnam",
];

/// Resolve a city name to its zero-based index in [`CITY_NAMES`].
///
/// Matching is exact and case-sensitive.
pub fn city_index(name: &str) -> Result<usize> {
    // ---
    CITY_NAMES
        .iter()
        .position(|city| *city == name)
        .ok_or_else(|| PredictionError::UnknownCity(name.to_string()))
}

/// Raw pollutant concentrations submitted for an AQI prediction.
///
/// Any field missing from the request body, or sent as `null`, defaults to
/// zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollutantReading {
    // ---
    #[serde(deserialize_with = "null_as_zero")]
    pub pm25: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub pm10: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub no: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub no2: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub nox: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub co: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub so2: f64,
}

fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl PollutantReading {
    /// Each reading paired with its display name and sensor ceiling.
    fn bounded_fields(&self) -> [(&'static str, f64, f64); 7] {
        // ---
        [
            ("PM2.5", self.pm25, PARTICULATE_CEILING),
            ("PM10", self.pm10, PARTICULATE_CEILING),
            ("NO", self.no, GAS_CEILING),
            ("NO2", self.no2, GAS_CEILING),
            ("NOx", self.nox, GAS_CEILING),
            ("CO", self.co, GAS_CEILING),
            ("SO2", self.so2, GAS_CEILING),
        ]
    }

    /// Reject readings that are negative, non-finite or above their ceiling.
    pub fn validate(&self) -> Result<()> {
        // ---
        for (name, value, ceiling) in self.bounded_fields() {
            if !value.is_finite() || !(0.0..=ceiling).contains(&value) {
                return Err(PredictionError::InvalidInput(format!(
                    "{name} must be between 0 and {ceiling}, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Single-row feature record for the AQI regressor.
///
/// Serializes as a bare array in [`AqiFeatureVector::COLUMNS`] order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AqiFeatureVector([f64; 7]);

impl AqiFeatureVector {
    /// Column order the regressor was trained on.
    pub const COLUMNS: [&'static str; 7] = ["PM2.5", "PM10", "NO", "NO2", "NOx", "CO", "SO2"];

    pub(crate) fn new(values: [f64; 7]) -> Self {
        Self(values)
    }

    pub fn as_array(&self) -> &[f64; 7] {
        &self.0
    }
}

/// One `(City, Month, Day, Time)` row of a [`TimeFeatureBatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeFeatureRow {
    // ---
    pub city: usize,
    pub month: u32,
    pub day: u32,
    pub time_slot: u8,
}

impl TimeFeatureRow {
    /// Row values in [`TimeFeatureBatch::COLUMNS`] order.
    pub fn to_array(&self) -> [u64; 4] {
        [
            self.city as u64,
            u64::from(self.month),
            u64::from(self.day),
            u64::from(self.time_slot),
        ]
    }
}

/// Candidate rows for the best-time classifier, one per time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeFeatureBatch {
    rows: [TimeFeatureRow; TIME_SLOTS],
}

impl TimeFeatureBatch {
    pub const COLUMNS: [&'static str; 4] = ["City", "Month", "Day", "Time"];

    pub(crate) fn new(rows: [TimeFeatureRow; TIME_SLOTS]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[TimeFeatureRow; TIME_SLOTS] {
        &self.rows
    }
}

/// Inclusive range of dates the best-time flow accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastWindow {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl ForecastWindow {
    pub fn check(&self, date: NaiveDate) -> Result<()> {
        // ---
        if date < self.earliest || date > self.latest {
            return Err(PredictionError::InvalidInput(format!(
                "date {date} is outside the supported range {} to {}",
                self.earliest, self.latest
            )));
        }
        Ok(())
    }
}

/// Body of a best-time prediction request.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeQuery {
    pub city: String,
    pub date: NaiveDate,
}

//! Prediction orchestration.
//!
//! Each flow is a straight chain: validate, build features, make exactly one
//! model call, then label the result. Model failures are reported once and
//! never retried.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::category::{classify_aqi, round_aqi, AqiCategory};
use crate::error::{PredictionError, Result};
use crate::features::{build_aqi_features, build_time_features};
use crate::inference::{AqiRegressor, TimeClassifier};
use crate::models::{city_index, ForecastWindow, PollutantReading};
use crate::temporal::{season_from_month, time_category_from_slot, Season, TimeCategory};

// ---

/// Presentation-ready outcome of an AQI prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AqiResult {
    // ---
    /// Regressor output rounded to two decimals; this is the value that was banded.
    pub rounded_value: f64,
    pub category: AqiCategory,
    pub description: &'static str,
    pub recommendation: &'static str,
    pub message: String,
}

/// Presentation-ready outcome of a best-time prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeResult {
    // ---
    pub city: String,
    pub date: NaiveDate,
    pub best_time_category: TimeCategory,
    pub hours: Option<&'static str>,
    pub season: Season,
    pub message: String,
}

/// Predict and classify the AQI for one set of pollutant readings.
pub async fn request_aqi_prediction(
    regressor: &dyn AqiRegressor,
    reading: &PollutantReading,
) -> Result<AqiResult> {
    // ---
    reading.validate()?;

    let features = build_aqi_features(reading);
    debug!("AQI features: {:?}", features.as_array());

    let raw = regressor
        .predict(&features)
        .await
        .map_err(|e| PredictionError::ModelInferenceFailure(format!("{e:#}")))?;

    // Banding sees the rounded value, never the raw one
    let rounded_value = round_aqi(raw);
    debug!("Regressor returned {}, rounded to {:.2}", raw, rounded_value);

    let (category, description, recommendation) = classify_aqi(rounded_value)?;

    Ok(AqiResult {
        rounded_value,
        category,
        description,
        recommendation,
        message: format!("The predicted AQI is: {rounded_value:.2} ({category})"),
    })
}

/// Predict the best time of day to go outside in `city` on `date`.
///
/// The classifier labels each of the five slot rows; only the first label is
/// consulted. An empty label list counts as a model failure.
pub async fn request_time_prediction(
    classifier: &dyn TimeClassifier,
    city: &str,
    date: NaiveDate,
    window: ForecastWindow,
) -> Result<TimeResult> {
    // ---
    let index = city_index(city)?;
    window.check(date)?;

    let batch = build_time_features(index, date.month(), date.day());
    debug!("Time features for {} (index {}): {:?}", city, index, batch.rows());

    let labels = classifier
        .predict(&batch)
        .await
        .map_err(|e| PredictionError::ModelInferenceFailure(format!("{e:#}")))?;
    debug!("Classifier returned labels {:?}", labels);

    let slot = labels.first().copied().ok_or_else(|| {
        PredictionError::ModelInferenceFailure("classifier returned no labels".to_string())
    })?;

    let best_time_category = time_category_from_slot(slot);
    let season = season_from_month(date.month());

    Ok(TimeResult {
        city: city.to_string(),
        date,
        best_time_category,
        hours: best_time_category.hours(),
        season,
        message: format!(
            "The Best Time to go out in {} on {} ({}) is in the {}.",
            city,
            date.format("%B %d"),
            season,
            best_time_category
        ),
    })
}

#[cfg(test)]
mod tests {
    // ---
    use std::sync::Mutex;

    use anyhow::anyhow;
    use async_trait::async_trait;
    use tokio_test::block_on;

    use super::*;
    use crate::inference::{FixedClassifier, FixedRegressor};
    use crate::models::{AqiFeatureVector, TimeFeatureBatch};

    /// Records what the pipeline handed to the model.
    struct RecordingRegressor {
        value: f64,
        seen: Mutex<Vec<[f64; 7]>>,
    }

    #[async_trait]
    impl AqiRegressor for RecordingRegressor {
        async fn predict(&self, features: &AqiFeatureVector) -> anyhow::Result<f64> {
            self.seen.lock().unwrap().push(*features.as_array());
            Ok(self.value)
        }
    }

    struct FailingModel;

    #[async_trait]
    impl AqiRegressor for FailingModel {
        async fn predict(&self, _features: &AqiFeatureVector) -> anyhow::Result<f64> {
            Err(anyhow!("connection refused"))
        }
    }

    #[async_trait]
    impl TimeClassifier for FailingModel {
        async fn predict(&self, _batch: &TimeFeatureBatch) -> anyhow::Result<Vec<i64>> {
            Err(anyhow!("connection refused"))
        }
    }

    /// Returns per-row labels verbatim.
    struct LabelsClassifier(Vec<i64>);

    #[async_trait]
    impl TimeClassifier for LabelsClassifier {
        async fn predict(&self, _batch: &TimeFeatureBatch) -> anyhow::Result<Vec<i64>> {
            Ok(self.0.clone())
        }
    }

    fn window() -> ForecastWindow {
        // ---
        ForecastWindow {
            earliest: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            latest: NaiveDate::from_ymd_opt(2030, 12, 31).unwrap(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_aqi_flow_classifies_rounded_value() {
        // ---
        let result = block_on(request_aqi_prediction(
            &FixedRegressor(50.996),
            &PollutantReading::default(),
        ))
        .unwrap();

        assert_eq!(result.rounded_value, 51.0);
        assert_eq!(result.category, AqiCategory::Satisfactory);
        assert_eq!(result.description, AqiCategory::Satisfactory.description());
        assert_eq!(result.message, "The predicted AQI is: 51.00 (Satisfactory)");
    }

    #[test]
    fn test_aqi_flow_rounds_up_into_moderate() {
        // ---
        let result = block_on(request_aqi_prediction(
            &FixedRegressor(100.995),
            &PollutantReading::default(),
        ))
        .unwrap();

        assert_eq!(result.rounded_value, 101.0);
        assert_eq!(result.category, AqiCategory::Moderate);
    }

    #[test]
    fn test_aqi_flow_passes_ordered_features() {
        // ---
        let regressor = RecordingRegressor {
            value: 150.0,
            seen: Mutex::new(Vec::new()),
        };
        let reading = PollutantReading {
            pm25: 10.0,
            pm10: 20.0,
            no: 1.0,
            no2: 2.0,
            nox: 3.0,
            co: 4.0,
            so2: 5.0,
        };

        block_on(request_aqi_prediction(&regressor, &reading)).unwrap();

        let seen = regressor.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], [10.0, 20.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_aqi_flow_rejects_invalid_reading_before_model() {
        // ---
        let regressor = RecordingRegressor {
            value: 150.0,
            seen: Mutex::new(Vec::new()),
        };
        let reading = PollutantReading {
            pm25: 501.0,
            ..Default::default()
        };

        let err = block_on(request_aqi_prediction(&regressor, &reading)).unwrap_err();
        assert!(matches!(err, PredictionError::InvalidInput(_)));
        assert!(regressor.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_aqi_flow_low_value_is_unclassified() {
        // ---
        let err = block_on(request_aqi_prediction(
            &FixedRegressor(7.5),
            &PollutantReading::default(),
        ))
        .unwrap_err();
        assert!(matches!(err, PredictionError::UnclassifiedValue(v) if v == 7.5));
    }

    #[test]
    fn test_aqi_flow_model_failure() {
        // ---
        let err = block_on(request_aqi_prediction(
            &FailingModel,
            &PollutantReading::default(),
        ))
        .unwrap_err();

        match err {
            PredictionError::ModelInferenceFailure(message) => {
                assert!(message.contains("connection refused"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_time_flow_labels_and_season() {
        // ---
        let result = block_on(request_time_prediction(
            &FixedClassifier(1),
            "Delhi",
            date(2026, 11, 20),
            window(),
        ))
        .unwrap();

        assert_eq!(result.best_time_category, TimeCategory::Morning);
        assert_eq!(result.hours, Some("08:00-12:00"));
        assert_eq!(result.season, Season::PostMonsoon);
        assert_eq!(
            result.message,
            "The Best Time to go out in Delhi on November 20 (Post-Monsoon (Autumn)) is in the Morning."
        );
    }

    #[test]
    fn test_time_flow_consults_first_label_only() {
        // ---
        let classifier = LabelsClassifier(vec![3, 0, 0, 0, 0]);
        let result =
            block_on(request_time_prediction(&classifier, "Mumbai", date(2027, 7, 1), window()))
                .unwrap();

        assert_eq!(result.best_time_category, TimeCategory::Dusk);
        assert_eq!(result.season, Season::Monsoon);
    }

    #[test]
    fn test_time_flow_out_of_range_slot_is_unknown() {
        // ---
        let result = block_on(request_time_prediction(
            &FixedClassifier(9),
            "Patna",
            date(2027, 1, 5),
            window(),
        ))
        .unwrap();

        assert_eq!(result.best_time_category, TimeCategory::Unknown);
        assert_eq!(result.hours, None);
        assert_eq!(result.season, Season::Winter);
    }

    #[test]
    fn test_time_flow_unknown_city() {
        // ---
        let err = block_on(request_time_prediction(
            &FixedClassifier(0),
            "Atlantis",
            date(2027, 1, 5),
            window(),
        ))
        .unwrap_err();

        assert!(matches!(err, PredictionError::UnknownCity(ref name) if name == "Atlantis"));
    }

    #[test]
    fn test_time_flow_date_outside_window() {
        // ---
        let err = block_on(request_time_prediction(
            &FixedClassifier(0),
            "Chennai",
            date(2031, 1, 1),
            window(),
        ))
        .unwrap_err();

        assert!(matches!(err, PredictionError::InvalidInput(_)));
    }

    #[test]
    fn test_time_flow_empty_labels() {
        // ---
        let err = block_on(request_time_prediction(
            &LabelsClassifier(Vec::new()),
            "Chennai",
            date(2027, 3, 1),
            window(),
        ))
        .unwrap_err();

        assert!(matches!(err, PredictionError::ModelInferenceFailure(_)));
    }

    #[test]
    fn test_time_flow_model_failure() {
        // ---
        let err = block_on(request_time_prediction(
            &FailingModel,
            "Chennai",
            date(2027, 3, 1),
            window(),
        ))
        .unwrap_err();

        assert!(matches!(err, PredictionError::ModelInferenceFailure(_)));
    }
}

//! AQI severity tiers and the guidance text attached to each.
//!
//! Bands are literal and inclusive at both ends, with adjacent bands sharing
//! a boundary (51.0 closes Good and opens Satisfactory). The shared boundary
//! belongs to the more severe band: the scan runs from Severe downwards and
//! stops at the first band whose range contains the value. Nothing covers
//! values below 13.0, which are reported as
//! [`PredictionError::UnclassifiedValue`] instead of being folded into Good.

use std::fmt;

use serde::Serialize;

use crate::error::{PredictionError, Result};

// ---

/// Ordered AQI severity tiers, least severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AqiCategory {
    Good,
    Satisfactory,
    Moderate,
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
    Severe,
}

impl AqiCategory {
    pub const ALL: [AqiCategory; 6] = [
        AqiCategory::Good,
        AqiCategory::Satisfactory,
        AqiCategory::Moderate,
        AqiCategory::Poor,
        AqiCategory::VeryPoor,
        AqiCategory::Severe,
    ];

    pub fn as_str(&self) -> &'static str {
        // ---
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Satisfactory => "Satisfactory",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Poor => "Poor",
            AqiCategory::VeryPoor => "Very Poor",
            AqiCategory::Severe => "Severe",
        }
    }

    /// Inclusive `(lower, upper)` band. Severe has no ceiling.
    pub fn band(&self) -> (f64, f64) {
        // ---
        match self {
            AqiCategory::Good => (13.0, 51.0),
            AqiCategory::Satisfactory => (51.0, 101.0),
            AqiCategory::Moderate => (101.0, 201.0),
            AqiCategory::Poor => (201.0, 301.0),
            AqiCategory::VeryPoor => (301.0, 401.0),
            AqiCategory::Severe => (401.0, f64::INFINITY),
        }
    }

    pub fn description(&self) -> &'static str {
        // ---
        match self {
            AqiCategory::Good => {
                "Air quality is satisfactory, and poses little or no risk to health. \
                 Enjoy outdoor activities!"
            }
            AqiCategory::Satisfactory => {
                "Air quality is acceptable; however, there may be a concern for some people \
                 who are unusually sensitive to air pollution."
            }
            AqiCategory::Moderate => {
                "Air quality is okay; however, there may be a concern for some people who are \
                 unusually sensitive to air pollution. Avoid prolonged outdoor activities."
            }
            AqiCategory::Poor => {
                "Air quality is poor and may cause health issues, particularly for people with \
                 respiratory or heart problems. Minimize outdoor activities."
            }
            AqiCategory::VeryPoor => {
                "Air quality is very poor and may cause serious health effects. Avoid all \
                 outdoor activities and stay indoors as much as possible."
            }
            AqiCategory::Severe => {
                "Air quality is extremely poor and poses a severe risk to health. It's \
                 recommended to stay indoors, use air purifiers, and wear N95 masks if you \
                 must go outside."
            }
        }
    }

    pub fn recommendation(&self) -> &'static str {
        // ---
        match self {
            AqiCategory::Good => "Enjoy outdoor activities and maintain a healthy lifestyle.",
            AqiCategory::Satisfactory | AqiCategory::Moderate => {
                "If you are unusually sensitive to air pollution, consider reducing prolonged \
                 outdoor exertion."
            }
            AqiCategory::Poor => {
                "Minimize outdoor activities, especially if you have respiratory or heart \
                 problems."
            }
            AqiCategory::VeryPoor => {
                "Avoid all outdoor activities, and stay indoors with windows and doors closed. \
                 Use air purifiers if available."
            }
            AqiCategory::Severe => {
                "1. Stay indoors as much as possible.\n\
                 2. Use air purifiers indoors.\n\
                 3. Keep windows and doors closed.\n\
                 4. Wear N95 masks if you must go outside.\n\
                 5. Stay hydrated and maintain a healthy diet."
            }
        }
    }

    fn contains(&self, value: f64) -> bool {
        let (lower, upper) = self.band();
        lower <= value && value <= upper
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round to two decimal places, half away from zero.
///
/// Applied to the raw regressor output before banding, so 50.996 lands in
/// Satisfactory rather than Good.
pub fn round_aqi(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Classify an AQI value into its severity tier.
///
/// Returns the tier with its description and recommendation text.
pub fn classify_aqi(value: f64) -> Result<(AqiCategory, &'static str, &'static str)> {
    // ---
    AqiCategory::ALL
        .iter()
        .rev()
        .find(|category| category.contains(value))
        .map(|category| (*category, category.description(), category.recommendation()))
        .ok_or(PredictionError::UnclassifiedValue(value))
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn category_of(value: f64) -> AqiCategory {
        classify_aqi(value).unwrap().0
    }

    #[test]
    fn test_lower_boundaries() {
        // ---
        assert_eq!(category_of(13.0), AqiCategory::Good);
        assert_eq!(category_of(51.0), AqiCategory::Satisfactory);
        assert_eq!(category_of(101.0), AqiCategory::Moderate);
        assert_eq!(category_of(201.0), AqiCategory::Poor);
        assert_eq!(category_of(301.0), AqiCategory::VeryPoor);
        assert_eq!(category_of(401.0), AqiCategory::Severe);
    }

    #[test]
    fn test_just_below_boundaries() {
        // ---
        assert_eq!(category_of(50.99), AqiCategory::Good);
        assert_eq!(category_of(100.99), AqiCategory::Satisfactory);
        assert_eq!(category_of(200.99), AqiCategory::Moderate);
        assert_eq!(category_of(300.99), AqiCategory::Poor);
        assert_eq!(category_of(400.99), AqiCategory::VeryPoor);
    }

    #[test]
    fn test_severe_has_no_ceiling() {
        // ---
        assert_eq!(category_of(999999.0), AqiCategory::Severe);
        assert_eq!(category_of(1_500_000.0), AqiCategory::Severe);
        assert_eq!(category_of(f64::INFINITY), AqiCategory::Severe);
    }

    #[test]
    fn test_values_below_good_are_unclassified() {
        // ---
        assert!(matches!(
            classify_aqi(12.99),
            Err(PredictionError::UnclassifiedValue(v)) if v == 12.99
        ));
        assert!(classify_aqi(0.0).is_err());
        assert!(classify_aqi(-5.0).is_err());
        assert!(classify_aqi(f64::NAN).is_err());
    }

    #[test]
    fn test_guidance_text_attached() {
        // ---
        let (category, description, recommendation) = classify_aqi(250.0).unwrap();
        assert_eq!(category, AqiCategory::Poor);
        assert!(description.starts_with("Air quality is poor"));
        assert!(recommendation.starts_with("Minimize outdoor activities"));

        let (_, _, severe_steps) = classify_aqi(450.0).unwrap();
        assert_eq!(severe_steps.lines().count(), 5);
    }

    #[test]
    fn test_rounding_before_banding() {
        // ---
        assert_eq!(round_aqi(50.996), 51.0);
        assert_eq!(category_of(round_aqi(50.996)), AqiCategory::Satisfactory);

        assert_eq!(round_aqi(100.995), 101.0);
        assert_eq!(category_of(round_aqi(100.995)), AqiCategory::Moderate);

        assert_eq!(round_aqi(50.994), 50.99);
        assert_eq!(category_of(round_aqi(50.994)), AqiCategory::Good);

        // Rounds up into Good
        assert_eq!(round_aqi(12.995), 13.0);
    }

    #[test]
    fn test_category_labels() {
        // ---
        assert_eq!(AqiCategory::VeryPoor.to_string(), "Very Poor");
        assert_eq!(
            serde_json::to_value(AqiCategory::VeryPoor).unwrap(),
            serde_json::json!("Very Poor")
        );
        assert!(AqiCategory::Good < AqiCategory::Severe);
    }
}

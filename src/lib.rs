//! Prediction-interpretation pipeline for air quality.
//!
//! Turns pollutant readings into an AQI severity tier with guidance text,
//! and a city/date selection into the best time of day to be outdoors. The
//! two predictive models are external collaborators reached through the
//! traits in [`inference`]; everything else here is deterministic.
//!
//! Modules are wired through this gateway: sibling modules import from
//! `crate::` rather than from each other's internals where a re-export
//! exists.

pub mod category;
pub mod config;
pub mod error;
pub mod features;
pub mod inference;
pub mod models;
pub mod pipeline;
pub mod routes;
pub mod temporal;

pub use category::{classify_aqi, round_aqi, AqiCategory};
pub use config::Config;
pub use error::PredictionError;
pub use features::{build_aqi_features, build_time_features};
pub use inference::{AqiRegressor, FixedClassifier, FixedRegressor, Models, TimeClassifier};
pub use models::{
    city_index, AqiFeatureVector, ForecastWindow, PollutantReading, TimeFeatureBatch,
    TimeFeatureRow, TimeQuery, CITY_NAMES,
};
pub use pipeline::{request_aqi_prediction, request_time_prediction, AqiResult, TimeResult};
pub use temporal::{season_from_month, time_category_from_slot, Season, TimeCategory};

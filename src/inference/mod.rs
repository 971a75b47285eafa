//! Capability interfaces for the two external predictive models.
//!
//! The pipeline only ever sees these traits. Any conforming implementation
//! can be swapped in without touching classification logic:
//! - [`remote`]: adapters for models served over HTTP
//! - [`FixedRegressor`] / [`FixedClassifier`]: constant outputs, used for
//!   local runs and tests
//!
//! Implementations are shared read-only across requests, hence the
//! `Send + Sync` bound and `&self` receivers.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{AqiFeatureVector, TimeFeatureBatch};

pub mod remote;

pub use remote::{RemoteClassifier, RemoteRegressor};

// ---

/// Numeric model producing an AQI estimate from pollutant concentrations.
#[async_trait]
pub trait AqiRegressor: Send + Sync {
    async fn predict(&self, features: &AqiFeatureVector) -> Result<f64>;
}

/// Discrete model choosing the best time slot for a city and date.
#[async_trait]
pub trait TimeClassifier: Send + Sync {
    /// Predict one slot label per batch row, in row order.
    async fn predict(&self, batch: &TimeFeatureBatch) -> Result<Vec<i64>>;
}

/// Both models, loaded once at startup and cloned cheaply into handlers.
#[derive(Clone)]
pub struct Models {
    // ---
    pub regressor: Arc<dyn AqiRegressor>,
    pub classifier: Arc<dyn TimeClassifier>,
}

impl Models {
    pub fn new(regressor: Arc<dyn AqiRegressor>, classifier: Arc<dyn TimeClassifier>) -> Self {
        Self {
            regressor,
            classifier,
        }
    }
}

/// Regressor that always predicts the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedRegressor(pub f64);

#[async_trait]
impl AqiRegressor for FixedRegressor {
    async fn predict(&self, _features: &AqiFeatureVector) -> Result<f64> {
        Ok(self.0)
    }
}

/// Classifier that labels every row with the same slot.
#[derive(Debug, Clone, Copy)]
pub struct FixedClassifier(pub i64);

#[async_trait]
impl TimeClassifier for FixedClassifier {
    async fn predict(&self, batch: &TimeFeatureBatch) -> Result<Vec<i64>> {
        Ok(vec![self.0; batch.rows().len()])
    }
}

//! HTTP adapters for models hosted behind a model server.
//!
//! Requests carry a named data frame so the server can rebuild the exact
//! columns the model was fitted on:
//!
//! ```json
//! {"dataframe_split": {"columns": ["PM2.5", "PM10", ...], "data": [[...]]}}
//! ```
//!
//! Responses are expected as `{"predictions": [...]}`, one entry per row.
//! Both adapters accept a prediction either as a JSON number or as a
//! numeric string; class labels must additionally be whole numbers.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AqiRegressor, TimeClassifier};
use crate::models::{AqiFeatureVector, TimeFeatureBatch};

// ---

#[derive(Debug, Serialize)]
struct PredictRequest<'a, R: Serialize> {
    dataframe_split: DataFrameSplit<'a, R>,
}

#[derive(Debug, Serialize)]
struct DataFrameSplit<'a, R: Serialize> {
    columns: &'a [&'static str],
    data: Vec<R>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    predictions: Vec<Value>,
}

fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    // ---
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build model HTTP client")
}

/// POST one data frame and return the raw predictions.
async fn post_frame<R: Serialize>(
    client: &reqwest::Client,
    url: &str,
    columns: &[&'static str],
    data: Vec<R>,
) -> Result<Vec<Value>> {
    // ---
    let body = PredictRequest {
        dataframe_split: DataFrameSplit { columns, data },
    };

    tracing::debug!("Posting {} rows to model at {}", body.dataframe_split.data.len(), url);

    let response: PredictResponse = client
        .post(url)
        .json(&body)
        .send()
        .await
        .with_context(|| format!("Model request to {url} failed"))?
        .error_for_status()?
        .json()
        .await
        .context("Model response is not a predictions object")?;

    tracing::debug!("Model at {} returned {:?}", url, response.predictions);
    Ok(response.predictions)
}

/// Read a prediction encoded as a JSON number or a numeric string.
fn parse_number(value: &Value) -> Result<f64> {
    // ---
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number
        .filter(|n| n.is_finite())
        .ok_or_else(|| anyhow!("Prediction {value} is not a number"))
}

/// Read a class label; any numeric encoding of a whole number is accepted.
fn parse_label(value: &Value) -> Result<i64> {
    // ---
    let number = parse_number(value)?;
    if number.fract() != 0.0 {
        return Err(anyhow!("Label {value} is not an integer"));
    }
    Ok(number as i64)
}

/// AQI regressor served over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteRegressor {
    client: reqwest::Client,
    url: String,
}

impl RemoteRegressor {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl AqiRegressor for RemoteRegressor {
    async fn predict(&self, features: &AqiFeatureVector) -> Result<f64> {
        // ---
        let predictions = post_frame(
            &self.client,
            &self.url,
            &AqiFeatureVector::COLUMNS,
            vec![features.as_array()],
        )
        .await?;

        let first = predictions
            .first()
            .ok_or_else(|| anyhow!("Regressor returned no predictions"))?;
        parse_number(first)
    }
}

/// Best-time classifier served over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteClassifier {
    client: reqwest::Client,
    url: String,
}

impl RemoteClassifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl TimeClassifier for RemoteClassifier {
    async fn predict(&self, batch: &TimeFeatureBatch) -> Result<Vec<i64>> {
        // ---
        let rows: Vec<[u64; 4]> = batch.rows().iter().map(|row| row.to_array()).collect();
        let predictions =
            post_frame(&self.client, &self.url, &TimeFeatureBatch::COLUMNS, rows).await?;

        predictions.iter().map(parse_label).collect()
    }
}

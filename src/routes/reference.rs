//! Read-only reference data for clients building input forms.
//!
//! - `GET /cities`: the city list in index order
//! - `GET /aqi/categories`: every severity band with its guidance text

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::{AqiCategory, CITY_NAMES};

// ---

#[derive(Serialize)]
struct CitiesResponse {
    cities: &'static [&'static str],
}

#[derive(Debug, Serialize)]
struct CategoryEntry {
    category: AqiCategory,
    lower: f64,
    /// `None` for the open-ended top band.
    upper: Option<f64>,
    description: &'static str,
    recommendation: &'static str,
}

async fn cities() -> Json<CitiesResponse> {
    Json(CitiesResponse {
        cities: &CITY_NAMES,
    })
}

async fn categories() -> Json<Vec<CategoryEntry>> {
    // ---
    Json(AqiCategory::ALL.iter().map(category_entry).collect())
}

fn category_entry(category: &AqiCategory) -> CategoryEntry {
    // ---
    let (lower, upper) = category.band();
    CategoryEntry {
        category: *category,
        lower,
        upper: upper.is_finite().then_some(upper),
        description: category.description(),
        recommendation: category.recommendation(),
    }
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/cities", get(cities))
        .route("/aqi/categories", get(categories))
}

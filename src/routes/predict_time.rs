use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Local;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::{with_request_id, AppState};
use crate::{pipeline, ForecastWindow, PredictionError, TimeQuery};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/predict/time", post(handler))
}

async fn handler(
    State((models, config)): State<AppState>,
    payload: Result<Json<TimeQuery>, JsonRejection>,
) -> Response {
    // ---
    let request_id = Uuid::new_v4();
    let span = info_span!("predict_time", %request_id);

    async move {
        info!("POST /predict/time - Starting pipeline");

        let query = match payload {
            Ok(Json(query)) => query,
            Err(rejection) => {
                let e = PredictionError::from(rejection);
                warn!("Time request body rejected: {}", e);
                return with_request_id(request_id, e.into_response());
            }
        };
        info!("POST /predict/time - city={} date={}", query.city, query.date);

        // Dates before today are rejected, matching what the form allows
        let window = ForecastWindow {
            earliest: Local::now().date_naive(),
            latest: config.max_forecast_date,
        };

        let response = match pipeline::request_time_prediction(
            models.classifier.as_ref(),
            &query.city,
            query.date,
            window,
        )
        .await
        {
            Ok(result) => {
                info!(
                    "Best time is {} ({})",
                    result.best_time_category, result.season
                );
                Json(result).into_response()
            }
            Err(e) if e.status_code().is_server_error() => {
                error!("Time prediction failed: {}", e);
                e.into_response()
            }
            Err(e) => {
                warn!("Time prediction rejected: {}", e);
                e.into_response()
            }
        };

        with_request_id(request_id, response)
    }
    .instrument(span)
    .await
}

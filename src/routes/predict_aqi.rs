use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::{with_request_id, AppState};
use crate::{pipeline, PollutantReading, PredictionError};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/predict/aqi", post(handler))
}

async fn handler(
    State((models, _config)): State<AppState>,
    payload: Result<Json<PollutantReading>, JsonRejection>,
) -> Response {
    // ---
    let request_id = Uuid::new_v4();
    let span = info_span!("predict_aqi", %request_id);

    async move {
        info!("POST /predict/aqi - Starting pipeline");

        let reading = match payload {
            Ok(Json(reading)) => reading,
            Err(rejection) => {
                let e = PredictionError::from(rejection);
                warn!("AQI request body rejected: {}", e);
                return with_request_id(request_id, e.into_response());
            }
        };
        debug!("POST /predict/aqi - Reading: {:?}", reading);

        let response =
            match pipeline::request_aqi_prediction(models.regressor.as_ref(), &reading).await {
                Ok(result) => {
                    info!(
                        "Predicted AQI {:.2} ({})",
                        result.rounded_value, result.category
                    );
                    Json(result).into_response()
                }
                Err(e) if e.status_code().is_server_error() => {
                    error!("AQI prediction failed: {}", e);
                    e.into_response()
                }
                Err(e) => {
                    warn!("AQI prediction rejected: {}", e);
                    e.into_response()
                }
            };

        with_request_id(request_id, response)
    }
    .instrument(span)
    .await
}

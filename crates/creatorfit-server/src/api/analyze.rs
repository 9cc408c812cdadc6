use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use creatorfit_analysis::{run_analysis, AnalysisError, AnalysisReport, AnalysisRequest};
use creatorfit_linkedin::FetchError;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

/// `POST /api/v1/analyze`: run one creator analysis and return the report.
pub(super) async fn run(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AnalysisReport>>, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        ApiError::new(req_id.0.clone(), "validation_error", rejection.body_text())
    })?;

    tracing::info!(
        request_id = %req_id.0,
        linkedin_url = %request.linkedin_url,
        brand = %request.brand,
        topic = %request.topic,
        "analysis requested"
    );

    match run_analysis(
        state.source.as_ref(),
        state.judge.as_ref(),
        &state.options,
        &request,
    )
    .await
    {
        Ok(report) => Ok(Json(ApiResponse {
            data: report,
            meta: ResponseMeta::new(req_id.0),
        })),
        Err(error) => Err(map_analysis_error(req_id.0, &error)),
    }
}

pub(super) fn map_analysis_error(request_id: String, error: &AnalysisError) -> ApiError {
    match error {
        AnalysisError::InvalidRequest(message) => {
            ApiError::new(request_id, "validation_error", message.clone())
        }
        AnalysisError::Fetch(FetchError::ProfileNotFound { .. } | FetchError::NotFound { .. }) => {
            ApiError::new(request_id, "not_found", error.to_string())
        }
        AnalysisError::Fetch(FetchError::RateLimited { .. }) => {
            tracing::warn!(error = %error, "creator data provider rate limited the analysis");
            ApiError::new(
                request_id,
                "rate_limited",
                "creator data provider is rate limiting; retry later",
            )
        }
        AnalysisError::Fetch(_) | AnalysisError::Judge(_) | AnalysisError::ScoreParse(_) => {
            tracing::error!(error = %error, "analysis failed upstream");
            ApiError::new(request_id, "upstream_error", error.to_string())
        }
    }
}

//! Label generation handlers.

use axum::{
    Json,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::Response,
};
use axum::body::Body;
use tracing::info;

use crate::api::state::AppState;
use crate::domain::LabelRequest;
use crate::error::{AppError, Result};

/// Generate a two-way label sheet (outbound plus return label).
pub async fn create_twoway(
    State(state): State<AppState>,
    Json(request): Json<LabelRequest>,
) -> Result<Response> {
    create_label(&state, &request, true).await
}

/// Generate a one-way label sheet (outbound label only).
pub async fn create_oneway(
    State(state): State<AppState>,
    Json(request): Json<LabelRequest>,
) -> Result<Response> {
    create_label(&state, &request, false).await
}

async fn create_label(state: &AppState, request: &LabelRequest, two_way: bool) -> Result<Response> {
    request.validate().map_err(AppError::BadRequest)?;

    let pdf = state.label_service.create_pdf(request, two_way).await?;

    info!(token = %request.id, two_way, bytes = pdf.len(), "Label PDF generated");

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/pdf"),
        )
        .header(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_static("attachment; filename=\"label.pdf\""),
        )
        .body(Body::from(pdf))
        .map_err(|e| AppError::Internal(format!("failed to build response: {e}")))?;

    Ok(response)
}

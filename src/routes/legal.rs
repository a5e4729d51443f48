use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::legal_dto::{LegalDataResponse, ReviewLegalDataPayload, SubmitLegalDataPayload},
    error::{Error, Result},
    middleware::auth::Claims,
    models::status::UserRole,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/public/candidates/{id}/legal-data",
    params(("id" = Uuid, Path, description = "Candidate ID")),
    request_body = SubmitLegalDataPayload,
    responses(
        (status = 201, description = "Legal data submitted", body = Json<LegalDataResponse>),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Already reviewed")
    )
)]
#[axum::debug_handler]
pub async fn submit_legal_data(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitLegalDataPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state.candidate_service.get_by_id(id).await?;
    let record = state.legal_service.submit(id, payload).await?;
    Ok((StatusCode::CREATED, Json(LegalDataResponse::from(record))))
}

#[utoipa::path(
    get,
    path = "/api/admin/candidates/{id}/legal-data",
    params(("id" = Uuid, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "Legal data", body = Json<LegalDataResponse>),
        (status = 404, description = "No legal data for this candidate")
    )
)]
#[axum::debug_handler]
pub async fn get_legal_data(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let record = state
        .legal_service
        .find_by_candidate(id)
        .await?
        .ok_or_else(|| Error::NotFound("No legal data for this candidate".to_string()))?;
    Ok(Json(LegalDataResponse::from(record)))
}

#[utoipa::path(
    get,
    path = "/api/admin/legal-data/pending",
    responses((status = 200, description = "Records awaiting review"))
)]
#[axum::debug_handler]
pub async fn list_pending_legal_data(
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let records = state.legal_service.list_pending().await?;
    let items: Vec<LegalDataResponse> = records.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

/// One decision per pending record. The candidate's pipeline stage is not
/// touched here; moving the candidate is a separate, explicit action.
#[utoipa::path(
    post,
    path = "/api/admin/candidates/{id}/legal-data/review",
    params(("id" = Uuid, Path, description = "Candidate ID")),
    request_body = ReviewLegalDataPayload,
    responses(
        (status = 200, description = "Review recorded", body = Json<LegalDataResponse>),
        (status = 403, description = "Reviewer role required"),
        (status = 409, description = "Already reviewed")
    )
)]
#[axum::debug_handler]
pub async fn review_legal_data(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReviewLegalDataPayload>,
) -> Result<impl IntoResponse> {
    let allowed = matches!(
        claims.parsed_role(),
        Some(UserRole::Admin) | Some(UserRole::Manager) | Some(UserRole::Juridico)
    );
    if !allowed {
        return Err(Error::Forbidden(
            "Legal review requires an admin, manager or legal role".to_string(),
        ));
    }
    let reviewer = claims
        .user_id()
        .ok_or_else(|| Error::Unauthorized("Token has no user id".to_string()))?;

    let record = state
        .legal_service
        .review(id, payload.decision, reviewer, payload.notes)
        .await?;

    let notification = serde_json::json!({
        "candidate_id": id,
        "decision": record.review_status,
    });
    if let Err(err) = state
        .notification_service
        .enqueue("legal_review_completed", &notification)
        .await
    {
        tracing::warn!(error = ?err, "failed to enqueue legal_review_completed notification");
    }

    Ok(Json(LegalDataResponse::from(record)))
}

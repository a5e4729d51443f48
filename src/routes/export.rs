use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{error::Result, services::export_service::ExportService, AppState};

/// Printable one-sheet summary of a job, rendered in-process.
#[utoipa::path(
    get,
    path = "/api/admin/jobs/{id}/export",
    params(("id" = Uuid, Path, description = "Job ID")),
    responses(
        (status = 200, description = "XLSX summary"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn export_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(id).await?;
    let buffer = ExportService::generate_job_summary_xlsx(&job)?;

    let filename = format!(
        "vaga_{}_{}.xlsx",
        job.title.replace(' ', "_"),
        chrono::Utc::now().format("%Y%m%d")
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}

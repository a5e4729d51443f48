use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::candidate_dto::RegisterCandidatePayload;
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::models::status::{PipelineStage, ReviewStatus};
use crate::utils::validation::is_full_name;

const CANDIDATE_COLUMNS: &str =
    "id, job_id, name, email, phone, resume_url, stage, legal_status, created_at, updated_at";

#[derive(Clone)]
pub struct CandidateService {
    pool: PgPool,
}

impl CandidateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, payload: RegisterCandidatePayload) -> Result<Candidate> {
        if !is_full_name(&payload.name) {
            return Err(Error::BadRequest(
                "Name must include at least first and last name".to_string(),
            ));
        }

        let exists = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM candidates WHERE email = $1 AND job_id IS NOT DISTINCT FROM $2",
        )
        .bind(&payload.email)
        .bind(payload.job_id)
        .fetch_optional(&self.pool)
        .await?;
        if exists.is_some() {
            return Err(Error::Conflict(
                "This email has already applied for this job".to_string(),
            ));
        }

        let sql = format!(
            "INSERT INTO candidates (job_id, name, email, phone, stage)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CANDIDATE_COLUMNS}"
        );
        let candidate = sqlx::query_as::<_, Candidate>(&sql)
            .bind(payload.job_id)
            .bind(&payload.name)
            .bind(&payload.email)
            .bind(&payload.phone)
            .bind(PipelineStage::Cadastrado)
            .fetch_one(&self.pool)
            .await?;
        Ok(candidate)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Candidate> {
        let sql = format!("SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = $1");
        let candidate = sqlx::query_as::<_, Candidate>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(candidate)
    }

    pub async fn list_by_job(&self, job_id: Uuid) -> Result<Vec<Candidate>> {
        let sql = format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE job_id = $1 ORDER BY created_at DESC"
        );
        let candidates = sqlx::query_as::<_, Candidate>(&sql)
            .bind(job_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(candidates)
    }

    pub async fn list_all(&self) -> Result<Vec<Candidate>> {
        let sql = format!("SELECT {CANDIDATE_COLUMNS} FROM candidates ORDER BY created_at DESC");
        let candidates = sqlx::query_as::<_, Candidate>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(candidates)
    }

    /// Moves a candidate along the pipeline. Stages past the legal gate are
    /// only reachable with an approved legal review; the legal review itself
    /// never moves the stage.
    pub async fn update_stage(&self, id: Uuid, stage: PipelineStage) -> Result<Candidate> {
        let candidate = self.get_by_id(id).await?;

        if stage.requires_legal_clearance() && candidate.legal_status != Some(ReviewStatus::Approved)
        {
            return Err(Error::Conflict(format!(
                "Moving to \"{}\" requires an approved legal review",
                stage.label()
            )));
        }

        let sql = format!(
            "UPDATE candidates SET stage = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {CANDIDATE_COLUMNS}"
        );
        let candidate = sqlx::query_as::<_, Candidate>(&sql)
            .bind(id)
            .bind(stage)
            .fetch_one(&self.pool)
            .await?;
        Ok(candidate)
    }

    pub async fn update_resume(&self, id: Uuid, resume_url: String) -> Result<Candidate> {
        let sql = format!(
            "UPDATE candidates SET resume_url = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {CANDIDATE_COLUMNS}"
        );
        let candidate = sqlx::query_as::<_, Candidate>(&sql)
            .bind(id)
            .bind(resume_url)
            .fetch_one(&self.pool)
            .await?;
        Ok(candidate)
    }
}

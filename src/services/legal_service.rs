use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::legal_dto::SubmitLegalDataPayload;
use crate::error::{Error, Result};
use crate::models::legal_data::CandidateLegalData;
use crate::models::status::ReviewStatus;
use crate::utils::time;
use crate::utils::validation::{is_adult, is_valid_cpf};

const LEGAL_COLUMNS: &str = "id, candidate_id, cpf, rg, birth_date, work_history, \
     is_former_employee, former_employee_details, is_pcd, pcd_details, review_status, \
     reviewed_by, reviewed_at, review_notes, created_at, updated_at";

#[derive(Clone)]
pub struct LegalDataService {
    pool: PgPool,
}

impl LegalDataService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Submits (or resubmits) a candidate's compliance record. Resubmission
    /// is only open while the record is pending or after a reviewer asked for
    /// changes; a decided review is final.
    pub async fn submit(
        &self,
        candidate_id: Uuid,
        payload: SubmitLegalDataPayload,
    ) -> Result<CandidateLegalData> {
        Self::validate_payload(&payload)?;

        if let Some(existing) = self.find_by_candidate(candidate_id).await? {
            match existing.review_status {
                ReviewStatus::Pending | ReviewStatus::RequestChanges => {}
                decided => {
                    return Err(Error::Conflict(format!(
                        "Legal data has already been reviewed (current: {})",
                        decided
                    )))
                }
            }
        }

        let cpf_digits: String = payload
            .cpf
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();

        let sql = format!(
            "INSERT INTO candidate_legal_data (
                candidate_id, cpf, rg, birth_date, work_history,
                is_former_employee, former_employee_details, is_pcd, pcd_details,
                review_status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (candidate_id) DO UPDATE SET
                cpf = EXCLUDED.cpf,
                rg = EXCLUDED.rg,
                birth_date = EXCLUDED.birth_date,
                work_history = EXCLUDED.work_history,
                is_former_employee = EXCLUDED.is_former_employee,
                former_employee_details = EXCLUDED.former_employee_details,
                is_pcd = EXCLUDED.is_pcd,
                pcd_details = EXCLUDED.pcd_details,
                review_status = EXCLUDED.review_status,
                reviewed_by = NULL,
                reviewed_at = NULL,
                review_notes = NULL,
                updated_at = NOW()
            RETURNING {LEGAL_COLUMNS}"
        );
        let record = sqlx::query_as::<_, CandidateLegalData>(&sql)
            .bind(candidate_id)
            .bind(cpf_digits)
            .bind(&payload.rg)
            .bind(payload.birth_date)
            .bind(Json(&payload.work_history))
            .bind(payload.is_former_employee)
            .bind(&payload.former_employee_details)
            .bind(payload.is_pcd)
            .bind(&payload.pcd_details)
            .bind(ReviewStatus::Pending)
            .fetch_one(&self.pool)
            .await?;

        sqlx::query(
            "UPDATE candidates SET legal_status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(candidate_id)
        .bind(ReviewStatus::Pending)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn find_by_candidate(
        &self,
        candidate_id: Uuid,
    ) -> Result<Option<CandidateLegalData>> {
        let sql =
            format!("SELECT {LEGAL_COLUMNS} FROM candidate_legal_data WHERE candidate_id = $1");
        let record = sqlx::query_as::<_, CandidateLegalData>(&sql)
            .bind(candidate_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    pub async fn list_pending(&self) -> Result<Vec<CandidateLegalData>> {
        let sql = format!(
            "SELECT {LEGAL_COLUMNS} FROM candidate_legal_data
            WHERE review_status = $1 ORDER BY created_at ASC"
        );
        let records = sqlx::query_as::<_, CandidateLegalData>(&sql)
            .bind(ReviewStatus::Pending)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    /// One review action per pending record. The decision lands on the legal
    /// record and is mirrored into the candidate row; the candidate's
    /// pipeline stage is deliberately left alone; the two state machines
    /// step independently.
    pub async fn review(
        &self,
        candidate_id: Uuid,
        decision: ReviewStatus,
        reviewer: Uuid,
        notes: Option<String>,
    ) -> Result<CandidateLegalData> {
        if decision == ReviewStatus::Pending {
            return Err(Error::BadRequest(
                "A review decision cannot be 'pending'".to_string(),
            ));
        }

        let record = self
            .find_by_candidate(candidate_id)
            .await?
            .ok_or_else(|| Error::NotFound("No legal data for this candidate".to_string()))?;
        if record.review_status != ReviewStatus::Pending {
            return Err(Error::Conflict(format!(
                "Legal data has already been reviewed (current: {})",
                record.review_status
            )));
        }

        let sql = format!(
            "UPDATE candidate_legal_data
            SET review_status = $2, reviewed_by = $3, reviewed_at = NOW(),
                review_notes = $4, updated_at = NOW()
            WHERE candidate_id = $1
            RETURNING {LEGAL_COLUMNS}"
        );
        let record = sqlx::query_as::<_, CandidateLegalData>(&sql)
            .bind(candidate_id)
            .bind(decision)
            .bind(reviewer)
            .bind(notes)
            .fetch_one(&self.pool)
            .await?;

        sqlx::query(
            "UPDATE candidates SET legal_status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(candidate_id)
        .bind(decision)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    fn validate_payload(payload: &SubmitLegalDataPayload) -> Result<()> {
        if !is_valid_cpf(&payload.cpf) {
            return Err(Error::BadRequest("Invalid CPF".to_string()));
        }
        if !is_adult(payload.birth_date, time::today()) {
            return Err(Error::BadRequest(
                "Candidate must be at least 18 years old".to_string(),
            ));
        }
        if payload.is_former_employee
            && payload
                .former_employee_details
                .as_deref()
                .map_or(true, |d| d.trim().is_empty())
        {
            return Err(Error::BadRequest(
                "Former-employee flag requires details".to_string(),
            ));
        }
        if payload.is_pcd
            && payload
                .pcd_details
                .as_deref()
                .map_or(true, |d| d.trim().is_empty())
        {
            return Err(Error::BadRequest("PCD flag requires details".to_string()));
        }
        for entry in &payload.work_history {
            if entry.company.trim().is_empty() || entry.position.trim().is_empty() {
                return Err(Error::BadRequest(
                    "Work history entries need a company and a position".to_string(),
                ));
            }
            if let Some(end) = entry.end_date {
                if entry.start_date > end {
                    return Err(Error::BadRequest(
                        "Work history entry starts after it ends".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

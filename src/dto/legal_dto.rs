use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::legal_data::{CandidateLegalData, WorkHistoryEntry};
use crate::models::status::ReviewStatus;
use crate::utils::validation::{format_cpf, format_rg};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitLegalDataPayload {
    #[validate(length(min = 11))]
    pub cpf: String,
    pub rg: Option<String>,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub work_history: Vec<WorkHistoryEntry>,
    #[serde(default)]
    pub is_former_employee: bool,
    pub former_employee_details: Option<String>,
    #[serde(default)]
    pub is_pcd: bool,
    pub pcd_details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewLegalDataPayload {
    pub decision: ReviewStatus,
    pub notes: Option<String>,
}

/// Response view: identity documents leave the service masked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalDataResponse {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub cpf: String,
    pub rg: Option<String>,
    pub birth_date: NaiveDate,
    pub work_history: Vec<WorkHistoryEntry>,
    pub is_former_employee: bool,
    pub former_employee_details: Option<String>,
    pub is_pcd: bool,
    pub pcd_details: Option<String>,
    pub review_status: ReviewStatus,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<CandidateLegalData> for LegalDataResponse {
    fn from(value: CandidateLegalData) -> Self {
        Self {
            id: value.id,
            candidate_id: value.candidate_id,
            cpf: format_cpf(&value.cpf),
            rg: value.rg.as_deref().map(format_rg),
            birth_date: value.birth_date,
            work_history: value.work_history.0,
            is_former_employee: value.is_former_employee,
            former_employee_details: value.former_employee_details,
            is_pcd: value.is_pcd,
            pcd_details: value.pcd_details,
            review_status: value.review_status,
            reviewed_by: value.reviewed_by,
            reviewed_at: value.reviewed_at,
            review_notes: value.review_notes,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

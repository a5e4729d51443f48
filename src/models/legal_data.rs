use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::status::ReviewStatus;

/// One employment stint in a candidate's declared work history. A missing
/// `end_date` means the position is current.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkHistoryEntry {
    pub company: String,
    pub position: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Compliance record collected once per candidate before the legal gate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateLegalData {
    pub id: Uuid,
    pub candidate_id: Uuid,
    /// Stored as the bare 11 digits; responses carry the display mask.
    pub cpf: String,
    pub rg: Option<String>,
    pub birth_date: NaiveDate,
    pub work_history: Json<Vec<WorkHistoryEntry>>,
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

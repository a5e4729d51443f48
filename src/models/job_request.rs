use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::status::{RequestStatus, TipoSolicitacao};

/// A pre-approval proposal for a job, raised by a non-admin requester and
/// reviewed by a manager before (optionally) being materialized into a job.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRequest {
    pub id: Uuid,
    pub title: String,
    pub department: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub employment_type: Option<String>,
    pub description: Option<String>,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub workload: Option<String>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub quantity: i32,
    pub tipo_solicitacao: Option<TipoSolicitacao>,
    pub nome_substituido: Option<String>,
    pub justification: Option<String>,
    pub status: RequestStatus,
    pub requested_by: Option<Uuid>,
    pub requested_by_name: Option<String>,
    pub notes: Option<String>,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub job_created: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

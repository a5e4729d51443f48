use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::job_request::JobRequest;
use crate::models::status::{RequestStatus, TipoSolicitacao};

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobRequestPayload {
    #[validate(length(min = 1))]
    pub title: String,
    pub department: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub employment_type: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    pub workload: Option<String>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, max = 50))]
    pub quantity: i32,
    pub tipo_solicitacao: Option<TipoSolicitacao>,
    /// Required when the request replaces someone.
    pub nome_substituido: Option<String>,
    #[validate(length(min = 1))]
    pub justification: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApproveRequestPayload {
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RejectRequestPayload {
    #[validate(length(min = 1))]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobRequestListQuery {
    pub status: Option<RequestStatus>,
    pub requested_by: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequestResponse {
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

impl From<JobRequest> for JobRequestResponse {
    fn from(value: JobRequest) -> Self {
        Self {
            id: value.id,
            title: value.title,
            department: value.department,
            city: value.city,
            state: value.state,
            employment_type: value.employment_type,
            description: value.description,
            requirements: value.requirements,
            benefits: value.benefits,
            workload: value.workload,
            salary_min: value.salary_min,
            salary_max: value.salary_max,
            quantity: value.quantity,
            tipo_solicitacao: value.tipo_solicitacao,
            nome_substituido: value.nome_substituido,
            justification: value.justification,
            status: value.status,
            requested_by: value.requested_by,
            requested_by_name: value.requested_by_name,
            notes: value.notes,
            approved_by: value.approved_by,
            approved_at: value.approved_at,
            job_created: value.job_created,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

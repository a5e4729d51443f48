use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::job::Job;
use crate::models::status::{
    ApprovalStatus, FlowStatus, JobStatus, SubmitAction, TipoSolicitacao,
};
use crate::rules::classification::JobStats;
use crate::services::job_service::JobList;

fn default_submit_action() -> SubmitAction {
    SubmitAction::Rascunho
}

fn default_flow_status() -> FlowStatus {
    FlowStatus::Ativa
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPayload {
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
    pub expires_at: Option<NaiveDate>,
    pub solicitante_nome: Option<String>,
    pub solicitante_funcao: Option<String>,
    pub observacoes_internas: Option<String>,
    pub tipo_solicitacao: Option<TipoSolicitacao>,
    pub nome_substituido: Option<String>,
    pub justification: Option<String>,
    #[serde(default = "default_flow_status")]
    pub flow_status: FlowStatus,
    #[serde(default = "default_submit_action")]
    pub submit_action: SubmitAction,
}

/// Partial edit; absent fields keep their stored value. The submit action
/// decides where the edit lands in the approval pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub department: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub employment_type: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub benefits: Option<Vec<String>>,
    pub workload: Option<String>,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    #[validate(range(min = 1, max = 50))]
    pub quantity: Option<i32>,
    pub quantity_filled: Option<i32>,
    pub expires_at: Option<NaiveDate>,
    pub observacoes_internas: Option<String>,
    pub flow_status: Option<FlowStatus>,
    #[serde(default = "default_submit_action")]
    pub submit_action: SubmitAction,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RejectJobPayload {
    #[validate(length(min = 1))]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DeleteJobQuery {
    pub permanent: bool,
    /// Permanent deletes require this second, explicit confirmation.
    pub confirm: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
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
    pub status: JobStatus,
    pub approval_status: ApprovalStatus,
    pub flow_status: FlowStatus,
    pub quantity: i32,
    pub quantity_filled: i32,
    pub expires_at: Option<NaiveDate>,
    pub created_by: Option<Uuid>,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub solicitante_nome: Option<String>,
    pub solicitante_funcao: Option<String>,
    pub observacoes_internas: Option<String>,
    pub tipo_solicitacao: Option<TipoSolicitacao>,
    pub nome_substituido: Option<String>,
    pub justification: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Public listing entry: descriptive fields only, no governance bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPublicSummary {
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
    pub expires_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub items: Vec<JobResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

/// Management view: processed jobs plus the dashboard aggregates computed
/// over the same subset.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedJobsResponse {
    pub items: Vec<JobResponse>,
    pub stats: JobStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPublicListResponse {
    pub items: Vec<JobPublicSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub approval_status: Option<ApprovalStatus>,
    pub flow_status: Option<FlowStatus>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobPublicQuery {
    pub limit: Option<i64>,
}

impl From<Job> for JobResponse {
    fn from(value: Job) -> Self {
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
            status: value.status,
            approval_status: value.approval_status,
            flow_status: value.flow_status,
            quantity: value.quantity,
            quantity_filled: value.quantity_filled,
            expires_at: value.expires_at,
            created_by: value.created_by,
            approved_by: value.approved_by,
            approved_at: value.approved_at,
            rejection_reason: value.rejection_reason,
            solicitante_nome: value.solicitante_nome,
            solicitante_funcao: value.solicitante_funcao,
            observacoes_internas: value.observacoes_internas,
            tipo_solicitacao: value.tipo_solicitacao,
            nome_substituido: value.nome_substituido,
            justification: value.justification,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<Job> for JobPublicSummary {
    fn from(value: Job) -> Self {
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
            expires_at: value.expires_at,
        }
    }
}

impl From<JobList> for JobListResponse {
    fn from(value: JobList) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}

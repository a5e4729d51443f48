use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::status::{ApprovalStatus, FlowStatus, JobStatus, TipoSolicitacao};
use crate::utils::normalization;

/// Title of the protected catch-all job. At most one canonical row is ever
/// surfaced and it is exempt from every delete path.
pub const TALENT_BANK_TITLE: &str = "Banco de Talentos";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
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
    /// Last-good visibility of a live job while an edit sits in re-approval.
    /// Set by the one write path that moves a live job back to
    /// `pending_approval`; cleared on approve/reject.
    pub previous_flow_status: Option<FlowStatus>,
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
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn is_talent_bank(&self) -> bool {
        is_talent_bank_title(&self.title)
    }

    /// Live either by governance state or by coarse lifecycle.
    pub fn is_active(&self) -> bool {
        self.approval_status == ApprovalStatus::Active || self.status == JobStatus::Active
    }

    /// Openings this row represents; legacy rows may carry zero.
    pub fn effective_quantity(&self) -> i64 {
        if self.quantity <= 0 {
            1
        } else {
            self.quantity as i64
        }
    }
}

pub fn is_talent_bank_title(title: &str) -> bool {
    normalization::eq_normalized(title.trim(), TALENT_BANK_TITLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn talent_bank_title_is_case_insensitive() {
        assert!(is_talent_bank_title("Banco de Talentos"));
        assert!(is_talent_bank_title("  banco de talentos "));
        assert!(is_talent_bank_title("BANCO DE TALENTOS"));
        assert!(!is_talent_bank_title("Banco de Talentos SP"));
    }
}

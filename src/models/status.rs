//! Internal status vocabulary.
//!
//! The legacy data this system inherits mixes Portuguese and English status
//! strings with inconsistent casing and accents (`active`/`ativo`,
//! `rascunho`/`draft`, `aprovação_pendente`/`pending_approval`). Every raw
//! string is parsed into one of these enums at the boundary (deserialization
//! or row decode) and only enums are compared from there on. The database
//! stores the canonical snake_case form.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::utils::normalization::normalize_token;

macro_rules! status_serde {
    ($ty:ident, $label:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                $ty::parse(&raw)
                    .ok_or_else(|| de::Error::custom(format!(concat!("unknown ", $label, ": {}"), raw)))
            }
        }
    };
}

/// Governance state of a job or request through the review pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Draft,
    PendingApproval,
    Active,
    Rejected,
    Closed,
}

impl ApprovalStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "draft" | "rascunho" => Some(Self::Draft),
            "pending_approval" | "aprovacao_pendente" => Some(Self::PendingApproval),
            "active" | "ativo" | "ativa" => Some(Self::Active),
            "rejected" | "rejeitado" | "rejeitada" => Some(Self::Rejected),
            "closed" | "encerrada" | "encerrado" => Some(Self::Closed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingApproval => "pending_approval",
            Self::Active => "active",
            Self::Rejected => "rejected",
            Self::Closed => "closed",
        }
    }
}

status_serde!(ApprovalStatus, "approval status");

/// Coarse lifecycle of a job row; mirrors `Active` only on publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum JobStatus {
    Draft,
    Active,
}

impl JobStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "draft" | "rascunho" => Some(Self::Draft),
            "active" | "ativo" | "ativa" => Some(Self::Active),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
        }
    }
}

status_serde!(JobStatus, "job status");

/// Public visibility of a job, independent of approval bookkeeping. Only
/// `ativa` jobs appear on the public listing; `concluida` and `congelada` are
/// terminal visibility states. Canonical forms keep the Portuguese words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum FlowStatus {
    Ativa,
    Concluida,
    Congelada,
}

impl FlowStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "ativa" | "ativo" | "active" => Some(Self::Ativa),
            "concluida" | "concluido" | "completed" => Some(Self::Concluida),
            "congelada" | "congelado" | "frozen" => Some(Self::Congelada),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ativa => "ativa",
            Self::Concluida => "concluida",
            Self::Congelada => "congelada",
        }
    }

    /// Terminal visibility states surface in management views regardless of
    /// approval bookkeeping.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Concluida | Self::Congelada)
    }
}

status_serde!(FlowStatus, "flow status");

/// What the editor asked for when saving a job form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    Rascunho,
    AprovacaoPendente,
    PublicarDireto,
}

impl SubmitAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "rascunho" | "draft" => Some(Self::Rascunho),
            "aprovacao_pendente" | "pending_approval" => Some(Self::AprovacaoPendente),
            "publicar_direto" | "publish_direct" => Some(Self::PublicarDireto),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rascunho => "rascunho",
            Self::AprovacaoPendente => "aprovacao_pendente",
            Self::PublicarDireto => "publicar_direto",
        }
    }
}

status_serde!(SubmitAction, "submit action");

/// Lifecycle of a pre-approval job request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum RequestStatus {
    Pendente,
    Aprovado,
    Rejeitado,
}

impl RequestStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "pendente" | "pending" => Some(Self::Pendente),
            "aprovado" | "approved" => Some(Self::Aprovado),
            "rejeitado" | "rejected" => Some(Self::Rejeitado),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pendente => "pendente",
            Self::Aprovado => "aprovado",
            Self::Rejeitado => "rejeitado",
        }
    }
}

status_serde!(RequestStatus, "request status");

/// Outcome of a legal-data review. Transitions out of `Pending` happen exactly
/// once per review action; `RequestChanges` reopens on resubmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
    RequestChanges,
}

impl ReviewStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "pending" | "pendente" => Some(Self::Pending),
            "approved" | "aprovado" => Some(Self::Approved),
            "rejected" | "rejeitado" => Some(Self::Rejected),
            "request_changes" | "solicitar_alteracoes" => Some(Self::RequestChanges),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::RequestChanges => "request_changes",
        }
    }
}

status_serde!(ReviewStatus, "review status");

/// Ordered hiring pipeline. `ValidacaoTj` is the legal gate: a candidate only
/// moves past it once the legal review is approved. `Reprovado` is the
/// terminal failure stage and is reachable from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum PipelineStage {
    Cadastrado,
    Triagem,
    Entrevista,
    ValidacaoTj,
    Contratado,
    Reprovado,
}

impl PipelineStage {
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "cadastrado" | "registered" => Some(Self::Cadastrado),
            "triagem" | "screening" => Some(Self::Triagem),
            "entrevista" | "interview" => Some(Self::Entrevista),
            "validacao_tj" => Some(Self::ValidacaoTj),
            "contratado" | "hired" => Some(Self::Contratado),
            "reprovado" | "failed" => Some(Self::Reprovado),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cadastrado => "cadastrado",
            Self::Triagem => "triagem",
            Self::Entrevista => "entrevista",
            Self::ValidacaoTj => "validacao_tj",
            Self::Contratado => "contratado",
            Self::Reprovado => "reprovado",
        }
    }

    /// Human label, accents included.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cadastrado => "Cadastrado",
            Self::Triagem => "Triagem",
            Self::Entrevista => "Entrevista",
            Self::ValidacaoTj => "Validação TJ",
            Self::Contratado => "Contratado",
            Self::Reprovado => "Reprovado",
        }
    }

    /// Stages past the legal gate require an approved legal review.
    pub fn requires_legal_clearance(&self) -> bool {
        *self > Self::ValidacaoTj && *self != Self::Reprovado
    }
}

status_serde!(PipelineStage, "pipeline stage");

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    Recruiter,
    Juridico,
}

impl UserRole {
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "admin" => Some(Self::Admin),
            "manager" | "gestor" => Some(Self::Manager),
            "recruiter" | "recrutador" => Some(Self::Recruiter),
            "juridico" | "legal" => Some(Self::Juridico),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Recruiter => "recruiter",
            Self::Juridico => "juridico",
        }
    }
}

status_serde!(UserRole, "user role");

/// Why a position was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum TipoSolicitacao {
    AumentoQuadro,
    Substituicao,
}

impl TipoSolicitacao {
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "aumento_quadro" | "aumento_de_quadro" => Some(Self::AumentoQuadro),
            "substituicao" => Some(Self::Substituicao),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AumentoQuadro => "aumento_quadro",
            Self::Substituicao => "substituicao",
        }
    }
}

status_serde!(TipoSolicitacao, "request type");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_vocabularies() {
        assert_eq!(ApprovalStatus::parse("Ativo"), Some(ApprovalStatus::Active));
        assert_eq!(ApprovalStatus::parse("ACTIVE"), Some(ApprovalStatus::Active));
        assert_eq!(
            ApprovalStatus::parse("Aprovação Pendente"),
            Some(ApprovalStatus::PendingApproval)
        );
        assert_eq!(ApprovalStatus::parse("rejeitado"), Some(ApprovalStatus::Rejected));
        assert_eq!(JobStatus::parse("Rascunho"), Some(JobStatus::Draft));
        assert_eq!(FlowStatus::parse("Concluída"), Some(FlowStatus::Concluida));
        assert_eq!(FlowStatus::parse("CONGELADA"), Some(FlowStatus::Congelada));
        assert_eq!(ApprovalStatus::parse("???"), None);
    }

    #[test]
    fn terminal_flow_states() {
        assert!(FlowStatus::Concluida.is_terminal());
        assert!(FlowStatus::Congelada.is_terminal());
        assert!(!FlowStatus::Ativa.is_terminal());
    }

    #[test]
    fn pipeline_order_and_legal_gate() {
        assert!(PipelineStage::Cadastrado < PipelineStage::ValidacaoTj);
        assert!(PipelineStage::Contratado.requires_legal_clearance());
        assert!(!PipelineStage::ValidacaoTj.requires_legal_clearance());
        assert!(!PipelineStage::Reprovado.requires_legal_clearance());
        assert_eq!(PipelineStage::ValidacaoTj.label(), "Validação TJ");
    }

    #[test]
    fn serde_roundtrip_uses_canonical_form() {
        let parsed: FlowStatus = serde_json::from_str("\"Concluída\"").unwrap();
        assert_eq!(parsed, FlowStatus::Concluida);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"concluida\"");

        let action: SubmitAction = serde_json::from_str("\"publicar_direto\"").unwrap();
        assert_eq!(action, SubmitAction::PublicarDireto);
        assert!(serde_json::from_str::<SubmitAction>("\"nope\"").is_err());
    }
}

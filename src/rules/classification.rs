use chrono::NaiveDate;
use serde::Serialize;

use crate::models::job::Job;
use crate::models::status::{ApprovalStatus, FlowStatus, JobStatus};
use crate::utils::time::business_days_between;

/// Quantity-weighted dashboard aggregates over the processed set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JobStats {
    pub quantity: i64,
    pub filled: i64,
    pub expired: i64,
    pub active: i64,
    pub completed: i64,
    pub frozen: i64,
}

/// Whether a job surfaces in management views.
///
/// Terminal visibility states (`concluida`/`congelada`) always surface, no
/// matter what the approval bookkeeping says, unless the job was rejected.
/// Everything else must be live (approved or publicly ativa) and out of the
/// draft / pending / rejected governance states.
pub fn is_processed(job: &Job) -> bool {
    if job.flow_status.is_terminal() {
        return job.approval_status != ApprovalStatus::Rejected;
    }

    let live = job.approval_status == ApprovalStatus::Active || job.flow_status == FlowStatus::Ativa;
    live
        && job.approval_status != ApprovalStatus::Draft
        && job.status != JobStatus::Draft
        && job.approval_status != ApprovalStatus::PendingApproval
        && job.approval_status != ApprovalStatus::Rejected
}

/// Expiry is measured in business days and never applies to jobs already in a
/// terminal visibility state. A job whose deadline falls today (zero business
/// days remaining) still counts as open.
pub fn is_expired(job: &Job, today: NaiveDate) -> bool {
    if job.flow_status.is_terminal() {
        return false;
    }
    match job.expires_at {
        Some(expires) => business_days_between(today, expires) < 0,
        None => false,
    }
}

/// Collapses duplicate "Banco de Talentos" rows to the single canonical one:
/// an active row wins; failing that, the most recently created. Every other
/// job passes through untouched, in its original order.
pub fn dedupe_talent_bank(jobs: Vec<Job>) -> Vec<Job> {
    let mut canonical: Option<&Job> = None;
    for job in jobs.iter().filter(|j| j.is_talent_bank()) {
        canonical = Some(match canonical {
            None => job,
            Some(best) => {
                if job.is_active() && !best.is_active() {
                    job
                } else if best.is_active() && !job.is_active() {
                    best
                } else if job.created_at > best.created_at {
                    job
                } else {
                    best
                }
            }
        });
    }

    let canonical_id = canonical.map(|j| j.id);
    jobs.into_iter()
        .filter(|j| !j.is_talent_bank() || Some(j.id) == canonical_id)
        .collect()
}

/// The management view: processed subset with the talent bank deduplicated.
pub fn processed_jobs(jobs: Vec<Job>) -> Vec<Job> {
    dedupe_talent_bank(jobs.into_iter().filter(is_processed).collect())
}

/// Aggregates for dashboard tiles. Every contribution is weighted by the
/// job's quantity (default 1), never by row count.
pub fn compute_stats(jobs: &[Job], today: NaiveDate) -> JobStats {
    let mut stats = JobStats::default();
    for job in jobs {
        let qty = job.effective_quantity();
        stats.quantity += qty;
        stats.filled += job.quantity_filled.max(0) as i64;
        if is_expired(job, today) {
            stats.expired += qty;
        }
        match job.flow_status {
            FlowStatus::Ativa => stats.active += qty,
            FlowStatus::Concluida => stats.completed += qty,
            FlowStatus::Congelada => stats.frozen += qty,
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    use crate::models::status::JobStatus;

    fn job(title: &str) -> Job {
        Job {
            id: Uuid::new_v4(),
            title: title.to_string(),
            department: None,
            city: None,
            state: None,
            employment_type: None,
            description: None,
            requirements: vec![],
            benefits: vec![],
            workload: None,
            salary_min: None,
            salary_max: None,
            status: JobStatus::Active,
            approval_status: ApprovalStatus::Active,
            flow_status: FlowStatus::Ativa,
            previous_flow_status: None,
            quantity: 1,
            quantity_filled: 0,
            expires_at: None,
            created_by: None,
            approved_by: None,
            approved_at: None,
            rejection_reason: None,
            solicitante_nome: None,
            solicitante_funcao: None,
            observacoes_internas: None,
            tipo_solicitacao: None,
            nome_substituido: None,
            justification: None,
            deleted_at: None,
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn terminal_flow_surfaces_despite_pending_approval() {
        let mut j = job("Analista");
        j.flow_status = FlowStatus::Concluida;
        j.approval_status = ApprovalStatus::PendingApproval;
        j.status = JobStatus::Draft;
        assert!(is_processed(&j));
    }

    #[test]
    fn terminal_flow_hidden_when_rejected() {
        let mut j = job("Analista");
        j.flow_status = FlowStatus::Concluida;
        j.approval_status = ApprovalStatus::Rejected;
        assert!(!is_processed(&j));
    }

    #[test]
    fn pending_and_draft_jobs_are_not_processed() {
        let mut pending = job("Pendente");
        pending.approval_status = ApprovalStatus::PendingApproval;
        pending.status = JobStatus::Draft;
        assert!(!is_processed(&pending));

        let mut draft = job("Rascunho");
        draft.approval_status = ApprovalStatus::Draft;
        draft.status = JobStatus::Draft;
        draft.flow_status = FlowStatus::Ativa;
        assert!(!is_processed(&draft));
    }

    #[test]
    fn terminal_jobs_never_expire() {
        let mut j = job("Encerrada");
        j.flow_status = FlowStatus::Congelada;
        j.expires_at = Some(date(2020, 1, 2));
        assert!(!is_expired(&j, date(2026, 8, 7)));
    }

    #[test]
    fn expiring_today_is_not_expired() {
        let today = date(2026, 8, 7);
        let mut j = job("Hoje");
        j.expires_at = Some(today);
        assert!(!is_expired(&j, today));

        // One business day past the deadline.
        j.expires_at = Some(date(2026, 8, 6));
        assert!(is_expired(&j, today));
    }

    #[test]
    fn weekend_between_does_not_expire() {
        // Deadline Friday, checked Saturday: zero business days elapsed.
        let mut j = job("Sexta");
        j.expires_at = Some(date(2026, 8, 7));
        assert!(!is_expired(&j, date(2026, 8, 8)));
        // Checked Monday: one business day past.
        assert!(is_expired(&j, date(2026, 8, 10)));
    }

    #[test]
    fn dedup_prefers_active_talent_bank() {
        let earlier = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut active = job("Banco de Talentos");
        active.created_at = Some(earlier);

        let mut draft = job("banco de talentos");
        draft.approval_status = ApprovalStatus::Draft;
        draft.status = JobStatus::Draft;
        draft.created_at = Some(earlier + Duration::days(30));

        let active_id = active.id;
        let kept = dedupe_talent_bank(vec![draft, active]);
        let banks: Vec<_> = kept.iter().filter(|j| j.is_talent_bank()).collect();
        assert_eq!(banks.len(), 1);
        assert_eq!(banks[0].id, active_id);
    }

    #[test]
    fn dedup_falls_back_to_most_recent() {
        let earlier = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut old = job("Banco de Talentos");
        old.approval_status = ApprovalStatus::Draft;
        old.status = JobStatus::Draft;
        old.created_at = Some(earlier);

        let mut recent = old.clone();
        recent.id = Uuid::new_v4();
        recent.created_at = Some(earlier + Duration::days(5));

        let recent_id = recent.id;
        let kept = dedupe_talent_bank(vec![old, recent]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, recent_id);
    }

    #[test]
    fn dedup_leaves_other_jobs_alone() {
        let jobs = vec![job("Analista"), job("Analista"), job("Motorista")];
        assert_eq!(dedupe_talent_bank(jobs).len(), 3);
    }

    #[test]
    fn stats_weight_by_quantity() {
        let today = date(2026, 8, 7);
        let mut a = job("Atendente");
        a.quantity = 3;
        a.quantity_filled = 2;
        let b = job("Motorista");

        let stats = compute_stats(&[a, b], today);
        assert_eq!(stats.active, 4);
        assert_eq!(stats.quantity, 4);
        assert_eq!(stats.filled, 2);
        assert_eq!(stats.expired, 0);
    }

    #[test]
    fn stats_default_missing_quantity_to_one() {
        let today = date(2026, 8, 7);
        let mut legacy = job("Legada");
        legacy.quantity = 0;
        legacy.flow_status = FlowStatus::Concluida;

        let stats = compute_stats(&[legacy], today);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.quantity, 1);
    }
}

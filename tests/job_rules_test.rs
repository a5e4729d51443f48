use chrono::{Duration, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use rh_backend::models::job::Job;
use rh_backend::models::status::{ApprovalStatus, FlowStatus, JobStatus, SubmitAction};
use rh_backend::rules::approval::{next_state, reject_outcome, PriorState, RejectOutcome};
use rh_backend::rules::classification::{compute_stats, is_expired, processed_jobs};
use rh_backend::rules::scoping::{scope_jobs, ReviewerScope};

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
        created_at: Some(Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()),
        updated_at: None,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn completed_job_surfaces_unless_rejected() {
    let mut pending_but_done = job("Auxiliar");
    pending_but_done.flow_status = FlowStatus::Concluida;
    pending_but_done.approval_status = ApprovalStatus::PendingApproval;
    pending_but_done.status = JobStatus::Draft;

    let mut rejected_and_done = job("Auxiliar");
    rejected_and_done.flow_status = FlowStatus::Concluida;
    rejected_and_done.approval_status = ApprovalStatus::Rejected;

    let kept_id = pending_but_done.id;
    let kept = processed_jobs(vec![pending_but_done, rejected_and_done]);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id, kept_id);
}

#[test]
fn expiry_ignores_weekends_and_terminal_states() {
    // 2026-08-07 is a Friday.
    let friday = date(2026, 8, 7);

    let mut expires_today = job("Vendedor");
    expires_today.expires_at = Some(friday);
    assert!(!is_expired(&expires_today, friday));

    // Next Monday: the Friday deadline is one business day behind.
    assert!(is_expired(&expires_today, date(2026, 8, 10)));
    // Saturday: no business day has passed yet.
    assert!(!is_expired(&expires_today, date(2026, 8, 8)));

    let mut frozen = job("Vendedor");
    frozen.flow_status = FlowStatus::Congelada;
    frozen.expires_at = Some(date(2020, 1, 1));
    assert!(!is_expired(&frozen, friday));
}

#[test]
fn stats_sum_quantities_not_rows() {
    let mut triple = job("Atendente");
    triple.quantity = 3;
    let single = job("Motorista");

    let stats = compute_stats(&[triple, single], date(2026, 8, 7));
    assert_eq!(stats.active, 4);
    assert_eq!(stats.quantity, 4);
}

#[test]
fn talent_bank_dedup_prefers_active_then_most_recent() {
    let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

    // Active earlier row beats a later draft.
    let mut active = job("Banco de Talentos");
    active.created_at = Some(base);
    let mut draft = job("Banco de Talentos");
    draft.approval_status = ApprovalStatus::Draft;
    draft.status = JobStatus::Draft;
    draft.created_at = Some(base + Duration::days(10));

    let active_id = active.id;
    let kept = processed_jobs(vec![draft, active]);
    let banks: Vec<_> = kept.iter().filter(|j| j.is_talent_bank()).collect();
    assert_eq!(banks.len(), 1);
    assert_eq!(banks[0].id, active_id);
}

#[test]
fn recruiter_scope_filters_by_state_and_city() {
    let mut sp_capital = job("Analista");
    sp_capital.state = Some("SP".to_string());
    sp_capital.city = Some("São Paulo".to_string());

    let mut sp_interior = job("Analista");
    sp_interior.state = Some("SP".to_string());
    sp_interior.city = Some("Campinas".to_string());

    let mut rj = job("Analista");
    rj.state = Some("RJ".to_string());
    rj.city = Some("Rio de Janeiro".to_string());

    // State-only scope: every SP job regardless of city.
    let state_scope = ReviewerScope::new(&["sp".to_string()], &[]);
    let visible = scope_jobs(
        vec![sp_capital.clone(), sp_interior.clone(), rj.clone()],
        &state_scope,
    );
    assert_eq!(visible.len(), 2);

    // State+city scope: intersection only, accents ignored.
    let city_scope = ReviewerScope::new(&["SP".to_string()], &["Sao Paulo".to_string()]);
    let visible = scope_jobs(vec![sp_capital, sp_interior, rj], &city_scope);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].city.as_deref(), Some("São Paulo"));
}

#[test]
fn saving_live_job_as_draft_forces_reapproval() {
    let live = PriorState {
        approval_status: ApprovalStatus::Active,
        status: JobStatus::Active,
        flow_status: FlowStatus::Ativa,
        previous_flow_status: None,
    };
    let next = next_state(Some(live), SubmitAction::Rascunho, FlowStatus::Ativa);
    assert_eq!(next.approval_status, ApprovalStatus::PendingApproval);
    assert_eq!(next.status, JobStatus::Draft);
    assert_eq!(next.previous_flow_status, Some(FlowStatus::Ativa));

    // Rejecting that edit restores the last-good visibility.
    let pending = PriorState {
        approval_status: next.approval_status,
        status: next.status,
        flow_status: next.flow_status,
        previous_flow_status: next.previous_flow_status,
    };
    assert_eq!(
        reject_outcome(pending),
        RejectOutcome::RestoreLastGood(FlowStatus::Ativa)
    );
}

#[test]
fn rejecting_fresh_submission_marks_it_rejected() {
    let fresh = next_state(None, SubmitAction::AprovacaoPendente, FlowStatus::Ativa);
    let pending = PriorState {
        approval_status: fresh.approval_status,
        status: fresh.status,
        flow_status: fresh.flow_status,
        previous_flow_status: fresh.previous_flow_status,
    };
    assert_eq!(reject_outcome(pending), RejectOutcome::MarkRejected);
}

use crate::models::job::Job;
use crate::models::status::{ApprovalStatus, FlowStatus, JobStatus, SubmitAction};

/// The `(approval_status, status, flow_status)` tuple a submission resolves
/// to, plus the last-good flow to persist while an edit waits for review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleState {
    pub approval_status: ApprovalStatus,
    pub status: JobStatus,
    pub flow_status: FlowStatus,
    /// `Some` exactly when a live job entered re-approval: the visibility to
    /// restore if the edit is rejected.
    pub previous_flow_status: Option<FlowStatus>,
}

/// Snapshot of a job's lifecycle fields before an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorState {
    pub approval_status: ApprovalStatus,
    pub status: JobStatus,
    pub flow_status: FlowStatus,
    pub previous_flow_status: Option<FlowStatus>,
}

impl PriorState {
    pub fn of(job: &Job) -> Self {
        Self {
            approval_status: job.approval_status,
            status: job.status,
            flow_status: job.flow_status,
            previous_flow_status: job.previous_flow_status,
        }
    }

    fn is_active(&self) -> bool {
        self.approval_status == ApprovalStatus::Active || self.status == JobStatus::Active
    }
}

/// Resolves what a form submission does to a job's lifecycle fields.
///
/// Priority order, first applicable rule wins:
/// 1. An explicit send-to-approval always lands in `pending_approval`.
/// 2. Editing a live job lands in `pending_approval` unless the actor
///    explicitly republishes.
/// 3. Reactivating a frozen job lands in `pending_approval`.
/// 4. Direct publish goes straight to `active` (the route gates this to
///    privileged roles).
/// 5. Brand-new jobs map the action directly.
///
/// When a live job enters re-approval the row keeps the edit's requested
/// flow, and the flow it was last approved with is recorded in
/// `previous_flow_status` so a rejection can restore it.
pub fn next_state(
    prior: Option<PriorState>,
    action: SubmitAction,
    requested_flow: FlowStatus,
) -> LifecycleState {
    match prior {
        Some(prior) => {
            let last_good = if prior.is_active() {
                // A pending edit that is edited again keeps the flow recorded
                // by the first submission.
                Some(prior.previous_flow_status.unwrap_or(prior.flow_status))
            } else {
                prior.previous_flow_status
            };
            let pending = LifecycleState {
                approval_status: ApprovalStatus::PendingApproval,
                status: JobStatus::Draft,
                flow_status: requested_flow,
                previous_flow_status: last_good,
            };

            if action == SubmitAction::AprovacaoPendente {
                return pending;
            }
            if prior.is_active() && action != SubmitAction::PublicarDireto {
                return pending;
            }
            if prior.flow_status == FlowStatus::Congelada && requested_flow == FlowStatus::Ativa {
                return pending;
            }
            if action == SubmitAction::PublicarDireto {
                return LifecycleState {
                    approval_status: ApprovalStatus::Active,
                    status: JobStatus::Active,
                    flow_status: requested_flow,
                    previous_flow_status: None,
                };
            }
            // A draft edit of a non-live job stays a draft.
            LifecycleState {
                approval_status: ApprovalStatus::Draft,
                status: JobStatus::Draft,
                flow_status: requested_flow,
                previous_flow_status: prior.previous_flow_status,
            }
        }
        None => {
            let (approval_status, status) = match action {
                SubmitAction::Rascunho => (ApprovalStatus::Draft, JobStatus::Draft),
                SubmitAction::AprovacaoPendente => {
                    (ApprovalStatus::PendingApproval, JobStatus::Draft)
                }
                SubmitAction::PublicarDireto => (ApprovalStatus::Active, JobStatus::Active),
            };
            LifecycleState {
                approval_status,
                status,
                flow_status: requested_flow,
                previous_flow_status: None,
            }
        }
    }
}

/// What rejecting a pending job does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectOutcome {
    /// The submission was an edit of a live job: drop the pending edit state
    /// and restore the last-good visibility; the job is not marked rejected.
    RestoreLastGood(FlowStatus),
    /// A brand-new submission: mark it rejected (a reason is mandatory).
    MarkRejected,
}

pub fn reject_outcome(prior: PriorState) -> RejectOutcome {
    match prior.previous_flow_status {
        Some(flow) => RejectOutcome::RestoreLastGood(flow),
        None => RejectOutcome::MarkRejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prior(
        approval_status: ApprovalStatus,
        status: JobStatus,
        flow_status: FlowStatus,
    ) -> PriorState {
        PriorState {
            approval_status,
            status,
            flow_status,
            previous_flow_status: None,
        }
    }

    #[test]
    fn explicit_send_to_approval_wins() {
        let next = next_state(
            Some(prior(ApprovalStatus::Active, JobStatus::Active, FlowStatus::Ativa)),
            SubmitAction::AprovacaoPendente,
            FlowStatus::Ativa,
        );
        assert_eq!(next.approval_status, ApprovalStatus::PendingApproval);
        assert_eq!(next.status, JobStatus::Draft);
        assert_eq!(next.previous_flow_status, Some(FlowStatus::Ativa));
    }

    #[test]
    fn editing_live_job_requires_reapproval_even_as_draft() {
        // "Save draft" on a live job still forces re-approval.
        let next = next_state(
            Some(prior(ApprovalStatus::Active, JobStatus::Active, FlowStatus::Ativa)),
            SubmitAction::Rascunho,
            FlowStatus::Ativa,
        );
        assert_eq!(next.approval_status, ApprovalStatus::PendingApproval);
        assert_eq!(next.status, JobStatus::Draft);
        assert_eq!(next.previous_flow_status, Some(FlowStatus::Ativa));
    }

    #[test]
    fn pending_edit_records_requested_flow() {
        // Freezing a live job goes through review; the row carries the
        // requested flow while the last-good one is kept for a restore.
        let next = next_state(
            Some(prior(ApprovalStatus::Active, JobStatus::Active, FlowStatus::Ativa)),
            SubmitAction::AprovacaoPendente,
            FlowStatus::Congelada,
        );
        assert_eq!(next.flow_status, FlowStatus::Congelada);
        assert_eq!(next.previous_flow_status, Some(FlowStatus::Ativa));
    }

    #[test]
    fn republishing_live_job_skips_reapproval() {
        let next = next_state(
            Some(prior(ApprovalStatus::Active, JobStatus::Active, FlowStatus::Ativa)),
            SubmitAction::PublicarDireto,
            FlowStatus::Ativa,
        );
        assert_eq!(next.approval_status, ApprovalStatus::Active);
        assert_eq!(next.status, JobStatus::Active);
        assert_eq!(next.previous_flow_status, None);
    }

    #[test]
    fn unfreezing_requires_reapproval() {
        let next = next_state(
            Some(prior(ApprovalStatus::Closed, JobStatus::Draft, FlowStatus::Congelada)),
            SubmitAction::Rascunho,
            FlowStatus::Ativa,
        );
        assert_eq!(next.approval_status, ApprovalStatus::PendingApproval);
        assert_eq!(next.status, JobStatus::Draft);
    }

    #[test]
    fn new_jobs_map_action_directly() {
        let draft = next_state(None, SubmitAction::Rascunho, FlowStatus::Ativa);
        assert_eq!(draft.approval_status, ApprovalStatus::Draft);
        assert_eq!(draft.status, JobStatus::Draft);

        let pending = next_state(None, SubmitAction::AprovacaoPendente, FlowStatus::Ativa);
        assert_eq!(pending.approval_status, ApprovalStatus::PendingApproval);
        assert_eq!(pending.status, JobStatus::Draft);

        let published = next_state(None, SubmitAction::PublicarDireto, FlowStatus::Ativa);
        assert_eq!(published.approval_status, ApprovalStatus::Active);
        assert_eq!(published.status, JobStatus::Active);
    }

    #[test]
    fn rejecting_edit_restores_last_good_flow() {
        let pending_edit = PriorState {
            approval_status: ApprovalStatus::PendingApproval,
            status: JobStatus::Draft,
            flow_status: FlowStatus::Congelada,
            previous_flow_status: Some(FlowStatus::Ativa),
        };
        assert_eq!(
            reject_outcome(pending_edit),
            RejectOutcome::RestoreLastGood(FlowStatus::Ativa)
        );
    }

    #[test]
    fn rejecting_new_submission_marks_rejected() {
        let brand_new = PriorState {
            approval_status: ApprovalStatus::PendingApproval,
            status: JobStatus::Draft,
            flow_status: FlowStatus::Ativa,
            previous_flow_status: None,
        };
        assert_eq!(reject_outcome(brand_new), RejectOutcome::MarkRejected);
    }

    #[test]
    fn resubmitted_edit_keeps_original_last_good() {
        // Edit goes to review, is edited again before the review happens:
        // the recorded last-good flow survives the second submission.
        let pending_edit = PriorState {
            approval_status: ApprovalStatus::PendingApproval,
            status: JobStatus::Draft,
            flow_status: FlowStatus::Congelada,
            previous_flow_status: Some(FlowStatus::Ativa),
        };
        let next = next_state(
            Some(pending_edit),
            SubmitAction::AprovacaoPendente,
            FlowStatus::Congelada,
        );
        assert_eq!(next.previous_flow_status, Some(FlowStatus::Ativa));
    }
}

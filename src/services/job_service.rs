use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::ListCache;
use crate::dto::job_dto::{CreateJobPayload, JobListQuery, UpdateJobPayload};
use crate::error::{Error, Result};
use crate::models::job::Job;
use crate::models::status::{ApprovalStatus, FlowStatus, JobStatus};
use crate::rules::approval::{next_state, reject_outcome, PriorState, RejectOutcome};
use crate::rules::classification::{compute_stats, is_expired, processed_jobs, JobStats};
use crate::rules::scoping::{scope_jobs, ReviewerScope};
use crate::utils::time;

const JOB_COLUMNS: &str = "id, title, department, city, state, employment_type, description, \
     requirements, benefits, workload, salary_min, salary_max, status, approval_status, \
     flow_status, previous_flow_status, quantity, quantity_filled, expires_at, created_by, \
     approved_by, approved_at, rejection_reason, solicitante_nome, solicitante_funcao, \
     observacoes_internas, tipo_solicitacao, nome_substituido, justification, deleted_at, \
     created_at, updated_at";

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
    cache: ListCache,
}

pub struct JobList {
    pub items: Vec<Job>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl JobService {
    pub fn new(pool: PgPool, cache: ListCache) -> Self {
        Self { pool, cache }
    }

    pub async fn create(&self, payload: CreateJobPayload, actor: Option<Uuid>) -> Result<Job> {
        let next = next_state(None, payload.submit_action, payload.flow_status);

        let sql = format!(
            "INSERT INTO jobs (
                title, department, city, state, employment_type, description,
                requirements, benefits, workload, salary_min, salary_max,
                status, approval_status, flow_status, quantity, expires_at,
                created_by, solicitante_nome, solicitante_funcao, observacoes_internas,
                tipo_solicitacao, nome_substituido, justification
            ) VALUES (
                $1, $2, $3, $4, $5, $6,
                $7, $8, $9, $10, $11,
                $12, $13, $14, $15, $16,
                $17, $18, $19, $20,
                $21, $22, $23
            )
            RETURNING {JOB_COLUMNS}"
        );

        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(&payload.title)
            .bind(&payload.department)
            .bind(&payload.city)
            .bind(&payload.state)
            .bind(&payload.employment_type)
            .bind(&payload.description)
            .bind(&payload.requirements)
            .bind(&payload.benefits)
            .bind(&payload.workload)
            .bind(payload.salary_min)
            .bind(payload.salary_max)
            .bind(next.status)
            .bind(next.approval_status)
            .bind(next.flow_status)
            .bind(payload.quantity)
            .bind(payload.expires_at)
            .bind(actor)
            .bind(&payload.solicitante_nome)
            .bind(&payload.solicitante_funcao)
            .bind(&payload.observacoes_internas)
            .bind(payload.tipo_solicitacao)
            .bind(&payload.nome_substituido)
            .bind(&payload.justification)
            .fetch_one(&self.pool)
            .await?;

        self.cache.invalidate_prefix("jobs:");
        Ok(job)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1 AND deleted_at IS NULL");
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(job)
    }

    /// Applies an edit through the re-approval rules. The lifecycle fields
    /// are always written explicitly: this is the one path that records
    /// `previous_flow_status` when a live job goes back under review.
    pub async fn submit_edit(&self, id: Uuid, payload: UpdateJobPayload) -> Result<Job> {
        let current = self.get_by_id(id).await?;
        let prior = PriorState::of(&current);
        let requested_flow = payload.flow_status.unwrap_or(current.flow_status);
        let next = next_state(Some(prior), payload.submit_action, requested_flow);

        let sql = format!(
            "UPDATE jobs
            SET
                title = COALESCE($2, title),
                department = COALESCE($3, department),
                city = COALESCE($4, city),
                state = COALESCE($5, state),
                employment_type = COALESCE($6, employment_type),
                description = COALESCE($7, description),
                requirements = COALESCE($8, requirements),
                benefits = COALESCE($9, benefits),
                workload = COALESCE($10, workload),
                salary_min = COALESCE($11, salary_min),
                salary_max = COALESCE($12, salary_max),
                quantity = COALESCE($13, quantity),
                quantity_filled = COALESCE($14, quantity_filled),
                expires_at = COALESCE($15, expires_at),
                observacoes_internas = COALESCE($16, observacoes_internas),
                status = $17,
                approval_status = $18,
                flow_status = $19,
                previous_flow_status = $20,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {JOB_COLUMNS}"
        );

        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .bind(&payload.title)
            .bind(&payload.department)
            .bind(&payload.city)
            .bind(&payload.state)
            .bind(&payload.employment_type)
            .bind(&payload.description)
            .bind(&payload.requirements)
            .bind(&payload.benefits)
            .bind(&payload.workload)
            .bind(payload.salary_min)
            .bind(payload.salary_max)
            .bind(payload.quantity)
            .bind(payload.quantity_filled)
            .bind(payload.expires_at)
            .bind(&payload.observacoes_internas)
            .bind(next.status)
            .bind(next.approval_status)
            .bind(next.flow_status)
            .bind(next.previous_flow_status)
            .fetch_one(&self.pool)
            .await?;

        self.cache.invalidate_prefix("jobs:");
        Ok(job)
    }

    pub async fn approve(&self, id: Uuid, approver: Uuid) -> Result<Job> {
        let current = self.get_by_id(id).await?;
        if current.approval_status != ApprovalStatus::PendingApproval {
            return Err(Error::Conflict(format!(
                "Job is not pending approval (current: {})",
                current.approval_status
            )));
        }

        let sql = format!(
            "UPDATE jobs
            SET approval_status = $2, status = $3, previous_flow_status = NULL,
                rejection_reason = NULL, approved_by = $4, approved_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {JOB_COLUMNS}"
        );
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .bind(ApprovalStatus::Active)
            .bind(JobStatus::Active)
            .bind(approver)
            .fetch_one(&self.pool)
            .await?;

        self.cache.invalidate_prefix("jobs:");
        Ok(job)
    }

    /// Rejects a pending submission. An edit of a live job is rolled back to
    /// its last-good visibility instead of being marked rejected; a brand-new
    /// submission is marked rejected with the mandatory reason.
    pub async fn reject(&self, id: Uuid, reason: &str) -> Result<Job> {
        let current = self.get_by_id(id).await?;
        if current.approval_status != ApprovalStatus::PendingApproval {
            return Err(Error::Conflict(format!(
                "Job is not pending approval (current: {})",
                current.approval_status
            )));
        }

        let job = match reject_outcome(PriorState::of(&current)) {
            RejectOutcome::RestoreLastGood(flow) => {
                let sql = format!(
                    "UPDATE jobs
                    SET approval_status = $2, status = $3, flow_status = $4,
                        previous_flow_status = NULL, updated_at = NOW()
                    WHERE id = $1
                    RETURNING {JOB_COLUMNS}"
                );
                sqlx::query_as::<_, Job>(&sql)
                    .bind(id)
                    .bind(ApprovalStatus::Active)
                    .bind(JobStatus::Active)
                    .bind(flow)
                    .fetch_one(&self.pool)
                    .await?
            }
            RejectOutcome::MarkRejected => {
                let sql = format!(
                    "UPDATE jobs
                    SET approval_status = $2, status = $3, rejection_reason = $4,
                        updated_at = NOW()
                    WHERE id = $1
                    RETURNING {JOB_COLUMNS}"
                );
                sqlx::query_as::<_, Job>(&sql)
                    .bind(id)
                    .bind(ApprovalStatus::Rejected)
                    .bind(JobStatus::Draft)
                    .bind(reason)
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        self.cache.invalidate_prefix("jobs:");
        Ok(job)
    }

    pub async fn list(&self, query: JobListQuery) -> Result<JobList> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let mut filters = vec!["deleted_at IS NULL".to_string()];
        let mut args: Vec<String> = Vec::new();

        if let Some(approval_status) = query.approval_status {
            filters.push(format!("approval_status = ${}", args.len() + 1));
            args.push(approval_status.as_str().to_string());
        }
        if let Some(flow_status) = query.flow_status {
            filters.push(format!("flow_status = ${}", args.len() + 1));
            args.push(flow_status.as_str().to_string());
        }
        if let Some(state) = query.state {
            filters.push(format!("state ILIKE ${}", args.len() + 1));
            args.push(state);
        }
        if let Some(city) = query.city {
            filters.push(format!("city ILIKE ${}", args.len() + 1));
            args.push(city);
        }
        if let Some(search) = query.search {
            let first = args.len() + 1;
            let second = first + 1;
            filters.push(format!(
                "(title ILIKE ${} OR department ILIKE ${})",
                first, second
            ));
            args.push(format!("%{}%", search.clone()));
            args.push(format!("%{}%", search));
        }

        let where_clause = format!("WHERE {}", filters.join(" AND "));

        let items_query = format!(
            "SELECT {JOB_COLUMNS} FROM jobs {} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
            where_clause,
            args.len() + 1,
            args.len() + 2
        );
        let total_query = format!("SELECT COUNT(*) FROM jobs {}", where_clause);

        let mut items_statement = sqlx::query_as::<_, Job>(&items_query);
        for value in &args {
            items_statement = items_statement.bind(value);
        }
        items_statement = items_statement.bind(per_page).bind(offset);
        let items = items_statement.fetch_all(&self.pool).await?;

        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &args {
            total_statement = total_statement.bind(value);
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        let total_pages = ((total as f64) / (per_page as f64)).ceil() as i64;

        Ok(JobList {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    /// Management view: classification rules plus talent-bank dedup, narrowed
    /// to the reviewer's territory, with quantity-weighted aggregates over
    /// the same subset.
    pub async fn list_processed(
        &self,
        scope: &ReviewerScope,
    ) -> Result<(Vec<Job>, JobStats)> {
        let key = format!("jobs:processed:{}", scope.fingerprint());
        let today = time::today();
        if let Some(jobs) = self.cache.get::<Vec<Job>>(&key) {
            let stats = compute_stats(&jobs, today);
            return Ok((jobs, stats));
        }

        let jobs = self.fetch_all().await?;
        let jobs = scope_jobs(processed_jobs(jobs), scope);
        self.cache.put(&key, &jobs);

        let stats = compute_stats(&jobs, today);
        Ok((jobs, stats))
    }

    /// Publicly visible jobs: approved, flow ativa, not expired, talent bank
    /// collapsed to its canonical row.
    pub async fn list_public(&self, limit: i64) -> Result<Vec<Job>> {
        let limit = if limit <= 0 { 20 } else { limit.min(100) } as usize;
        let key = "jobs:public";
        let today = time::today();

        let jobs = match self.cache.get::<Vec<Job>>(key) {
            Some(jobs) => jobs,
            None => {
                let jobs = self.fetch_all().await?;
                let jobs: Vec<Job> = processed_jobs(jobs)
                    .into_iter()
                    .filter(|j| {
                        j.approval_status == ApprovalStatus::Active
                            && j.flow_status == FlowStatus::Ativa
                    })
                    .collect();
                self.cache.put(key, &jobs);
                jobs
            }
        };

        Ok(jobs
            .into_iter()
            .filter(|j| !is_expired(j, today))
            .take(limit)
            .collect())
    }

    pub async fn dashboard_stats(&self, scope: &ReviewerScope) -> Result<JobStats> {
        let (_, stats) = self.list_processed(scope).await?;
        Ok(stats)
    }

    /// Soft delete: the row stays recoverable. The talent bank never goes
    /// through any delete path.
    pub async fn soft_delete(&self, id: Uuid) -> Result<()> {
        let job = self.get_by_id(id).await?;
        if job.is_talent_bank() {
            return Err(Error::Forbidden(
                "The talent bank job cannot be deleted".to_string(),
            ));
        }

        sqlx::query("UPDATE jobs SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.cache.invalidate_prefix("jobs:");
        Ok(())
    }

    /// Permanent removal, only with the explicit confirmation flag.
    pub async fn purge(&self, id: Uuid, confirmed: bool) -> Result<()> {
        if !confirmed {
            return Err(Error::BadRequest(
                "Permanent deletion requires explicit confirmation".to_string(),
            ));
        }
        let sql = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
        let job = sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        if job.is_talent_bank() {
            return Err(Error::Forbidden(
                "The talent bank job cannot be deleted".to_string(),
            ));
        }

        sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.cache.invalidate_prefix("jobs:");
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Job>> {
        let sql = format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE deleted_at IS NULL ORDER BY created_at DESC"
        );
        let jobs = sqlx::query_as::<_, Job>(&sql).fetch_all(&self.pool).await?;
        Ok(jobs)
    }
}

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::cache::{InflightGuard, ListCache};
use crate::dto::job_request_dto::{CreateJobRequestPayload, JobRequestListQuery};
use crate::error::{Error, Result};
use crate::models::job::Job;
use crate::models::job_request::JobRequest;
use crate::models::status::{ApprovalStatus, FlowStatus, JobStatus, RequestStatus};

const REQUEST_COLUMNS: &str = "id, title, department, city, state, employment_type, description, \
     requirements, benefits, workload, salary_min, salary_max, quantity, tipo_solicitacao, \
     nome_substituido, justification, status, requested_by, requested_by_name, notes, \
     approved_by, approved_at, job_created, created_at, updated_at";

#[derive(Clone)]
pub struct JobRequestService {
    pool: PgPool,
    cache: ListCache,
    inflight: InflightGuard,
}

impl JobRequestService {
    pub fn new(pool: PgPool, cache: ListCache, inflight: InflightGuard) -> Self {
        Self {
            pool,
            cache,
            inflight,
        }
    }

    pub async fn create(
        &self,
        payload: CreateJobRequestPayload,
        requested_by: Option<Uuid>,
        requested_by_name: Option<String>,
    ) -> Result<JobRequest> {
        let sql = format!(
            "INSERT INTO job_requests (
                title, department, city, state, employment_type, description,
                requirements, benefits, workload, salary_min, salary_max, quantity,
                tipo_solicitacao, nome_substituido, justification,
                status, requested_by, requested_by_name
            ) VALUES (
                $1, $2, $3, $4, $5, $6,
                $7, $8, $9, $10, $11, $12,
                $13, $14, $15,
                $16, $17, $18
            )
            RETURNING {REQUEST_COLUMNS}"
        );

        let request = sqlx::query_as::<_, JobRequest>(&sql)
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
            .bind(payload.tipo_solicitacao)
            .bind(&payload.nome_substituido)
            .bind(&payload.justification)
            .bind(RequestStatus::Pendente)
            .bind(requested_by)
            .bind(requested_by_name)
            .fetch_one(&self.pool)
            .await?;

        self.cache.invalidate_prefix("requests:");
        Ok(request)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<JobRequest> {
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM job_requests WHERE id = $1");
        let request = sqlx::query_as::<_, JobRequest>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(request)
    }

    pub async fn list(&self, query: JobRequestListQuery) -> Result<Vec<JobRequest>> {
        let mut filters = Vec::new();
        let mut idx = 0;
        if query.status.is_some() {
            idx += 1;
            filters.push(format!("status = ${idx}"));
        }
        if query.requested_by.is_some() {
            idx += 1;
            filters.push(format!("requested_by = ${idx}"));
        }
        let where_clause = if filters.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", filters.join(" AND "))
        };
        let sql = format!(
            "SELECT {REQUEST_COLUMNS} FROM job_requests {} ORDER BY created_at DESC",
            where_clause
        );

        let mut statement = sqlx::query_as::<_, JobRequest>(&sql);
        if let Some(status) = query.status {
            statement = statement.bind(status);
        }
        if let Some(requested_by) = query.requested_by {
            statement = statement.bind(requested_by);
        }
        let requests = statement.fetch_all(&self.pool).await?;
        Ok(requests)
    }

    pub async fn approve(&self, id: Uuid, approver: Uuid, notes: Option<String>) -> Result<JobRequest> {
        let current = self.get_by_id(id).await?;
        if current.status != RequestStatus::Pendente {
            return Err(Error::Conflict(format!(
                "Request has already been reviewed (current: {})",
                current.status
            )));
        }

        let sql = format!(
            "UPDATE job_requests
            SET status = $2, approved_by = $3, approved_at = NOW(),
                notes = COALESCE($4, notes), updated_at = NOW()
            WHERE id = $1
            RETURNING {REQUEST_COLUMNS}"
        );
        let request = sqlx::query_as::<_, JobRequest>(&sql)
            .bind(id)
            .bind(RequestStatus::Aprovado)
            .bind(approver)
            .bind(notes)
            .fetch_one(&self.pool)
            .await?;

        self.cache.invalidate_prefix("requests:");
        Ok(request)
    }

    pub async fn reject(&self, id: Uuid, reviewer: Uuid, notes: String) -> Result<JobRequest> {
        let current = self.get_by_id(id).await?;
        if current.status != RequestStatus::Pendente {
            return Err(Error::Conflict(format!(
                "Request has already been reviewed (current: {})",
                current.status
            )));
        }

        let sql = format!(
            "UPDATE job_requests
            SET status = $2, approved_by = $3, notes = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {REQUEST_COLUMNS}"
        );
        let request = sqlx::query_as::<_, JobRequest>(&sql)
            .bind(id)
            .bind(RequestStatus::Rejeitado)
            .bind(reviewer)
            .bind(notes)
            .fetch_one(&self.pool)
            .await?;

        self.cache.invalidate_prefix("requests:");
        Ok(request)
    }

    /// Materializes a job from an already-approved request. One transaction,
    /// all-or-nothing; the in-flight key rejects a concurrent duplicate
    /// click before any row is touched.
    pub async fn create_job_from_request(&self, id: Uuid, actor: Uuid) -> Result<Job> {
        let _key = self
            .inflight
            .try_acquire(&format!("request:{id}"))
            .ok_or_else(|| {
                Error::Conflict("This request is already being processed".to_string())
            })?;

        let mut tx = self.pool.begin().await?;
        let request = Self::lock_request(&mut tx, id).await?;
        if request.status != RequestStatus::Aprovado {
            return Err(Error::Conflict(
                "Only approved requests can be turned into jobs".to_string(),
            ));
        }
        if request.job_created {
            return Err(Error::Conflict(
                "A job has already been created from this request".to_string(),
            ));
        }

        let job = Self::insert_job(&mut tx, &request, actor).await?;
        Self::mark_job_created(&mut tx, id).await?;
        tx.commit().await?;

        self.cache.invalidate_prefix("jobs:");
        self.cache.invalidate_prefix("requests:");
        Ok(job)
    }

    /// Approves a pending request and materializes the job in the same
    /// transaction.
    pub async fn approve_and_create_job(
        &self,
        id: Uuid,
        approver: Uuid,
        approval_notes: Option<String>,
    ) -> Result<(JobRequest, Job)> {
        let _key = self
            .inflight
            .try_acquire(&format!("request:{id}"))
            .ok_or_else(|| {
                Error::Conflict("This request is already being processed".to_string())
            })?;

        let mut tx = self.pool.begin().await?;
        let request = Self::lock_request(&mut tx, id).await?;
        if request.status != RequestStatus::Pendente {
            return Err(Error::Conflict(format!(
                "Request has already been reviewed (current: {})",
                request.status
            )));
        }

        let sql = format!(
            "UPDATE job_requests
            SET status = $2, approved_by = $3, approved_at = NOW(),
                notes = COALESCE($4, notes), updated_at = NOW()
            WHERE id = $1
            RETURNING {REQUEST_COLUMNS}"
        );
        let request = sqlx::query_as::<_, JobRequest>(&sql)
            .bind(id)
            .bind(RequestStatus::Aprovado)
            .bind(approver)
            .bind(approval_notes)
            .fetch_one(&mut *tx)
            .await?;

        let job = Self::insert_job(&mut tx, &request, approver).await?;
        Self::mark_job_created(&mut tx, id).await?;
        tx.commit().await?;

        self.cache.invalidate_prefix("jobs:");
        self.cache.invalidate_prefix("requests:");
        Ok((request, job))
    }

    async fn lock_request(tx: &mut Transaction<'_, Postgres>, id: Uuid) -> Result<JobRequest> {
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM job_requests WHERE id = $1 FOR UPDATE");
        let request = sqlx::query_as::<_, JobRequest>(&sql)
            .bind(id)
            .fetch_one(&mut **tx)
            .await?;
        Ok(request)
    }

    async fn insert_job(
        tx: &mut Transaction<'_, Postgres>,
        request: &JobRequest,
        actor: Uuid,
    ) -> Result<Job> {
        let sql = "INSERT INTO jobs (
                title, department, city, state, employment_type, description,
                requirements, benefits, workload, salary_min, salary_max,
                status, approval_status, flow_status, quantity,
                created_by, approved_by, approved_at, solicitante_nome,
                tipo_solicitacao, nome_substituido, justification
            ) VALUES (
                $1, $2, $3, $4, $5, $6,
                $7, $8, $9, $10, $11,
                $12, $13, $14, $15,
                $16, $17, NOW(), $18,
                $19, $20, $21
            )
            RETURNING id, title, department, city, state, employment_type, description, \
                requirements, benefits, workload, salary_min, salary_max, status, \
                approval_status, flow_status, previous_flow_status, quantity, quantity_filled, \
                expires_at, created_by, approved_by, approved_at, rejection_reason, \
                solicitante_nome, solicitante_funcao, observacoes_internas, tipo_solicitacao, \
                nome_substituido, justification, deleted_at, created_at, updated_at";

        let job = sqlx::query_as::<_, Job>(sql)
            .bind(&request.title)
            .bind(&request.department)
            .bind(&request.city)
            .bind(&request.state)
            .bind(&request.employment_type)
            .bind(&request.description)
            .bind(&request.requirements)
            .bind(&request.benefits)
            .bind(&request.workload)
            .bind(request.salary_min)
            .bind(request.salary_max)
            .bind(JobStatus::Active)
            .bind(ApprovalStatus::Active)
            .bind(FlowStatus::Ativa)
            .bind(request.quantity)
            .bind(request.requested_by)
            .bind(actor)
            .bind(&request.requested_by_name)
            .bind(request.tipo_solicitacao)
            .bind(&request.nome_substituido)
            .bind(&request.justification)
            .fetch_one(&mut **tx)
            .await?;
        Ok(job)
    }

    async fn mark_job_created(tx: &mut Transaction<'_, Postgres>, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE job_requests SET job_created = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}

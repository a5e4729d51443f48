use reqwest::Client;
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::error::Result;
use crate::models::notification_log::NotificationLog;
use crate::utils::crypto::sign_payload;

const LOG_COLUMNS: &str = "id, event_type, payload, target_url, http_status, response_body, \
     attempts, max_attempts, next_retry_at, status, created_at, updated_at";

/// Outbound side effects (emails, pushes, user-provisioning relays) go
/// through a queue drained by a background worker. Enqueueing is the only
/// thing primary operations wait for; delivery failures stay in the log.
#[derive(Clone)]
pub struct NotificationService {
    pool: PgPool,
    client: Client,
    target_url: String,
}

impl NotificationService {
    pub fn new(pool: PgPool, target_url: String) -> Self {
        Self {
            pool,
            client: Client::new(),
            target_url,
        }
    }

    pub async fn enqueue(&self, event_type: &str, payload: &JsonValue) -> Result<NotificationLog> {
        let sql = format!(
            "INSERT INTO notification_logs (event_type, payload, target_url, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING {LOG_COLUMNS}"
        );
        let row = sqlx::query_as::<_, NotificationLog>(&sql)
            .bind(event_type)
            .bind(payload)
            .bind(&self.target_url)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn deliver_once(&self, log_id: Uuid) -> Result<()> {
        let sql = format!("SELECT {LOG_COLUMNS} FROM notification_logs WHERE id = $1");
        let log = sqlx::query_as::<_, NotificationLog>(&sql)
            .bind(log_id)
            .fetch_one(&self.pool)
            .await?;

        let body = serde_json::to_vec(&log.payload)?;
        let secret = &crate::config::get_config().notification_secret;
        let signature = sign_payload(secret, &body);

        let res = self
            .client
            .post(&log.target_url)
            .header("X-Signature", signature)
            .header("X-Event-Type", log.event_type.clone())
            .json(&log.payload)
            .send()
            .await;
        match res {
            Ok(resp) => {
                let status = resp.status().as_u16() as i32;
                let body = resp.text().await.unwrap_or_default();
                sqlx::query(
                    "UPDATE notification_logs
                    SET http_status = $1, response_body = $2,
                        status = CASE WHEN $1 BETWEEN 200 AND 299 THEN 'success' ELSE 'failed' END,
                        attempts = attempts + 1, updated_at = NOW()
                    WHERE id = $3",
                )
                .bind(status)
                .bind(body)
                .bind(log.id)
                .execute(&self.pool)
                .await?;
            }
            Err(err) => {
                sqlx::query(
                    "UPDATE notification_logs
                    SET response_body = $1, status = 'failed',
                        attempts = attempts + 1, updated_at = NOW()
                    WHERE id = $2",
                )
                .bind(format!("{}", err))
                .bind(log.id)
                .execute(&self.pool)
                .await?;
            }
        }
        Ok(())
    }

    /// Picks one due pending entry and delivers it. Returns whether any work
    /// was found; failed deliveries are rescheduled with exponential backoff
    /// until the attempt budget runs out.
    pub async fn run_once(&self) -> Result<bool> {
        let row_opt = sqlx::query(
            "SELECT id FROM notification_logs
             WHERE status = 'pending' AND (next_retry_at IS NULL OR next_retry_at <= NOW())
             ORDER BY created_at ASC
             FOR UPDATE SKIP LOCKED
             LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row_opt else { return Ok(false) };
        let id: Uuid = row.try_get("id")?;

        let _ = self.deliver_once(id).await;

        let row2 = sqlx::query(
            "SELECT attempts, max_attempts, status FROM notification_logs WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        let attempts: i32 = row2.try_get("attempts")?;
        let max_attempts: i32 = row2.try_get("max_attempts")?;
        let status: String = row2.try_get("status")?;

        if status == "failed" && attempts < max_attempts {
            sqlx::query(
                "UPDATE notification_logs
                 SET status = 'pending',
                     next_retry_at = NOW() + make_interval(secs => LEAST(3600, 30 * power(2::float, GREATEST(0, attempts-1))::int))
                 WHERE id = $1",
            )
            .bind(id)
            .execute(&self.pool)
            .await?;
        }

        Ok(true)
    }
}

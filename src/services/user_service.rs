use chrono::Duration;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::user_dto::CreateUserPayload;
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::rh_user::RhUser;
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::time;
use crate::utils::token::generate_temp_password;

const USER_COLUMNS: &str = "id, name, email, role, password_hash, assigned_states, \
     assigned_cities, is_active, created_at, updated_at";

const TEMP_PASSWORD_LEN: usize = 16;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Provisions a user with a generated temporary password. The plaintext
    /// is returned only so the caller can hand it to the notification relay.
    pub async fn create(&self, payload: CreateUserPayload) -> Result<(RhUser, String)> {
        let exists = sqlx::query_scalar::<_, Uuid>("SELECT id FROM rh_users WHERE email = $1")
            .bind(&payload.email)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_some() {
            return Err(Error::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }

        let temp_password = generate_temp_password(TEMP_PASSWORD_LEN);
        let password_hash = hash_password(&temp_password)
            .map_err(|e| Error::Internal(format!("Password hashing failed: {e}")))?;

        let sql = format!(
            "INSERT INTO rh_users (name, email, role, password_hash, assigned_states, assigned_cities)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, RhUser>(&sql)
            .bind(&payload.name)
            .bind(&payload.email)
            .bind(payload.role)
            .bind(password_hash)
            .bind(&payload.assigned_states)
            .bind(&payload.assigned_cities)
            .fetch_one(&self.pool)
            .await?;

        Ok((user, temp_password))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<RhUser> {
        let sql = format!("SELECT {USER_COLUMNS} FROM rh_users WHERE id = $1");
        let user = sqlx::query_as::<_, RhUser>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<RhUser>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM rh_users ORDER BY created_at DESC");
        let users = sqlx::query_as::<_, RhUser>(&sql).fetch_all(&self.pool).await?;
        Ok(users)
    }

    /// Replaces the user's password with a fresh temporary one; same
    /// plaintext-for-the-relay contract as [`create`](Self::create).
    pub async fn reset_password(&self, id: Uuid) -> Result<(RhUser, String)> {
        let temp_password = generate_temp_password(TEMP_PASSWORD_LEN);
        let password_hash = hash_password(&temp_password)
            .map_err(|e| Error::Internal(format!("Password hashing failed: {e}")))?;

        let sql = format!(
            "UPDATE rh_users SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, RhUser>(&sql)
            .bind(id)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await?;

        Ok((user, temp_password))
    }

    pub async fn deactivate(&self, id: Uuid) -> Result<RhUser> {
        let sql = format!(
            "UPDATE rh_users SET is_active = FALSE, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, RhUser>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<(RhUser, String)> {
        let sql = format!("SELECT {USER_COLUMNS} FROM rh_users WHERE email = $1");
        let user = sqlx::query_as::<_, RhUser>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::Unauthorized("Invalid credentials".to_string()))?;

        if !user.is_active {
            return Err(Error::Unauthorized("Account is deactivated".to_string()));
        }
        let ok = verify_password(password, &user.password_hash)
            .map_err(|_| Error::Unauthorized("Invalid credentials".to_string()))?;
        if !ok {
            return Err(Error::Unauthorized("Invalid credentials".to_string()));
        }

        let config = crate::config::get_config();
        let expires = time::now() + Duration::hours(config.jwt_ttl_hours);
        let claims = Claims {
            sub: user.id.to_string(),
            exp: expires.timestamp() as usize,
            role: Some(user.role.as_str().to_string()),
            name: Some(user.name.clone()),
            assigned_states: Some(user.assigned_states.clone()),
            assigned_cities: Some(user.assigned_cities.clone()),
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| Error::Internal(format!("Token signing failed: {e}")))?;

        Ok((user, token))
    }
}

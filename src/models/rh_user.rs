use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::status::UserRole;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RhUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Recruiter scoping: empty list on a dimension means no restriction on
    /// that dimension.
    pub assigned_states: Vec<String>,
    pub assigned_cities: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

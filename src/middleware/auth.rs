use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::models::status::UserRole;
use crate::rules::scoping::ReviewerScope;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
    pub name: Option<String>,
    pub assigned_states: Option<Vec<String>>,
    pub assigned_cities: Option<Vec<String>>,
}

impl Claims {
    pub fn user_id(&self) -> Option<uuid::Uuid> {
        self.sub.parse().ok()
    }

    pub fn parsed_role(&self) -> Option<UserRole> {
        self.role.as_deref().and_then(UserRole::parse)
    }

    /// Recruiters see only their territory; every other role is unscoped.
    pub fn reviewer_scope(&self) -> ReviewerScope {
        if self.parsed_role() != Some(UserRole::Recruiter) {
            return ReviewerScope::default();
        }
        ReviewerScope::new(
            self.assigned_states.as_deref().unwrap_or(&[]),
            self.assigned_cities.as_deref().unwrap_or(&[]),
        )
    }
}

fn unauthorized(code: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": code }))).into_response()
}

fn decode_claims(req: &Request) -> Result<Claims, Response> {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return Err(unauthorized("missing_authorization"));
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err(unauthorized("bad_authorization"));
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err(unauthorized("unsupported_scheme"));
    };

    let config = crate::config::get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| unauthorized("invalid_token"))
}

/// Any authenticated HR user.
pub async fn require_staff(mut req: Request, next: Next) -> Response {
    match decode_claims(&req) {
        Ok(claims) => {
            if claims.parsed_role().is_none() {
                return (StatusCode::FORBIDDEN, Json(json!({"error":"forbidden"}))).into_response();
            }
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(resp) => resp,
    }
}

/// Admins and managers only (approvals, user provisioning).
pub async fn require_admin_or_manager(mut req: Request, next: Next) -> Response {
    match decode_claims(&req) {
        Ok(claims) => {
            let allowed = matches!(
                claims.parsed_role(),
                Some(UserRole::Admin) | Some(UserRole::Manager)
            );
            if !allowed {
                return (StatusCode::FORBIDDEN, Json(json!({"error":"forbidden"}))).into_response();
            }
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(resp) => resp,
    }
}

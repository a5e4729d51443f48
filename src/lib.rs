pub mod cache;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod rules;
pub mod services;
pub mod utils;

use std::time::Duration;

use sqlx::PgPool;

use crate::cache::{InflightGuard, ListCache};
use crate::services::{
    audit_service::AuditService, candidate_service::CandidateService,
    job_request_service::JobRequestService, job_service::JobService,
    legal_service::LegalDataService, location_service::LocationService,
    notification_service::NotificationService, user_service::UserService,
};

const LIST_CACHE_TTL: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub cache: ListCache,
    pub job_service: JobService,
    pub job_request_service: JobRequestService,
    pub candidate_service: CandidateService,
    pub legal_service: LegalDataService,
    pub user_service: UserService,
    pub notification_service: NotificationService,
    pub location_service: LocationService,
    pub audit_service: AuditService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();
        let cache = ListCache::new(LIST_CACHE_TTL);
        let inflight = InflightGuard::new();

        let job_service = JobService::new(pool.clone(), cache.clone());
        let job_request_service =
            JobRequestService::new(pool.clone(), cache.clone(), inflight);
        let candidate_service = CandidateService::new(pool.clone());
        let legal_service = LegalDataService::new(pool.clone());
        let user_service = UserService::new(pool.clone());
        let notification_service =
            NotificationService::new(pool.clone(), config.notification_webhook_url.clone());
        let location_service = LocationService::new(config.ibge_base_url.clone());
        let audit_service = AuditService::new(pool.clone());

        Self {
            pool,
            cache,
            job_service,
            job_request_service,
            candidate_service,
            legal_service,
            user_service,
            notification_service,
            location_service,
            audit_service,
        }
    }
}

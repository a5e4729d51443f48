pub mod audit_service;
pub mod candidate_service;
pub mod export_service;
pub mod job_request_service;
pub mod job_service;
pub mod legal_service;
pub mod location_service;
pub mod notification_service;
pub mod user_service;

pub mod candidate;
pub mod export;
pub mod health;
pub mod job;
pub mod job_request;
pub mod legal;
pub mod location;
pub mod user;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use rh_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::{auth, rate_limit},
    routes, AppState,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    {
        let state = app_state.clone();
        tokio::spawn(async move {
            loop {
                match state.notification_service.run_once().await {
                    Ok(true) => {}
                    Ok(false) => {
                        tokio::time::sleep(Duration::from_millis(1000)).await;
                    }
                    Err(e) => {
                        tracing::error!(error = ?e, "Notification worker error");
                        tokio::time::sleep(Duration::from_secs(2)).await;
                    }
                }
            }
        });
    }

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let public_api = Router::new()
        .route("/api/auth/login", post(routes::user::login))
        .route("/api/public/jobs", get(routes::job::list_public_jobs))
        .route("/api/public/jobs/:id", get(routes::job::get_public_job))
        .route(
            "/api/public/candidates",
            post(routes::candidate::register_candidate),
        )
        .route(
            "/api/public/candidates/:id/resume",
            post(routes::candidate::upload_resume),
        )
        .route(
            "/api/public/candidates/:id/legal-data",
            post(routes::legal::submit_legal_data),
        )
        .route(
            "/api/public/locations/states",
            get(routes::location::list_states),
        )
        .route(
            "/api/public/locations/states/:uf/cities",
            get(routes::location::list_cities),
        )
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RateLimiter::new("public", config.public_rps),
            rate_limit::rps_middleware,
        ));

    let staff_api = Router::new()
        .route(
            "/api/admin/jobs",
            get(routes::job::list_jobs).post(routes::job::create_job),
        )
        .route(
            "/api/admin/jobs/processed",
            get(routes::job::list_processed_jobs),
        )
        .route(
            "/api/admin/dashboard/stats",
            get(routes::job::dashboard_stats),
        )
        .route(
            "/api/admin/jobs/:id",
            get(routes::job::get_job)
                .patch(routes::job::update_job)
                .delete(routes::job::delete_job),
        )
        .route("/api/admin/jobs/:id/export", get(routes::export::export_job))
        .route(
            "/api/admin/job-requests",
            get(routes::job_request::list_requests).post(routes::job_request::create_request),
        )
        .route(
            "/api/admin/job-requests/:id",
            get(routes::job_request::get_request),
        )
        .route(
            "/api/admin/candidates",
            get(routes::candidate::list_candidates),
        )
        .route(
            "/api/admin/candidates/:id",
            get(routes::candidate::get_candidate),
        )
        .route(
            "/api/admin/candidates/:id/stage",
            post(routes::candidate::update_candidate_stage),
        )
        .route(
            "/api/admin/candidates/:id/legal-data",
            get(routes::legal::get_legal_data),
        )
        .route(
            "/api/admin/candidates/:id/legal-data/review",
            post(routes::legal::review_legal_data),
        )
        .route(
            "/api/admin/legal-data/pending",
            get(routes::legal::list_pending_legal_data),
        )
        .layer(axum::middleware::from_fn(auth::require_staff))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RateLimiter::new("staff", config.admin_rps),
            rate_limit::rps_middleware,
        ));

    let manager_api = Router::new()
        .route("/api/admin/jobs/:id/approve", post(routes::job::approve_job))
        .route("/api/admin/jobs/:id/reject", post(routes::job::reject_job))
        .route(
            "/api/admin/job-requests/:id/approve",
            post(routes::job_request::approve_request),
        )
        .route(
            "/api/admin/job-requests/:id/reject",
            post(routes::job_request::reject_request),
        )
        .route(
            "/api/admin/job-requests/:id/create-job",
            post(routes::job_request::create_job_from_request),
        )
        .route(
            "/api/admin/job-requests/:id/approve-and-create-job",
            post(routes::job_request::approve_and_create_job),
        )
        .route(
            "/api/admin/users",
            get(routes::user::list_users).post(routes::user::create_user),
        )
        .route(
            "/api/admin/users/:id/reset-password",
            post(routes::user::reset_password),
        )
        .route(
            "/api/admin/users/:id/deactivate",
            post(routes::user::deactivate_user),
        )
        .layer(axum::middleware::from_fn(auth::require_admin_or_manager))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::RateLimiter::new("manager", config.admin_rps),
            rate_limit::rps_middleware,
        ));

    info!("Serving uploads from: {}", config.uploads_dir);

    let app = base_routes
        .merge(public_api)
        .merge(staff_api)
        .merge(manager_api)
        .nest_service(
            "/uploads",
            tower_http::services::ServeDir::new(&config.uploads_dir),
        )
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! Readspace Server - Library Management System

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use readspace_server::{
    api,
    config::AppConfig,
    repository::Repository,
    scheduler::{PgJobQueue, SchedulerWorker},
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("readspace_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Readspace Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository, job queue and services
    let repository = Repository::new(pool.clone());
    let job_queue = PgJobQueue::new(pool);
    let services = Services::new(
        repository,
        Arc::new(job_queue.clone()),
        config.auth.clone(),
        config.reservation.clone(),
    );

    // Ensure the initial admin account exists
    services
        .users
        .ensure_admin_account()
        .await
        .expect("Failed to create initial admin account");

    // Start the scheduler worker
    SchedulerWorker::new(
        job_queue,
        services.reservations.clone(),
        config.scheduler.clone(),
    )
    .spawn();

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        .route("/auth/profile", put(api::auth::update_profile))
        // Users
        .route("/users", get(api::users::list_users))
        .route("/users", post(api::users::create_user))
        .route("/users/:id", get(api::users::get_user))
        .route("/users/:id", put(api::users::update_user))
        .route("/users/:id", delete(api::users::delete_user))
        // Seats
        .route("/seats", get(api::seats::list_seats))
        .route("/seats", post(api::seats::create_seat))
        .route("/seats/:id", get(api::seats::get_seat))
        .route("/seats/:id", put(api::seats::update_seat))
        .route("/seats/:id", delete(api::seats::delete_seat))
        // Reservations
        .route("/reserve", post(api::reservations::reserve))
        .route(
            "/notifications/:id/respond",
            post(api::reservations::respond),
        )
        .route(
            "/releasebystaff/:seat_id",
            put(api::reservations::release_by_staff),
        )
        // Notifications
        .route("/notifications", get(api::notifications::overview))
        .route("/notifications/pending", get(api::notifications::pending))
        .route("/notifications/:id/read", put(api::notifications::mark_read))
        // Books & borrow requests
        .route("/books", get(api::books::list_books))
        .route("/books", post(api::books::create_book))
        .route("/books/:id", get(api::books::get_book))
        .route("/books/:id", put(api::books::update_book))
        .route("/books/:id", delete(api::books::delete_book))
        .route("/books/:id/request", post(api::books::request_borrow))
        .route("/requests", get(api::books::list_requests))
        .route("/requests/:id", put(api::books::decide_request))
        // Announcements
        .route("/announcements", get(api::announcements::list))
        .route("/announcements", post(api::announcements::create))
        .route("/announcements/:id", put(api::announcements::update))
        .route("/announcements/:id", delete(api::announcements::delete))
        // Community Q&A
        .route("/questions", get(api::questions::list))
        .route("/questions", post(api::questions::create))
        .route("/questions/:id", get(api::questions::get_detail))
        .route("/questions/:id/answers", post(api::questions::answer))
        // Support tickets
        .route("/tickets", get(api::tickets::list))
        .route("/tickets", post(api::tickets::create))
        .route("/tickets/:id", put(api::tickets::update))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

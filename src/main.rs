mod model;
mod server;

use tracing_subscriber::EnvFilter;

use crate::server::{config::Config, error::AppError, router, scheduler::maintenance, startup};

const DEFAULT_LOG_FILTER: &str = "studybuddy=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let state = startup::build_state(&config, db, http_client);

    // Start session maintenance scheduler
    let scheduler_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = maintenance::start_scheduler(scheduler_state).await {
            tracing::error!("Maintenance scheduler error: {}", e);
        }
    });

    let app = router::router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;

    tracing::info!("Starting server on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

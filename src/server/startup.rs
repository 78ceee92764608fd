use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    error::AppError,
    service::{auth::jwt::JwtService, calendar::CalendarService, email::EmailService},
    state::AppState,
};

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then runs
/// all pending SeaORM migrations so the schema is up to date before any request is served.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for outgoing email API calls.
///
/// Redirects are not followed.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Assembles the shared application state from configuration.
pub fn build_state(
    config: &Config,
    db: DatabaseConnection,
    http_client: reqwest::Client,
) -> AppState {
    if config.resend_api_key.is_none() {
        tracing::warn!("RESEND_API_KEY not set, emails will be logged instead of sent");
    }

    let jwt = JwtService::new(&config.jwt_secret, config.jwt_expires_in_days);
    let email = EmailService::new(
        http_client,
        config.resend_api_key.clone(),
        config.email_from.clone(),
    );
    let calendar = CalendarService::new(
        config.google_client_id.as_deref(),
        config.google_client_secret.as_deref(),
    );

    AppState::new(db, jwt, email, calendar)
}

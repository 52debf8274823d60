use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use todoflow::config::ServerConfig;
use todoflow::web::create_axum_router;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(ServerConfig::from_env()?);

    let db_pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!().run(&db_pool).await?;

    let app = create_axum_router(db_pool, config.clone());

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!("TodoFlow HTTP server listening on {}", config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

//! Naboopay gateway server.
//!
//! Loads configuration from the environment, selects the order store and
//! serves the checkout, gateway and webhook routes.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use naboopay_gateway::adapters::http::{app_router, serve, shutdown_signal, PaymentAppState};
use naboopay_gateway::adapters::{
    InMemoryOrderStore, NaboopayAdapter, NaboopayConfig, PostgresOrderStore,
};
use naboopay_gateway::config::{AppConfig, DatabaseConfig};
use naboopay_gateway::observability::{init_tracing, LoggingConfig};
use naboopay_gateway::ports::OrderStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&LoggingConfig::from_server(&config.server));

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }

    if !config.gateway.has_webhook_secret() {
        tracing::warn!("No webhook secret configured; Naboopay notifications will be refused");
    }
    if !config.gateway.enabled {
        tracing::warn!("Naboopay gateway is disabled; checkout requests will be refused");
    }

    let order_store: Arc<dyn OrderStore> = match &config.database {
        Some(database) => Arc::new(connect_order_store(database).await?),
        None => {
            tracing::warn!("No database configured; orders are kept in memory only");
            Arc::new(InMemoryOrderStore::new())
        }
    };

    let payment_provider = Arc::new(NaboopayAdapter::new(NaboopayConfig::from_gateway(
        &config.gateway,
    ))?);

    let state = PaymentAppState::new(order_store, payment_provider, config.gateway.clone());
    let app = app_router(state, config.server.request_timeout());

    let listener = TcpListener::bind(config.server.socket_addr()?).await?;
    serve(listener, app, shutdown_signal()).await?;

    Ok(())
}

async fn connect_order_store(
    database: &DatabaseConfig,
) -> Result<PostgresOrderStore, Box<dyn std::error::Error>> {
    let pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .connect(&database.url)
        .await?;

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    tracing::info!(max_connections = database.max_connections, "Connected to PostgreSQL");
    Ok(PostgresOrderStore::new(pool))
}

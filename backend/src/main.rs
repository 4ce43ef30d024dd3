//! User service entry-point: loads settings, connects to MongoDB, and serves
//! the REST endpoints, health probes, and OpenAPI docs.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::WrapErr;
use ortho_config::OrthoConfig;
use tracing::{info, info_span, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use user_service::inbound::http::health::HealthState;
use user_service::outbound::persistence::{MongoUserRepository, connect};
use user_service::settings::ServiceSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load().wrap_err("failed to load service settings")?;
    let listen = settings
        .listen_target()
        .wrap_err("invalid listener settings")?;
    let connection = settings.connection_config();
    info!(?connection, "connecting to MongoDB");

    let database = connect(&connection)
        .await
        .wrap_err("failed to connect to MongoDB")?;
    let collection = settings.collection();
    let users = MongoUserRepository::new(&database, collection)
        .with_operation_timeout(settings.operation_timeout())
        .with_span(info_span!("user_repository", collection = %collection));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::new(listen, Arc::new(users)))
        .wrap_err("failed to start HTTP server")?;
    info!("user service started");
    server.await.wrap_err("HTTP server terminated abnormally")?;
    Ok(())
}

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use dotenv::dotenv;

use clinic_scheduler::config::ServerConfig;
use clinic_scheduler::models::appointment_type::TypeRegistry;
use clinic_scheduler::routes;
use clinic_scheduler::state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    dotenv().ok();

    let config = ServerConfig::from_env()?;
    let registry = TypeRegistry::clinic(config.device_pool_size).context("appointment types")?;
    tracing::info!(
        types = registry.types().len(),
        devices = registry.device_pool_size(),
        "appointment types loaded"
    );

    let state = web::Data::new(AppState::new(registry, &config));

    tracing::info!("listening on {}:{}", config.host, config.port);
    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes::init))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await?;

    Ok(())
}

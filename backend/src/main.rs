use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use voicecart_backend::database::Database;
use voicecart_backend::repositories::Repositories;
use voicecart_backend::services::email_service::mailer_from_config;
use voicecart_backend::services::RazorpayGateway;
use voicecart_backend::{AppConfig, AppError, AppServices};

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    info!("Starting VoiceCart backend on {}:{}", config.host, config.port);

    let repos = match &config.database_url {
        Some(url) => {
            let database = Database::connect(url).await?;
            Repositories::postgres(database.pool().clone())
        }
        None => {
            warn!("DATABASE_URL not set; using the in-memory store, data is lost on restart");
            Repositories::in_memory()
        }
    };

    let gateway = Arc::new(RazorpayGateway::new(&config)?);
    let mailer = mailer_from_config(&config)?;
    let services = AppServices::new(&config, repos, gateway, mailer)?;
    let frontend_origin = config.frontend_origin.clone();

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_origin)
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);
        let services = services.clone();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .configure(move |cfg| services.configure(cfg))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}

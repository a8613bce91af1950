use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;

use crate::api::handlers::{health_check, parse_text, parser_stats, sentence_detail};
use crate::engine::{constants::DEFAULT_CONFIG_PATH, ParserEngine};

/// Configuration for the API server
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub config_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            config_path: DEFAULT_CONFIG_PATH.to_string(),
        }
    }
}

/// Start the API server
pub async fn start_server(config: ApiConfig) -> Result<()> {
    // Build the parser engine; a model problem surfaces here, before the
    // server starts accepting requests
    let engine = ParserEngine::from_config(&config.config_path)?;
    let engine_data = web::Data::new(engine);

    log::info!("Starting rustdp API server on {}:{}", config.host, config.port);
    log::info!("Engine config: {}", config.config_path);

    // Start the HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(engine_data.clone())
            .service(
                web::scope("/api/v1")
                    .route("/health", web::get().to(health_check))
                    .route("/parse", web::post().to(parse_text))
                    .route("/detail", web::post().to(sentence_detail))
                    .route("/stats", web::get().to(parser_stats)),
            )
    })
    .bind(format!("{}:{}", config.host, config.port))?
    .run()
    .await?;

    Ok(())
}

/// Start the API server with default configuration
pub async fn start_server_default() -> Result<()> {
    start_server(ApiConfig::default()).await
}

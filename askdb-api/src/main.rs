use actix_web::{middleware::Logger, web, App, HttpServer};
use askdb_api::config::ApiConfig;
use askdb_api::error::AppResult;
use askdb_api::handlers::{self, AppState};
use askdb_api::uploads::UploadStore;
use askdb_llm_sdk::client::LlmClient;
use askdb_llm_sdk::groq::GroqClient;
use clap::{Arg, Command};
use std::path::PathBuf;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> AppResult<()> {
    let matches = Command::new("askdb-api")
        .version(env!("CARGO_PKG_VERSION"))
        .about("askdb - natural-language questions over uploaded SQLite databases")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file")
                .value_name("FILE"),
        )
        .get_matches();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_override = matches.get_one::<String>("config").map(PathBuf::from);
    let (config, config_path) = ApiConfig::load(config_override)?;
    tracing::info!("Loaded configuration from {}", config_path.display());

    let api_key = config.api_key()?.to_string();
    let llm: Arc<dyn LlmClient> =
        Arc::new(GroqClient::new(api_key)?.with_model(config.llm.model.clone()));
    tracing::info!(
        provider = llm.provider_name(),
        model = %config.llm.model,
        "translation client ready"
    );

    let uploads = UploadStore::new(config.uploads.dir.clone())?;
    tracing::info!("Upload directory at {}", uploads.root().display());

    let state = web::Data::new(AppState {
        config: Arc::new(config.clone()),
        llm,
        uploads,
    });

    let server_addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting HTTP server on {}", server_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(handlers::configure_routes)
    })
    .bind(&server_addr)?
    .run()
    .await?;

    Ok(())
}

//! FMEA/CP association server entry point.

use std::path::PathBuf;

use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::{App, HttpRequest, HttpServer, Result as ActixResult, http::header, web};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use fmcp_lib::api::{self, ApiDoc};
use fmcp_lib::auth::AdminKey;
use fmcp_lib::config::{ADMIN_KEY_HEADER, Config, IDENTITY_HEADER};
use fmcp_lib::db::DbPool;
use fmcp_lib::middleware::RequestLogger;
use fmcp_lib::services::{SuggestionService, provider_from_config};

/// Serves index.html for client-side routes of the review UI.
async fn spa_fallback(req: HttpRequest) -> ActixResult<NamedFile> {
    let static_dir = req
        .app_data::<web::Data<PathBuf>>()
        .ok_or_else(|| actix_web::error::ErrorNotFound("Static UI not configured"))?;
    Ok(NamedFile::open(static_dir.join("index.html"))?)
}

fn cors(is_development: bool) -> Cors {
    let allowed_headers = vec![
        header::ACCEPT,
        header::CONTENT_TYPE,
        header::HeaderName::from_static("x-remote-user"),
        header::HeaderName::from_static("x-admin-key"),
    ];

    let cors = if is_development {
        Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:3000")
    } else {
        Cors::default()
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(allowed_headers)
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL must be set and not the development default");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  FMEA/CP Association Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }
    if config.admin_key.is_none() {
        warn!("FMCP_ADMIN_KEY not set; document deletion is disabled");
    }

    let pool = match DbPool::new(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };
    info!("Database connection established");

    if let Err(e) = pool.run_migrations().await {
        error!("{}", e);
        std::process::exit(1);
    }

    let provider = match provider_from_config(&config.suggestions) {
        Ok(provider) => provider,
        Err(e) => {
            error!("Failed to initialize suggestion provider: {}", e);
            std::process::exit(1);
        }
    };
    let suggestions = SuggestionService::new(provider, config.suggestions.limit);

    let bind_address = config.bind_address();
    let admin_key = AdminKey::new(config.admin_key.clone());
    let static_dir = config.static_dir.clone();
    let is_development = config.is_development();

    if let Some(ref dir) = static_dir {
        info!("Serving review UI from {:?}", dir);
    }

    let worker_count = if is_development { 4 } else { num_cpus::get() };
    info!(
        "Starting server at http://{} ({} workers, identity header {}, admin header {})",
        bind_address, worker_count, IDENTITY_HEADER, ADMIN_KEY_HEADER
    );

    HttpServer::new(move || {
        let mut app = App::new()
            .wrap(cors(is_development))
            .wrap(RequestLogger)
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(admin_key.clone()))
            .app_data(web::Data::new(suggestions.clone()))
            .app_data(api::json_config())
            .app_data(api::query_config())
            .app_data(api::path_config())
            .configure(api::configure_api)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            );

        if let Some(ref dir) = static_dir {
            app = app
                .app_data(web::Data::new(dir.clone()))
                .service(Files::new("/assets", dir.join("assets")).prefer_utf8(true))
                .default_service(web::route().to(spa_fallback));
        }

        app
    })
    .workers(worker_count)
    .bind(&bind_address)?
    .run()
    .await
}

mod api;
mod config;
mod database;
mod middleware;
mod models;
mod seeds;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::database::{RecipeRepository, UserRepository};
use crate::services::{auth_service::AuthSettings, ImageStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("🚀 Starting Recetas Service...");
    log::info!("📊 Database: {}", config.database_name);

    // Initialize MongoDB connection
    let db = match database::MongoDB::new(&config.database_url, &config.database_name).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            log::error!("❌ Failed to connect to MongoDB: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("✅ MongoDB connected successfully");

    let images = match ImageStore::google_cloud(
        &config.gcloud_bucket,
        &config.gcloud_credentials,
        &config.storage_public_url,
    ) {
        Ok(images) => images,
        Err(e) => {
            log::error!("❌ Failed to initialize image storage: {}", e);
            std::process::exit(1);
        }
    };
    log::info!(
        "🖼️  Image storage: bucket {} (project {})",
        config.gcloud_bucket,
        config.gcloud_project
    );

    let settings = AuthSettings::new(
        &config.jwt_secret,
        config.jwt_expiration_secs,
        config.bcrypt_cost,
    );

    // 🌱 Seed initial administrator
    seeds::admin_seed::seed_initial_admin(db.as_ref(), &settings, config.admin_seed.as_ref()).await;

    let users: web::Data<dyn UserRepository> = web::Data::from(db.clone() as Arc<dyn UserRepository>);
    let recipes: web::Data<dyn RecipeRepository> = web::Data::from(db as Arc<dyn RecipeRepository>);
    let images = web::Data::new(images);
    let settings = web::Data::new(settings);
    let cors_origins = config.cors_origins.clone();

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", config.host, config.port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(users.clone())
            .app_data(recipes.clone())
            .app_data(images.clone())
            .app_data(settings.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

pub mod auth;
pub mod charts;
pub mod form;
pub mod health;
pub mod recipes;
pub mod swagger;
pub mod users;

use actix_web::{guard, http::header, web};
use serde::{Deserialize, Serialize};

use crate::middleware::AuthMiddleware;
use crate::utils::AppError;

/// `{"message": ...}` body shared by success and error responses.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreatedResponse {
    pub message: String,
    pub id: String,
}

/// Matches `Content-Type: application/json` (parameters allowed).
fn json_body() -> impl guard::Guard {
    guard::fn_guard(|ctx| {
        ctx.head()
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim_start().to_ascii_lowercase().starts_with("application/json"))
            .unwrap_or(false)
    })
}

/// Route table. Expects `web::Data` for `dyn UserRepository`, `dyn RecipeRepository`,
/// `ImageStore` and `AuthSettings` to be registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("⚠️  Invalid JSON body: {}", err);
        AppError::validation("Cuerpo de la petición inválido").into()
    }))
    .route("/", web::get().to(health::index))
    .route("/health", web::get().to(health::health_check))
    // Auth
    .service(
        web::scope("/api/auth")
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .service(
                web::resource("/create-admin")
                    .wrap(AuthMiddleware::forbid_missing())
                    .route(web::post().to(auth::create_admin)),
            ),
    )
    // Recetas: create and update go through the token guard, reads and deletes are public
    .service(
        web::scope("/api/recetas")
            .service(
                web::resource("")
                    .guard(guard::Post())
                    .wrap(AuthMiddleware::new())
                    .route(web::post().to(recipes::create_recipe)),
            )
            .service(
                web::resource("/{id}")
                    .guard(guard::Put())
                    .wrap(AuthMiddleware::new())
                    .route(web::put().guard(json_body()).to(recipes::update_recipe_json))
                    .route(web::put().to(recipes::update_recipe)),
            )
            .route("", web::get().to(recipes::list_recipes))
            .route("/type/{type}", web::get().to(recipes::list_recipes_by_type))
            .route("/{id}", web::get().to(recipes::get_recipe))
            .route("/{id}", web::delete().to(recipes::delete_recipe)),
    )
    // Graficos
    .service(
        web::scope("/api/graficos")
            .route("/recetas-por-tipo", web::get().to(charts::recipes_by_type)),
    )
    // Usuario
    .service(
        web::scope("/api/usuario")
            .wrap(AuthMiddleware::new())
            .route("/user", web::get().to(users::get_current_user)),
    );
}

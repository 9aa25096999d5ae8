use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recetas Service API",
        version = "1.0.0",
        description = "Recipe sharing backend.\n\n**Authentication:** creating or editing recipes, creating administrators and reading the profile require a JWT Bearer token obtained from `/api/auth/login`.\n\n**Recipes** are sent as `multipart/form-data` with the image in the `imagen` field.",
        contact(
            name = "Recetas Service Team"
        )
    ),
    paths(
        // Auth
        crate::api::auth::register,
        crate::api::auth::login,
        crate::api::auth::create_admin,

        // Recetas
        crate::api::recipes::create_recipe,
        crate::api::recipes::list_recipes,
        crate::api::recipes::get_recipe,
        crate::api::recipes::list_recipes_by_type,
        crate::api::recipes::update_recipe,
        crate::api::recipes::delete_recipe,

        // Graficos & Usuario
        crate::api::charts::recipes_by_type,
        crate::api::users::get_current_user,

        // Health
        crate::api::health::index,
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::api::MessageResponse,
            crate::api::CreatedResponse,
            crate::api::recipes::RecipeUpload,
            crate::services::auth_service::RegisterRequest,
            crate::services::auth_service::LoginRequest,
            crate::services::auth_service::CreateAdminRequest,
            crate::services::auth_service::LoginResponse,
            crate::models::RecipeKind,
            crate::models::RecipeResponse,
            crate::models::RecipeTypeCounts,
            crate::models::UserProfile,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login and administrator creation."),
        (name = "Recetas", description = "Recipe catalog. Reads are public; create and update need a token."),
        (name = "Graficos", description = "Aggregated recipe counts for charts."),
        (name = "Usuario", description = "Profile of the authenticated user."),
        (name = "Health", description = "Liveness endpoints."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

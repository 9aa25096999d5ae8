use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use crate::api::{form, CreatedResponse, MessageResponse};
use crate::database::RecipeRepository;
use crate::middleware::auth::Claims;
use crate::models::RecipeResponse;
use crate::services::{recipe_service, ImageStore};
use crate::utils::AppError;

/// Multipart body accepted by recipe create/update (documentation only).
#[derive(utoipa::ToSchema)]
#[allow(dead_code)]
pub struct RecipeUpload {
    name: String,
    descripcion: String,
    dificultad: String,
    tiempo: String,
    /// `vegetariana` or `novegetariana`
    r#type: String,
    #[schema(value_type = String, format = Binary)]
    imagen: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/api/recetas",
    tag = "Recetas",
    request_body(content = RecipeUpload, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Recipe created", body = CreatedResponse),
        (status = 400, description = "Missing fields, invalid type or missing image", body = MessageResponse),
        (status = 401, description = "Missing token", body = MessageResponse),
        (status = 403, description = "Invalid token", body = MessageResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    recipes: web::Data<dyn RecipeRepository>,
    images: web::Data<ImageStore>,
    claims: web::ReqData<Claims>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    log::info!("🍳 POST /api/recetas - user: {}", claims.uid);

    let form = form::read_recipe_form(payload).await?;
    let id = recipe_service::create_recipe(recipes.get_ref(), &images, &claims.uid, form).await?;

    Ok(HttpResponse::Created().json(CreatedResponse {
        message: "Receta creada".to_string(),
        id,
    }))
}

#[utoipa::path(
    get,
    path = "/api/recetas",
    tag = "Recetas",
    responses(
        (status = 200, description = "All recipes", body = [RecipeResponse])
    )
)]
pub async fn list_recipes(
    recipes: web::Data<dyn RecipeRepository>,
) -> Result<HttpResponse, AppError> {
    let all = recipe_service::list_recipes(recipes.get_ref()).await?;
    Ok(HttpResponse::Ok().json(all))
}

#[utoipa::path(
    get,
    path = "/api/recetas/{id}",
    tag = "Recetas",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = MessageResponse)
    )
)]
pub async fn get_recipe(
    recipes: web::Data<dyn RecipeRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let recipe = recipe_service::get_recipe(recipes.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(recipe))
}

#[utoipa::path(
    get,
    path = "/api/recetas/type/{type}",
    tag = "Recetas",
    params(("type" = String, Path, description = "vegetariana or novegetariana (case-insensitive)")),
    responses(
        (status = 200, description = "Recipes of that type", body = [RecipeResponse])
    )
)]
pub async fn list_recipes_by_type(
    recipes: web::Data<dyn RecipeRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let matching = recipe_service::list_recipes_by_type(recipes.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(matching))
}

/// Multipart form with an optional `imagen`. A JSON object with the text fields
/// to change is also accepted (see [`update_recipe_json`]).
#[utoipa::path(
    put,
    path = "/api/recetas/{id}",
    tag = "Recetas",
    params(("id" = String, Path, description = "Recipe id")),
    request_body(content = RecipeUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Recipe updated", body = MessageResponse),
        (status = 400, description = "Invalid type", body = MessageResponse),
        (status = 401, description = "Missing token", body = MessageResponse),
        (status = 403, description = "Invalid token", body = MessageResponse),
        (status = 404, description = "Recipe not found", body = MessageResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    recipes: web::Data<dyn RecipeRepository>,
    images: web::Data<ImageStore>,
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("✏️  PUT /api/recetas/{} - user: {}", id, claims.uid);

    let form = form::read_recipe_form(payload).await?;
    recipe_service::update_recipe(recipes.get_ref(), &images, &id, &claims.uid, form).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Receta actualizada")))
}

/// `PUT /api/recetas/{id}` with an `application/json` body: text fields only, no image.
pub async fn update_recipe_json(
    recipes: web::Data<dyn RecipeRepository>,
    images: web::Data<ImageStore>,
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("✏️  PUT /api/recetas/{} (json) - user: {}", id, claims.uid);

    let form = form::recipe_form_from_json(body.into_inner());
    recipe_service::update_recipe(recipes.get_ref(), &images, &id, &claims.uid, form).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Receta actualizada")))
}

#[utoipa::path(
    delete,
    path = "/api/recetas/{id}",
    tag = "Recetas",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe deleted (also when it did not exist)", body = MessageResponse)
    )
)]
pub async fn delete_recipe(
    recipes: web::Data<dyn RecipeRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    recipe_service::delete_recipe(recipes.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Receta eliminada")))
}

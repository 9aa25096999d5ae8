use actix_web::{web, HttpResponse};

use crate::database::RecipeRepository;
use crate::models::RecipeTypeCounts;
use crate::services::recipe_service;
use crate::utils::AppError;

#[utoipa::path(
    get,
    path = "/api/graficos/recetas-por-tipo",
    tag = "Graficos",
    responses(
        (status = 200, description = "Recipe counts per type", body = RecipeTypeCounts)
    )
)]
pub async fn recipes_by_type(
    recipes: web::Data<dyn RecipeRepository>,
) -> Result<HttpResponse, AppError> {
    let counts = recipe_service::recipe_type_counts(recipes.get_ref()).await?;
    log::debug!("📊 Recipe counts: {:?}", counts);
    Ok(HttpResponse::Ok().json(counts))
}

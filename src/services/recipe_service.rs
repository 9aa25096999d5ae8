use std::collections::HashMap;

use crate::{
    database::RecipeRepository,
    models::{Recipe, RecipeChanges, RecipeKind, RecipeResponse, RecipeTypeCounts},
    services::storage_service::{ImageStore, UploadedImage},
    utils::{AppError, OrInternal},
};

/// Text fields and optional image of a recipe multipart form.
#[derive(Debug, Default)]
pub struct RecipeForm {
    pub fields: HashMap<String, String>,
    pub image: Option<UploadedImage>,
}

impl RecipeForm {
    /// Non-empty text field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

fn parse_kind(raw: &str) -> Result<RecipeKind, AppError> {
    raw.parse()
        .map_err(|_| AppError::validation("Tipo de receta inválido"))
}

pub async fn create_recipe(
    recipes: &dyn RecipeRepository,
    images: &ImageStore,
    user_id: &str,
    form: RecipeForm,
) -> Result<String, AppError> {
    const ERROR: &str = "Error al crear receta";

    let (name, description, difficulty, prep_time, kind) = match (
        form.field("name"),
        form.field("descripcion"),
        form.field("dificultad"),
        form.field("tiempo"),
        form.field("type"),
    ) {
        (Some(n), Some(d), Some(di), Some(t), Some(k)) => (n, d, di, t, k),
        _ => return Err(AppError::validation("Todos los campos son requeridos")),
    };

    let kind = parse_kind(kind)?;

    let image = form
        .image
        .as_ref()
        .ok_or_else(|| AppError::validation("La imagen es requerida"))?;

    let image_url = images.upload(image, kind, user_id).await.or_internal(ERROR)?;

    let recipe = Recipe {
        id: None,
        name: name.to_string(),
        description: description.to_string(),
        difficulty: difficulty.to_string(),
        prep_time: prep_time.to_string(),
        kind,
        image_url,
        user_id: user_id.to_string(),
    };

    let id = recipes.insert_recipe(&recipe).await.or_internal(ERROR)?;
    log::info!("✅ Recipe created: {} ({}) by {}", id, kind, user_id);

    Ok(id)
}

pub async fn list_recipes(recipes: &dyn RecipeRepository) -> Result<Vec<RecipeResponse>, AppError> {
    let all = recipes
        .list_recipes()
        .await
        .or_internal("Error al obtener recetas")?;

    Ok(all.into_iter().map(RecipeResponse::from).collect())
}

pub async fn get_recipe(
    recipes: &dyn RecipeRepository,
    id: &str,
) -> Result<RecipeResponse, AppError> {
    recipes
        .find_recipe(id)
        .await
        .or_internal("Error al obtener la receta")?
        .map(RecipeResponse::from)
        .ok_or_else(|| AppError::not_found("Receta no encontrada"))
}

/// Case-insensitive on the requested type; an unknown type matches nothing.
pub async fn list_recipes_by_type(
    recipes: &dyn RecipeRepository,
    raw_type: &str,
) -> Result<Vec<RecipeResponse>, AppError> {
    let kind = match raw_type.to_lowercase().parse::<RecipeKind>() {
        Ok(kind) => kind,
        Err(_) => return Ok(Vec::new()),
    };

    let matching = recipes
        .list_by_kind(kind)
        .await
        .or_internal("Error al obtener recetas")?;

    Ok(matching.into_iter().map(RecipeResponse::from).collect())
}

/// Applies the fields present in the form. A new image is stored under the new
/// type when one is given, otherwise under the recipe's current type.
pub async fn update_recipe(
    recipes: &dyn RecipeRepository,
    images: &ImageStore,
    id: &str,
    user_id: &str,
    form: RecipeForm,
) -> Result<(), AppError> {
    const ERROR: &str = "Error al actualizar receta";

    let current = recipes
        .find_recipe(id)
        .await
        .or_internal(ERROR)?
        .ok_or_else(|| AppError::not_found("Receta no encontrada"))?;

    let kind = form.field("type").map(parse_kind).transpose()?;

    let image_url = match &form.image {
        Some(image) => Some(
            images
                .upload(image, kind.unwrap_or(current.kind), user_id)
                .await
                .or_internal(ERROR)?,
        ),
        None => None,
    };

    let changes = RecipeChanges {
        name: form.field("name").map(str::to_string),
        description: form.field("descripcion").map(str::to_string),
        difficulty: form.field("dificultad").map(str::to_string),
        prep_time: form.field("tiempo").map(str::to_string),
        kind,
        image_url,
    };

    if changes.is_empty() {
        log::debug!("Recipe {}: nothing to update", id);
        return Ok(());
    }

    recipes.update_recipe(id, changes).await.or_internal(ERROR)?;
    log::info!("✅ Recipe updated: {} by {}", id, user_id);

    Ok(())
}

/// No existence check: removing an unknown id succeeds.
pub async fn delete_recipe(recipes: &dyn RecipeRepository, id: &str) -> Result<(), AppError> {
    recipes
        .delete_recipe(id)
        .await
        .or_internal("Error al eliminar la receta")?;

    log::info!("🗑️ Recipe deleted: {}", id);
    Ok(())
}

pub async fn recipe_type_counts(
    recipes: &dyn RecipeRepository,
) -> Result<RecipeTypeCounts, AppError> {
    const ERROR: &str = "Error al obtener datos de gráficos";

    let vegetarianas = recipes
        .count_by_kind(RecipeKind::Vegetariana)
        .await
        .or_internal(ERROR)?;
    let novegetarianas = recipes
        .count_by_kind(RecipeKind::Novegetariana)
        .await
        .or_internal(ERROR)?;

    Ok(RecipeTypeCounts::new(vegetarianas, novegetarianas))
}

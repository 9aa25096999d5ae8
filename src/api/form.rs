use actix_multipart::Multipart;
use actix_web::web::BytesMut;
use futures::stream::StreamExt;
use serde_json::{Map, Value};

use crate::services::{
    recipe_service::RecipeForm,
    storage_service::{UploadedImage, MAX_IMAGE_BYTES},
};
use crate::utils::AppError;

/// Multipart field carrying the recipe image.
pub const IMAGE_FIELD: &str = "imagen";

const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

fn invalid_form<E: std::fmt::Display>(e: E) -> AppError {
    log::warn!("⚠️  Invalid multipart form: {}", e);
    AppError::validation("Formulario inválido")
}

/// Buffers a recipe multipart form. Text fields are collected by name and the
/// `imagen` file is kept in memory; an empty file part counts as no image.
pub async fn read_recipe_form(mut payload: Multipart) -> Result<RecipeForm, AppError> {
    let mut form = RecipeForm::default();

    while let Some(field) = payload.next().await {
        let mut field = field.map_err(invalid_form)?;

        let name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        let is_image = name == IMAGE_FIELD;
        let limit = if is_image { MAX_IMAGE_BYTES } else { MAX_TEXT_FIELD_BYTES };

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();
        let content_type = field.content_type().map(|mime| mime.to_string());

        let mut data = BytesMut::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(invalid_form)?;
            if data.len() + chunk.len() > limit {
                return Err(if is_image {
                    AppError::validation("La imagen supera el tamaño máximo de 5 MB")
                } else {
                    AppError::validation(format!("El campo {} es demasiado largo", name))
                });
            }
            data.extend_from_slice(&chunk);
        }

        if is_image {
            if !data.is_empty() {
                form.image = Some(UploadedImage {
                    filename,
                    content_type,
                    data: data.freeze(),
                });
            }
        } else {
            let value = String::from_utf8(data.to_vec()).map_err(invalid_form)?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

/// Text fields of a JSON recipe body. Strings, numbers and booleans are kept as
/// their text; nulls, arrays and objects are dropped.
pub fn recipe_form_from_json(body: Map<String, Value>) -> RecipeForm {
    let mut form = RecipeForm::default();

    for (name, value) in body {
        let text = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => continue,
        };
        form.fields.insert(name, text);
    }

    form
}

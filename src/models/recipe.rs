use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Recipe category. Only these two literals are accepted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecipeKind {
    Vegetariana,
    Novegetariana,
}

impl RecipeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeKind::Vegetariana => "vegetariana",
            RecipeKind::Novegetariana => "novegetariana",
        }
    }
}

impl fmt::Display for RecipeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecipeKind {
    type Err = String;

    /// Exact match; callers that accept loose input lowercase first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vegetariana" => Ok(RecipeKind::Vegetariana),
            "novegetariana" => Ok(RecipeKind::Novegetariana),
            other => Err(format!("invalid recipe type: {}", other)),
        }
    }
}

/// Recipe document (collection `recetas`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "dificultad")]
    pub difficulty: String,
    #[serde(rename = "tiempo")]
    pub prep_time: String,
    #[serde(rename = "type")]
    pub kind: RecipeKind,
    /// URL of the uploaded image
    #[serde(rename = "imagen")]
    pub image_url: String,
    /// Owner (hex id of the user that created it)
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Partial update applied by `PUT /api/recetas/{id}`; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub prep_time: Option<String>,
    pub kind: Option<RecipeKind>,
    pub image_url: Option<String>,
}

impl RecipeChanges {
    pub fn is_empty(&self) -> bool {
        *self == RecipeChanges::default()
    }

    #[cfg(test)]
    pub fn apply_to(self, recipe: &mut Recipe) {
        if let Some(name) = self.name {
            recipe.name = name;
        }
        if let Some(description) = self.description {
            recipe.description = description;
        }
        if let Some(difficulty) = self.difficulty {
            recipe.difficulty = difficulty;
        }
        if let Some(prep_time) = self.prep_time {
            recipe.prep_time = prep_time;
        }
        if let Some(kind) = self.kind {
            recipe.kind = kind;
        }
        if let Some(image_url) = self.image_url {
            recipe.image_url = image_url;
        }
    }
}

/// Recipe as returned by the API, with its id flattened to a hex string.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RecipeResponse {
    pub id: String,
    pub name: String,
    pub descripcion: String,
    pub dificultad: String,
    pub tiempo: String,
    #[serde(rename = "type")]
    pub kind: RecipeKind,
    pub imagen: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: recipe.name,
            descripcion: recipe.description,
            dificultad: recipe.difficulty,
            tiempo: recipe.prep_time,
            kind: recipe.kind,
            imagen: recipe.image_url,
            user_id: recipe.user_id,
        }
    }
}

/// Chart data for `GET /api/graficos/recetas-por-tipo`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RecipeTypeCounts {
    pub total: u64,
    pub vegetarianas: u64,
    pub novegetarianas: u64,
}

impl RecipeTypeCounts {
    pub fn new(vegetarianas: u64, novegetarianas: u64) -> Self {
        Self {
            total: vegetarianas + novegetarianas,
            vegetarianas,
            novegetarianas,
        }
    }
}

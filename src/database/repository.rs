use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Recipe, RecipeChanges, RecipeKind, User};

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique index rejected the write.
    #[error("duplicate key: {0}")]
    Duplicate(String),

    #[error("database error: {0}")]
    Backend(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::{ErrorKind, WriteFailure};

        match *err.kind {
            ErrorKind::Write(WriteFailure::WriteError(ref write_error))
                if write_error.code == 11000 =>
            {
                StoreError::Duplicate(write_error.message.clone())
            }
            _ => StoreError::Backend(err.to_string()),
        }
    }
}

/// Access to the `usuarios` collection.
///
/// Ids are the hex form of the document key; an id that cannot be a key simply
/// matches nothing.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Inserts the user and returns its new id.
    async fn insert_user(&self, user: &User) -> Result<String, StoreError>;
}

/// Access to the `recetas` collection.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Inserts the recipe and returns its new id.
    async fn insert_recipe(&self, recipe: &Recipe) -> Result<String, StoreError>;

    async fn list_recipes(&self) -> Result<Vec<Recipe>, StoreError>;

    async fn find_recipe(&self, id: &str) -> Result<Option<Recipe>, StoreError>;

    async fn list_by_kind(&self, kind: RecipeKind) -> Result<Vec<Recipe>, StoreError>;

    async fn count_by_kind(&self, kind: RecipeKind) -> Result<u64, StoreError>;

    async fn update_recipe(&self, id: &str, changes: RecipeChanges) -> Result<(), StoreError>;

    /// Deleting an unknown id is not an error.
    async fn delete_recipe(&self, id: &str) -> Result<(), StoreError>;
}

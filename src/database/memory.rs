//! In-process stand-in for MongoDB used by the handler tests.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::RwLock;

use super::{RecipeRepository, StoreError, UserRepository};
use crate::models::{Recipe, RecipeChanges, RecipeKind, User};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    recipes: RwLock<Vec<Recipe>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Backend("lock poisoned".to_string())
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.id_hex() == id).cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<String, StoreError> {
        let mut users = self.users.write().map_err(poisoned)?;

        // Mirrors the unique index on usuarios(email)
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate(format!("email {}", user.email)));
        }

        let id = ObjectId::new();
        let mut stored = user.clone();
        stored.id = Some(id);
        users.push(stored);

        Ok(id.to_hex())
    }
}

#[async_trait]
impl RecipeRepository for MemoryStore {
    async fn insert_recipe(&self, recipe: &Recipe) -> Result<String, StoreError> {
        let mut recipes = self.recipes.write().map_err(poisoned)?;

        let id = ObjectId::new();
        let mut stored = recipe.clone();
        stored.id = Some(id);
        recipes.push(stored);

        Ok(id.to_hex())
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>, StoreError> {
        Ok(self.recipes.read().map_err(poisoned)?.clone())
    }

    async fn find_recipe(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let recipes = self.recipes.read().map_err(poisoned)?;
        Ok(recipes
            .iter()
            .find(|r| r.id.map(|oid| oid.to_hex()).as_deref() == Some(id))
            .cloned())
    }

    async fn list_by_kind(&self, kind: RecipeKind) -> Result<Vec<Recipe>, StoreError> {
        let recipes = self.recipes.read().map_err(poisoned)?;
        Ok(recipes.iter().filter(|r| r.kind == kind).cloned().collect())
    }

    async fn count_by_kind(&self, kind: RecipeKind) -> Result<u64, StoreError> {
        let recipes = self.recipes.read().map_err(poisoned)?;
        Ok(recipes.iter().filter(|r| r.kind == kind).count() as u64)
    }

    async fn update_recipe(&self, id: &str, changes: RecipeChanges) -> Result<(), StoreError> {
        let mut recipes = self.recipes.write().map_err(poisoned)?;

        if let Some(recipe) = recipes
            .iter_mut()
            .find(|r| r.id.map(|oid| oid.to_hex()).as_deref() == Some(id))
        {
            changes.apply_to(recipe);
        }

        Ok(())
    }

    async fn delete_recipe(&self, id: &str) -> Result<(), StoreError> {
        let mut recipes = self.recipes.write().map_err(poisoned)?;
        recipes.retain(|r| r.id.map(|oid| oid.to_hex()).as_deref() != Some(id));
        Ok(())
    }
}

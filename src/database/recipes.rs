use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};

use super::{MongoDB, RecipeRepository, StoreError, RECIPES_COLLECTION};
use crate::models::{Recipe, RecipeChanges, RecipeKind};

/// `$set` document for the fields present in `changes`.
fn set_document(changes: RecipeChanges) -> Document {
    let mut set = Document::new();

    if let Some(name) = changes.name {
        set.insert("name", name);
    }
    if let Some(description) = changes.description {
        set.insert("descripcion", description);
    }
    if let Some(difficulty) = changes.difficulty {
        set.insert("dificultad", difficulty);
    }
    if let Some(prep_time) = changes.prep_time {
        set.insert("tiempo", prep_time);
    }
    if let Some(kind) = changes.kind {
        set.insert("type", kind.as_str());
    }
    if let Some(image_url) = changes.image_url {
        set.insert("imagen", image_url);
    }

    set
}

#[async_trait]
impl RecipeRepository for MongoDB {
    async fn insert_recipe(&self, recipe: &Recipe) -> Result<String, StoreError> {
        let collection = self.collection::<Recipe>(RECIPES_COLLECTION);
        let result = collection.insert_one(recipe).await?;

        result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| StoreError::Backend("inserted id is not an ObjectId".to_string()))
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>, StoreError> {
        let collection = self.collection::<Recipe>(RECIPES_COLLECTION);
        let cursor = collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_recipe(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let object_id = match ObjectId::parse_str(id) {
            Ok(oid) => oid,
            Err(_) => return Ok(None),
        };

        let collection = self.collection::<Recipe>(RECIPES_COLLECTION);
        Ok(collection.find_one(doc! { "_id": object_id }).await?)
    }

    async fn list_by_kind(&self, kind: RecipeKind) -> Result<Vec<Recipe>, StoreError> {
        let collection = self.collection::<Recipe>(RECIPES_COLLECTION);
        let cursor = collection.find(doc! { "type": kind.as_str() }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn count_by_kind(&self, kind: RecipeKind) -> Result<u64, StoreError> {
        let collection = self.collection::<Recipe>(RECIPES_COLLECTION);
        Ok(collection.count_documents(doc! { "type": kind.as_str() }).await?)
    }

    async fn update_recipe(&self, id: &str, changes: RecipeChanges) -> Result<(), StoreError> {
        let object_id = match ObjectId::parse_str(id) {
            Ok(oid) => oid,
            Err(_) => return Ok(()),
        };

        let set = set_document(changes);
        if set.is_empty() {
            return Ok(());
        }

        let collection = self.collection::<Recipe>(RECIPES_COLLECTION);
        collection
            .update_one(doc! { "_id": object_id }, doc! { "$set": set })
            .await?;

        Ok(())
    }

    async fn delete_recipe(&self, id: &str) -> Result<(), StoreError> {
        let object_id = match ObjectId::parse_str(id) {
            Ok(oid) => oid,
            Err(_) => return Ok(()),
        };

        let collection = self.collection::<Recipe>(RECIPES_COLLECTION);
        collection.delete_one(doc! { "_id": object_id }).await?;

        Ok(())
    }
}

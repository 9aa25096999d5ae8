use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};

use super::{MongoDB, StoreError, UserRepository, USERS_COLLECTION};
use crate::models::User;

#[async_trait]
impl UserRepository for MongoDB {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let collection = self.collection::<User>(USERS_COLLECTION);
        Ok(collection.find_one(doc! { "email": email }).await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let object_id = match ObjectId::parse_str(id) {
            Ok(oid) => oid,
            Err(_) => return Ok(None),
        };

        let collection = self.collection::<User>(USERS_COLLECTION);
        Ok(collection.find_one(doc! { "_id": object_id }).await?)
    }

    async fn insert_user(&self, user: &User) -> Result<String, StoreError> {
        let collection = self.collection::<User>(USERS_COLLECTION);
        let result = collection.insert_one(user).await?;

        result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| StoreError::Backend("inserted id is not an ObjectId".to_string()))
    }
}

use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Role tag stored in `type` for administrators.
pub const ADMIN_ROLE: &str = "administrador";

/// User document (collection `usuarios`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    /// bcrypt hash, never the plain password
    pub password: String,
    #[serde(rename = "type")]
    pub role: String,
    #[serde(rename = "fechaCreacion")]
    pub created_at: BsonDateTime,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String, role: String) -> Self {
        Self {
            id: None,
            name,
            email,
            password: password_hash,
            role,
            created_at: BsonDateTime::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}

/// Public profile returned by `GET /api/usuario/user`
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserProfile {
    pub nombre: String,
    pub correo: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            nombre: user.name,
            correo: user.email,
        }
    }
}

use actix_web::web;
use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    database::{StoreError, UserRepository},
    models::{User, UserProfile, ADMIN_ROLE},
    utils::{AppError, OrInternal},
};

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub uid: String,
    #[serde(rename = "type")]
    pub role: String,
    pub iat: usize, // issued at
    pub exp: usize, // expiration
}

/// Signing keys and hashing parameters, built once from the configuration.
#[derive(Clone)]
pub struct AuthSettings {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl AuthSettings {
    pub fn new(secret: &str, token_ttl_secs: i64, bcrypt_cost: u32) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl: Duration::seconds(token_ttl_secs),
            bcrypt_cost,
        }
    }
}

// Request/Response structures
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "type")]
    pub role: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct CreateAdminRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// Non-empty value of an optional request field.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// Generate JWT token
pub fn issue_token(settings: &AuthSettings, user_id: &str, role: &str) -> Result<String, String> {
    let now = Utc::now();
    let claims = Claims {
        uid: user_id.to_string(),
        role: role.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + settings.token_ttl).timestamp() as usize,
    };

    encode(&Header::default(), &claims, &settings.encoding_key)
        .map_err(|e| format!("Failed to generate token: {}", e))
}

// Verify JWT token (signature and expiry)
pub fn verify_token(settings: &AuthSettings, token: &str) -> Result<Claims, String> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(token, &settings.decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| format!("Invalid token: {}", e))
}

/// Runs bcrypt on the blocking pool.
pub async fn hash_password(password: String, cost: u32) -> Result<String, String> {
    web::block(move || hash(password, cost))
        .await
        .map_err(|e| format!("Blocking task failed: {}", e))?
        .map_err(|e| format!("Failed to hash password: {}", e))
}

pub async fn verify_password(password: String, hashed: String) -> Result<bool, String> {
    web::block(move || verify(password, &hashed))
        .await
        .map_err(|e| format!("Blocking task failed: {}", e))?
        .map_err(|e| format!("Password verification error: {}", e))
}

/// Fields of an account about to be stored.
struct NewAccount<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    role: &'a str,
}

/// Hashes the password and stores a new user, reporting a taken email as a conflict.
async fn store_new_user(
    users: &dyn UserRepository,
    settings: &AuthSettings,
    account: NewAccount<'_>,
    conflict_message: &str,
    error_message: &str,
) -> Result<String, AppError> {
    if users
        .find_by_email(account.email)
        .await
        .or_internal(error_message)?
        .is_some()
    {
        return Err(AppError::Conflict(conflict_message.to_string()));
    }

    let password_hash = hash_password(account.password.to_string(), settings.bcrypt_cost)
        .await
        .or_internal(error_message)?;

    let user = User::new(
        account.name.to_string(),
        account.email.to_string(),
        password_hash,
        account.role.to_string(),
    );

    match users.insert_user(&user).await {
        // Lost the race against a concurrent registration
        Err(StoreError::Duplicate(_)) => Err(AppError::Conflict(conflict_message.to_string())),
        other => other.or_internal(error_message),
    }
}

// User registration
pub async fn register(
    users: &dyn UserRepository,
    settings: &AuthSettings,
    request: &RegisterRequest,
) -> Result<String, AppError> {
    let (name, email, password, role) = match (
        present(&request.name),
        present(&request.email),
        present(&request.password),
        present(&request.role),
    ) {
        (Some(n), Some(e), Some(p), Some(r)) => (n, e, p, r),
        _ => {
            return Err(AppError::validation(
                "El Nombre, Correo, Contraseña y Tipo son requeridos",
            ))
        }
    };

    let id = store_new_user(
        users,
        settings,
        NewAccount { name, email, password, role },
        "El usuario ya existe",
        "Error al registrar el usuario",
    )
    .await?;

    log::info!("✅ User registered: {} (type: {})", email, role);
    Ok(id)
}

// User login
pub async fn login(
    users: &dyn UserRepository,
    settings: &AuthSettings,
    request: &LoginRequest,
) -> Result<String, AppError> {
    const ERROR: &str = "Error al iniciar sesión";

    let (email, password) = match (present(&request.email), present(&request.password)) {
        (Some(e), Some(p)) => (e, p),
        _ => return Err(AppError::validation("Email y contraseña son requeridos")),
    };

    let user = users
        .find_by_email(email)
        .await
        .or_internal(ERROR)?
        .ok_or_else(|| AppError::Unauthorized("Credenciales incorrectas".to_string()))?;

    let valid = verify_password(password.to_string(), user.password.clone())
        .await
        .or_internal(ERROR)?;

    if !valid {
        return Err(AppError::Unauthorized("Credenciales incorrectas".to_string()));
    }

    issue_token(settings, &user.id_hex(), &user.role).or_internal(ERROR)
}

/// Creates another administrator. The requester's role is read from the stored
/// user, not from the token.
pub async fn create_admin(
    users: &dyn UserRepository,
    settings: &AuthSettings,
    claims: &Claims,
    request: &CreateAdminRequest,
) -> Result<String, AppError> {
    const ERROR: &str = "Error al crear administrador";

    let requester = users.find_by_id(&claims.uid).await.or_internal(ERROR)?;
    if !requester.map(|u| u.is_admin()).unwrap_or(false) {
        return Err(AppError::Forbidden(
            "No tienes permisos para realizar esta acción".to_string(),
        ));
    }

    let (name, email, password) = match (
        present(&request.name),
        present(&request.email),
        present(&request.password),
    ) {
        (Some(n), Some(e), Some(p)) => (n, e, p),
        _ => {
            return Err(AppError::validation(
                "El Nombre, Correo y Contraseña son requeridos",
            ))
        }
    };

    let id = store_new_user(
        users,
        settings,
        NewAccount { name, email, password, role: ADMIN_ROLE },
        "El administrador ya existe",
        ERROR,
    )
    .await?;

    log::info!("✅ Administrator created by {}: {}", claims.uid, email);
    Ok(id)
}

/// Ensures an administrator with this email exists. Returns whether one was created.
pub async fn ensure_admin(
    users: &dyn UserRepository,
    settings: &AuthSettings,
    name: &str,
    email: &str,
    password: &str,
) -> Result<bool, AppError> {
    match store_new_user(
        users,
        settings,
        NewAccount { name, email, password, role: ADMIN_ROLE },
        "El administrador ya existe",
        "Error al crear el administrador inicial",
    )
    .await
    {
        Ok(_) => Ok(true),
        Err(AppError::Conflict(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

pub async fn current_user(
    users: &dyn UserRepository,
    claims: &Claims,
) -> Result<UserProfile, AppError> {
    users
        .find_by_id(&claims.uid)
        .await
        .or_internal("Error al obtener datos del usuario")?
        .map(UserProfile::from)
        .ok_or_else(|| AppError::not_found("Usuario no encontrado"))
}

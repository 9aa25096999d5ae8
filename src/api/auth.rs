use actix_web::{web, HttpResponse};

use crate::api::MessageResponse;
use crate::database::UserRepository;
use crate::middleware::auth::Claims;
use crate::services::auth_service::{
    self, AuthSettings, CreateAdminRequest, LoginRequest, LoginResponse, RegisterRequest,
};
use crate::utils::AppError;

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = MessageResponse),
        (status = 400, description = "Missing fields", body = MessageResponse),
        (status = 409, description = "Email already registered", body = MessageResponse)
    )
)]
pub async fn register(
    users: web::Data<dyn UserRepository>,
    settings: web::Data<AuthSettings>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "📝 POST /api/auth/register - email: {}",
        request.email.as_deref().unwrap_or("N/A")
    );

    auth_service::register(users.get_ref(), &settings, &request).await?;

    Ok(HttpResponse::Created().json(MessageResponse::new("Usuario registrado exitosamente")))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing fields", body = MessageResponse),
        (status = 401, description = "Invalid credentials", body = MessageResponse)
    )
)]
pub async fn login(
    users: web::Data<dyn UserRepository>,
    settings: web::Data<AuthSettings>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let email = request.email.as_deref().unwrap_or("N/A");
    log::info!("🔐 POST /api/auth/login - email: {}", email);

    match auth_service::login(users.get_ref(), &settings, &request).await {
        Ok(token) => {
            log::info!("✅ Login successful: {}", email);
            Ok(HttpResponse::Ok().json(LoginResponse {
                message: "Inicio de sesión exitoso".to_string(),
                token,
            }))
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", email, e);
            Err(e)
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/create-admin",
    tag = "Auth",
    request_body = CreateAdminRequest,
    responses(
        (status = 201, description = "Administrator created", body = MessageResponse),
        (status = 401, description = "Missing token", body = MessageResponse),
        (status = 403, description = "Invalid token or requester is not an administrator", body = MessageResponse),
        (status = 409, description = "Email already registered", body = MessageResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_admin(
    users: web::Data<dyn UserRepository>,
    settings: web::Data<AuthSettings>,
    claims: web::ReqData<Claims>,
    request: web::Json<CreateAdminRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("👑 POST /api/auth/create-admin - requested by {}", claims.uid);

    auth_service::create_admin(users.get_ref(), &settings, &claims, &request).await?;

    Ok(HttpResponse::Created().json(MessageResponse::new("Administrador creado exitosamente")))
}

use actix_web::{web, HttpResponse};

use crate::api::MessageResponse;
use crate::database::UserRepository;
use crate::middleware::auth::Claims;
use crate::models::UserProfile;
use crate::services::auth_service;
use crate::utils::AppError;

#[utoipa::path(
    get,
    path = "/api/usuario/user",
    tag = "Usuario",
    responses(
        (status = 200, description = "Authenticated user's profile", body = UserProfile),
        (status = 401, description = "Missing token", body = MessageResponse),
        (status = 403, description = "Invalid token", body = MessageResponse),
        (status = 404, description = "User no longer exists", body = MessageResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_current_user(
    users: web::Data<dyn UserRepository>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let profile = auth_service::current_user(users.get_ref(), &claims).await?;
    Ok(HttpResponse::Ok().json(profile))
}

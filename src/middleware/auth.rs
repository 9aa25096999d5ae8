use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::services::auth_service::{self, AuthSettings};
use crate::utils::AppError;

pub use crate::services::auth_service::Claims;

/// Bearer-token guard. Missing token: 401 (403 with [`AuthMiddleware::forbid_missing`]).
/// Invalid or expired token: 403.
/// On success the decoded [`Claims`] are available to handlers as `web::ReqData<Claims>`.
#[derive(Clone, Copy, Default)]
pub struct AuthMiddleware {
    forbid_missing: bool,
}

impl AuthMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers a request without a token with 403 instead of 401.
    pub fn forbid_missing() -> Self {
        Self {
            forbid_missing: true,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            forbid_missing: self.forbid_missing,
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    forbid_missing: bool,
}

/// Token part of `Authorization: Bearer <token>`.
fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split_whitespace();

    match (parts.next(), parts.next()) {
        (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("bearer") => {
            Some(token.to_string())
        }
        _ => None,
    }
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = match bearer_token(&req) {
            Some(token) => token,
            None => {
                log::warn!("🔒 {} {} - missing token", req.method(), req.path());
                let message = "No autorizado".to_string();
                let err = if self.forbid_missing {
                    AppError::Forbidden(message)
                } else {
                    AppError::Unauthorized(message)
                };
                return reject(req, err);
            }
        };

        let settings = match req.app_data::<web::Data<AuthSettings>>().cloned() {
            Some(settings) => settings,
            None => {
                log::error!("❌ AuthSettings not registered as app data");
                return reject(req, AppError::Internal("Error del servidor.".to_string()));
            }
        };

        match auth_service::verify_token(&settings, &token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(e) => {
                log::warn!("🔒 {} {} - {}", req.method(), req.path(), e);
                reject(req, AppError::Forbidden("Token inválido".to_string()))
            }
        }
    }
}

/// Short-circuits with the error's JSON response; the inner service is never called.
fn reject<B: 'static>(
    req: ServiceRequest,
    err: AppError,
) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
    let response = req.error_response(err).map_into_right_body();
    Box::pin(async move { Ok(response) })
}

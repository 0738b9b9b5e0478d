//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for user registration and
//! login, parse request data, and interact with the `auth::service` for core
//! business logic.

use crate::api::common::{ApiResponse, service_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::config::Config;
use crate::repositories::user_repository::UserRepository;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;

/// Handle contact-identity registration
#[axum::debug_handler]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<()>>), (StatusCode, String)> {
    let service =
        AuthService::new(UserRepository::new(&pool), &config).map_err(service_error_to_http)?;

    match service.register(payload).await {
        Ok(()) => Ok((
            StatusCode::CREATED,
            ResponseJson(ApiResponse::<()>::message_only("User registered successfully")),
        )),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle contact-identity login
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<ApiResponse<LoginData>>, (StatusCode, String)> {
    let service =
        AuthService::new(UserRepository::new(&pool), &config).map_err(service_error_to_http)?;

    match service.login(payload).await {
        Ok(data) => Ok(ResponseJson(ApiResponse::success(data, "Login successful"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle username-identity registration
#[axum::debug_handler]
pub async fn register_basic(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<BasicRegisterRequest>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<()>>), (StatusCode, String)> {
    let service =
        AuthService::new(UserRepository::new(&pool), &config).map_err(service_error_to_http)?;

    match service.register_basic(payload).await {
        Ok(()) => Ok((
            StatusCode::CREATED,
            ResponseJson(ApiResponse::<()>::message_only("User registered successfully")),
        )),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle username-identity login
#[axum::debug_handler]
pub async fn login_basic(
    Extension(pool): Extension<SqlitePool>,
    Extension(config): Extension<Config>,
    Json(payload): Json<BasicLoginRequest>,
) -> Result<ResponseJson<ApiResponse<LoginData>>, (StatusCode, String)> {
    let service =
        AuthService::new(UserRepository::new(&pool), &config).map_err(service_error_to_http)?;

    match service.login_basic(payload).await {
        Ok(data) => Ok(ResponseJson(ApiResponse::success(data, "Login successful"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

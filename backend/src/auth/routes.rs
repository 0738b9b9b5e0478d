//! Defines the HTTP routes specifically for authentication.
//!
//! Two route sets share one workflow: the contact-identity endpoints at the
//! root and the username-identity endpoints under `/basic`. These are
//! designed to be integrated into the main Axum router.

use crate::auth::handlers::*;
use axum::{Router, routing::post};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/basic/register", post(register_basic))
        .route("/basic/login", post(login_basic))
}

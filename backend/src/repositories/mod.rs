//! Persistence access for the credential service.
//!
//! The auth workflow talks to storage through the [`UserStore`] trait so the
//! sqlx-backed repository can be swapped for an in-memory implementation in
//! tests.

use crate::database::models::{LoginKey, User};
use crate::errors::StoreError;
use anyhow::Result;
use async_trait::async_trait;

pub mod user_repository;

/// Storage seam for the auth workflow.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Resolves a user by the field a login request keys on.
    async fn find_by_login_key(&self, key: &LoginKey) -> Result<Option<User>>;

    /// Persists a new user.
    ///
    /// Identity uniqueness is enforced here: a unique-constraint violation
    /// surfaces as [`StoreError::DuplicateIdentity`], which is the single
    /// source of truth for duplicate registrations.
    async fn insert(&self, user: User) -> Result<User, StoreError>;
}

//! Core business logic for the authentication system.
//!
//! The service owns the full credential workflow for both identity shapes:
//! input validation, password hashing, persistence and session token
//! issuance. The two route variants normalize into one generic path keyed by
//! [`Identity`] and [`LoginKey`].

use crate::api::common::first_validation_message;
use crate::auth::models::*;
use crate::config::Config;
use crate::database::models::{Identity, LoginKey, NewUser};
use crate::errors::{ServiceError, ServiceResult, StoreError};
use crate::repositories::UserStore;
use crate::utils::jwt::JwtUtils;
use crate::utils::password;
use validator::Validate;

/// Authentication service for handling registration, login and token issuance
pub struct AuthService<S> {
    users: S,
    jwt: JwtUtils,
}

impl<S: UserStore> AuthService<S> {
    /// Create a new AuthService instance over a user store.
    pub fn new(users: S, config: &Config) -> ServiceResult<Self> {
        let jwt = JwtUtils::new(config)?;

        Ok(AuthService { users, jwt })
    }

    /// Registers a contact-identity account.
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<()> {
        check_shape(&request, RegisterRequest::FIELD_ORDER)?;

        let RegisterRequest {
            first_name,
            last_name,
            email,
            phone,
            password,
        } = request;
        let identity = Identity::Contact {
            first_name,
            last_name,
            email,
            phone,
        };

        self.register_identity(identity, &password).await
    }

    /// Registers a username-identity account.
    pub async fn register_basic(&self, request: BasicRegisterRequest) -> ServiceResult<()> {
        check_shape(&request, BasicRegisterRequest::FIELD_ORDER)?;

        let BasicRegisterRequest { username, password } = request;

        self.register_identity(Identity::Username { username }, &password)
            .await
    }

    /// Authenticates a contact-identity account by phone.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginData> {
        check_shape(&request, LoginRequest::FIELD_ORDER)?;

        self.login_with_key(LoginKey::Phone(request.phone), &request.password)
            .await
    }

    /// Authenticates a username-identity account.
    pub async fn login_basic(&self, request: BasicLoginRequest) -> ServiceResult<LoginData> {
        check_shape(&request, BasicLoginRequest::FIELD_ORDER)?;

        self.login_with_key(LoginKey::Username(request.username), &request.password)
            .await
    }

    /// Shared registration path: hash, then insert.
    ///
    /// There is no duplicate probe before the insert; the store's unique
    /// indexes decide, so two racing registrations for the same identity
    /// resolve to exactly one success.
    async fn register_identity(&self, identity: Identity, password: &str) -> ServiceResult<()> {
        let conflict_message = identity.conflict_message();

        let password_hash = password::hash_password(password)?;
        let user = NewUser {
            identity,
            password_hash,
        }
        .into_user();

        match self.users.insert(user).await {
            Ok(_) => Ok(()),
            Err(StoreError::DuplicateIdentity) => {
                Err(ServiceError::already_exists(conflict_message))
            }
            Err(StoreError::Backend(source)) => Err(ServiceError::Database { source }),
        }
    }

    /// Shared login path: lookup, verify, issue.
    ///
    /// Unknown identity and wrong password produce the same rejection so
    /// callers cannot enumerate accounts.
    async fn login_with_key(&self, key: LoginKey, password: &str) -> ServiceResult<LoginData> {
        let rejection = key.rejection_message();

        let user = self
            .users
            .find_by_login_key(&key)
            .await?
            .ok_or_else(|| ServiceError::invalid_credentials(rejection))?;

        if !password::verify_password(password, &user.password_hash) {
            return Err(ServiceError::invalid_credentials(rejection));
        }

        let token = self.jwt.issue_token(&user)?;

        Ok(LoginData {
            token,
            expires_in: self.jwt.expires_in_seconds(),
        })
    }
}

fn check_shape<T: Validate>(request: &T, field_order: &[&str]) -> ServiceResult<()> {
    if let Err(errors) = request.validate() {
        return Err(ServiceError::validation(first_validation_message(
            &errors,
            field_order,
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::User;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// In-memory stand-in for the SQLite repository, with the same
    /// uniqueness semantics as the unique indexes.
    #[derive(Clone, Default)]
    struct MemoryStore {
        users: Arc<Mutex<Vec<User>>>,
    }

    impl MemoryStore {
        fn len(&self) -> usize {
            self.users.lock().unwrap().len()
        }

        fn first(&self) -> Option<User> {
            self.users.lock().unwrap().first().cloned()
        }
    }

    #[async_trait]
    impl UserStore for MemoryStore {
        async fn find_by_login_key(&self, key: &LoginKey) -> Result<Option<User>> {
            let users = self.users.lock().unwrap();
            Ok(users
                .iter()
                .find(|user| match key {
                    LoginKey::Phone(phone) => user.phone.as_deref() == Some(phone.as_str()),
                    LoginKey::Username(username) => {
                        user.username.as_deref() == Some(username.as_str())
                    }
                })
                .cloned())
        }

        async fn insert(&self, user: User) -> Result<User, StoreError> {
            let mut users = self.users.lock().unwrap();
            let clash = users.iter().any(|existing| {
                (user.email.is_some() && existing.email == user.email)
                    || (user.phone.is_some() && existing.phone == user.phone)
                    || (user.username.is_some() && existing.username == user.username)
            });
            if clash {
                return Err(StoreError::DuplicateIdentity);
            }

            users.push(user.clone());
            Ok(user)
        }
    }

    /// Store whose backend is down; every call fails.
    struct FailingStore;

    #[async_trait]
    impl UserStore for FailingStore {
        async fn find_by_login_key(&self, _key: &LoginKey) -> Result<Option<User>> {
            Err(anyhow!("connection reset"))
        }

        async fn insert(&self, _user: User) -> Result<User, StoreError> {
            Err(StoreError::Backend(anyhow!("connection reset")))
        }
    }

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 1,
            jwt_secret: "unit-test-secret".to_string(),
            jwt_expires_in_seconds: 3600,
            server_port: 0,
        }
    }

    fn make_service(store: MemoryStore) -> AuthService<MemoryStore> {
        AuthService::new(store, &test_config()).unwrap()
    }

    fn contact_request() -> RegisterRequest {
        RegisterRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "1234567890".to_string(),
            password: "secret1".to_string(),
        }
    }

    fn basic_request(username: &str, password: &str) -> BasicRegisterRequest {
        BasicRegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn basic_login(username: &str, password: &str) -> BasicLoginRequest {
        BasicLoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn username_register_login_scenario() {
        let store = MemoryStore::default();
        let service = make_service(store.clone());

        service
            .register_basic(basic_request("alice", "secret1"))
            .await
            .unwrap();

        // Same username again: rejected by the store, not by a probe.
        let duplicate = service
            .register_basic(basic_request("alice", "other-password"))
            .await
            .unwrap_err();
        match duplicate {
            ServiceError::AlreadyExists { message } => {
                assert_eq!(message, "Username already exists")
            }
            other => panic!("expected AlreadyExists, got {other:?}"),
        }
        assert_eq!(store.len(), 1);

        let wrong = service
            .login_basic(basic_login("alice", "wrong"))
            .await
            .unwrap_err();
        match wrong {
            ServiceError::InvalidCredentials { message } => {
                assert_eq!(message, "Invalid username or password")
            }
            other => panic!("expected InvalidCredentials, got {other:?}"),
        }

        let data = service
            .login_basic(basic_login("alice", "secret1"))
            .await
            .unwrap();
        assert!(!data.token.is_empty());
        assert_eq!(data.expires_in, 3600);
    }

    #[tokio::test]
    async fn issued_token_carries_the_user_id() {
        let store = MemoryStore::default();
        let service = make_service(store.clone());

        service
            .register_basic(basic_request("alice", "secret1"))
            .await
            .unwrap();
        let data = service
            .login_basic(basic_login("alice", "secret1"))
            .await
            .unwrap();

        let jwt = JwtUtils::new(&test_config()).unwrap();
        let claims = jwt.validate_token(&data.token).unwrap();
        let stored = store.first().unwrap();
        assert_eq!(claims.sub, stored.id);
        assert_eq!(claims.username.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn stored_password_is_hashed_and_verifiable() {
        let store = MemoryStore::default();
        let service = make_service(store.clone());

        service.register(contact_request()).await.unwrap();

        let stored = store.first().unwrap();
        assert_ne!(stored.password_hash, "secret1");
        assert!(password::verify_password("secret1", &stored.password_hash));
    }

    #[tokio::test]
    async fn contact_phone_validation_scenario() {
        let store = MemoryStore::default();
        let service = make_service(store.clone());

        service.register(contact_request()).await.unwrap();

        let mut short_phone = contact_request();
        short_phone.email = "other@example.com".to_string();
        short_phone.phone = "12345".to_string();
        match service.register(short_phone).await.unwrap_err() {
            ServiceError::Validation { message } => {
                assert!(message.contains("Phone"), "message was: {message}")
            }
            other => panic!("expected Validation, got {other:?}"),
        }
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_contact_identity_is_rejected() {
        let store = MemoryStore::default();
        let service = make_service(store.clone());

        service.register(contact_request()).await.unwrap();

        // Same phone, fresh email: still a conflict.
        let mut same_phone = contact_request();
        same_phone.email = "fresh@example.com".to_string();
        let error = service.register(same_phone).await.unwrap_err();
        match error {
            ServiceError::AlreadyExists { message } => {
                assert_eq!(message, "Phone or email already exists")
            }
            other => panic!("expected AlreadyExists, got {other:?}"),
        }
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn invalid_registration_writes_nothing() {
        let store = MemoryStore::default();
        let service = make_service(store.clone());

        let mut request = contact_request();
        request.email = "not-an-email".to_string();
        let error = service.register(request).await.unwrap_err();

        assert!(matches!(error, ServiceError::Validation { .. }));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn validation_reports_first_field_in_declaration_order() {
        let store = MemoryStore::default();
        let service = make_service(store);

        // Both the first name and the phone are invalid; the first name is
        // declared first and wins.
        let mut request = contact_request();
        request.first_name = "A".to_string();
        request.phone = "12345".to_string();

        match service.register(request).await.unwrap_err() {
            ServiceError::Validation { message } => {
                assert_eq!(message, "First name must be between 2-50 characters")
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_are_indistinguishable() {
        let store = MemoryStore::default();
        let service = make_service(store.clone());

        service
            .register_basic(basic_request("alice", "secret1"))
            .await
            .unwrap();

        let wrong_password = service
            .login_basic(basic_login("alice", "wrong"))
            .await
            .unwrap_err();
        let unknown_user = service
            .login_basic(basic_login("nobody", "secret1"))
            .await
            .unwrap_err();

        let render = |error: ServiceError| match error {
            ServiceError::InvalidCredentials { message } => message,
            other => panic!("expected InvalidCredentials, got {other:?}"),
        };
        assert_eq!(render(wrong_password), render(unknown_user));
    }

    #[tokio::test]
    async fn login_validates_presence_only() {
        let store = MemoryStore::default();
        let service = make_service(store);

        let error = service
            .login(LoginRequest {
                phone: String::new(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(error, ServiceError::Validation { .. }));

        // A malformed phone is not a validation error at login; it just
        // fails the lookup with the generic rejection.
        let store = MemoryStore::default();
        let service = make_service(store);
        let error = service
            .login(LoginRequest {
                phone: "123".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(error, ServiceError::InvalidCredentials { .. }));
    }

    #[tokio::test]
    async fn store_faults_surface_as_database_errors() {
        let service = AuthService::new(FailingStore, &test_config()).unwrap();

        let register_error = service
            .register_basic(basic_request("alice", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(register_error, ServiceError::Database { .. }));

        let login_error = service
            .login_basic(basic_login("alice", "secret1"))
            .await
            .unwrap_err();
        assert!(matches!(login_error, ServiceError::Database { .. }));
    }
}

//! Account operations: registration, credential checks, profile and admin
//! management.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use foodbag_auth::password::{PasswordHasher, PasswordValidator};
use foodbag_auth::rbac::{ADMINISTRATORS, AuthorizationGuard};
use foodbag_core::config::AuthConfig;
use foodbag_core::deadline::within;
use foodbag_core::error::AppError;
use foodbag_database::UserStore;
use foodbag_database::store::DUPLICATE_EMAIL_MESSAGE;
use foodbag_entity::user::{CreateUser, User, UserRole};

use crate::context::RequestContext;

/// Message for any failed credential check. Deliberately does not say
/// which half was wrong.
const BAD_CREDENTIALS: &str = "Incorrect email or password";

/// Data submitted at self-registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUser {
    /// Login email.
    pub email: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
    /// Requested role; defaults to client.
    pub role: Option<UserRole>,
    /// Display name (optional).
    pub full_name: Option<String>,
}

/// Handles account lifecycle.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    guard: AuthorizationGuard,
    allow_admin_registration: bool,
    timeout: Duration,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        config: &AuthConfig,
        timeout: Duration,
    ) -> Self {
        Self {
            users,
            hasher,
            validator: Arc::new(PasswordValidator::new(config)),
            guard: AuthorizationGuard::new(),
            allow_admin_registration: config.allow_admin_registration,
            timeout,
        }
    }

    /// Registers a new account.
    ///
    /// The email must be unused (case-insensitively). Requesting the admin
    /// role is refused unless explicitly enabled in configuration.
    pub async fn register(&self, req: RegisterUser) -> Result<User, AppError> {
        let email = req.email.trim().to_string();
        validate_email(&email)?;
        self.validator.validate(&req.password)?;

        let role = req.role.unwrap_or_default();
        if role.is_admin() && !self.allow_admin_registration {
            return Err(AppError::forbidden(
                "Self-registration with the admin role is not allowed",
            ));
        }

        if within(self.timeout, "find_user_by_email", self.users.find_by_email(&email))
            .await?
            .is_some()
        {
            return Err(AppError::bad_request(DUPLICATE_EMAIL_MESSAGE));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let full_name = req
            .full_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let user = within(
            self.timeout,
            "create_user",
            self.users.create(&CreateUser {
                email,
                password_hash,
                role,
                full_name,
            }),
        )
        .await?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Checks credentials, returning the user on success.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = within(self.timeout, "find_user_by_email", self.users.find_by_email(email))
            .await?
            .ok_or_else(|| AppError::unauthorized(BAD_CREDENTIALS))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized(BAD_CREDENTIALS));
        }
        Ok(user)
    }

    /// Loads a user by id.
    pub async fn find(&self, id: Uuid) -> Result<Option<User>, AppError> {
        within(self.timeout, "find_user_by_id", self.users.find_by_id(id)).await
    }

    /// Gets the caller's own profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.find(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Lists every account. Admin only.
    pub async fn list_all(&self, ctx: &RequestContext) -> Result<Vec<User>, AppError> {
        self.guard.require_role(ctx.role, ADMINISTRATORS)?;
        within(self.timeout, "list_users", self.users.list_all()).await
    }

    /// Deletes an account with its food bags and bookings. Admin only.
    pub async fn delete_user(&self, ctx: &RequestContext, user_id: Uuid) -> Result<(), AppError> {
        self.guard.require_role(ctx.role, ADMINISTRATORS)?;
        if user_id == ctx.user_id {
            return Err(AppError::bad_request(
                "Administrators cannot delete their own account",
            ));
        }

        let deleted = within(
            self.timeout,
            "delete_user",
            self.users.delete_cascade(user_id),
        )
        .await?;
        if !deleted {
            return Err(AppError::not_found("User not found"));
        }

        info!(user_id = %user_id, deleted_by = %ctx.user_id, "User deleted");
        Ok(())
    }

    /// Ensures the bootstrap administrator exists. Returns true when it was
    /// created by this call.
    pub async fn seed_admin(&self, email: &str, password: &str) -> Result<bool, AppError> {
        if within(self.timeout, "find_user_by_email", self.users.find_by_email(email))
            .await?
            .is_some()
        {
            return Ok(false);
        }

        let password_hash = self.hasher.hash_password(password)?;
        let admin = CreateUser {
            email: email.trim().to_string(),
            password_hash,
            role: UserRole::Admin,
            full_name: Some("Administrator".to_string()),
        };
        let created = within(self.timeout, "create_user", self.users.create(&admin)).await;

        match created {
            Ok(user) => {
                info!(user_id = %user.id, email = %user.email, "Seeded administrator account");
                Ok(true)
            }
            // Another instance seeded it between the lookup and the insert.
            Err(e) if e.message == DUPLICATE_EMAIL_MESSAGE => Ok(false),
            Err(e) => Err(e),
        }
    }
}

fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = email.len() <= 100
        && !email.chars().any(char::is_whitespace)
        && matches!(
            email.split_once('@'),
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        );
    if valid {
        Ok(())
    } else {
        Err(AppError::validation("Invalid email address"))
    }
}

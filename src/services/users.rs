//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult, ErrorCode},
    models::user::{CreateUser, UpdateProfile, UpdateUser, User, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate user by login and return a JWT token
    pub async fn authenticate(&self, login: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_login(login)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid login or password".to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication("Invalid login or password".to_string()));
        }

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    /// Create JWT token for a user
    fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.login.clone(),
            user_id: user.id,
            account_type: user.account_type(),
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify user password
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        if let Some(ref hash) = user.password {
            let parsed_hash = PasswordHash::new(hash)
                .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
            return Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok());
        }

        Ok(false)
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Create the initial admin account on a fresh database.
    ///
    /// Does nothing when the login is already taken. The default
    /// password must be changed after first login.
    pub async fn ensure_admin_account(&self) -> AppResult<()> {
        if self.repository.users.get_by_login("admin").await?.is_some() {
            return Ok(());
        }

        let admin = CreateUser {
            login: "admin".to_string(),
            password: "admin".to_string(),
            firstname: None,
            lastname: None,
            email: None,
            account_type: crate::models::enums::AccountType::Admin,
        };
        let hash = self.hash_password(&admin.password)?;
        self.repository.users.create(&admin, hash).await?;
        tracing::info!("Created initial admin account");
        Ok(())
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// List all users
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    /// Create a new user
    pub async fn create_user(&self, user: CreateUser) -> AppResult<User> {
        if self.repository.users.login_exists(&user.login, None).await? {
            return Err(AppError::Conflict(ErrorCode::Duplicate, "Login already exists".to_string()));
        }

        let password_hash = self.hash_password(&user.password)?;
        self.repository.users.create(&user, password_hash).await
    }

    /// Update an existing user
    pub async fn update_user(&self, id: i32, user: UpdateUser) -> AppResult<User> {
        self.repository.users.get_by_id(id).await?;

        if let Some(ref login) = user.login {
            if self.repository.users.login_exists(login, Some(id)).await? {
                return Err(AppError::Conflict(ErrorCode::Duplicate, "Login already exists".to_string()));
            }
        }

        let password_hash = match user.password {
            Some(ref password) => Some(self.hash_password(password)?),
            None => None,
        };

        self.repository.users.update(id, &user, password_hash).await
    }

    /// Delete a user
    pub async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.repository.users.delete(id).await
    }

    /// Update user's own profile
    pub async fn update_profile(&self, user_id: i32, profile: UpdateProfile) -> AppResult<User> {
        let user = self.repository.users.get_by_id(user_id).await?;

        // Changing the password requires proving the current one
        if profile.new_password.is_some() {
            let current_password = profile.current_password.as_ref().ok_or_else(|| {
                AppError::Validation("Current password required to change password".to_string())
            })?;

            if !self.verify_password(&user, current_password)? {
                return Err(AppError::Authentication("Current password is incorrect".to_string()));
            }
        }

        let password_hash = match profile.new_password {
            Some(ref new_password) => Some(self.hash_password(new_password)?),
            None => None,
        };

        self.repository
            .users
            .update_profile(user_id, &profile, password_hash)
            .await
    }
}

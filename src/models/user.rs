//! User model, JWT claims and role checks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

use super::enums::AccountType;

/// User row from database
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub login: String,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub account_type: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn account_type(&self) -> AccountType {
        self.account_type.parse().unwrap_or(AccountType::Student)
    }
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserInfo {
    pub id: i32,
    pub login: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub account_type: AccountType,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        let account_type = user.account_type();
        Self {
            id: user.id,
            login: user.login,
            firstname: user.firstname,
            lastname: user.lastname,
            email: user.email,
            account_type,
        }
    }
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 3, max = 64))]
    pub login: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub account_type: AccountType,
}

/// Update user request (staff)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 3, max = 64))]
    pub login: Option<String>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub account_type: Option<AccountType>,
}

/// Update own profile request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfile {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub current_password: Option<String>,
    #[validate(length(min = 8))]
    pub new_password: Option<String>,
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub account_type: AccountType,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    // Authorization checks

    pub fn is_staff(&self) -> bool {
        self.account_type.is_staff()
    }

    pub fn is_admin(&self) -> bool {
        self.account_type == AccountType::Admin
    }

    /// Require a student account (seat reservations, borrow requests)
    pub fn require_student(&self) -> Result<(), AppError> {
        if self.account_type == AccountType::Student {
            Ok(())
        } else {
            Err(AppError::Authorization("Student account required".to_string()))
        }
    }

    /// Require library staff (librarian or admin)
    pub fn require_staff(&self) -> Result<(), AppError> {
        if self.is_staff() {
            Ok(())
        } else {
            Err(AppError::Authorization("Library staff privileges required".to_string()))
        }
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization("Administrator privileges required".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(account_type: AccountType) -> UserClaims {
        UserClaims {
            sub: "test".to_string(),
            user_id: 1,
            account_type,
            exp: Utc::now().timestamp() + 3600,
            iat: Utc::now().timestamp(),
        }
    }

    #[test]
    fn student_cannot_pass_staff_check() {
        assert!(claims(AccountType::Student).require_staff().is_err());
        assert!(claims(AccountType::Student).require_student().is_ok());
    }

    #[test]
    fn librarian_is_staff_but_not_admin() {
        let c = claims(AccountType::Librarian);
        assert!(c.require_staff().is_ok());
        assert!(c.require_admin().is_err());
        assert!(c.require_student().is_err());
    }

    #[test]
    fn token_round_trip() {
        let c = claims(AccountType::Admin);
        let token = c.create_token("secret").unwrap();
        let parsed = UserClaims::from_token(&token, "secret").unwrap();
        assert_eq!(parsed.user_id, c.user_id);
        assert_eq!(parsed.account_type, AccountType::Admin);
        assert!(UserClaims::from_token(&token, "other-secret").is_err());
    }
}

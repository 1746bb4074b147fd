//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::{
        enums::AccountType,
        user::{CreateUser, UpdateProfile, UpdateUser, User},
    },
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchUser, format!("User with id {} not found", id)))
    }

    /// Get user by login
    pub async fn get_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE login = $1")
            .bind(login)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Check whether a login is taken, optionally excluding a user id
    pub async fn login_exists(&self, login: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE login = $1 AND ($2::int IS NULL OR id != $2))",
        )
        .bind(login)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// List all users, staff view
    pub async fn list(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY lastname, firstname, login")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    /// Create a new user with an already-hashed password
    pub async fn create(&self, user: &CreateUser, password_hash: String) -> AppResult<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (login, password, firstname, lastname, email, account_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&user.login)
        .bind(password_hash)
        .bind(&user.firstname)
        .bind(&user.lastname)
        .bind(&user.email)
        .bind(user.account_type.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update an existing user
    pub async fn update(
        &self,
        id: i32,
        user: &UpdateUser,
        password_hash: Option<String>,
    ) -> AppResult<User> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET login = COALESCE($2, login),
                password = COALESCE($3, password),
                firstname = COALESCE($4, firstname),
                lastname = COALESCE($5, lastname),
                email = COALESCE($6, email),
                account_type = COALESCE($7, account_type)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&user.login)
        .bind(password_hash)
        .bind(&user.firstname)
        .bind(&user.lastname)
        .bind(&user.email)
        .bind(user.account_type.as_ref().map(AccountType::as_str))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchUser, format!("User with id {} not found", id)))?;

        Ok(updated)
    }

    /// Update a user's own profile fields
    pub async fn update_profile(
        &self,
        id: i32,
        profile: &UpdateProfile,
        password_hash: Option<String>,
    ) -> AppResult<User> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET firstname = COALESCE($2, firstname),
                lastname = COALESCE($3, lastname),
                email = COALESCE($4, email),
                password = COALESCE($5, password)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&profile.firstname)
        .bind(&profile.lastname)
        .bind(&profile.email)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchUser, format!("User with id {} not found", id)))?;

        Ok(updated)
    }

    /// Delete a user
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(ErrorCode::NoSuchUser, format!("User with id {} not found", id)));
        }

        Ok(())
    }
}

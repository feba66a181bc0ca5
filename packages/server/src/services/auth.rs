use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::entity::user;
use crate::error::AppError;
use crate::models::auth::LoginResponse;
use crate::repository::UserRepository;
use crate::utils::hash;
use crate::utils::jwt::{self, Claims, TokenError};

/// Verify a bearer token with `secret`, keeping expired and invalid apart.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    jwt::verify(token, secret).map_err(|e| match e {
        TokenError::Expired => AppError::TokenExpired,
        other => {
            tracing::debug!("Rejected token: {}", other);
            AppError::TokenInvalid
        }
    })
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_secret: String,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_secret: &str, token_ttl: Duration) -> Self {
        Self {
            users,
            jwt_secret: jwt_secret.to_string(),
            token_ttl,
        }
    }

    /// Check credentials and issue a session token.
    ///
    /// Unknown users and wrong passwords produce the same error.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AppError> {
        let user = self
            .users
            .get_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AppError::AccountDisabled);
        }

        let stored = user.password_hash.clone();
        let candidate = password.to_owned();
        let verified =
            tokio::task::spawn_blocking(move || hash::verify_password(&candidate, &stored))
                .await
                .map_err(|e| AppError::Internal(format!("Password verify task failed: {e}")))?;
        let is_valid = match verified {
            Ok(valid) => valid,
            Err(e) => {
                // Answered like a wrong password.
                tracing::error!(user_id = %user.user_id, error = %e, "Stored password hash is malformed");
                false
            }
        };
        if !is_valid {
            return Err(AppError::InvalidCredentials);
        }

        if let Err(e) = self.users.update_last_login(&user.user_id, Utc::now()).await {
            tracing::warn!(user_id = %user.user_id, error = %e, "Failed to record last login");
        }

        let access_token = jwt::sign(
            &user.user_id,
            &user.username,
            &user.role,
            &self.jwt_secret,
            self.token_ttl,
        )
        .map_err(|e| AppError::Internal(format!("JWT sign error: {e}")))?;

        Ok(LoginResponse {
            access_token,
            token_type: "bearer",
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            role: user.role,
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        verify_token(token, &self.jwt_secret)
    }

    pub async fn current_user(&self, username: &str) -> Result<user::Model, AppError> {
        self.users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{username}' not found")))
    }
}

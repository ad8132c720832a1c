//! Login Use Case
//!
//! Verifies email + password and signs an access token.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::session::{AuthSession, UserProfile};
use crate::application::token::issue_access_token;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<AuthSession> {
        let email = Email::new(&input.email)?;
        if input.password.is_empty() {
            return Err(AuthError::Validation("Password cannot be empty".to_string()));
        }
        let raw_password = RawPassword::for_login(input.password);

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            // Hash anyway so unknown emails take as long as wrong passwords
            let _ = UserPassword::from_raw(&raw_password, self.config.pepper());
            return Err(AuthError::InvalidCredentials);
        };

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        // Only reported to callers who proved they know the password
        if !user.can_login() {
            return Err(AuthError::AccountDeactivated);
        }

        let access_token = issue_access_token(&user, &self.config, Utc::now())?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(AuthSession {
            access_token,
            user: UserProfile::from(&user),
        })
    }
}

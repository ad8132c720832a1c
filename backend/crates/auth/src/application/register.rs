//! Register Use Case
//!
//! Creates a new user account and signs the first access token.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::session::{AuthSession, UserProfile};
use crate::application::token::issue_access_token;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    person_name::PersonName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<AuthSession> {
        let email = Email::new(&input.email)?;
        let raw_password = RawPassword::new(input.password)?;
        let first_name = PersonName::new(&input.first_name, "firstName")?;
        let last_name = PersonName::new(&input.last_name, "lastName")?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        let user = User::new(email, password_hash, first_name, last_name);

        // A concurrent registration can still win; the store reports EmailTaken
        self.user_repo.create(&user).await?;

        let access_token = issue_access_token(&user, &self.config, Utc::now())?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(AuthSession {
            access_token,
            user: UserProfile::from(&user),
        })
    }
}

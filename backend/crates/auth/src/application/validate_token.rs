//! Validate Token Use Case
//!
//! Turns a bearer token into the identity of an active user.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::token::decode_access_token;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Identity attached to requests that passed the bearer check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

pub struct ValidateTokenUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ValidateTokenUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<AuthenticatedUser> {
        let claims = decode_access_token(token, &self.config)?;
        let user_id: UserId = claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;

        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or(AuthError::UserInactive)?;

        Ok(AuthenticatedUser {
            user_id: user.user_id,
            email: user.email.into_inner(),
        })
    }
}

//! Access Tokens
//!
//! Stateless HS256 JWTs carrying `{ sub, email, iat, exp }`.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::error::{AuthError, AuthResult};

/// Access token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Sign an access token for `user`, valid from `now` for the configured TTL.
pub fn issue_access_token(user: &User, config: &AuthConfig, now: DateTime<Utc>) -> AuthResult<String> {
    let iat = now.timestamp();
    let claims = Claims {
        sub: user.user_id.to_string(),
        email: user.email.as_str().to_owned(),
        iat,
        exp: iat.saturating_add(config.token_ttl_secs()),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(&config.jwt_secret),
    )
    .map_err(|e| AuthError::Internal(format!("Token signing failed: {}", e)))
}

/// Verify signature, algorithm and expiry, then return the claims.
pub fn decode_access_token(token: &str, config: &AuthConfig) -> AuthResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(&config.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Access token rejected");
        AuthError::InvalidToken
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        email::Email,
        person_name::PersonName,
        user_password::{RawPassword, UserPassword},
    };
    use chrono::Duration;

    fn user() -> User {
        let raw = RawPassword::for_login("password123".to_string());
        User::new(
            Email::new("shopper@example.com").unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
            PersonName::new("Ada", "firstName").unwrap(),
            PersonName::new("Lovelace", "lastName").unwrap(),
        )
    }

    fn config() -> AuthConfig {
        AuthConfig::new(b"unit-test-secret".to_vec())
    }

    #[test]
    fn test_issue_and_decode() {
        let user = user();
        let token = issue_access_token(&user, &config(), Utc::now()).unwrap();
        let claims = decode_access_token(&token, &config()).unwrap();

        assert_eq!(claims.sub, user.user_id.to_string());
        assert_eq!(claims.email, "shopper@example.com");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let issued = Utc::now() - Duration::hours(25);
        let token = issue_access_token(&user(), &config(), issued).unwrap();

        assert!(matches!(
            decode_access_token(&token, &config()),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue_access_token(&user(), &config(), Utc::now()).unwrap();
        let other = AuthConfig::new(b"another-secret".to_vec());

        assert!(matches!(
            decode_access_token(&token, &other),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let claims = Claims {
            sub: user().user_id.to_string(),
            email: "shopper@example.com".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();

        assert!(matches!(
            decode_access_token(&token, &config()),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(decode_access_token("not.a.jwt", &config()).is_err());
        assert!(decode_access_token("", &config()).is_err());
    }
}

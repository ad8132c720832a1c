//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Default access token lifetime (24 hours)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: Vec<u8>,
    /// Access token lifetime
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: DEFAULT_TOKEN_TTL,
            password_pepper: None,
        }
    }

    /// Create config with a random signing secret (for development)
    ///
    /// Tokens do not survive a restart.
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self::new(secret.to_vec())
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_pepper(mut self, pepper: impl Into<Vec<u8>>) -> Self {
        self.password_pepper = Some(pepper.into());
        self
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Parse a token lifetime such as `24h`, `30m`, `7d`, `90s` or `3600`.
///
/// A bare number is seconds. Zero is rejected.
pub fn parse_token_ttl(value: &str) -> Option<Duration> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (digits, unit) = value.split_at(split);

    let amount: u64 = digits.parse().ok()?;
    let multiplier = match unit.trim() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 3600,
        "d" => 86_400,
        _ => return None,
    };

    let secs = amount.checked_mul(multiplier)?;
    (secs > 0).then(|| Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_ttl() {
        assert_eq!(parse_token_ttl("24h"), Some(Duration::from_secs(86_400)));
        assert_eq!(parse_token_ttl("30m"), Some(Duration::from_secs(1_800)));
        assert_eq!(parse_token_ttl("7d"), Some(Duration::from_secs(604_800)));
        assert_eq!(parse_token_ttl("90s"), Some(Duration::from_secs(90)));
        assert_eq!(parse_token_ttl("3600"), Some(Duration::from_secs(3_600)));
    }

    #[test]
    fn test_parse_token_ttl_rejects_garbage() {
        assert_eq!(parse_token_ttl(""), None);
        assert_eq!(parse_token_ttl("h"), None);
        assert_eq!(parse_token_ttl("0"), None);
        assert_eq!(parse_token_ttl("10w"), None);
        assert_eq!(parse_token_ttl("-5m"), None);
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = AuthConfig::new(b"top-secret".to_vec()).with_pepper(b"sea-salt".to_vec());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("top-secret"));
        assert!(!debug.contains("sea-salt"));
    }

    #[test]
    fn test_random_secrets_differ() {
        assert_ne!(
            AuthConfig::with_random_secret().jwt_secret,
            AuthConfig::with_random_secret().jwt_secret
        );
    }
}

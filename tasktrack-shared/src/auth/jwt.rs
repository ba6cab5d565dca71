/// JWT token generation and validation
///
/// TaskTrack authenticates every request (except login) with a bearer token
/// signed using HS256 (HMAC-SHA256). The token carries the full actor
/// identity (id, role, name, email) so handlers never need a database
/// round-trip to resolve the actor.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: 24 hours by default (configurable)
/// - **Validation**: signature, expiration, not-before, and issuer checks
/// - **Secret Management**: secrets should be at least 32 bytes
///
/// # Example
///
/// ```
/// use tasktrack_shared::auth::jwt::{create_token, validate_token, Claims};
/// use tasktrack_shared::models::user::Role;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = Claims::new(
///     Uuid::new_v4(),
///     Role::Member,
///     "Bob".to_string(),
///     "bob@example.com".to_string(),
/// );
/// let token = create_token(&claims, "your-secret-key-at-least-32-bytes")?;
///
/// let validated = validate_token(&token, "your-secret-key-at-least-32-bytes")?;
/// assert_eq!(validated.sub, claims.sub);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::Role;

const ISSUER: &str = "tasktrack";

/// Default token lifetime: one day
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Invalid issuer
    #[error("Invalid token issuer")]
    InvalidIssuer,
}

/// JWT claims structure
///
/// Standard claims (`sub`, `iss`, `iat`, `exp`, `nbf`) plus the TaskTrack
/// actor identity (`role`, `name`, `email`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user ID
    pub sub: Uuid,

    /// Issuer - always "tasktrack"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Actor role (custom claim)
    pub role: Role,

    /// Actor display name (custom claim)
    pub name: String,

    /// Actor email (custom claim)
    pub email: String,
}

impl Claims {
    /// Creates new claims with the default 24-hour expiration
    pub fn new(user_id: Uuid, role: Role, name: String, email: String) -> Self {
        Self::with_expiration(user_id, role, name, email, Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
    }

    /// Creates claims with a custom expiration
    pub fn with_expiration(
        user_id: Uuid,
        role: Role,
        name: String,
        email: String,
        expires_in: Duration,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
            role,
            name,
            email,
        }
    }

    /// Checks if token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a JWT token from claims
///
/// Signs the token using HS256 with the provided secret.
///
/// # Errors
///
/// Returns `JwtError::CreateError` if token encoding fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a JWT token and extracts claims
///
/// Verifies the signature, expiration, not-before time, and issuer.
///
/// # Errors
///
/// Returns `JwtError::Expired` for an expired token, `JwtError::InvalidIssuer`
/// for a wrong issuer, and `JwtError::ValidationError` otherwise.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> Claims {
        Claims::new(
            Uuid::new_v4(),
            Role::Manager,
            "Manager One".to_string(),
            "manager1@example.com".to_string(),
        )
    }

    #[test]
    fn test_claims_creation() {
        let claims = sample_claims();

        assert_eq!(claims.iss, "tasktrack");
        assert_eq!(claims.role, Role::Manager);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_create_and_validate_token() {
        let secret = "test-secret-key-at-least-32-bytes-long";
        let claims = sample_claims();
        let token = create_token(&claims, secret).expect("Should create token");

        let validated = validate_token(&token, secret).expect("Should validate token");
        assert_eq!(validated.sub, claims.sub);
        assert_eq!(validated.role, Role::Manager);
        assert_eq!(validated.name, "Manager One");
        assert_eq!(validated.email, "manager1@example.com");
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let token = create_token(&sample_claims(), "secret1").expect("Should create token");

        assert!(validate_token(&token, "wrong-secret").is_err());
    }

    #[test]
    fn test_validate_expired_token() {
        let secret = "test-secret";

        let claims = Claims::with_expiration(
            Uuid::new_v4(),
            Role::Member,
            "Member One".to_string(),
            "member1@example.com".to_string(),
            Duration::seconds(-3600),
        );

        assert!(claims.is_expired());

        let token = create_token(&claims, secret).expect("Should create token");
        let result = validate_token(&token, secret);

        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_validate_garbage_token() {
        assert!(validate_token("not-a-token", "secret").is_err());
    }
}

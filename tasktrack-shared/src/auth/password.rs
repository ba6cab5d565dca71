/// Password hashing and credential policy
///
/// This module provides password hashing using Argon2id and enforces the
/// TaskTrack credential policy for every operation that sets a password
/// (user creation, admin reset, self-service change).
///
/// # Security
///
/// - **Algorithm**: Argon2id (hybrid of Argon2i and Argon2d)
/// - **Memory**: 64 MB (65536 KB)
/// - **Iterations**: 3 passes
/// - **Parallelism**: 4 lanes
/// - **Output**: 32-byte hash
///
/// # Credential policy
///
/// A plaintext password is accepted only if it:
/// - is at least 8 characters long
/// - contains a lowercase letter, an uppercase letter, a digit, and a
///   symbol from [`ALLOWED_SYMBOLS`]
/// - is not (case-insensitively) one of a fixed deny-list of common weak
///   passwords
/// - does not (case-insensitively) contain the account holder's name or
///   the local part of their email address
///
/// # Example
///
/// ```
/// use tasktrack_shared::auth::password::{hash_password, verify_password, validate_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// validate_password("Str0ng!Pass", "Bob", "bob@x.com")?;
///
/// let hash = hash_password("Str0ng!Pass")?;
/// assert!(verify_password("Str0ng!Pass", &hash)?);
/// assert!(!verify_password("wrong_password", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Symbols that satisfy the "at least one symbol" requirement
pub const ALLOWED_SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:'\",.<>?/\\|`~";

/// Common weak passwords, rejected regardless of character-class checks
const DENY_LIST: &[&str] = &[
    "password",
    "password1",
    "passw0rd",
    "12345678",
    "123456789",
    "qwerty123",
    "letmein",
    "welcome1",
    "iloveyou",
    "admin123",
    "abc12345",
    "changeme",
];

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Error type for credential policy violations
///
/// Each variant carries a message suitable for returning to the caller
/// verbatim; the policy is intentionally explicit about what failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least 8 characters long")]
    TooShort,

    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one digit")]
    MissingDigit,

    #[error("Password must contain at least one symbol")]
    MissingSymbol,

    #[error("Password is too common")]
    CommonPassword,

    #[error("Password must not contain your name")]
    ContainsName,

    #[error("Password must not contain your email address")]
    ContainsEmail,
}

/// Hashes a password using Argon2id with secure parameters
///
/// # Returns
///
/// PHC string format hash (includes algorithm, parameters, salt, and hash),
/// e.g. `$argon2id$v=19$m=65536,t=3,p=4$...`
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    // m_cost 64 MB, t_cost 3 iterations, p_cost 4 lanes
    let params = ParamsBuilder::new()
        .m_cost(65536)
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored hash
///
/// Uses constant-time comparison; returns `Ok(false)` for a wrong password
/// and an error only for a malformed hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    // Parameters are embedded in the hash
    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!(
            "Verification failed: {}",
            e
        ))),
    }
}

/// Hashes a password on a blocking thread
///
/// Argon2id is deliberately expensive; hashing on the async executor would
/// stall unrelated requests. Handlers should use this variant.
pub async fn hash_password_async(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| PasswordError::HashError(format!("Hashing task failed: {}", e)))?
}

/// Verifies a password on a blocking thread
///
/// See [`hash_password_async`].
pub async fn verify_password_async(password: String, hash: String) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| PasswordError::VerifyError(format!("Verification task failed: {}", e)))?
}

/// Validates a plaintext password against the TaskTrack credential policy
///
/// `user_name` and `email` belong to the account the password is being set
/// for; the password must not contain either (the email check uses only the
/// local part, i.e. the substring before `@`).
///
/// # Example
///
/// ```
/// use tasktrack_shared::auth::password::validate_password;
///
/// assert!(validate_password("Str0ng!Pass", "Bob", "bob@x.com").is_ok());
///
/// // Contains the user's name
/// assert!(validate_password("Bob4you!xx", "Bob", "bob@x.com").is_err());
///
/// // Deny-listed
/// assert!(validate_password("Admin123", "Bob", "bob@x.com").is_err());
/// ```
pub fn validate_password(
    password: &str,
    user_name: &str,
    email: &str,
) -> Result<(), PasswordPolicyError> {
    if password.chars().count() < 8 {
        return Err(PasswordPolicyError::TooShort);
    }

    let lowered = password.to_lowercase();

    if DENY_LIST.iter().any(|weak| lowered == *weak) {
        return Err(PasswordPolicyError::CommonPassword);
    }

    let name = user_name.trim().to_lowercase();
    if !name.is_empty() && lowered.contains(&name) {
        return Err(PasswordPolicyError::ContainsName);
    }

    let local_part = email
        .split('@')
        .next()
        .unwrap_or(email)
        .trim()
        .to_lowercase();
    if !local_part.is_empty() && lowered.contains(&local_part) {
        return Err(PasswordPolicyError::ContainsEmail);
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PasswordPolicyError::MissingLowercase);
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordPolicyError::MissingUppercase);
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordPolicyError::MissingDigit);
    }

    if !password.chars().any(|c| ALLOWED_SYMBOLS.contains(c)) {
        return Err(PasswordPolicyError::MissingSymbol);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_format() {
        let hash = hash_password("test_password_123").expect("Hash should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_hash_password_produces_different_salts() {
        let hash1 = hash_password("same_password").expect("Hash 1 should succeed");
        let hash2 = hash_password("same_password").expect("Hash 2 should succeed");

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_roundtrip() {
        let hash = hash_password("correct_password").expect("Hash should succeed");

        assert!(verify_password("correct_password", &hash).expect("Verify should succeed"));
        assert!(!verify_password("wrong_password", &hash).expect("Verify should succeed"));
        assert!(!verify_password("", &hash).expect("Verify should succeed"));
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        assert!(verify_password("password", "invalid_hash").is_err());
        assert!(verify_password("password", "$argon2id$invalid").is_err());
    }

    #[tokio::test]
    async fn test_async_hash_and_verify() {
        let hash = hash_password_async("Blocking1!".to_string())
            .await
            .expect("Hash should succeed");

        let ok = verify_password_async("Blocking1!".to_string(), hash)
            .await
            .expect("Verify should succeed");
        assert!(ok);
    }

    #[test]
    fn test_validate_password_accepts_strong_passwords() {
        for password in ["Str0ng!Pass", "MyP@ssw0rd!", "C0mpl3x#Pwd", "S3cur3$entry"] {
            assert!(
                validate_password(password, "Bob", "bob@x.com").is_ok(),
                "Password '{}' should be valid",
                password
            );
        }
    }

    #[test]
    fn test_validate_password_character_classes() {
        assert_eq!(
            validate_password("Sh0rt!", "Bob", "bob@x.com"),
            Err(PasswordPolicyError::TooShort)
        );
        assert_eq!(
            validate_password("NOLOWER1!", "Bob", "bob@x.com"),
            Err(PasswordPolicyError::MissingLowercase)
        );
        assert_eq!(
            validate_password("noupper1!", "Bob", "bob@x.com"),
            Err(PasswordPolicyError::MissingUppercase)
        );
        assert_eq!(
            validate_password("NoDigits!", "Bob", "bob@x.com"),
            Err(PasswordPolicyError::MissingDigit)
        );
        assert_eq!(
            validate_password("NoSymbol1", "Bob", "bob@x.com"),
            Err(PasswordPolicyError::MissingSymbol)
        );
    }

    #[test]
    fn test_validate_password_deny_list_is_case_insensitive() {
        assert_eq!(
            validate_password("Admin123", "Zoe", "zoe@x.com"),
            Err(PasswordPolicyError::CommonPassword)
        );
        assert_eq!(
            validate_password("PASSW0RD", "Zoe", "zoe@x.com"),
            Err(PasswordPolicyError::CommonPassword)
        );
        assert_eq!(
            validate_password("LetMeIn!", "Zoe", "zoe@x.com"),
            // deny-list match is exact, not substring
            Err(PasswordPolicyError::MissingDigit)
        );
    }

    #[test]
    fn test_validate_password_rejects_name_and_email_local_part() {
        assert_eq!(
            validate_password("Bob!pass1", "Bob", "robert@x.com"),
            Err(PasswordPolicyError::ContainsName)
        );
        assert_eq!(
            validate_password("xBOB!pass1", "bob", "robert@x.com"),
            Err(PasswordPolicyError::ContainsName)
        );
        assert_eq!(
            validate_password("Robert!1x", "Bob", "robert@x.com"),
            Err(PasswordPolicyError::ContainsEmail)
        );
    }

    #[test]
    fn test_validate_password_empty_name_does_not_reject_everything() {
        // An empty name must not make every password "contain" it
        assert!(validate_password("Str0ng!Pass", "", "someone@x.com").is_ok());
    }
}

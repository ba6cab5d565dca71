/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`password`]: Argon2id hashing and the credential policy
/// - [`jwt`]: bearer token generation and validation
/// - [`policy`]: the role-based authorization decision function
/// - [`actor`]: the authenticated actor context handlers operate with
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Tokens**: HS256-signed JWTs carrying the actor identity, 24h expiry
/// - **Constant-time Comparison**: all verification uses constant-time
///   operations

pub mod actor;
pub mod jwt;
pub mod password;
pub mod policy;

use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// Hashes a plaintext password with bcrypt. The salt is generated per call
/// and embedded in the output, so verification only needs the stored hash.
///
/// Hashing is an explicit step at the service boundary; nothing in the
/// persistence layer hashes implicitly or sniffs hash prefixes.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    Ok(hash(password, DEFAULT_COST)?)
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    Ok(verify(password, hashed_password)?)
}

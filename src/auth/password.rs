use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use tracing::error;

/// Hash with a freshly generated per-user salt; returns `(salt, digest)`.
/// Both are stored, and signin recomputes the digest from the stored salt.
pub fn hash_password(plain: &str) -> anyhow::Result<(String, String)> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = hash_with_salt(plain, salt.as_str())?;
    Ok((salt.to_string(), digest))
}

/// Deterministic recompute: the same password and salt always produce the
/// same digest, so authentication is a string comparison against the stored
/// one.
pub fn hash_with_salt(plain: &str, salt: &str) -> anyhow::Result<String> {
    let salt = SaltString::from_b64(salt).map_err(|e| {
        error!(error = %e, "argon2 salt parse error");
        anyhow::anyhow!(e.to_string())
    })?;
    let digest = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(digest)
}

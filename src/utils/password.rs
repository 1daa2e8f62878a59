use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use crate::core::library::{LibraryError, LibraryResult};

// hash_password returns an argon2id PHC string with a random salt
pub(crate) fn hash_password(password: &str) -> LibraryResult<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| LibraryError::runtime(format!("failed to hash password {}", err).as_str(), None))
}

// verify_password is false for malformed hashes instead of failing
pub(crate) fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

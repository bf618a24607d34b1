//! Account registration, login and password hashing.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use rand::RngCore;
use uuid::Uuid;

use crate::db::Store;
use crate::error::{ApiError, Result};
use crate::models::{LoginRequest, RegisterRequest, User, UserPreferences, UserProfile};

const SALT_LEN: usize = 16;
const USERNAME_LEN: std::ops::RangeInclusive<usize> = 3..=20;
const MIN_PASSWORD_LEN: usize = 6;

/// Hash a password into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);

    let salt = SaltString::encode_b64(&salt)
        .map_err(|e| ApiError::Internal(format!("Failed to encode salt: {}", e)))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored PHC string. Malformed hashes never match.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Opaque bearer token.
pub fn new_token() -> String {
    Uuid::new_v4().to_string()
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trimmed username and lowercased email, or the first rule they break.
pub fn validate_registration(request: &RegisterRequest) -> Result<(String, String)> {
    let username = request.username.trim();
    if !USERNAME_LEN.contains(&username.chars().count()) {
        return Err(ApiError::Validation(
            "Username must be between 3 and 20 characters".to_string(),
        ));
    }

    let email = normalize_email(&request.email);
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::Validation("A valid email is required".to_string()));
    }

    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    Ok((username.to_string(), email))
}

/// Create an account and sign it in.
pub async fn register(
    store: &dyn Store,
    request: &RegisterRequest,
    now: DateTime<Utc>,
) -> Result<User> {
    let (username, email) = validate_registration(request)?;

    if store.user_exists(&username, &email).await? {
        return Err(ApiError::Conflict(
            "Username or email is already registered".to_string(),
        ));
    }

    let user = User {
        id: Uuid::new_v4(),
        username,
        email,
        password_hash: hash_password(&request.password)?,
        token: new_token(),
        profile: UserProfile::default(),
        preferences: UserPreferences::default(),
        created_at: now,
        updated_at: now,
    };

    store.insert_user(&user).await?;
    tracing::info!(user_id = %user.id, username = %user.username, "Registered user");

    Ok(user)
}

/// Verify credentials and rotate the user's token.
pub async fn login(
    store: &dyn Store,
    request: &LoginRequest,
    now: DateTime<Utc>,
) -> Result<User> {
    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

    let mut user = store
        .get_user_by_email(&normalize_email(&request.email))
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&request.password, &user.password_hash) {
        return Err(invalid());
    }

    user.token = new_token();
    user.updated_at = now;
    if !store.update_user(&user).await? {
        return Err(invalid());
    }

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn registration(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("hangul123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hangul123", &hash));
        assert!(!verify_password("hangul124", &hash));
        assert!(!verify_password("hangul123", "not-a-hash"));
    }

    #[test]
    fn salts_differ_between_hashes() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[test]
    fn registration_rules() {
        let ok = validate_registration(&registration("  minji ", " MinJi@Example.com ", "secret"))
            .unwrap();
        assert_eq!(ok, ("minji".to_string(), "minji@example.com".to_string()));

        assert!(validate_registration(&registration("mj", "a@b.c", "secret")).is_err());
        assert!(validate_registration(&registration(&"x".repeat(21), "a@b.c", "secret")).is_err());
        assert!(validate_registration(&registration("minji", "nope", "secret")).is_err());
        assert!(validate_registration(&registration("minji", "a@b.c", "12345")).is_err());
    }

    #[tokio::test]
    async fn login_rotates_token() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let user = register(&store, &registration("minji", "minji@example.com", "secret"), now)
            .await
            .unwrap();

        let request = LoginRequest {
            email: "MINJI@example.com".to_string(),
            password: "secret".to_string(),
        };
        let logged_in = login(&store, &request, now).await.unwrap();
        assert_eq!(logged_in.id, user.id);
        assert_ne!(logged_in.token, user.token);

        let stale = store.get_user_by_token(&user.token).await.unwrap();
        assert!(stale.is_none());
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let store = MemoryStore::new();
        register(&store, &registration("minji", "minji@example.com", "secret"), Utc::now())
            .await
            .unwrap();

        let request = LoginRequest {
            email: "minji@example.com".to_string(),
            password: "wrong!".to_string(),
        };
        let err = login(&store, &request, Utc::now()).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}

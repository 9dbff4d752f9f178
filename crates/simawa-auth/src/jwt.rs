use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub sub: String,
    pub username: String,
    pub name: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

pub fn create_session(
    user_id: &str,
    username: &str,
    name: &str,
    role: &str,
    secret: &str,
    ttl_secs: u64,
) -> Result<String, AuthError> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = SessionClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        exp: now + ttl_secs as usize,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Internal(format!("jwt encode error: {e}")))
}

pub fn verify_session(token: &str, secret: &str) -> Result<SessionClaims, AuthError> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AuthError::Unauthorized)?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_session() {
        let token =
            create_session("u-1", "adminbem", "Admin BEM", "adminbem", "secret", 3600).unwrap();
        let claims = verify_session(&token, "secret").unwrap();
        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.role, "adminbem");
    }

    #[test]
    fn wrong_secret_is_unauthorized() {
        let token =
            create_session("u-1", "adminbem", "Admin BEM", "adminbem", "secret", 3600).unwrap();
        assert!(matches!(
            verify_session(&token, "other"),
            Err(AuthError::Unauthorized)
        ));
    }
}

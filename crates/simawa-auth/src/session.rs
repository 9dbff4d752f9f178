use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};

use crate::error::AuthError;
use crate::jwt::{SessionClaims, verify_session};
use crate::permissions::has_permission;

/// Session cookie carrying the JWT for browser requests.
pub const SESSION_COOKIE: &str = "simawa_token";

/// The authenticated identity attached to a request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub username: String,
    pub name: String,
    pub role: String,
}

/// Injected as a request extension by the web layer.
#[derive(Clone)]
pub struct AuthState {
    pub jwt_secret: String,
}

/// Pull the session token off a request: the session cookie for browser
/// flows, the bearer header for API clients.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(cookies) = headers.get(header::COOKIE).and_then(|h| h.to_str().ok()) {
        for pair in cookies.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                if name == SESSION_COOKIE && !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

/// Resolve the identity on a request, if any. The gates use this rather
/// than the extractor: they need an absent identity, not a rejection.
pub fn identity_from_headers(headers: &HeaderMap, secret: &str) -> Option<SessionClaims> {
    let token = session_token(headers)?;
    verify_session(&token, secret).ok()
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = parts
            .extensions
            .get::<AuthState>()
            .ok_or(AuthError::Internal("auth not configured".into()))?
            .clone();

        let claims = identity_from_headers(&parts.headers, &auth_state.jwt_secret)
            .ok_or(AuthError::Unauthorized)?;

        Ok(AuthUser {
            user_id: claims.sub,
            username: claims.username,
            name: claims.name,
            role: claims.role,
        })
    }
}

/// Handler-level feature check for the JSON API surface.
pub fn require_feature(user: &AuthUser, feature: &str) -> Result<(), AuthError> {
    if has_permission(&user.role, feature) {
        Ok(())
    } else {
        Err(AuthError::Forbidden(format!("missing feature: {feature}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; simawa_token=abc123"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn token_from_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));
        assert_eq!(session_token(&headers).as_deref(), Some("xyz"));
    }

    #[test]
    fn no_token_is_none() {
        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn feature_check_follows_permission_table() {
        let user = AuthUser {
            user_id: "u-1".into(),
            username: "adminmpm".into(),
            name: "Admin MPM".into(),
            role: "adminmpm".into(),
        };
        assert!(require_feature(&user, "organisasi").is_ok());
        assert!(matches!(
            require_feature(&user, "kegiatan"),
            Err(AuthError::Forbidden(_))
        ));
    }
}

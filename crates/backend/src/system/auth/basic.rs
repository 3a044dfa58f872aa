use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use subtle::ConstantTimeEq;

use crate::shared::config::AuthConfig;

/// HTTP Basic credentials the dashboard is gated with
#[derive(Debug, Clone)]
pub struct BasicAuth {
    realm: String,
    user: String,
    password: String,
}

impl BasicAuth {
    pub fn new(realm: &str, user: &str, password: &str) -> Self {
        Self {
            realm: realm.to_string(),
            user: user.to_string(),
            password: password.to_string(),
        }
    }

    /// `None` (auth disabled) when user or password is empty
    pub fn from_config(config: &AuthConfig) -> Option<Self> {
        config
            .credentials()
            .map(|(user, password)| Self::new(&config.realm, user, password))
    }

    /// Checks an `Authorization` header value in constant time over the
    /// credential bytes
    pub fn authorize(&self, header_value: Option<&str>) -> bool {
        header_value
            .and_then(decode_basic)
            .is_some_and(|(user, password)| {
                let user_ok = user.as_bytes().ct_eq(self.user.as_bytes());
                let password_ok = password.as_bytes().ct_eq(self.password.as_bytes());
                (user_ok & password_ok).into()
            })
    }

    /// 401 with the `WWW-Authenticate` challenge
    pub fn challenge(&self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            [(
                header::WWW_AUTHENTICATE,
                format!("Basic realm=\"{}\"", self.realm),
            )],
            "Authentication required",
        )
            .into_response()
    }
}

/// `Basic <base64(user:password)>` -> `(user, password)`
fn decode_basic(value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if scheme != "Basic" {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, password) = decoded.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_for(credentials: &str) -> String {
        format!("Basic {}", STANDARD.encode(credentials))
    }

    #[test]
    fn test_accepts_matching_credentials() {
        let auth = BasicAuth::new("GSS Reports", "ops", "pa:ss");
        // only the first colon separates user from password
        assert!(auth.authorize(Some(&header_for("ops:pa:ss"))));
    }

    #[test]
    fn test_rejects_everything_else() {
        let auth = BasicAuth::new("GSS Reports", "ops", "secret");
        assert!(!auth.authorize(None));
        assert!(!auth.authorize(Some(&header_for("ops:wrong"))));
        assert!(!auth.authorize(Some(&header_for("ops"))));
        assert!(!auth.authorize(Some("Bearer abc")));
        assert!(!auth.authorize(Some("Basic not-base64!!")));
    }

    #[test]
    fn test_rejects_near_miss_passwords() {
        let auth = BasicAuth::new("GSS Reports", "ops", "secret");
        assert!(!auth.authorize(Some(&header_for("ops:secreT"))));
        assert!(!auth.authorize(Some(&header_for("ops:secret "))));
        assert!(!auth.authorize(Some(&header_for("ops:secre"))));
        assert!(!auth.authorize(Some(&header_for("ops:"))));
        assert!(!auth.authorize(Some(&header_for("Ops:secret"))));
        assert!(auth.authorize(Some(&header_for("ops:secret"))));
    }

    #[test]
    fn test_challenge_response() {
        let response = BasicAuth::new("GSS Reports", "u", "p").challenge();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[header::WWW_AUTHENTICATE],
            "Basic realm=\"GSS Reports\""
        );
    }

    #[test]
    fn test_disabled_without_credentials() {
        let config = AuthConfig {
            user: "ops".into(),
            ..AuthConfig::default()
        };
        assert!(BasicAuth::from_config(&config).is_none());
    }
}

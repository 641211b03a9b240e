//! Bearer-token authentication and the admin gate.
//!
//! [`authenticate`] runs on every route: a valid `Authorization: Bearer <jwt>`
//! puts its [`Claims`] into the request extensions, anything else leaves the
//! request anonymous.  [`ensure_admin`] sits on the mutating routes and turns
//! away callers whose claims lack the admin role.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::ApiError, AppState};

/// Token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Decode the bearer token in `headers`, if any.
///
/// `exp` is honoured when present but not required.
pub fn bearer_claims(headers: &HeaderMap, secret_key: &str) -> Option<Claims> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();

    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();

    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret_key.as_bytes()),
        &validation,
    ) {
        Ok(data) => Some(data.claims),
        Err(e) => {
            debug!("rejecting bearer token: {e}");
            None
        }
    }
}

pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(claims) = bearer_claims(request.headers(), &state.secret_key) {
        request.extensions_mut().insert(claims);
    }
    next.run(request).await
}

pub async fn ensure_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    match request.extensions().get::<Claims>() {
        Some(claims) if claims.is_admin => Ok(next.run(request).await),
        Some(claims) => {
            debug!(username = %claims.username, "admin route denied");
            Err(ApiError::Unauthorized)
        }
        None => Err(ApiError::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;

    const SECRET: &str = "secret-dev";

    fn headers_with(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    fn token(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_yields_claims() {
        let claims = Claims {
            username: "u2".into(),
            is_admin: true,
        };
        let headers = headers_with(&token(&claims, SECRET));
        assert_eq!(bearer_claims(&headers, SECRET), Some(claims));
    }

    #[test]
    fn token_signed_with_another_key_is_ignored() {
        let claims = Claims {
            username: "u2".into(),
            is_admin: true,
        };
        let headers = headers_with(&token(&claims, "not-the-secret"));
        assert_eq!(bearer_claims(&headers, SECRET), None);
    }

    #[test]
    fn missing_or_malformed_header_is_anonymous() {
        assert_eq!(bearer_claims(&HeaderMap::new(), SECRET), None);
        assert_eq!(bearer_claims(&headers_with("garbage"), SECRET), None);

        let mut basic = HeaderMap::new();
        basic.insert(AUTHORIZATION, HeaderValue::from_static("Basic dTE6cGFzcw=="));
        assert_eq!(bearer_claims(&basic, SECRET), None);
    }
}

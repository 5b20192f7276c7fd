use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;

/// Raw bearer token from the Authorization header. Accepted with or without
/// the `Bearer ` scheme prefix; all validation happens in the authorize
/// flow so the rejection order stays in one place.
#[derive(Debug)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::NotSignedIn)?;

        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .unwrap_or(auth)
            .trim();
        if token.is_empty() {
            return Err(ApiError::NotSignedIn);
        }
        Ok(BearerToken(token.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<BearerToken, ApiError> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(axum::http::header::AUTHORIZATION, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        BearerToken::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn strips_the_bearer_scheme() {
        let BearerToken(token) = extract(Some("Bearer abc.def.ghi")).await.unwrap();
        assert_eq!(token, "abc.def.ghi");
    }

    #[tokio::test]
    async fn accepts_a_bare_token() {
        let BearerToken(token) = extract(Some("abc.def.ghi")).await.unwrap();
        assert_eq!(token, "abc.def.ghi");
    }

    #[tokio::test]
    async fn missing_header_is_not_signed_in() {
        let err = extract(None).await.unwrap_err();
        assert!(matches!(err, ApiError::NotSignedIn));
    }

    #[tokio::test]
    async fn empty_bearer_value_is_not_signed_in() {
        let err = extract(Some("Bearer ")).await.unwrap_err();
        assert!(matches!(err, ApiError::NotSignedIn));
    }
}

//! Custom Axum extractors
//!
//! Every input problem is reported as 400 with a JSON error body, in place of
//! axum's default plain-text rejections (which also use 415 and 422).

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Optional integer `id` query parameter. An empty value counts as absent;
/// when `id` repeats, the first occurrence wins.
#[derive(Debug)]
pub struct OptionalId(pub Option<i32>);

impl<S> FromRequestParts<S> for OptionalId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs): Query<Vec<(String, String)>> = Query::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        let id = pairs.into_iter().find(|(key, _)| key == "id").map(|(_, value)| value);

        match id.as_deref() {
            None | Some("") => Ok(Self(None)),
            Some(raw) => raw
                .parse::<i32>()
                .map(|id| Self(Some(id)))
                .map_err(|e| ApiError::bad_request(format!("invalid id '{}': {}", raw, e))),
        }
    }
}

/// Required integer `id` query parameter
#[derive(Debug)]
pub struct RequiredId(pub i32);

impl<S> FromRequestParts<S> for RequiredId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let OptionalId(id) = OptionalId::from_request_parts(parts, state).await?;
        id.map(Self).ok_or_else(|| ApiError::bad_request("id is required"))
    }
}

/// JSON request body, decoded regardless of the request's Content-Type.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| ApiError::bad_request(format!("invalid JSON body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    use crate::models::NewPost;

    async fn optional_id(uri: &str) -> Result<Option<i32>, ApiError> {
        let (mut parts, _) = HttpRequest::builder().uri(uri).body(()).unwrap().into_parts();
        OptionalId::from_request_parts(&mut parts, &()).await.map(|OptionalId(id)| id)
    }

    #[tokio::test]
    async fn parses_integer_id() {
        assert_eq!(optional_id("/post?id=12").await.unwrap(), Some(12));
    }

    #[tokio::test]
    async fn absent_or_empty_id_is_none() {
        assert_eq!(optional_id("/post").await.unwrap(), None);
        assert_eq!(optional_id("/post?id=").await.unwrap(), None);
    }

    #[tokio::test]
    async fn repeated_id_takes_first_value() {
        assert_eq!(optional_id("/post?id=1&id=2").await.unwrap(), Some(1));
        assert_eq!(optional_id("/post?sort=asc&id=5&id=x").await.unwrap(), Some(5));
    }

    #[tokio::test]
    async fn non_integer_id_is_bad_request() {
        let err = optional_id("/post?id=abc").await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn required_id_rejects_missing() {
        let (mut parts, _) = HttpRequest::builder().uri("/comment").body(()).unwrap().into_parts();
        let err = RequiredId::from_request_parts(&mut parts, &()).await.unwrap_err();
        match err {
            ApiError::BadRequest { message } => assert_eq!(message, "id is required"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn json_body_ignores_content_type() {
        let req = HttpRequest::builder()
            .method("POST")
            .uri("/post")
            .body(Body::from(r#"{"title": "t", "body": "b"}"#))
            .unwrap();
        let JsonBody(post): JsonBody<NewPost> = JsonBody::from_request(req, &()).await.unwrap();
        assert_eq!(post, NewPost::new("t", "b"));
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let req = HttpRequest::builder()
            .method("POST")
            .uri("/post")
            .body(Body::from("{not json"))
            .unwrap();
        let err = JsonBody::<NewPost>::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { .. }));
    }
}

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::ApiError;

/// Requester identity, supplied by the upstream authentication layer
/// through the `x-user-id` header.
///
/// Session handling itself lives outside this service; the extractor is
/// only the seam through which the requester id arrives. Routes without
/// this extractor are open.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

pub const USER_ID_HEADER: &str = "x-user-id";

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<Uuid>().ok())
            .map(AuthUser)
            .ok_or(ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<AuthUser, ApiError> {
        let (mut parts, _) = request.into_parts();
        AuthUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn accepts_a_well_formed_user_id() {
        let user_id = Uuid::now_v7();
        let request = Request::builder()
            .header(USER_ID_HEADER, user_id.to_string())
            .body(())
            .unwrap();

        let AuthUser(extracted) = extract(request).await.expect("extraction should succeed");
        assert_eq!(extracted, user_id);
    }

    #[tokio::test]
    async fn rejects_missing_and_malformed_headers() {
        let missing = Request::builder().body(()).unwrap();
        assert!(matches!(extract(missing).await, Err(ApiError::Unauthorized)));

        let malformed = Request::builder()
            .header(USER_ID_HEADER, "not-a-uuid")
            .body(())
            .unwrap();
        assert!(matches!(
            extract(malformed).await,
            Err(ApiError::Unauthorized)
        ));
    }
}

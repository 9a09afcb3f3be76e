use axum::{
    extract::{FromRequest, Request},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::errors::{Error, Result as RResult};
use crate::utils::jwt::decode_jwt;

/// Authenticated caller identity as asserted by the identity provider's
/// bearer token. `id` is the bare user key, `email` the sign-in email.
#[derive(Debug, Clone)]
pub struct Caller {
    pub id: String,
    pub email: String,
}

pub async fn auth_jwt_middleware(
    request: Request,
    next: Next,
) -> Result<impl IntoResponse, Response> {
    let request = buffer_request_and_authenticate(request).await?;

    Ok(next.run(request).await)
}

async fn buffer_request_and_authenticate<B>(request: Request<B>) -> Result<Request<B>, Response> {
    let (mut parts, body) = request.into_parts();
    let caller = check_auth_parts(&parts)
        .await
        .map_err(IntoResponse::into_response)?;

    parts.extensions.insert(caller);

    Ok(Request::from_parts(parts, body))
}

async fn check_auth_parts(parts: &Parts) -> RResult<Caller> {
    let header_value = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(Error::MissingToken)?
        .to_str()
        .map_err(|_| Error::InvalidToken)?;

    let mut parts = header_value.trim().splitn(2, ' ');

    let scheme = parts.next().ok_or(Error::MissingToken)?;
    let token = parts.next().ok_or(Error::MissingToken)?;

    if scheme != "Bearer" {
        tracing::warn!("Invalid auth scheme: {scheme}");
        return Err(Error::InvalidScheme);
    }

    decode_jwt(token).map(|data| Caller {
        id: data.claims.id,
        email: data.claims.email.to_lowercase(),
    })
}

impl<S> FromRequest<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, _state: &S) -> RResult<Self> {
        req.extensions()
            .get::<Caller>()
            .cloned()
            .ok_or(Error::MissingToken)
    }
}

use axum::{
    Json,
    extract::{FromRequest, OptionalFromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::{Error, Result};

/// Json extractor that runs `validator` rules before the handler sees the
/// payload.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let Json(value) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// A request with no content type carries no payload; handlers whose input
/// is `Option<ValidatedJson<T>>` see `None` and fall back to defaults
/// instead of rejecting a bare POST.
impl<T, S> OptionalFromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>> {
        if req.headers().get(CONTENT_TYPE).is_none() {
            return Ok(None);
        }
        let Json(value) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        value.validate()?;
        Ok(Some(ValidatedJson(value)))
    }
}

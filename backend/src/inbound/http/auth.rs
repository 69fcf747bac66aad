//! Bearer-token extractor for authenticated handlers.
//!
//! Handlers take [`AuthenticatedUser`] as an argument; the extractor pulls
//! the token from `Authorization: Bearer <token>` and resolves it through
//! [`crate::domain::ports::AccountQuery::authenticate`].

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Id of the caller whose bearer token was verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    pub fn id(&self) -> &UserId {
        &self.0
    }

    pub fn into_inner(self) -> UserId {
        self.0
    }
}

/// Extract the raw token from an `Authorization` header value.
pub(crate) fn bearer_token(header: Option<&str>) -> Result<&str, Error> {
    let value = header.ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| Error::unauthorized("authorization header must use the Bearer scheme"))?
        .trim();
    if token.is_empty() {
        return Err(Error::unauthorized("missing bearer token"));
    }
    Ok(token)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .map(|value| value.to_str().map(str::to_owned));
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            let raw = match header {
                Some(Ok(raw)) => Some(raw),
                Some(Err(_)) => return Err(Error::unauthorized("malformed authorization header")),
                None => None,
            };
            let token = bearer_token(raw.as_deref())?;
            state.sessions.authenticate(token).await.map(Self)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some("Basic abc"))]
    #[case(Some("bearer abc"))]
    #[case(Some("Bearer   "))]
    fn rejects_missing_or_foreign_schemes(#[case] header: Option<&str>) {
        let err = bearer_token(header).expect_err("not a bearer token");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn extracts_the_token() {
        let token = bearer_token(Some("Bearer abc.def")).expect("token");
        assert_eq!(token, "abc.def");
    }
}

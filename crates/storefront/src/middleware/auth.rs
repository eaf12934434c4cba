//! Current-user extractors.
//!
//! Sign-in happens in front of this service. The authenticating proxy passes
//! the signed-in user's id in the `x-duka-user` header; a missing or blank
//! header means the visitor is anonymous. Ids containing `/` are treated as
//! anonymous since they would escape the user's cart collection.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use duka_core::UserId;

use crate::error::set_sentry_user;

/// Header carrying the signed-in user's id.
pub const USER_HEADER: &str = "x-duka-user";

/// Where anonymous visitors are sent.
pub const LOGIN_PATH: &str = "/login";

fn user_from_parts(parts: &Parts) -> Option<UserId> {
    parts
        .headers
        .get(USER_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && !id.contains('/'))
        .map(UserId::new)
}

/// Extractor that requires a signed-in user.
///
/// Anonymous requests are redirected to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireUser(user): RequireUser) -> impl IntoResponse {
///     format!("Hello, {user}!")
/// }
/// ```
pub struct RequireUser(pub UserId);

/// Rejection for [`RequireUser`].
#[derive(Debug)]
pub struct RedirectToLogin;

impl IntoResponse for RedirectToLogin {
    fn into_response(self) -> Response {
        Redirect::to(LOGIN_PATH).into_response()
    }
}

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = RedirectToLogin;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = user_from_parts(parts).ok_or(RedirectToLogin)?;
        set_sentry_user(&user);
        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireUser`, this does not reject anonymous requests.
pub struct OptionalUser(pub Option<UserId>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(user_from_parts(parts)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{Request, StatusCode, header::LOCATION};

    use super::*;

    fn parts(user: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/cart");
        if let Some(user) = user {
            builder = builder.header(USER_HEADER, user);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_require_user_reads_header() {
        let RequireUser(user) = RequireUser::from_request_parts(&mut parts(Some("u-42")), &())
            .await
            .unwrap();
        assert_eq!(user.as_str(), "u-42");
    }

    #[tokio::test]
    async fn test_require_user_redirects_anonymous() {
        for header in [None, Some("  "), Some("u1/items/x")] {
            let rejection = RequireUser::from_request_parts(&mut parts(header), &())
                .await
                .err()
                .unwrap();
            let response = rejection.into_response();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers()[LOCATION], LOGIN_PATH);
        }
    }

    #[tokio::test]
    async fn test_optional_user() {
        let OptionalUser(user) = OptionalUser::from_request_parts(&mut parts(None), &())
            .await
            .unwrap();
        assert!(user.is_none());
    }
}

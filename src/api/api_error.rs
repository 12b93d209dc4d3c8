use crate::error::Rejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Every failure, whether a [`Rejection`] or something unexpected, is answered with
/// `401 Unauthorized` and the error's text as a plain body.
pub(crate) struct APIError(anyhow::Error);

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let any_err = self.0;
        if any_err.downcast_ref::<Rejection>().is_none() {
            tracing::error!("unexpected error handling update: {any_err:#}");
        }
        (StatusCode::UNAUTHORIZED, format!("{any_err}")).into_response()
    }
}

impl<E> From<E> for APIError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

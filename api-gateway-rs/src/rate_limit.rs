// Rate-limit propagation
// Upstream throttling on the contract path is surfaced to the client as 429
// with a retry hint, so the frontend can tell the user when to try again.
// Every other failure maps to a plain error body.

use axum::{
    http::{header::RETRY_AFTER, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use error_handling::{sanitize_message, Error, ErrorKind};
use tracing::{error, warn};

use crate::ErrorResponse;

/// 429 response for a rate-limited upstream error, `None` for anything else.
///
/// The body is `{error, retryAfter?}`; when a hint is known it is also sent
/// as a `Retry-After` header.
pub fn rate_limited_response(err: &Error) -> Option<Response> {
    if !err.is_rate_limited() {
        return None;
    }

    let retry_after = err.retry_after_hint();
    warn!(
        retry_after = ?retry_after,
        status = ?err.status,
        "Upstream rate limit reached"
    );

    let body = ErrorResponse {
        error: sanitize_message(&err.message),
        retry_after,
    };
    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
    if let Some(secs) = retry_after {
        response
            .headers_mut()
            .insert(RETRY_AFTER, HeaderValue::from(secs));
    }

    Some(response)
}

/// Maps a service error to an HTTP response: validation failures are 400,
/// everything else is 500 with the (sanitized) message.
pub fn error_response(err: &Error) -> Response {
    let status = match err.kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        _ => {
            error!(error = %sanitize_message(&err.to_string()), "Request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(ErrorResponse::new(sanitize_message(&err.message)))).into_response()
}

/// Contract path: throttling becomes 429, everything else goes through
/// [`error_response`].
pub fn contract_error_response(err: &Error) -> Response {
    rate_limited_response(err).unwrap_or_else(|| error_response(err))
}

//! The error normalizer.
//!
//! A single outermost middleware stage that inspects every outgoing
//! response and rewrites failures into one envelope shape, regardless of
//! whether the failure came from a handler, an extractor, the auth gate,
//! or a framework layer. Successful responses pass through untouched.
//!
//! The normalizer never fails: anything that goes wrong while rewriting
//! degrades to returning the response as-is, so a formatting bug cannot
//! mask the original failure status.

use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use inferd_core::{Credentials, Identity};

use crate::error::Failure;

/// Fixed message for 413 responses. Contract text: the figure is part of
/// the published API and is not derived from the configured body limit.
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str =
    "Payload content length greater than maximum allowed: 10000000";

/// Cap on how much of a failure body is buffered to extract a message.
const MAX_BUFFERED_ERROR_BYTES: usize = 64 * 1024;

/// Marker inserted on responses the normalizer has already rewritten.
#[derive(Debug, Clone, Copy)]
struct Normalized;

/// The uniform failure shape returned to clients.
///
/// `user` is only present on the 401 branch, where it is serialized even
/// when null.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Always `"fail"`.
    pub status: &'static str,
    /// Set to `"Unauthorized"` on the 401 branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    /// Client-facing message.
    pub message: String,
    /// On 401 responses, whatever credentials were resolved for the
    /// request, or null.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Option<Identity>>,
}

impl ErrorEnvelope {
    fn fail(message: String) -> Self {
        Self {
            status: "fail",
            error: None,
            message,
            user: None,
        }
    }

    fn unauthorized(message: String, user: Option<Identity>) -> Self {
        Self {
            status: "fail",
            error: Some("Unauthorized"),
            message,
            user: Some(user),
        }
    }
}

/// Middleware entry point: run the rest of the stack, then normalize.
pub async fn normalize(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    apply(response).await
}

/// Rewrite a response into the envelope shape if it is a failure.
///
/// Decision order, first match wins: a tagged [`Failure::Input`] uses the
/// status the raiser chose; any other non-2xx is a framework failure with
/// fixed 401/413 branches; everything else passes through unchanged.
/// Idempotent: already-normalized responses are returned as-is.
pub(crate) async fn apply(response: Response) -> Response {
    if response.extensions().get::<Normalized>().is_some() {
        return response;
    }

    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    // Credentials resolved during authentication, if any. Exposing these
    // on 401 responses is preserved source behavior.
    let user = response
        .extensions()
        .get::<Credentials>()
        .map(|credentials| credentials.user.clone());

    if let Some(failure) = response.extensions().get::<Failure>().cloned() {
        return match failure {
            Failure::Input { status, message } => envelope(status, ErrorEnvelope::fail(message)),
            Failure::Framework { status, message } => framework(status, message, user),
        };
    }

    // Untagged failure from a framework layer: the message lives in the
    // body, if anywhere.
    let (parts, body) = response.into_parts();
    let Ok(bytes) = to_bytes(body, MAX_BUFFERED_ERROR_BYTES).await else {
        // The body could not be buffered; surface what remains of the
        // original response rather than masking its status.
        return Response::from_parts(parts, Body::empty());
    };

    // A body that is already a fail-envelope passes through unchanged.
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&bytes) {
        if value.get("status").and_then(serde_json::Value::as_str) == Some("fail") {
            let mut response = Response::from_parts(parts, Body::from(bytes));
            response.extensions_mut().insert(Normalized);
            return response;
        }
    }

    let message = if bytes.is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_string()
    } else {
        String::from_utf8_lossy(&bytes).into_owned()
    };

    framework(status, message, user)
}

fn framework(status: StatusCode, message: String, user: Option<Identity>) -> Response {
    if status == StatusCode::UNAUTHORIZED {
        return envelope(status, ErrorEnvelope::unauthorized(message, user));
    }
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        return envelope(
            status,
            ErrorEnvelope::fail(PAYLOAD_TOO_LARGE_MESSAGE.to_string()),
        );
    }
    envelope(status, ErrorEnvelope::fail(message))
}

fn envelope(status: StatusCode, body: ErrorEnvelope) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.extensions_mut().insert(Normalized);
    response
}

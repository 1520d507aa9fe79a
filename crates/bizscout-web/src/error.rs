use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use bizscout_core::Error as CoreError;

use crate::render;

/// Request-level error wrapper mapping core errors onto HTTP responses.
///
/// Lookup failures during search never get here - the search service turns
/// those into an empty outcome. What's left: a missing business on the detail
/// page (404), bad form input (422), a dead upstream on the detail page (502)
/// and store/config trouble (500).
pub struct WebError(pub CoreError);

impl From<CoreError> for WebError {
    fn from(e: CoreError) -> Self {
        Self(e)
    }
}

impl From<bizscout_store::StoreError> for WebError {
    fn from(e: bizscout_store::StoreError) -> Self {
        Self(CoreError::Store(e))
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self.0 {
            CoreError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(render::validation_page(&msg)),
            )
                .into_response(),
            CoreError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                Html(render::not_found_page(&id)),
            )
                .into_response(),
            CoreError::Lookup(e) => {
                tracing::warn!("Upstream lookup failed: {}", e);
                (StatusCode::BAD_GATEWAY, Html(render::lookup_failed_page())).into_response()
            }
            e => {
                tracing::error!("Request failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(render::failure_page()),
                )
                    .into_response()
            }
        }
    }
}

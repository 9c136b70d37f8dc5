//! HTTP error mapping for request handlers.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quotation_common::QuotationError;

/// Wrapper turning `QuotationError` into an HTTP response.
///
/// Unknown identifiers map to 404, validation failures and malformed
/// payloads to 400, everything else to 500 with the error message as the
/// response body.
pub struct ApiError(QuotationError);

impl From<QuotationError> for ApiError {
    fn from(err: QuotationError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            QuotationError::NotFound(_) => StatusCode::NOT_FOUND,
            QuotationError::Validation(_) | QuotationError::Decode(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.0.to_string()).into_response()
    }
}

use astra::{Body, Response, ResponseBuilder};

use crate::errors::ServerError;

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

/// Convert a ServerError into the `{"error": ...}` JSON body clients see.
pub fn error_to_response(err: ServerError) -> Response {
    let status = match err {
        ServerError::BadRequest(_) => 400,
        ServerError::Unauthorized(_) => 401,
        ServerError::Forbidden(_) => 403,
        ServerError::NotFound(_) => 404,
        ServerError::Upstream(_) => 502,
        ServerError::DbError(_) | ServerError::InternalError => 500,
    };

    json_error_response(status, &err.to_string())
}

pub fn json_error_response(status: u16, message: &str) -> Response {
    let body = serde_json::json!({ "error": message }).to_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from(r#"{"error":"Internal Server Error"}"#)))
}

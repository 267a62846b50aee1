use astra::{Body, ResponseBuilder};
use serde::Serialize;

use crate::errors::ServerError;
use crate::responses::ResultResp;

pub fn json_response<T: Serialize + ?Sized>(payload: &T) -> ResultResp {
    json_with_status(200, payload)
}

pub fn created_response<T: Serialize + ?Sized>(payload: &T) -> ResultResp {
    json_with_status(201, payload)
}

pub fn json_with_status<T: Serialize + ?Sized>(status: u16, payload: &T) -> ResultResp {
    let body = serde_json::to_string(payload).map_err(|_| ServerError::InternalError)?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

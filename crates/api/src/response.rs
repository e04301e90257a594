//! Success envelopes.
//!
//! Every successful body is `{ "data": ... }`; errors use the shape built in
//! [`crate::error`].

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    /// `200 OK` with `data` wrapped.
    pub fn ok(data: T) -> Json<Self> {
        Json(Self { data })
    }

    /// `201 Created` with `data` wrapped.
    pub fn created(data: T) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Json(Self { data }))
    }
}

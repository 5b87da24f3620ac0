//! Uniform success envelope.
//!
//! Every successful response is wrapped as
//! `{"status": "success", "message": <context-specific>, "data": <payload>}`.
//! Errors bypass this module entirely and are shaped by [`crate::error`].

use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(message: &str, data: T) -> Self {
        Self {
            status: "success",
            message: message.to_string(),
            data,
        }
    }

    /// 200 OK with the envelope.
    pub fn ok(message: &str, data: T) -> HttpResponse {
        HttpResponse::Ok().json(Self::new(message, data))
    }

    /// 201 Created with the envelope.
    pub fn created(message: &str, data: T) -> HttpResponse {
        HttpResponse::Created().json(Self::new(message, data))
    }
}

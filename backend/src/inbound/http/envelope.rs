//! Success responses wrapped in the shared envelope.

use actix_web::HttpResponse;
use chrono::Utc;
use serde::Serialize;

use crate::domain::{Envelope, SUCCESS_CODE};

/// Milliseconds since the Unix epoch, as stamped into every envelope.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// `200 OK` carrying `data`.
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(Envelope::success(data, now_millis()))
}

/// `200 OK` without payload, e.g. to acknowledge a deletion.
pub fn ok_message(msg: &str) -> HttpResponse {
    HttpResponse::Ok().json(Envelope::<()>::message(SUCCESS_CODE, msg, now_millis()))
}

//! 成功响应的统一信封

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// `{success, status_code, message, payload?}`
///
/// `payload` 为空时不会出现在 JSON 中。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope<T = ()> {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl Envelope<()> {
    /// 不带数据的成功响应
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            success: true,
            status_code: status.as_u16(),
            message: message.into(),
            payload: None,
        }
    }
}

impl<T> Envelope<T> {
    /// 带数据的成功响应
    pub fn with_payload(status: StatusCode, message: impl Into<String>, payload: T) -> Self {
        Self {
            success: true,
            status_code: status.as_u16(),
            message: message.into(),
            payload: Some(payload),
        }
    }

    fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK)
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_is_omitted_when_empty() {
        let envelope = Envelope::message(StatusCode::CREATED, "created success");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "success": true, "status_code": 201, "message": "created success" })
        );
    }

    #[test]
    fn test_payload_is_serialized() {
        let envelope = Envelope::with_payload(StatusCode::OK, "get all success", vec![1, 2]);
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "success": true, "status_code": 200, "message": "get all success", "payload": [1, 2] })
        );
    }

    #[test]
    fn test_response_status_follows_envelope() {
        let response = Envelope::message(StatusCode::CREATED, "created success").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

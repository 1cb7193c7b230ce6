//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use tracing::error;

/// 核心错误类型
///
/// `label` 是错误信封里的键名，例如 `{"error": {"NotFound": "..."}}`。
#[derive(Debug)]
pub enum CoreError {
    BadRequest(String),
    Unauthorized(String),
    NotFound { label: &'static str, message: String },
    Conflict(String),
    InternalServerError(String),
}

impl CoreError {
    pub fn not_found(label: &'static str, message: impl Into<String>) -> Self {
        CoreError::NotFound {
            label,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            CoreError::Conflict(_) => StatusCode::CONFLICT,
            CoreError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 错误信封
    pub fn body(&self) -> Value {
        match self {
            CoreError::BadRequest(msg) => json!({ "error": { "Bad Request": msg } }),
            // 与前端约定：未授权时 error 是字符串而不是对象
            CoreError::Unauthorized(msg) => json!({ "error": msg }),
            CoreError::NotFound { label, message } => {
                let mut inner = Map::new();
                inner.insert(label.to_string(), Value::String(message.clone()));
                json!({ "error": inner })
            }
            CoreError::Conflict(msg) => json!({ "error": { "Conflict": msg } }),
            CoreError::InternalServerError(_) => {
                json!({ "error": { "Internal": "Database error" } })
            }
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        if let CoreError::InternalServerError(cause) = &self {
            error!("Internal error: {}", cause);
        }

        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_uses_label_as_key() {
        let err = CoreError::not_found("Not Found", "Sorry a cafe with that id is not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            err.body(),
            json!({ "error": { "Not Found": "Sorry a cafe with that id is not found" } })
        );
    }

    #[test]
    fn test_unauthorized_body_is_plain_string() {
        let err = CoreError::Unauthorized("nope".to_string());
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.body(), json!({ "error": "nope" }));
    }

    #[test]
    fn test_internal_error_hides_cause() {
        let err = CoreError::InternalServerError("disk I/O error".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.body().to_string().contains("disk"));
    }
}

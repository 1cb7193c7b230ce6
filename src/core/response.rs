//! 核心响应处理模块

use serde::Serialize;

/// 成功确认：`{"success": "..."}`
#[derive(Debug, Serialize)]
pub struct Success {
    pub success: String,
}

impl Success {
    pub fn new(message: &str) -> Self {
        Self {
            success: message.to_string(),
        }
    }
}

/// 包裹在 `response` 键下的成功确认：`{"response": {"success": "..."}}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub response: T,
}

impl ApiResponse<Success> {
    pub fn success(message: &str) -> Self {
        Self {
            response: Success::new(message),
        }
    }
}

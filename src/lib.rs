//! # 咖啡馆 REST API
//!
//! 单表咖啡馆记录的增删改查服务，为独立的前端提供 JSON 接口。
//! - app: 咖啡馆模型、业务服务和处理器
//! - core: 错误信封、响应结构、授权和中间件
//! - infrastructure: 配置、日志和 SQLite 连接

pub mod app;
pub mod core;
pub mod infrastructure;

use std::time::Duration;

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::app::cafe::handler::{self, AppState};
use crate::core::middleware::request_logging_middleware;

/// 创建路由
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(handler::home))
        .route("/health", get(handler::health_check))
        .route("/random", get(handler::get_random_cafe))
        .route("/all", get(handler::list_cafes))
        .route("/search", get(handler::search_cafes))
        .route("/add", post(handler::add_cafe))
        .route("/update-price/:id", patch(handler::update_price))
        .route("/report-closed/:id", delete(handler::report_closed))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware))
                .layer(TimeoutLayer::new(request_timeout))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

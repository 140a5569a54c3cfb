//! 路由装配

use crate::{
    error::ErrorBody,
    handlers::{create_user, delete_user, list_users, update_user, SharedRegistry},
    middleware::{TraceIdConfig, TraceIdLayer},
};
use axum::{
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

/// 构建完整的应用路由
pub fn router(registry: SharedRegistry) -> Router {
    router_with_config(registry, TraceIdConfig::default())
}

/// 使用自定义追踪配置构建应用路由
///
/// 中间件在 fallback 之后挂载，未匹配的路由同样带有 `X-Request-ID`。
pub fn router_with_config(registry: SharedRegistry, config: TraceIdConfig) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", put(update_user).delete(delete_user))
        .fallback(route_not_found)
        .with_state(registry)
        .layer(TraceIdLayer::with_config(config))
}

async fn route_not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "route not found".to_string(),
        }),
    )
}

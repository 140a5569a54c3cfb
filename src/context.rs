//! 请求上下文
//!
//! 中间件把 [`RequestContext`] 放进请求的 extensions，随请求一起向下传递。
//! 处理函数通过提取器显式拿到它，不依赖任何全局或 task-local 状态。

use crate::trace_id::TraceId;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// 单个请求的处理上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    trace_id: TraceId,
}

impl RequestContext {
    /// 使用给定的追踪ID创建上下文
    pub fn new(trace_id: TraceId) -> Self {
        Self { trace_id }
    }

    /// 当前请求的追踪ID
    pub fn trace_id(&self) -> &TraceId {
        &self.trace_id
    }

    /// 从请求头部分读取上下文
    ///
    /// 如果请求没有经过 `TraceIdLayer`，记录一个警告并生成一个新的追踪ID。
    pub fn from_parts(parts: &Parts) -> Self {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_else(|| {
                tracing::warn!("RequestContext not found in request extensions. Generating a new trace id. This might indicate that TraceIdLayer is not installed.");
                Self::new(TraceId::new())
            })
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

/// Axum 提取器，用于在 handler 函数签名中直接获取 TraceId
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use user_registry::{TraceId, TraceIdLayer};
///
/// async fn my_handler(trace_id: TraceId) -> String {
///     tracing::info!(trace_id = %trace_id, "Handler started");
///     format!("Hello! Your trace ID is: {}", trace_id)
/// }
///
/// let app: Router = Router::new()
///     .route("/", get(my_handler))
///     .layer(TraceIdLayer::new());
/// ```
impl<S> FromRequestParts<S> for TraceId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestContext::from_parts(parts).trace_id)
    }
}

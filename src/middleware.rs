//! 请求追踪中间件
//!
//! 为每个进入的请求生成一个新的追踪ID，写入 `X-Request-ID` 响应头，
//! 并放进请求上下文供下游的处理函数和日志使用。中间件从不拒绝请求。

use crate::{context::RequestContext, trace_id::TraceId, REQUEST_ID_HEADER};
use axum::{
    extract::Request,
    http::HeaderValue,
    response::Response,
};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tower::{Layer, Service};
use tracing::Instrument;

/// 追踪ID中间件配置选项
#[derive(Clone, Debug)]
pub struct TraceIdConfig {
    /// 是否启用 tracing span（默认启用）
    pub enable_span: bool,
}

impl Default for TraceIdConfig {
    fn default() -> Self {
        Self { enable_span: true }
    }
}

/// 追踪中间件层
#[derive(Clone, Debug)]
pub struct TraceIdLayer {
    config: TraceIdConfig,
}

impl TraceIdLayer {
    /// 创建新的追踪ID层，使用默认配置
    pub fn new() -> Self {
        Self::with_config(TraceIdConfig::default())
    }

    /// 使用自定义配置创建追踪ID层
    ///
    /// `enable_span: false` 时跳过 span 创建，只保留ID的生成与传递
    pub fn with_config(config: TraceIdConfig) -> Self {
        Self { config }
    }
}

impl Default for TraceIdLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for TraceIdLayer {
    type Service = TraceIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TraceIdService {
            inner,
            config: self.config.clone(),
        }
    }
}

/// 追踪ID服务
#[derive(Clone, Debug)]
pub struct TraceIdService<S> {
    inner: S,
    config: TraceIdConfig,
}

impl<S> Service<Request> for TraceIdService<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        // 客户端传入的 X-Request-ID 一律忽略，每个请求都拿到新的ID
        let trace_id = TraceId::new();

        let method = req.method().clone();
        let uri = req.uri().clone();

        req.extensions_mut()
            .insert(RequestContext::new(trace_id.clone()));

        let span = self.config.enable_span.then(|| {
            tracing::info_span!(
                "request",
                trace_id = %trace_id.as_str(),
                method = %method,
                uri = %uri
            )
        });

        let future = self.inner.call(req);

        let handle = async move {
            let mut response = future.await?;
            attach_header(&mut response, &trace_id);
            Ok(response)
        };

        match span {
            Some(span) => Box::pin(handle.instrument(span)),
            // 高性能模式：跳过 span 创建
            None => Box::pin(handle),
        }
    }
}

/// 把追踪ID写入响应头
fn attach_header(response: &mut Response, trace_id: &TraceId) {
    match HeaderValue::from_str(trace_id.as_str()) {
        Ok(value) => {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(_) => tracing::error!(trace_id = %trace_id, "trace id is not a valid header value"),
    }
}

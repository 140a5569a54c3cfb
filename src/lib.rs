//! 内存用户服务
//!
//! 在进程内存中维护一组用户记录，通过 HTTP 暴露增删改查，
//! 并为每个请求分配一个追踪ID（`X-Request-ID`）。
//!
//! ## Usage
//!
//! ### 基础用法：注册表
//! ```
//! use user_registry::{UserFields, UserRegistry};
//!
//! let registry = UserRegistry::new();
//! let user = registry.create(UserFields::new("Ada", "ada@x.com", "1 Lane"));
//! assert_eq!(registry.list(), vec![user.clone()]);
//! assert!(registry.delete(&user.id).is_ok());
//! assert!(registry.delete(&user.id).is_err());
//! ```
//!
//! ### 启动 HTTP 服务
//! ```no_run
//! use std::sync::Arc;
//! use user_registry::{router, UserRegistry};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = router(Arc::new(UserRegistry::new()));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod config;
mod context;
pub mod error;
pub mod handlers;
mod id;
mod middleware;
pub mod registry;
pub mod response;
mod router;
mod trace_id;

pub use context::RequestContext;
pub use error::ApiError;
pub use id::next_id;
pub use middleware::{TraceIdConfig, TraceIdLayer, TraceIdService};
pub use registry::{RegistryError, User, UserFields, UserRegistry};
pub use response::Envelope;
pub use router::{router, router_with_config};
pub use trace_id::TraceId;

/// HTTP 头部中的请求追踪ID字段名
pub const REQUEST_ID_HEADER: &str = "x-request-id";

//! 服务配置
//!
//! 只从环境变量读取；未设置时使用默认值。

use crate::middleware::TraceIdConfig;
use std::net::SocketAddr;
use thiserror::Error;

/// 监听地址的环境变量名
pub const ADDR_ENV: &str = "USER_REGISTRY_ADDR";
/// 是否启用请求 span 的环境变量名
pub const TRACE_SPAN_ENV: &str = "USER_REGISTRY_TRACE_SPAN";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid USER_REGISTRY_ADDR value {value:?}: {reason}")]
    InvalidAddr { value: String, reason: String },
    #[error("invalid USER_REGISTRY_TRACE_SPAN value {0:?}, expected true/false/1/0")]
    InvalidFlag(String),
}

/// 服务配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// 监听地址（默认 `0.0.0.0:8080`）
    pub bind_addr: SocketAddr,
    /// 是否为每个请求创建 tracing span（默认启用）
    pub enable_span: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            enable_span: true,
        }
    }
}

impl ServerConfig {
    /// 从进程环境变量读取配置
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置，便于测试
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ADDR_ENV) {
            config.bind_addr = value.trim().parse().map_err(|err: std::net::AddrParseError| {
                ConfigError::InvalidAddr {
                    value: value.clone(),
                    reason: err.to_string(),
                }
            })?;
        }

        if let Some(value) = lookup(TRACE_SPAN_ENV) {
            config.enable_span = parse_flag(&value).ok_or(ConfigError::InvalidFlag(value))?;
        }

        Ok(config)
    }

    pub fn trace_config(&self) -> TraceIdConfig {
        TraceIdConfig {
            enable_span: self.enable_span,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

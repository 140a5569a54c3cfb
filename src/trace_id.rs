//! TraceId 核心结构体定义

use crate::id::next_id;
use std::fmt;

/// 追踪ID结构体
///
/// 每个请求独享一个，生命周期只覆盖一次请求/响应。
/// 格式为32个小写十六进制字符，与 W3C TraceContext 的 trace-id 兼容。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceId(String);

impl TraceId {
    /// 生成新的追踪ID
    ///
    /// 底层复用 [`next_id`]，取其不带连字符的十六进制形式。
    /// 生成的ID永远不会全为零。
    #[inline]
    pub fn new() -> Self {
        Self(next_id().simple().to_string())
    }

    /// 从字符串创建追踪ID，并进行格式校验
    ///
    /// # 校验规则
    /// - 长度必须是 32 个字符
    /// - 只能包含小写十六进制字符（0-9, a-f）
    /// - 不能全为零
    ///
    /// 仅用于测试：生产路径上的追踪ID只由 [`TraceId::new`] 产生。
    #[cfg(test)]
    pub(crate) fn from_string_validated(id: &str) -> Option<Self> {
        if id.len() != 32 {
            return None;
        }

        if !Self::is_valid_hex_bytes(id.as_bytes()) {
            return None;
        }

        if id.bytes().all(|b| b == b'0') {
            return None;
        }

        Some(Self(id.to_string()))
    }

    /// 字节级十六进制字符验证
    #[cfg(test)]
    fn is_valid_hex_bytes(bytes: &[u8]) -> bool {
        bytes
            .iter()
            .all(|&b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    /// 获取追踪ID字符串
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_id_creation() {
        let trace_id = TraceId::new();
        let id_str = trace_id.as_str();

        // 验证长度：必须是 32 个字符
        assert_eq!(id_str.len(), 32);

        // 验证只包含小写十六进制字符
        assert!(id_str
            .chars()
            .all(|c| c.is_ascii_hexdigit() && (c.is_ascii_digit() || c.is_ascii_lowercase())));

        // 验证不全为零
        assert_ne!(id_str, "00000000000000000000000000000000");
    }

    #[test]
    fn test_trace_id_display() {
        let trace_id = TraceId::from_string_validated("0af7651916cd43dd8448eb211c80319c").unwrap();
        assert_eq!(format!("{}", trace_id), "0af7651916cd43dd8448eb211c80319c");
        assert!(format!("{:?}", trace_id).contains("0af7651916cd43dd8448eb211c80319c"));
    }

    #[test]
    fn test_from_string_validated() {
        let valid_id = "0af7651916cd43dd8448eb211c80319c";
        assert_eq!(
            TraceId::from_string_validated(valid_id),
            Some(TraceId(valid_id.to_string()))
        );

        // 长度不正确
        assert_eq!(TraceId::from_string_validated("short"), None);
        assert_eq!(
            TraceId::from_string_validated("toolongtraceidentifierthatexceeds32chars"),
            None
        );

        // 带连字符的 UUID 形式不是追踪ID
        assert_eq!(
            TraceId::from_string_validated("0af76519-16cd-43dd-8448-eb211c80319c"),
            None
        );

        // 包含大写字符
        assert_eq!(
            TraceId::from_string_validated("0AF7651916CD43DD8448EB211C80319C"),
            None
        );

        // 包含非十六进制字符
        assert_eq!(
            TraceId::from_string_validated("0af7651916cd43dd8448eb211c80319g"),
            None
        );

        // 全为零
        assert_eq!(
            TraceId::from_string_validated("00000000000000000000000000000000"),
            None
        );
    }

    #[test]
    fn test_trace_id_uniqueness() {
        let mut ids = std::collections::HashSet::new();
        for _ in 0..1000 {
            let trace_id = TraceId::new();
            assert!(ids.insert(trace_id), "Generated duplicate trace ID");
        }
    }

    #[test]
    fn test_generated_ids_pass_validation() {
        for _ in 0..100 {
            let trace_id = TraceId::default();
            assert!(TraceId::from_string_validated(trace_id.as_str()).is_some());
        }
    }
}

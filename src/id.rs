//! 全局唯一标识符生成器
//!
//! 追踪ID与用户ID共用同一个生成器，但两者的命名空间互不相关。

use uuid::Uuid;

/// 生成一个新的全局唯一标识符（UUID v4）
///
/// 除系统随机源外没有任何内部状态，可被任意多个线程/任务同时调用。
/// 随机源不可用时属于进程级致命错误，因此这里没有错误返回值。
#[inline]
pub fn next_id() -> Uuid {
    Uuid::new_v4()
}

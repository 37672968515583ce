//! 领域事件（Domain Event）
//!
//! 分发器把事件当作不透明载荷处理，通常以枚举表达“变体标签 + 载荷”，
//! 监听器通过模式匹配消费。
//!
use std::fmt;

/// 领域事件载荷需要满足的通用能力边界
pub trait DomainEvent: Clone + fmt::Debug + Send + Sync + 'static {
    /// 事件类型（形如 `OrderEvent.Created` 或自定义类型名），用于日志与诊断
    fn event_type(&self) -> &str;
}

//! 事件监听器（EventListener）与失败记录
//!
use super::SubscriptionHandle;
use crate::error::DomainError;
use std::fmt;

/// 具名事件监听器：适合以结构体形式实现的处理逻辑
///
/// 闭包可直接通过 `EventDispatcher::subscribe` 注册，无需实现该 trait。
pub trait EventListener<E>: Send + Sync {
    /// 监听器名称（用于日志与失败记录）
    fn listener_name(&self) -> &str;

    /// 处理事件；返回错误不会影响其他监听器
    fn on_event(&self, event: &E) -> anyhow::Result<()>;
}

/// 单次投递中某个监听器的失败（返回错误或发生 panic）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    subscription: SubscriptionHandle,
    listener: String,
    reason: String,
}

impl ListenerFailure {
    pub(crate) fn new(
        subscription: SubscriptionHandle,
        listener: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            subscription,
            listener: listener.into(),
            reason: reason.into(),
        }
    }

    pub fn subscription(&self) -> SubscriptionHandle {
        self.subscription
    }

    pub fn listener(&self) -> &str {
        &self.listener
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for ListenerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "listener {} ({}) failed: {}",
            self.listener, self.subscription, self.reason
        )
    }
}

impl From<ListenerFailure> for DomainError {
    fn from(failure: ListenerFailure) -> Self {
        DomainError::EventHandler {
            handler: failure.listener,
            reason: failure.reason,
        }
    }
}

//! 事件子系统（eventing）
//!
//! 提供进程内领域事件的发布/订阅：
//! - `EventDispatcher`：多播分发器，支持同步回调与 `'static` 事件流两种订阅方式；
//! - `EventListener`：具名监听器协议；
//! - `ListenerFailure`：被隔离的监听器失败记录；
//! - `shared`：按事件类型划分的进程级默认分发器。
//!
//! 不是分布式事件总线：不做持久化、重试或跨进程投递。
//!
mod dispatcher;
mod listener;
mod shared;

pub use dispatcher::{
    DispatcherConfig, DispatcherState, EventDispatcher, PublishReport, SubscriptionHandle,
};
pub use listener::{EventListener, ListenerFailure};
pub use shared::shared;

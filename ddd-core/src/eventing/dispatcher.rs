//! 进程内事件分发器（EventDispatcher）
//!
//! 将领域事件多播给所有当前订阅者：
//! - `subscribe`/`subscribe_listener`：注册同步回调，返回 `SubscriptionHandle`；
//! - `subscribe_stream`：基于 `tokio::sync::broadcast` 的 `'static` 事件流，
//!   便于在 `tokio::spawn` 中异步消费；
//! - `publish`：对订阅表做快照后逐个投递，单个监听器的错误或 panic 被隔离，
//!   记录日志并发送到 `listener_failures` 通道，不影响其他监听器与发布方；
//! - `close`：进入终态 `Closed`，释放订阅表与广播通道。
//!
//! 生命周期策略：`Closed` 状态下的订阅与发布一律返回 `DomainError::DispatcherClosed`；
//! `unsubscribe` 在任何状态下都是幂等的空操作。
//!
//! 注意：panic 隔离依赖 `catch_unwind`，在 `panic = "abort"` 的构建中不生效。

use super::listener::{EventListener, ListenerFailure};
use crate::error::{DomainError, DomainResult as Result};
use bon::Builder;
use futures_core::stream::BoxStream;
use futures_util::StreamExt;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::any::{Any, type_name};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, trace, warn};

type ListenerFn<E> = Arc<dyn Fn(&E) -> anyhow::Result<()> + Send + Sync>;

/// 订阅句柄：在同一分发器内唯一且不复用
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionHandle(u64);

impl fmt::Display for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatcherState {
    Open,
    Closed,
}

/// 分发器配置
#[derive(Builder, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// `subscribe_stream` 背后广播通道的容量，慢消费者超出后会收到 lag 错误
    #[builder(default = 256)]
    pub stream_capacity: usize,
    /// 监听器失败通道的容量
    #[builder(default = 64)]
    pub failure_capacity: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            stream_capacity: 256,
            failure_capacity: 64,
        }
    }
}

/// 单次发布的投递结果
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// 快照中的回调监听器数量
    pub listeners: usize,
    /// 其中失败（返回错误或 panic）的数量
    pub failed: usize,
    /// 事件被交付的流订阅者数量
    pub streams: usize,
}

impl PublishReport {
    /// 成功处理事件的回调监听器数量（不含流订阅者）
    pub fn delivered(&self) -> usize {
        self.listeners - self.failed
    }
}

struct Subscription<E> {
    handle: SubscriptionHandle,
    listener: Arc<str>,
    callback: ListenerFn<E>,
}

impl<E> Clone for Subscription<E> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle,
            listener: self.listener.clone(),
            callback: self.callback.clone(),
        }
    }
}

impl<E> Subscription<E> {
    fn invoke(&self, event: &E) -> std::result::Result<(), String> {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.callback)(event))) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(format!("{err:#}")),
            Err(payload) => Err(panic_reason(payload.as_ref())),
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("panicked: {msg}")
    } else {
        "panicked".to_string()
    }
}

struct Inner<E> {
    state: DispatcherState,
    next_id: u64,
    // 写时复制：publish 只克隆 Arc，迭代期间不持有锁
    subscribers: Arc<Vec<Subscription<E>>>,
    events: Option<broadcast::Sender<E>>,
    failures: Option<broadcast::Sender<ListenerFailure>>,
}

/// 事件分发器
///
/// 克隆得到的是同一分发器的另一个句柄。
///
/// # 示例
///
/// ```
/// use ddd_core::eventing::EventDispatcher;
/// use std::sync::{Arc, Mutex};
///
/// let dispatcher = EventDispatcher::<String>::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let sink = seen.clone();
/// let handle = dispatcher
///     .subscribe(move |event: &String| {
///         sink.lock().unwrap().push(event.clone());
///         Ok(())
///     })
///     .unwrap();
///
/// dispatcher.publish("OrderPlaced".to_string()).unwrap();
/// dispatcher.unsubscribe(handle);
/// dispatcher.publish("OrderShipped".to_string()).unwrap();
///
/// assert_eq!(*seen.lock().unwrap(), vec!["OrderPlaced".to_string()]);
/// ```
pub struct EventDispatcher<E> {
    inner: Arc<Mutex<Inner<E>>>,
}

impl<E> Clone for EventDispatcher<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E> Default for EventDispatcher<E>
where
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventDispatcher<E>
where
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_config(DispatcherConfig::default())
    }

    pub fn with_config(config: DispatcherConfig) -> Self {
        let (events, _rx) = broadcast::channel(config.stream_capacity.max(1));
        let (failures, _rx) = broadcast::channel(config.failure_capacity.max(1));

        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: DispatcherState::Open,
                next_id: 0,
                subscribers: Arc::new(Vec::new()),
                events: Some(events),
                failures: Some(failures),
            })),
        }
    }

    /// 注册回调监听器
    ///
    /// 同一个函数注册两次得到两个相互独立的订阅，每次发布都会被调用两次。
    pub fn subscribe<F>(&self, listener: F) -> Result<SubscriptionHandle>
    where
        F: Fn(&E) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(Arc::from(type_name::<F>()), Arc::new(listener))
    }

    /// 注册具名监听器
    pub fn subscribe_listener<L>(&self, listener: Arc<L>) -> Result<SubscriptionHandle>
    where
        L: EventListener<E> + 'static,
    {
        let name = Arc::from(listener.listener_name());
        self.register(name, Arc::new(move |event: &E| listener.on_event(event)))
    }

    fn register(&self, listener: Arc<str>, callback: ListenerFn<E>) -> Result<SubscriptionHandle> {
        let mut inner = self.inner.lock();
        if inner.state == DispatcherState::Closed {
            return Err(DomainError::DispatcherClosed);
        }

        inner.next_id += 1;
        let handle = SubscriptionHandle(inner.next_id);
        Arc::make_mut(&mut inner.subscribers).push(Subscription {
            handle,
            listener: listener.clone(),
            callback,
        });
        drop(inner);

        debug!(subscription = %handle, listener = %listener, "listener subscribed");
        Ok(handle)
    }

    /// 返回一个 'static 生命周期的事件流，便于在 tokio::spawn 中使用
    ///
    /// 丢弃该流即取消订阅；分发器关闭后流结束。慢消费者会收到 `DomainError::EventBus`
    /// （lag），随后继续接收新事件。
    pub fn subscribe_stream(&self) -> Result<BoxStream<'static, Result<E>>> {
        let rx = {
            let inner = self.inner.lock();
            match &inner.events {
                Some(tx) if inner.state == DispatcherState::Open => tx.subscribe(),
                _ => return Err(DomainError::DispatcherClosed),
            }
        };

        let stream =
            BroadcastStream::new(rx).map(|r| r.map_err(|e| DomainError::event_bus(e.to_string())));
        Ok(Box::pin(stream))
    }

    /// 监听器失败通道；分发器关闭后流结束
    pub fn listener_failures(&self) -> Result<BoxStream<'static, ListenerFailure>> {
        let rx = {
            let inner = self.inner.lock();
            match &inner.failures {
                Some(tx) if inner.state == DispatcherState::Open => tx.subscribe(),
                _ => return Err(DomainError::DispatcherClosed),
            }
        };

        // lag 时丢弃缺失的记录，继续接收
        let stream = BroadcastStream::new(rx).filter_map(|r| std::future::ready(r.ok()));
        Ok(Box::pin(stream))
    }

    /// 取消订阅；未知或已取消的句柄返回 false
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let mut inner = self.inner.lock();
        let Some(pos) = inner.subscribers.iter().position(|s| s.handle == handle) else {
            return false;
        };
        Arc::make_mut(&mut inner.subscribers).remove(pos);
        drop(inner);

        debug!(subscription = %handle, "listener unsubscribed");
        true
    }

    /// 将事件投递给发布时刻的全部订阅者
    ///
    /// 回调按订阅顺序同步执行，投递期间新增的订阅不会收到本事件。
    /// 流订阅者只做非阻塞的交接，实际处理发生在消费流的任务上。
    pub fn publish(&self, event: E) -> Result<PublishReport> {
        let (subscribers, events, failures) = {
            let inner = self.inner.lock();
            if inner.state == DispatcherState::Closed {
                return Err(DomainError::DispatcherClosed);
            }
            (
                inner.subscribers.clone(),
                inner.events.clone(),
                inner.failures.clone(),
            )
        };

        let mut report = PublishReport {
            listeners: subscribers.len(),
            ..Default::default()
        };

        for sub in subscribers.iter() {
            if let Err(reason) = sub.invoke(&event) {
                report.failed += 1;
                warn!(
                    subscription = %sub.handle,
                    listener = %sub.listener,
                    reason = %reason,
                    "event listener failed"
                );
                if let Some(tx) = &failures {
                    // 无人订阅失败通道时 send 返回错误，忽略即可
                    let _ = tx.send(ListenerFailure::new(sub.handle, &*sub.listener, reason));
                }
            }
        }

        if let Some(tx) = events {
            report.streams = tx.send(event).unwrap_or(0);
        }

        trace!(
            listeners = report.listeners,
            failed = report.failed,
            streams = report.streams,
            "event published"
        );
        Ok(report)
    }

    /// 依次发布，遇到第一个错误即停止
    pub fn publish_all<I>(&self, events: I) -> Result<Vec<PublishReport>>
    where
        I: IntoIterator<Item = E>,
    {
        events.into_iter().map(|event| self.publish(event)).collect()
    }

    /// 关闭分发器（幂等）
    ///
    /// 返回之后的任何 publish 都会失败；已经取得快照的 publish 可以完成投递。
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        if inner.state == DispatcherState::Closed {
            return;
        }
        inner.state = DispatcherState::Closed;
        inner.subscribers = Arc::new(Vec::new());
        inner.events = None;
        inner.failures = None;
        drop(inner);

        debug!("event dispatcher closed");
    }

    pub fn state(&self) -> DispatcherState {
        self.inner.lock().state
    }

    pub fn is_closed(&self) -> bool {
        self.state() == DispatcherState::Closed
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }

    pub fn stream_count(&self) -> usize {
        self.inner
            .lock()
            .events
            .as_ref()
            .map_or(0, |tx| tx.receiver_count())
    }
}

impl<E> fmt::Debug for EventDispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("EventDispatcher")
            .field("state", &inner.state)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

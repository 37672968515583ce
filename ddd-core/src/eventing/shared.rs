//! 进程级默认分发器
//!
//! 每种事件类型对应一个按需创建的 `EventDispatcher`，存放在进程全局的注册表中：
//! - 生命周期：进程内首次调用时创建，此后从不隐式销毁；
//! - 这是全局可变状态，对其调用 `close()` 对整个进程都是终态；
//! - 优先显式构造并传递 `EventDispatcher`，本模块仅作为便利入口。
//!
use super::EventDispatcher;
use crate::error::{DomainError, DomainResult as Result};
use dashmap::DashMap;
use std::any::{Any, TypeId, type_name};
use std::sync::{Arc, LazyLock};

static DISPATCHERS: LazyLock<DashMap<TypeId, Arc<dyn Any + Send + Sync>>> =
    LazyLock::new(DashMap::new);

/// 获取事件类型 `E` 的进程级分发器（首次调用时创建）
pub fn shared<E>() -> Result<EventDispatcher<E>>
where
    E: Clone + Send + Sync + 'static,
{
    let entry = DISPATCHERS
        .entry(TypeId::of::<E>())
        .or_insert_with(|| Arc::new(EventDispatcher::<E>::new()) as Arc<dyn Any + Send + Sync>)
        .value()
        .clone();

    // 键与值使用同一泛型 E，正常情况下 downcast 不会失败
    entry
        .downcast_ref::<EventDispatcher<E>>()
        .cloned()
        .ok_or_else(|| DomainError::TypeMismatch {
            expected: type_name::<EventDispatcher<E>>().to_string(),
            found: "unknown".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone)]
    struct SharedPing;

    #[derive(Debug, Clone)]
    struct SharedPong;

    #[test]
    fn same_type_same_dispatcher() {
        let hits = Arc::new(AtomicUsize::new(0));

        let a = shared::<SharedPing>().unwrap();
        let counter = hits.clone();
        a.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();

        let b = shared::<SharedPing>().unwrap();
        b.publish(SharedPing).unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn different_types_are_independent() {
        let ping = shared::<SharedPing>().unwrap();
        let pong = shared::<SharedPong>().unwrap();

        pong.close();
        assert!(shared::<SharedPong>().unwrap().is_closed());
        assert!(!ping.is_closed());
    }
}

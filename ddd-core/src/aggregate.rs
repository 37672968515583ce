//! 聚合（Aggregate）抽象
//!
//! 聚合是一致性边界：状态变更时记录领域事件，由应用层取出后交给分发器发布。
//!
use crate::domain_event::DomainEvent;
use crate::entity::Entity;

/// 聚合根接口
pub trait Aggregate: Entity {
    /// 该聚合产生的领域事件类型
    type Event: DomainEvent;

    /// 取出（并清空）自上次调用以来记录的事件
    fn take_events(&mut self) -> Vec<Self::Event>;
}

//! DDD 基础库（ddd-core）
//!
//! 提供以 DDD 为中心的通用抽象，用于在应用中组织领域代码：
//! - 实体（`entity`）、聚合（`aggregate`）、领域事件（`domain_event`）等标记接口；
//! - 仓储（`repository`）、领域服务（`domain_service`）、映射器（`mapper`）、
//!   工厂（`factory`）与工作单元（`unit_of_work`）等扩展点；
//! - 规约（`specification`）与值对象（`value_object`）：声明式校验，失败以数据形式返回；
//! - 事件系统（`eventing`）：进程内多播分发器，隔离单个监听器的失败。
//!
//! 本 crate 不做持久化、事务或分布式投递，仅定义领域层接口与进程内的校验/通知能力。
//!
//! 典型用法：
//! 1. 用 `ValidatedValue` + `rules` 描述值对象的校验规则；
//! 2. 聚合实现 `Aggregate`，在状态变更时记录领域事件；
//! 3. 应用层保存聚合后取出事件，通过 `EventDispatcher::publish` 通知监听器。
//!
pub mod aggregate;
pub mod domain_event;
pub mod domain_service;
pub mod entity;
pub mod error;
#[cfg(feature = "eventing")]
pub mod eventing;
pub mod factory;
pub mod mapper;
pub mod repository;
pub mod specification;
pub mod unit_of_work;
pub mod value_object;

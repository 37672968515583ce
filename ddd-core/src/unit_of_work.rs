//! 工作单元（Unit of Work）
//!
//! 事务边界的协议：由基础设施层实现提交与回滚，本 crate 不提供事务能力。
//!
use crate::error::DomainResult as Result;
use async_trait::async_trait;

#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn commit(&self) -> Result<()>;

    async fn rollback(&self) -> Result<()>;
}

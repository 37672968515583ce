//! 仓储（Repository）
//!
//! 以聚合为单位的存取接口，具体存储由基础设施层实现。
//!
use crate::aggregate::Aggregate;
use crate::error::DomainResult as Result;
use async_trait::async_trait;

#[async_trait]
pub trait Repository<A>: Send + Sync
where
    A: Aggregate,
{
    async fn find_by_id(&self, id: &A::Id) -> Result<Option<A>>;

    async fn save(&self, aggregate: &A) -> Result<()>;

    async fn remove(&self, id: &A::Id) -> Result<()>;
}

//! 映射器（Mapper）
//!
//! 在领域对象 `D` 与持久化/传输表示 `P` 之间转换。
//! 进入领域一侧可能失败（例如数据不满足值对象校验），因此返回 `Result`。
//!
use crate::error::DomainResult as Result;

pub trait Mapper<D, P> {
    fn to_domain(&self, raw: &P) -> Result<D>;

    fn to_persistence(&self, domain: &D) -> P;
}

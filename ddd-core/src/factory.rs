//! 工厂（Factory）
//!
//! 封装复杂对象（通常是聚合）的创建与不变量检查。
//!
use crate::error::DomainResult as Result;

pub trait Factory {
    type Input;
    type Output;

    fn create(&self, input: Self::Input) -> Result<Self::Output>;
}

//! 值对象（Value Object）与声明式校验
//!
//! 无标识、以值相等为准的对象，用于封装不可变的概念性值与校验逻辑：
//! - `ValueObject`：值对象抽象（创建时校验）；
//! - `ValidatedValue`：包装一个不可变值与一组有序校验函数，按需计算校验失败集合；
//! - `Failure`：单条校验失败记录；
//! - `rules`：常用校验函数构造器。
//!
//! 校验不通过是正常的数据结果而非错误：容器只负责逐条执行规则并聚合失败，
//! 不做短路、优先级或规则间依赖。

mod failure;
pub mod rules;
mod validated_value;

pub use failure::Failure;
pub use validated_value::{ValidatedValue, Validator};

/// 值对象抽象
pub trait ValueObject {
    /// 业务校验失败时的错误类型
    type Error;

    /// 创建值对象时进行验证
    fn validate(&self) -> Result<(), Self::Error>;
}

//! 实体（Entity）基础抽象
//!
//! 以唯一标识区分的领域对象。应用类型实现该 trait，而非继承某个基类。
//!
use std::{fmt::Display, str::FromStr};

/// 具备唯一标识的实体抽象
pub trait Entity: Send + Sync {
    /// 实体标识类型，要求可解析、可显示与可克隆
    type Id: FromStr + Clone + Display;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;
}

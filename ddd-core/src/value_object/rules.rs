//! 常用校验规则
//!
//! 每个构造器接收失败消息，返回可直接放入 `ValidatedValue` 的 `Validator<T>`。

use super::{Failure, Validator};
use crate::specification::Specification;
use std::sync::Arc;

/// 去除首尾空白后不能为空
pub fn not_empty<T>(message: impl Into<String>) -> Validator<T>
where
    T: AsRef<str> + 'static,
{
    let message = message.into();
    Arc::new(move |value: &T| {
        value
            .as_ref()
            .trim()
            .is_empty()
            .then(|| Failure::new(message.clone()))
    })
}

pub fn contains<T>(needle: impl Into<String>, message: impl Into<String>) -> Validator<T>
where
    T: AsRef<str> + 'static,
{
    let needle = needle.into();
    let message = message.into();
    Arc::new(move |value: &T| {
        (!value.as_ref().contains(needle.as_str())).then(|| Failure::new(message.clone()))
    })
}

/// 字符数（非字节数）不少于 `min`
pub fn min_len<T>(min: usize, message: impl Into<String>) -> Validator<T>
where
    T: AsRef<str> + 'static,
{
    let message = message.into();
    Arc::new(move |value: &T| {
        (value.as_ref().chars().count() < min).then(|| Failure::new(message.clone()))
    })
}

/// 字符数（非字节数）不超过 `max`
pub fn max_len<T>(max: usize, message: impl Into<String>) -> Validator<T>
where
    T: AsRef<str> + 'static,
{
    let message = message.into();
    Arc::new(move |value: &T| {
        (value.as_ref().chars().count() > max).then(|| Failure::new(message.clone()))
    })
}

/// `check` 返回 false 时失败
pub fn predicate<T, F>(check: F, message: impl Into<String>) -> Validator<T>
where
    T: 'static,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    let message = message.into();
    Arc::new(move |value: &T| (!check(value)).then(|| Failure::new(message.clone())))
}

/// 将规约转换为校验规则：不满足规约时失败
pub fn from_spec<T, S>(spec: S, message: impl Into<String>) -> Validator<T>
where
    T: 'static,
    S: Specification<T> + Send + Sync + 'static,
{
    let message = message.into();
    Arc::new(move |value: &T| {
        (!spec.is_satisfied_by(value)).then(|| Failure::new(message.clone()))
    })
}

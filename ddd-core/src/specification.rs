//! 规约（Specification）
//!
//! 封装可复用、可组合的业务规则。闭包 `Fn(&T) -> bool` 自动实现该 trait，
//! 也可通过 `value_object::rules::from_spec` 转换为值对象的校验规则。
//!

/// 规约模式的核心 trait
pub trait Specification<T> {
    /// 检查候选对象是否满足规约
    fn is_satisfied_by(&self, candidate: &T) -> bool;

    /// 与另一个规约进行 AND 组合
    fn and<S>(self, other: S) -> AndSpecification<T>
    where
        Self: Sized + Send + Sync + 'static,
        S: Specification<T> + Send + Sync + 'static,
    {
        AndSpecification {
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    /// 与另一个规约进行 OR 组合
    fn or<S>(self, other: S) -> OrSpecification<T>
    where
        Self: Sized + Send + Sync + 'static,
        S: Specification<T> + Send + Sync + 'static,
    {
        OrSpecification {
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    /// 对规约进行 NOT 操作
    fn not(self) -> NotSpecification<T>
    where
        Self: Sized + Send + Sync + 'static,
    {
        NotSpecification {
            inner: Box::new(self),
        }
    }
}

impl<T, F> Specification<T> for F
where
    F: Fn(&T) -> bool,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self(candidate)
    }
}

type BoxedSpecification<T> = Box<dyn Specification<T> + Send + Sync>;

pub struct AndSpecification<T> {
    left: BoxedSpecification<T>,
    right: BoxedSpecification<T>,
}

impl<T> Specification<T> for AndSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) && self.right.is_satisfied_by(candidate)
    }
}

pub struct OrSpecification<T> {
    left: BoxedSpecification<T>,
    right: BoxedSpecification<T>,
}

impl<T> Specification<T> for OrSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) || self.right.is_satisfied_by(candidate)
    }
}

pub struct NotSpecification<T> {
    inner: BoxedSpecification<T>,
}

impl<T> Specification<T> for NotSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        !self.inner.is_satisfied_by(candidate)
    }
}

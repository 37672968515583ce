use super::{Failure, ValueObject};
use crate::error::DomainError;
use std::fmt;
use std::sync::Arc;

/// 校验函数：对候选值返回 `None`（通过）或恰好一条 `Failure`
pub type Validator<T> = Arc<dyn Fn(&T) -> Option<Failure> + Send + Sync>;

/// 带校验规则的值容器
///
/// - `value` 在构造时设定，之后不可变；
/// - `validators` 在构造时固定，顺序即执行顺序；
/// - 所有规则都会执行，互不短路，失败集合是 `(value, validators)` 的纯函数。
///
/// # 示例
///
/// ```
/// use ddd_core::value_object::{ValidatedValue, rules};
///
/// let email = ValidatedValue::new(
///     "ok@example.com".to_string(),
///     vec![rules::contains("@", "email must contain @")],
/// );
/// assert!(email.is_valid());
///
/// let name = ValidatedValue::new(String::new(), vec![rules::not_empty("value must not be empty")]);
/// assert!(name.is_not_valid());
/// assert_eq!(name.first_failure_message().as_deref(), Some("value must not be empty"));
/// ```
pub struct ValidatedValue<T> {
    value: T,
    validators: Vec<Validator<T>>,
}

impl<T> ValidatedValue<T> {
    pub fn new(value: T, validators: Vec<Validator<T>>) -> Self {
        Self { value, validators }
    }

    /// 不带任何规则的容器（恒为有效）
    pub fn unchecked(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    /// 追加一条规则
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&T) -> Option<Failure> + Send + Sync + 'static,
    {
        self.validators.push(Arc::new(validator));
        self
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn validators_len(&self) -> usize {
        self.validators.len()
    }

    /// 按规则顺序收集所有失败
    pub fn failures(&self) -> Vec<Failure> {
        self.validators
            .iter()
            .filter_map(|validator| validator(&self.value))
            .collect()
    }

    /// 与 `failures()` 相同，所有规则都会执行
    pub fn is_valid(&self) -> bool {
        self.failures().is_empty()
    }

    pub fn is_not_valid(&self) -> bool {
        !self.is_valid()
    }

    pub fn first_failure_message(&self) -> Option<String> {
        self.failures()
            .into_iter()
            .next()
            .map(|failure| failure.message().to_owned())
    }

    /// 有效时取出内部值，否则返回全部失败
    pub fn into_result(self) -> Result<T, Vec<Failure>> {
        let failures = self.failures();
        if failures.is_empty() {
            Ok(self.value)
        } else {
            Err(failures)
        }
    }
}

impl<T> ValueObject for ValidatedValue<T> {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        let failures = self.failures();
        if failures.is_empty() {
            return Ok(());
        }

        let reason = failures
            .iter()
            .map(Failure::message)
            .collect::<Vec<_>>()
            .join("; ");
        Err(DomainError::invalid_value(reason))
    }
}

impl<T: Clone> Clone for ValidatedValue<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            validators: self.validators.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ValidatedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedValue")
            .field("value", &self.value)
            .field("validators", &self.validators.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_object::rules;
    use proptest::prelude::*;

    fn is_not_empty() -> Validator<String> {
        rules::not_empty("value must not be empty")
    }

    fn contains_at_sign() -> Validator<String> {
        rules::contains("@", "value must contain @")
    }

    // 空字符串 + 非空规则 -> 无效
    #[test]
    fn empty_string_fails_not_empty_rule() {
        let v = ValidatedValue::new(String::new(), vec![is_not_empty()]);

        assert!(!v.is_valid());
        assert!(v.is_not_valid());
        assert_eq!(v.failures(), vec![Failure::new("value must not be empty")]);
        assert_eq!(
            v.first_failure_message().as_deref(),
            Some("value must not be empty")
        );
    }

    // 邮箱包含 @ -> 有效
    #[test]
    fn email_with_at_sign_is_valid() {
        let v = ValidatedValue::new("ok@example.com".to_string(), vec![contains_at_sign()]);

        assert!(v.is_valid());
        assert!(v.failures().is_empty());
        assert_eq!(v.first_failure_message(), None);
    }

    // 所有规则都会执行，失败顺序与规则顺序一致
    #[test]
    fn all_rules_run_in_order_without_short_circuit() {
        let v = ValidatedValue::new(String::new(), vec![contains_at_sign(), is_not_empty()]);

        assert_eq!(
            v.failures(),
            vec![
                Failure::new("value must contain @"),
                Failure::new("value must not be empty"),
            ]
        );
        assert_eq!(v.first_failure_message().as_deref(), Some("value must contain @"));
    }

    #[test]
    fn with_validator_appends_rule() {
        let v = ValidatedValue::unchecked(7_i32)
            .with_validator(|n| (*n < 10).then(|| Failure::new("must be >= 10")))
            .with_validator(|n| (*n % 2 != 0).then(|| Failure::new("must be even")));

        assert_eq!(v.validators_len(), 2);
        assert_eq!(
            v.failures(),
            vec![Failure::new("must be >= 10"), Failure::new("must be even")]
        );
    }

    #[test]
    fn validate_joins_messages_into_domain_error() {
        let v = ValidatedValue::new(String::new(), vec![is_not_empty(), contains_at_sign()]);

        match v.validate().unwrap_err() {
            DomainError::InvalidValue { reason } => {
                assert_eq!(reason, "value must not be empty; value must contain @");
            }
            other => panic!("unexpected {other:?}"),
        }

        let ok = ValidatedValue::new("a@b".to_string(), vec![is_not_empty(), contains_at_sign()]);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn into_result_returns_value_or_failures() {
        let ok = ValidatedValue::new("a@b".to_string(), vec![contains_at_sign()]);
        assert_eq!(ok.into_result().unwrap(), "a@b");

        let bad = ValidatedValue::new("ab".to_string(), vec![contains_at_sign()]);
        assert_eq!(bad.into_result().unwrap_err(), vec![Failure::new("value must contain @")]);
    }

    #[test]
    fn clone_keeps_rules() {
        let v = ValidatedValue::new(String::new(), vec![is_not_empty()]);
        let c = v.clone();
        assert_eq!(c.failures(), v.failures());
        assert_eq!(format!("{c:?}"), r#"ValidatedValue { value: "", validators: 1 }"#);
    }

    // 查询有效性时每条规则都被执行一次
    #[test]
    fn validity_queries_run_every_rule() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counting = |message: &'static str| -> Validator<String> {
            let calls = calls.clone();
            Arc::new(move |_: &String| {
                calls.fetch_add(1, Ordering::SeqCst);
                Some(Failure::new(message))
            })
        };
        let v = ValidatedValue::new(String::new(), vec![counting("a"), counting("b")]);

        assert!(!v.is_valid());
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        assert_eq!(v.first_failure_message().as_deref(), Some("a"));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    // 规则 i：长度小于 thresholds[i] 时失败
    fn length_rules(thresholds: &[usize]) -> Vec<Validator<String>> {
        thresholds
            .iter()
            .enumerate()
            .map(|(i, &min)| {
                let rule: Validator<String> = Arc::new(move |s: &String| {
                    (s.len() < min).then(|| Failure::new(format!("rule-{i}")))
                });
                rule
            })
            .collect()
    }

    proptest! {
        #[test]
        fn no_rules_is_always_valid(value in ".*") {
            let v = ValidatedValue::unchecked(value);
            prop_assert!(v.failures().is_empty());
            prop_assert!(v.is_valid());
            prop_assert_eq!(v.first_failure_message(), None);
        }

        #[test]
        fn failures_are_ordered_non_absent_results(
            value in "[a-z]{0,12}",
            thresholds in proptest::collection::vec(0usize..16, 0..8),
        ) {
            let v = ValidatedValue::new(value.clone(), length_rules(&thresholds));

            let expected: Vec<Failure> = thresholds
                .iter()
                .enumerate()
                .filter(|(_, min)| value.len() < **min)
                .map(|(i, _)| Failure::new(format!("rule-{i}")))
                .collect();

            let failures = v.failures();
            prop_assert!(failures.len() <= thresholds.len());
            prop_assert_eq!(&failures, &expected);
            prop_assert_eq!(v.failures(), failures.clone());
            prop_assert_eq!(v.is_valid(), failures.is_empty());
            prop_assert_eq!(v.is_not_valid(), !v.is_valid());
            prop_assert_eq!(
                v.first_failure_message(),
                failures.first().map(|f| f.message().to_owned())
            );
        }
    }
}

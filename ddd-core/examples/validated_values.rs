/// 值对象校验示例
/// 展示规则组合、失败聚合，以及将校验结果转换为 DomainError
use ddd_core::specification::Specification;
use ddd_core::value_object::{Failure, ValidatedValue, ValueObject, rules};

struct Lowercase;

impl Specification<String> for Lowercase {
    fn is_satisfied_by(&self, candidate: &String) -> bool {
        !candidate.chars().any(char::is_uppercase)
    }
}

fn username(raw: &str) -> ValidatedValue<String> {
    ValidatedValue::new(
        raw.to_string(),
        vec![
            rules::not_empty("username must not be empty"),
            rules::min_len(3, "username is too short"),
            rules::max_len(16, "username is too long"),
            rules::predicate(|s: &String| !s.contains(' '), "username must not contain spaces"),
            rules::from_spec(Lowercase, "username must be lowercase"),
        ],
    )
    .with_validator(|s| {
        s.starts_with('_')
            .then(|| Failure::new("username must not start with _"))
    })
}

fn main() {
    for raw in ["Alice Smith", "", "_x", "bob"] {
        let candidate = username(raw);
        println!(
            "{raw:?}: valid={} first={:?} all={:?}",
            candidate.is_valid(),
            candidate.first_failure_message(),
            candidate.failures()
        );

        if let Err(err) = candidate.validate() {
            println!("  -> {err}");
        }
    }
}

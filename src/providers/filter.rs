//! Filter expressions understood by the in-memory provider.
//!
//! Supported forms, on top-level attributes only:
//!
//! * `<attr> eq <value>`
//! * `<attr> co "<string>"`
//! * `<attr> sw "<string>"`
//! * `<attr> pr`
//!
//! Operators and attribute names are case-insensitive. `<value>` is a quoted
//! string, a number, `true`, `false` or `null`. String comparison ignores case.

use super::in_memory::InMemoryError;
use serde_json::Value;

/// Comparison operator of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Equal,
    Contains,
    StartsWith,
    Present,
}

/// A parsed `attribute operator value` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeFilter {
    pub attribute: String,
    pub operator: FilterOperator,
    pub value: Option<Value>,
}

impl AttributeFilter {
    /// Parse a filter expression.
    pub fn parse(expression: &str) -> Result<Self, InMemoryError> {
        let expression = expression.trim();
        let unsupported = || InMemoryError::UnsupportedFilter {
            filter: expression.to_string(),
        };

        let (attribute, rest) = split_token(expression).ok_or_else(unsupported)?;
        if !is_attribute_name(attribute) {
            return Err(unsupported());
        }
        let (operator, rest) = split_token(rest).ok_or_else(unsupported)?;
        let rest = rest.trim();

        let operator = match operator.to_ascii_lowercase().as_str() {
            "eq" => FilterOperator::Equal,
            "co" => FilterOperator::Contains,
            "sw" => FilterOperator::StartsWith,
            "pr" => FilterOperator::Present,
            _ => return Err(unsupported()),
        };

        let value = match operator {
            FilterOperator::Present if rest.is_empty() => None,
            FilterOperator::Present => return Err(unsupported()),
            FilterOperator::Equal => Some(parse_literal(rest).ok_or_else(unsupported)?),
            FilterOperator::Contains | FilterOperator::StartsWith => match parse_literal(rest) {
                Some(Value::String(s)) => Some(Value::String(s)),
                _ => return Err(unsupported()),
            },
        };

        Ok(Self {
            attribute: attribute.to_string(),
            operator,
            value,
        })
    }

    /// Evaluate against the value the resource holds for the attribute, if any.
    ///
    /// A multi-valued attribute matches when any element matches.
    pub fn matches(&self, actual: Option<&Value>) -> bool {
        let actual = match actual {
            None | Some(Value::Null) => return false,
            Some(value) => value,
        };

        if let Value::Array(items) = actual {
            return match self.operator {
                FilterOperator::Present => !items.is_empty(),
                _ => items.iter().any(|item| self.matches_scalar(item)),
            };
        }
        self.matches_scalar(actual)
    }

    fn matches_scalar(&self, actual: &Value) -> bool {
        match (self.operator, self.value.as_ref()) {
            (FilterOperator::Present, _) => !actual.is_null(),
            (FilterOperator::Equal, Some(Value::String(expected))) => actual
                .as_str()
                .is_some_and(|actual| eq_ignore_case(actual, expected)),
            (FilterOperator::Equal, Some(Value::Number(expected))) => {
                match (actual.as_f64(), expected.as_f64()) {
                    (Some(a), Some(e)) => a == e,
                    _ => false,
                }
            }
            (FilterOperator::Equal, Some(expected)) => actual == expected,
            (FilterOperator::Contains, Some(Value::String(expected))) => actual
                .as_str()
                .is_some_and(|actual| fold_case(actual).contains(&fold_case(expected))),
            (FilterOperator::StartsWith, Some(Value::String(expected))) => actual
                .as_str()
                .is_some_and(|actual| fold_case(actual).starts_with(&fold_case(expected))),
            _ => false,
        }
    }
}

/// Case folding shared by every string comparison of the in-memory provider.
pub(crate) fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    fold_case(a) == fold_case(b)
}

fn split_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.find(char::is_whitespace) {
        Some(pos) => Some((&input[..pos], &input[pos..])),
        None => Some((input, "")),
    }
}

fn is_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn parse_literal(raw: &str) -> Option<Value> {
    if raw.starts_with('"') {
        return match serde_json::from_str::<Value>(raw) {
            Ok(Value::String(s)) => Some(Value::String(s)),
            _ => None,
        };
    }
    match raw.to_ascii_lowercase().as_str() {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        "null" => Some(Value::Null),
        _ => raw
            .parse::<serde_json::Number>()
            .ok()
            .map(Value::Number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_supported_forms() {
        let filter = AttributeFilter::parse(r#"userName eq "bjensen""#).unwrap();
        assert_eq!(filter.attribute, "userName");
        assert_eq!(filter.operator, FilterOperator::Equal);
        assert_eq!(filter.value, Some(json!("bjensen")));

        let filter = AttributeFilter::parse(r#"displayName CO "Jen""#).unwrap();
        assert_eq!(filter.operator, FilterOperator::Contains);

        let filter = AttributeFilter::parse("title pr").unwrap();
        assert_eq!(filter.operator, FilterOperator::Present);
        assert!(filter.value.is_none());

        let filter = AttributeFilter::parse("active eq true").unwrap();
        assert_eq!(filter.value, Some(json!(true)));
    }

    #[test]
    fn test_parse_rejects_unsupported_expressions() {
        for expression in [
            "",
            "userName",
            r#"userName gt "a""#,
            r#"userName eq "a" and active eq true"#,
            r#"name.givenName eq "Barbara""#,
            "userName eq bjensen",
            "title pr extra",
            "active co true",
        ] {
            assert!(
                AttributeFilter::parse(expression).is_err(),
                "expected {:?} to be rejected",
                expression
            );
        }
    }

    #[test]
    fn test_matching() {
        let eq = AttributeFilter::parse(r#"userName eq "BJensen""#).unwrap();
        assert!(eq.matches(Some(&json!("bjensen"))));
        assert!(!eq.matches(Some(&json!("jsmith"))));
        assert!(!eq.matches(None));

        let sw = AttributeFilter::parse(r#"userName sw "bj""#).unwrap();
        assert!(sw.matches(Some(&json!("bjensen"))));

        let co = AttributeFilter::parse(r#"nickName co "ab""#).unwrap();
        assert!(co.matches(Some(&json!(["x", "Babs"]))));

        let pr = AttributeFilter::parse("title pr").unwrap();
        assert!(pr.matches(Some(&json!("Tour Guide"))));
        assert!(!pr.matches(Some(&Value::Null)));
        assert!(!pr.matches(Some(&json!([]))));

        let num = AttributeFilter::parse("level eq 3").unwrap();
        assert!(num.matches(Some(&json!(3.0))));
    }

    #[test]
    fn test_non_ascii_case_folding_is_consistent() {
        let eq = AttributeFilter::parse(r#"userName eq "ÉMILE""#).unwrap();
        let sw = AttributeFilter::parse(r#"userName sw "ÉMI""#).unwrap();
        let co = AttributeFilter::parse(r#"userName co "MILE""#).unwrap();

        for filter in [&eq, &sw, &co] {
            assert!(filter.matches(Some(&json!("émile"))), "{:?}", filter);
        }
        assert!(!eq.matches(Some(&json!("emile"))));
        assert!(eq_ignore_case("ÆSIR", "æsir"));
    }
}

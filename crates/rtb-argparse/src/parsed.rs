use crate::error::{ParseError, Problem};
use crate::options::OptionValue;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Validated values for every declared option, in declaration order.
///
/// An option that is absent, optional and has no default is present with no value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArguments {
    values: IndexMap<String, Option<OptionValue>>,
    explicit: HashSet<String>,
}

impl ParsedArguments {
    pub(crate) fn new(
        values: IndexMap<String, Option<OptionValue>>,
        explicit: HashSet<String>,
    ) -> Self {
        Self { values, explicit }
    }

    /// Whether `name` was declared.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name).and_then(|v| v.as_ref())
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_str)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(OptionValue::as_int)
    }

    /// Boolean value; absent flags read as `false`.
    pub fn get_bool(&self, name: &str) -> bool {
        self.get(name).and_then(OptionValue::as_bool).unwrap_or(false)
    }

    /// Repeated values in encounter order; empty when absent.
    pub fn get_list(&self, name: &str) -> &[String] {
        self.get(name).and_then(OptionValue::as_list).unwrap_or(&[])
    }

    pub fn require_str(&self, name: &str) -> Result<&str, ParseError> {
        self.get_str(name).ok_or_else(|| missing(name))
    }

    pub fn require_int(&self, name: &str) -> Result<i64, ParseError> {
        self.get_int(name).ok_or_else(|| missing(name))
    }

    /// Whether the value came from argv rather than a default.
    pub fn is_explicit(&self, name: &str) -> bool {
        self.explicit.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&OptionValue>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn missing(name: &str) -> ParseError {
    Problem::MissingRequired {
        option: name.to_string(),
    }
    .into()
}

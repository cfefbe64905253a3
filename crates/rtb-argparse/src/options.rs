use serde::Serialize;
use std::fmt;

/// The type an option's value is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueType {
    String,
    Integer,
    Boolean,
    RepeatedString,
}

impl ValueType {
    /// Whether the option consumes a value (`--name value`).
    ///
    /// Booleans are presence-based and only take a value in the `--flag=<bool>` form.
    pub fn takes_value(self) -> bool {
        !matches!(self, Self::Boolean)
    }

    pub fn is_repeated(self) -> bool {
        matches!(self, Self::RepeatedString)
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::String | Self::RepeatedString => "STRING",
            Self::Integer => "INTEGER",
            Self::Boolean => "BOOLEAN",
        }
    }
}

/// A typed option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Str(String),
    Int(i64),
    Bool(bool),
    List(Vec<String>),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::List(v) => f.write_str(&v.join(", ")),
        }
    }
}

/// Declaration of a single accepted option.
///
/// Built fluently; construction never fails. Conflicting declarations (duplicate
/// names or aliases) are reported when the owning [`OptionSet`] is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionSpec {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    short: Option<char>,
    value_type: ValueType,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<OptionValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    allowed_values: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    help: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value_name: Option<String>,
}

impl OptionSpec {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            short: None,
            value_type,
            required: false,
            default: None,
            allowed_values: Vec::new(),
            help: String::new(),
            value_name: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::String)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Integer)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Boolean)
    }

    pub fn repeated(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::RepeatedString)
    }

    /// Single-character alias, matched as `-x`.
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn value_name(mut self, value_name: impl Into<String>) -> Self {
        self.value_name = Some(value_name.into());
        self
    }

    /// Restrict values to a closed set, compared case-insensitively.
    pub fn allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn default_str(mut self, value: impl Into<String>) -> Self {
        self.default = Some(OptionValue::Str(value.into()));
        self
    }

    pub fn default_int(mut self, value: i64) -> Self {
        self.default = Some(OptionValue::Int(value));
        self
    }

    pub fn default_list<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default = Some(OptionValue::List(
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_alias(&self) -> Option<char> {
        self.short
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&OptionValue> {
        self.default.as_ref()
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed_values
    }

    pub fn help_text(&self) -> &str {
        &self.help
    }

    pub fn display_value_name(&self) -> String {
        self.value_name
            .clone()
            .unwrap_or_else(|| self.value_type.label().to_string())
    }

    /// Value used when the option is absent and not required.
    pub(crate) fn fallback(&self) -> Option<OptionValue> {
        if let Some(default) = &self.default {
            return Some(default.clone());
        }
        match self.value_type {
            ValueType::Boolean => Some(OptionValue::Bool(false)),
            ValueType::RepeatedString => Some(OptionValue::List(Vec::new())),
            ValueType::String | ValueType::Integer => None,
        }
    }
}

/// The full set of options accepted by one command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionSet {
    name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    summary: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    usage: String,
    options: Vec<OptionSpec>,
}

impl OptionSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Replace the command name shown in help.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn option(mut self, spec: OptionSpec) -> Self {
        self.options.push(spec);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn summary_text(&self) -> &str {
        &self.summary
    }

    pub fn usage_text(&self) -> &str {
        &self.usage
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub(crate) fn position_long(&self, name: &str) -> Option<usize> {
        self.options.iter().position(|o| o.name == name)
    }

    pub(crate) fn position_short(&self, short: char) -> Option<usize> {
        self.options.iter().position(|o| o.short == Some(short))
    }

    /// Whether the built-in `--help` flag is available (not shadowed by a declared option).
    pub(crate) fn builtin_help_long(&self) -> bool {
        self.position_long("help").is_none()
    }

    /// Whether the built-in `-h` alias is available.
    pub(crate) fn builtin_help_short(&self) -> bool {
        self.position_short('h').is_none()
    }
}

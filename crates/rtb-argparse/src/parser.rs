use crate::error::{ParseError, Problem};
use crate::options::{OptionSet, OptionSpec, OptionValue, ValueType};
use crate::parsed::ParsedArguments;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Parsed(ParsedArguments),
    /// `-h`/`--help` was given; carries the rendered help text.
    Help(String),
}

/// Where a matched option's value comes from.
enum Inline<'a> {
    None,
    Value(&'a str),
}

impl OptionSet {
    /// Parse `argv` against the declared options.
    ///
    /// - `-h/--help` => `ParseOutcome::Help` (no validation)
    /// - type coercion and allowed-value checks per value
    /// - required argument checks
    /// - unknown token collection
    ///
    /// All input problems are reported together in a single `ParseError::Invalid`.
    pub fn parse<I, S>(&self, argv: I) -> Result<ParseOutcome, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let argv: Vec<S> = argv.into_iter().collect();
        let argv: Vec<&str> = argv.iter().map(|s| s.as_ref()).collect();
        tracing::debug!(command = %self.name(), tokens = argv.len(), "parsing arguments");

        self.validate_definitions()?;

        let help_long = self.builtin_help_long();
        let help_short = self.builtin_help_short();

        let mut state = State::new(self);
        let mut help_requested = false;

        let mut i = 0usize;
        while i < argv.len() {
            let arg = argv[i];
            i += 1;

            if (help_long && arg == "--help") || (help_short && arg == "-h") {
                help_requested = true;
                continue;
            }

            // --name=value, --name value, --flag
            if let Some(body) = arg.strip_prefix("--").filter(|b| !b.is_empty()) {
                let (flag, inline) = split_inline(body);
                match self.position_long(flag) {
                    Some(idx) => {
                        let display = format!("--{flag}");
                        state.accept(idx, &display, inline, &argv, &mut i);
                    }
                    None => state.unknown(arg),
                }
                continue;
            }

            // -x value, -x=value, and single-dash long names (-name=value)
            if let Some(body) = arg.strip_prefix('-').filter(|b| !b.is_empty()) {
                let (flag, inline) = split_inline(body);
                let mut chars = flag.chars();
                let idx = match (chars.next(), chars.next()) {
                    (Some(c), None) => self.position_short(c),
                    _ => self.position_long(flag),
                };
                match idx {
                    Some(idx) => {
                        let display = format!("-{flag}");
                        state.accept(idx, &display, inline, &argv, &mut i);
                    }
                    None => state.unknown(arg),
                }
                continue;
            }

            state.unknown(arg);
        }

        if help_requested {
            tracing::debug!(command = %self.name(), "help requested");
            return Ok(ParseOutcome::Help(self.render_help()));
        }

        state.finish()
    }

    fn validate_definitions(&self) -> Result<(), ParseError> {
        let mut names: HashSet<&str> = HashSet::new();
        let mut shorts: HashMap<char, &str> = HashMap::new();
        for spec in self.options() {
            let name = spec.name();
            if name.trim().is_empty() || name.starts_with('-') || name.contains('=') {
                return Err(ParseError::Definition(format!(
                    "invalid option name '{name}'"
                )));
            }
            if !names.insert(name) {
                return Err(ParseError::Definition(format!(
                    "option '{name}' is declared more than once"
                )));
            }
            if let Some(c) = spec.short_alias() {
                if let Some(prev) = shorts.insert(c, name) {
                    return Err(ParseError::Definition(format!(
                        "-{c} maps to both '{prev}' and '{name}'"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn split_inline(body: &str) -> (&str, Inline<'_>) {
    match body.split_once('=') {
        Some((flag, value)) => (flag, Inline::Value(value)),
        None => (body, Inline::None),
    }
}

struct State<'s> {
    set: &'s OptionSet,
    values: Vec<Option<OptionValue>>,
    explicit: Vec<bool>,
    problems: Vec<Problem>,
    unknown: Vec<String>,
}

impl<'s> State<'s> {
    fn new(set: &'s OptionSet) -> Self {
        let n = set.options().len();
        Self {
            set,
            values: vec![None; n],
            explicit: vec![false; n],
            problems: Vec::new(),
            unknown: Vec::new(),
        }
    }

    fn unknown(&mut self, token: &str) {
        tracing::trace!(token, "unknown token");
        self.unknown.push(token.to_string());
    }

    /// Consume the value for option `idx` (inline or from the next token) and store it.
    fn accept(
        &mut self,
        idx: usize,
        display: &str,
        inline: Inline<'_>,
        argv: &[&str],
        i: &mut usize,
    ) {
        let set = self.set;
        let spec = &set.options()[idx];
        self.explicit[idx] = true;

        if !spec.value_type().takes_value() {
            let raw = match inline {
                Inline::Value(raw) => raw,
                Inline::None => "true",
            };
            match coerce(spec, raw) {
                Ok(value) => self.values[idx] = Some(value),
                Err(p) => self.problems.push(p),
            }
            return;
        }

        let raw = match inline {
            Inline::Value(raw) => raw,
            Inline::None => {
                let Some(next) = argv.get(*i) else {
                    self.problems.push(Problem::MissingValue {
                        flag: display.to_string(),
                    });
                    return;
                };
                *i += 1;
                *next
            }
        };
        tracing::trace!(option = spec.name(), value = raw, "matched option");

        match coerce(spec, raw) {
            Ok(OptionValue::Str(s)) if spec.value_type().is_repeated() => {
                match &mut self.values[idx] {
                    Some(OptionValue::List(list)) => list.push(s),
                    slot => *slot = Some(OptionValue::List(vec![s])),
                }
            }
            Ok(value) => {
                if self.values[idx].is_some() {
                    tracing::debug!(
                        option = spec.name(),
                        "option given more than once; last value wins"
                    );
                }
                self.values[idx] = Some(value);
            }
            Err(p) => self.problems.push(p),
        }
    }

    fn finish(mut self) -> Result<ParseOutcome, ParseError> {
        let mut values: IndexMap<String, Option<OptionValue>> = IndexMap::new();
        let mut explicit: HashSet<String> = HashSet::new();

        let set = self.set;
        for (idx, spec) in set.options().iter().enumerate() {
            let name = spec.name().to_string();
            if self.explicit[idx] {
                explicit.insert(name.clone());
                values.insert(name, self.values[idx].take());
                continue;
            }
            if spec.is_required() {
                self.problems.push(Problem::MissingRequired {
                    option: name.clone(),
                });
            }
            values.insert(name, spec.fallback());
        }

        self.problems.extend(
            self.unknown
                .drain(..)
                .map(|token| Problem::UnknownToken { token }),
        );

        if !self.problems.is_empty() {
            tracing::debug!(count = self.problems.len(), "argument validation failed");
            return Err(ParseError::Invalid {
                problems: self.problems,
            });
        }

        Ok(ParseOutcome::Parsed(ParsedArguments::new(values, explicit)))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Check one raw value against the allowed set, then coerce it to the option's type.
///
/// Repeated options yield one `Str` element per occurrence; the caller appends it.
fn coerce(spec: &OptionSpec, raw: &str) -> Result<OptionValue, Problem> {
    let value = check_allowed(spec, raw)?;
    let invalid = |expected| Problem::InvalidValue {
        option: spec.name().to_string(),
        value: raw.to_string(),
        expected,
    };
    match spec.value_type() {
        ValueType::Integer => value
            .trim()
            .parse::<i64>()
            .map(OptionValue::Int)
            .map_err(|_| invalid("an integer")),
        ValueType::String | ValueType::RepeatedString => Ok(OptionValue::Str(value)),
        ValueType::Boolean => parse_bool(&value)
            .map(OptionValue::Bool)
            .ok_or_else(|| invalid("a boolean (true/false)")),
    }
}

/// Match `raw` against the allowed set, returning the declared spelling.
fn check_allowed(spec: &OptionSpec, raw: &str) -> Result<String, Problem> {
    let allowed = spec.allowed();
    if allowed.is_empty() {
        return Ok(raw.to_string());
    }
    allowed
        .iter()
        .find(|a| a.eq_ignore_ascii_case(raw.trim()))
        .cloned()
        .ok_or_else(|| Problem::DisallowedValue {
            option: spec.name().to_string(),
            value: raw.to_string(),
            allowed: allowed.to_vec(),
        })
}

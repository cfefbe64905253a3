use thiserror::Error;

/// A single input problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Problem {
    #[error("missing value for {flag}")]
    MissingValue { flag: String },

    #[error("missing required argument: --{option}")]
    MissingRequired { option: String },

    #[error("invalid value '{value}' for --{option}: expected {expected}")]
    InvalidValue {
        option: String,
        value: String,
        expected: &'static str,
    },

    #[error("invalid value '{value}' for --{option}. possible values: {}", .allowed.join(", "))]
    DisallowedValue {
        option: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("unknown argument: {token}")]
    UnknownToken { token: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Every input problem found in one pass.
    #[error("{}", render_problems(.problems))]
    Invalid { problems: Vec<Problem> },

    /// The option declarations themselves conflict.
    #[error("option definition conflict: {0}")]
    Definition(String),
}

impl ParseError {
    pub fn problems(&self) -> &[Problem] {
        match self {
            Self::Invalid { problems } => problems,
            Self::Definition(_) => &[],
        }
    }

    pub fn unknown_tokens(&self) -> Vec<&str> {
        self.problems()
            .iter()
            .filter_map(|p| match p {
                Problem::UnknownToken { token } => Some(token.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn missing_required(&self) -> Vec<&str> {
        self.problems()
            .iter()
            .filter_map(|p| match p {
                Problem::MissingRequired { option } => Some(option.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl From<Problem> for ParseError {
    fn from(problem: Problem) -> Self {
        Self::Invalid {
            problems: vec![problem],
        }
    }
}

fn render_problems(problems: &[Problem]) -> String {
    problems
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

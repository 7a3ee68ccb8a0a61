//! Resolution failures.
//!
//! Every variant carries the longest prefix of the input that some branch
//! of the search understood, so callers can point at where parsing broke.

use thiserror::Error;

fn words(tokens: &[String]) -> String {
    tokens.join(" ")
}

fn pairs(values: &[(String, String)]) -> String {
    values
        .iter()
        .map(|(argument, token)| format!("'{}' for <{}>", token, argument))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors returned when input does not resolve to a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A command-path token names no child command.
    #[error("Unknown command '{}' after '{}'", words(.remainder), words(.understood))]
    UnknownSegment {
        understood: Vec<String>,
        remainder: Vec<String>,
    },

    #[error("Missing required argument(s) {} after '{}'", .arguments.join(", "), words(.understood))]
    MissingRequiredArgument {
        understood: Vec<String>,
        arguments: Vec<String>,
    },

    /// Every offending `(argument, token)` pair at the point parsing stopped.
    #[error("Invalid value {} after '{}'", pairs(.values), words(.understood))]
    InvalidArgumentValue {
        understood: Vec<String>,
        values: Vec<(String, String)>,
    },

    #[error("Argument '{argument}' refers to unknown setting '{address}'")]
    ProxyUnresolved {
        understood: Vec<String>,
        argument: String,
        address: String,
    },

    #[error("Search abandoned after {limit} expansions")]
    ExpansionLimit {
        understood: Vec<String>,
        limit: usize,
    },
}

impl ResolveError {
    /// Short machine-readable classification.
    pub fn error_type(&self) -> &'static str {
        match self {
            ResolveError::UnknownSegment { .. } => "unknown_segment",
            ResolveError::MissingRequiredArgument { .. } => "missing_required_argument",
            ResolveError::InvalidArgumentValue { .. } => "invalid_argument_value",
            ResolveError::ProxyUnresolved { .. } => "proxy_unresolved",
            ResolveError::ExpansionLimit { .. } => "expansion_limit",
        }
    }

    /// The input prefix that parsed successfully.
    pub fn understood(&self) -> &[String] {
        match self {
            ResolveError::UnknownSegment { understood, .. }
            | ResolveError::MissingRequiredArgument { understood, .. }
            | ResolveError::InvalidArgumentValue { understood, .. }
            | ResolveError::ProxyUnresolved { understood, .. }
            | ResolveError::ExpansionLimit { understood, .. } => understood,
        }
    }
}

use std::{fmt, str::FromStr};
use thiserror::Error;
use tracing::debug;

/// Comparison operator tokens accepted in a condition, matched ignoring case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    StartsWith,
    EndsWith,
    Contains,
    NotContains,
    In,
    NotIn,
    Between,
    Matches,
    IsNull,
    IsNotNull,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown comparison operator: {0}")]
pub struct UnknownOperator(pub String);

impl FromStr for CompareOp {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EQUALS" => Ok(CompareOp::Equals),
            "NOT_EQUALS" => Ok(CompareOp::NotEquals),
            "GREATER_THAN" => Ok(CompareOp::GreaterThan),
            "GREATER_THAN_OR_EQUAL" => Ok(CompareOp::GreaterThanOrEqual),
            "LESS_THAN" => Ok(CompareOp::LessThan),
            "LESS_THAN_OR_EQUAL" => Ok(CompareOp::LessThanOrEqual),
            "STARTS_WITH" => Ok(CompareOp::StartsWith),
            "ENDS_WITH" => Ok(CompareOp::EndsWith),
            "CONTAINS" => Ok(CompareOp::Contains),
            "NOT_CONTAINS" => Ok(CompareOp::NotContains),
            "IN" => Ok(CompareOp::In),
            "NOT_IN" => Ok(CompareOp::NotIn),
            "BETWEEN" => Ok(CompareOp::Between),
            "MATCHES" => Ok(CompareOp::Matches),
            "IS_NULL" => Ok(CompareOp::IsNull),
            "IS_NOT_NULL" => Ok(CompareOp::IsNotNull),
            _ => Err(UnknownOperator(s.to_string())),
        }
    }
}

impl CompareOp {
    /// Parse a token, falling back to [`CompareOp::Equals`] for anything
    /// unrecognized (including an empty token).
    pub fn parse_or_default(token: &str) -> Self {
        token.parse().unwrap_or_else(|e: UnknownOperator| {
            debug!("{}; comparing with EQUALS", e);
            CompareOp::Equals
        })
    }

    pub fn token(&self) -> &'static str {
        match self {
            CompareOp::Equals => "EQUALS",
            CompareOp::NotEquals => "NOT_EQUALS",
            CompareOp::GreaterThan => "GREATER_THAN",
            CompareOp::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            CompareOp::LessThan => "LESS_THAN",
            CompareOp::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            CompareOp::StartsWith => "STARTS_WITH",
            CompareOp::EndsWith => "ENDS_WITH",
            CompareOp::Contains => "CONTAINS",
            CompareOp::NotContains => "NOT_CONTAINS",
            CompareOp::In => "IN",
            CompareOp::NotIn => "NOT_IN",
            CompareOp::Between => "BETWEEN",
            CompareOp::Matches => "MATCHES",
            CompareOp::IsNull => "IS_NULL",
            CompareOp::IsNotNull => "IS_NOT_NULL",
        }
    }

    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            CompareOp::GreaterThan
                | CompareOp::GreaterThanOrEqual
                | CompareOp::LessThan
                | CompareOp::LessThanOrEqual
                | CompareOp::Between
        )
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self,
            CompareOp::StartsWith
                | CompareOp::EndsWith
                | CompareOp::Contains
                | CompareOp::NotContains
                | CompareOp::Matches
        )
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// How the fragments of a group are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogicalOp {
    #[default]
    And,
    Or,
}

impl LogicalOp {
    /// Only `"OR"` (any case) selects disjunction; every other token,
    /// including an empty one, means AND.
    pub fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("OR") {
            LogicalOp::Or
        } else {
            LogicalOp::And
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => write!(f, "AND"),
            LogicalOp::Or => write!(f, "OR"),
        }
    }
}

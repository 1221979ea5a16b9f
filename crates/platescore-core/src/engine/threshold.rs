use std::fmt;
use std::str::FromStr;

use phf::{Map, phf_map};

use super::error::EngineError;

/// The comparison operators a hit-threshold expression may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Greater,
    Less,
    GreaterOrEqual,
    LessOrEqual,
    Equal,
    NotEqual,
}

static COMPARISON_OPS: Map<&'static str, ComparisonOp> = phf_map! {
    ">" => ComparisonOp::Greater,
    "<" => ComparisonOp::Less,
    ">=" => ComparisonOp::GreaterOrEqual,
    "<=" => ComparisonOp::LessOrEqual,
    "==" => ComparisonOp::Equal,
    "!=" => ComparisonOp::NotEqual,
};

impl ComparisonOp {
    /// The textual form of this operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Greater => ">",
            ComparisonOp::Less => "<",
            ComparisonOp::GreaterOrEqual => ">=",
            ComparisonOp::LessOrEqual => "<=",
            ComparisonOp::Equal => "==",
            ComparisonOp::NotEqual => "!=",
        }
    }

    fn compare(&self, value: f64, threshold: f64) -> bool {
        match self {
            ComparisonOp::Greater => value > threshold,
            ComparisonOp::Less => value < threshold,
            ComparisonOp::GreaterOrEqual => value >= threshold,
            ComparisonOp::LessOrEqual => value <= threshold,
            ComparisonOp::Equal => value == threshold,
            ComparisonOp::NotEqual => value != threshold,
        }
    }
}

/// A hit-identification predicate parsed from an `"<operator> <value>"`
/// expression, e.g. `">= 2"`: a well whose score satisfies the comparison is
/// called a hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitThreshold {
    op: ComparisonOp,
    value: f64,
}

impl HitThreshold {
    /// Creates a threshold from an operator and a value.
    pub fn new(op: ComparisonOp, value: f64) -> Self {
        Self { op, value }
    }

    /// Whether the given score should be called a hit.
    pub fn matches(&self, value: f64) -> bool {
        self.op.compare(value, self.value)
    }
}

impl fmt::Display for HitThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op.symbol(), self.value)
    }
}

impl FromStr for HitThreshold {
    type Err = EngineError;

    /// Parses an expression of exactly two whitespace-separated tokens: a
    /// comparison operator and a floating-point literal.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedExpression`] if the expression does not
    /// have exactly two tokens, uses an unsupported operator, or has a value
    /// that does not parse as a number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: String| EngineError::MalformedExpression {
            expression: s.to_string(),
            reason,
        };

        let tokens: Vec<&str> = s.split_whitespace().collect();
        let &[op_token, value_token] = tokens.as_slice() else {
            return Err(malformed(format!(
                "expected '<operator> <value>', found {} token(s)",
                tokens.len()
            )));
        };

        let op = *COMPARISON_OPS
            .get(op_token)
            .ok_or_else(|| malformed(format!("unsupported operator '{op_token}'")))?;
        let value: f64 = value_token
            .parse()
            .map_err(|_| malformed(format!("'{value_token}' is not a number")))?;
        Ok(Self { op, value })
    }
}

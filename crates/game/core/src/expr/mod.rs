//! Formula and condition language used by pool grants.
//!
//! Grants carry small expressions over actor attributes, e.g.
//! `@level + @stats.cha.mod` or `@skills.psychic.highest >= 1`. Source text is
//! tokenized and parsed into a tree over a closed grammar, then walked against
//! an [`AttributeSource`]. Nothing is ever handed to a dynamic evaluator, so
//! text outside the grammar is simply a parse error.
//!
//! ## References
//! - `@level`
//! - `@stats.<stat>.mod`, `@stats.<stat>.total`
//! - `@skills.psychic.highest` (`-1` without psychic skills)
//! - `@skills.<name_with_underscores>.rank` (`-1` when untrained)
//!
//! ## Functions
//! `min`, `max`, `floor`, `ceil`, `round`, `abs`, optionally spelled with a
//! `Math.` prefix.

mod eval;
mod parser;
mod token;

pub use eval::UNTRAINED_RANK;

use crate::error::{EngineError, ErrorSeverity};
use crate::stats::{StatKind, StatValues};
use parser::{Node, Parser};

// ============================================================================
// Limits
// ============================================================================

/// Bounds checked before any expression is evaluated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExprLimits {
    /// Maximum source length in bytes.
    pub max_len: usize,
    /// Maximum nesting of parentheses, calls and unary operators.
    pub max_depth: usize,
}

impl ExprLimits {
    pub const DEFAULT_MAX_LEN: usize = 512;
    pub const DEFAULT_MAX_DEPTH: usize = 32;
}

impl Default for ExprLimits {
    fn default() -> Self {
        Self {
            max_len: Self::DEFAULT_MAX_LEN,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors raised while parsing or evaluating an expression.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ExprError {
    #[error("expression is empty")]
    Empty,

    #[error("expression is {len} bytes long, limit is {max}")]
    TooLong { len: usize, max: usize },

    #[error("expression nests deeper than {max} levels")]
    TooDeep { max: usize },

    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),

    #[error("unexpected '{found}' at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unknown reference {0}")]
    UnknownReference(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("wrong number of arguments ({found}) for {function}")]
    Arity { function: String, found: usize },

    #[error("expected a {expected} value")]
    TypeMismatch { expected: &'static str },

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,
}

impl EngineError for ExprError {
    fn severity(&self) -> ErrorSeverity {
        // Callers substitute 0 or false for any failing expression.
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        use ExprError::*;
        match self {
            Empty => "EXPR_EMPTY",
            TooLong { .. } => "EXPR_TOO_LONG",
            TooDeep { .. } => "EXPR_TOO_DEEP",
            UnexpectedChar { .. } => "EXPR_UNEXPECTED_CHAR",
            InvalidNumber(_) => "EXPR_INVALID_NUMBER",
            UnexpectedToken { .. } => "EXPR_UNEXPECTED_TOKEN",
            UnexpectedEnd => "EXPR_UNEXPECTED_END",
            UnknownReference(_) => "EXPR_UNKNOWN_REFERENCE",
            UnknownFunction(_) => "EXPR_UNKNOWN_FUNCTION",
            Arity { .. } => "EXPR_ARITY",
            TypeMismatch { .. } => "EXPR_TYPE_MISMATCH",
            DivisionByZero => "EXPR_DIVISION_BY_ZERO",
            NonFinite => "EXPR_NON_FINITE",
        }
    }
}

// ============================================================================
// Values & attribute access
// ============================================================================

/// Result of evaluating an expression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
}

impl Value {
    pub fn as_number(self) -> Result<f64, ExprError> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Bool(_) => Err(ExprError::TypeMismatch { expected: "number" }),
        }
    }

    /// Zero, NaN and `false` are falsy.
    pub fn truthy(self) -> bool {
        match self {
            Self::Number(n) => n != 0.0 && !n.is_nan(),
            Self::Bool(b) => b,
        }
    }
}

/// Read access to the actor attributes an expression may reference.
pub trait AttributeSource {
    fn level(&self) -> i32;

    fn stat(&self, kind: StatKind) -> StatValues;

    /// Rank of the named skill, matched case-insensitively. `None` when the
    /// actor has no such skill.
    fn skill_rank(&self, name: &str) -> Option<i32>;

    /// Highest rank among psychic skills, `None` when there are none.
    fn highest_psychic_rank(&self) -> Option<i32>;
}

// ============================================================================
// Parsed expressions
// ============================================================================

/// A parsed, reusable expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    source: String,
    root: Node,
    explicit_rounding: bool,
}

impl Expression {
    pub fn parse(source: &str, limits: &ExprLimits) -> Result<Self, ExprError> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(ExprError::Empty);
        }
        if trimmed.len() > limits.max_len {
            return Err(ExprError::TooLong {
                len: trimmed.len(),
                max: limits.max_len,
            });
        }

        let tokens = token::tokenize(trimmed)?;
        let mut parser = Parser::new(&tokens, limits);
        let root = parser.parse()?;

        Ok(Self {
            source: trimmed.to_string(),
            root,
            explicit_rounding: parser.explicit_rounding,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// True if the expression calls `floor` or `ceil` itself.
    pub fn rounds_explicitly(&self) -> bool {
        self.explicit_rounding
    }

    pub fn evaluate(&self, attrs: &dyn AttributeSource) -> Result<Value, ExprError> {
        eval::evaluate(&self.root, attrs)
    }

    /// Evaluates as a pool formula.
    ///
    /// Formulas that round explicitly are rounded to nearest, all others are
    /// floored. The result is never negative.
    pub fn formula_value(&self, attrs: &dyn AttributeSource) -> Result<f64, ExprError> {
        let raw = self.evaluate(attrs)?.as_number()?;
        let rounded = if self.explicit_rounding {
            raw.round()
        } else {
            raw.floor()
        };
        Ok(rounded.max(0.0))
    }

    /// Evaluates as a condition using truthiness.
    pub fn condition_value(&self, attrs: &dyn AttributeSource) -> Result<bool, ExprError> {
        Ok(self.evaluate(attrs)?.truthy())
    }
}

/// Parses and evaluates `source` as a pool formula.
pub fn evaluate_formula(
    source: &str,
    attrs: &dyn AttributeSource,
    limits: &ExprLimits,
) -> Result<f64, ExprError> {
    Expression::parse(source, limits)?.formula_value(attrs)
}

/// Parses and evaluates `source` as a condition.
///
/// Any failure yields `false` and a warning; the text is never executed.
pub fn evaluate_condition(source: &str, attrs: &dyn AttributeSource, limits: &ExprLimits) -> bool {
    match Expression::parse(source, limits).and_then(|expr| expr.condition_value(attrs)) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(
                "Condition {:?} rejected [{}], treating as false: {}",
                source,
                err.error_code(),
                err
            );
            false
        }
    }
}

//! Error types for pattern compilation.

use thiserror::Error;

/// Errors raised while compiling a route pattern.
#[derive(Debug, Error)]
pub enum PatternError {
    /// A `[` without its closing `]`, or a stray `]`.
    #[error("unbalanced optional segment in pattern {pattern}")]
    UnbalancedOptional { pattern: String },

    /// Optional segments may only appear at the end of a pattern.
    #[error("optional segment must be at the end of pattern {pattern}")]
    OptionalNotTrailing { pattern: String },

    /// An empty `[]` pair.
    #[error("empty optional segment in pattern {pattern}")]
    EmptyOptional { pattern: String },

    /// A variable name that is not an identifier.
    #[error("invalid variable name {name:?} in pattern {pattern}")]
    InvalidVariable { pattern: String, name: String },

    /// The same variable appears twice.
    #[error("variable {name} appears more than once in pattern {pattern}")]
    DuplicateVariable { pattern: String, name: String },

    /// A `{` without its closing `}`.
    #[error("unterminated variable in pattern {pattern}")]
    UnterminatedVariable { pattern: String },

    /// A custom variable regex failed to compile.
    #[error("invalid regex in pattern {pattern}: {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type alias for pattern operations.
pub type Result<T> = std::result::Result<T, PatternError>;

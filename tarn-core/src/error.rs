// tarn-core - Error types for the Tarn evaluator
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! Error types for Tarn evaluation.
//!
//! Every variant renders to a message via `Display`; when an error
//! crosses a `try*` boundary the catch binding sees either the thrown
//! value (for [`Error::Thrown`]) or that message as a string.

use std::fmt;

use tarn_parser::{ParseError, Symbol, TarnVal};

/// Result type for Tarn evaluation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during evaluation.
#[derive(Debug, Clone)]
pub enum Error {
    /// Undefined symbol reference
    UndefinedSymbol(Symbol),
    /// Wrong number of arguments to a function or special form
    ArityError {
        expected: AritySpec,
        got: usize,
        name: Option<String>,
    },
    /// Type error - wrong type for an operation
    TypeError {
        expected: &'static str,
        got: &'static str,
        context: Option<String>,
    },
    /// Attempted to call something that isn't callable
    NotCallable(String),
    /// Division by zero
    DivisionByZero,
    /// Index out of bounds
    IndexOutOfBounds { index: i64, length: usize },
    /// Invalid special form syntax
    InvalidSyntax { form: &'static str, message: String },
    /// Reader error surfaced at runtime (read-string, load-file)
    Syntax(String),
    /// I/O failure (slurp, load-file)
    Io(String),
    /// User-thrown exception (via throw); carries the value unchanged
    Thrown(TarnVal),
    /// Internal error - invariant violation
    Internal(String),
}

/// Specification for expected arity.
#[derive(Debug, Clone)]
pub enum AritySpec {
    Exact(usize),
    AtLeast(usize),
    Range(usize, usize),
}

impl fmt::Display for AritySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AritySpec::Exact(n) => write!(f, "{}", n),
            AritySpec::AtLeast(n) => write!(f, "at least {}", n),
            AritySpec::Range(min, max) => write!(f, "{} to {}", min, max),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UndefinedSymbol(sym) => {
                write!(f, "'{}' not found", sym)
            }
            Error::ArityError {
                expected,
                got,
                name,
            } => {
                if let Some(name) = name {
                    write!(
                        f,
                        "Wrong number of arguments to '{}': expected {}, got {}",
                        name, expected, got
                    )
                } else {
                    write!(
                        f,
                        "Wrong number of arguments: expected {}, got {}",
                        expected, got
                    )
                }
            }
            Error::TypeError {
                expected,
                got,
                context,
            } => {
                if let Some(ctx) = context {
                    write!(f, "{}: expected {}, got {}", ctx, expected, got)
                } else {
                    write!(f, "Type error: expected {}, got {}", expected, got)
                }
            }
            Error::NotCallable(val) => {
                write!(f, "Cannot call value: {}", val)
            }
            Error::DivisionByZero => {
                write!(f, "Division by zero")
            }
            Error::IndexOutOfBounds { index, length } => {
                write!(
                    f,
                    "Index {} out of bounds for collection of length {}",
                    index, length
                )
            }
            Error::InvalidSyntax { form, message } => {
                write!(f, "Invalid '{}' syntax: {}", form, message)
            }
            Error::Syntax(msg) => {
                write!(f, "{}", msg)
            }
            Error::Io(msg) => {
                write!(f, "{}", msg)
            }
            Error::Thrown(val) => {
                write!(f, "{}", val)
            }
            Error::Internal(msg) => {
                write!(f, "Internal error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Syntax(e.to_string())
    }
}

impl Error {
    /// Create an arity error for exact arity.
    pub fn arity(expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Exact(expected),
            got,
            name: None,
        }
    }

    /// Create an arity error for exact arity with function name.
    pub fn arity_named(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Exact(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for minimum arity.
    pub fn arity_at_least(expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::AtLeast(expected),
            got,
            name: None,
        }
    }

    /// Create an arity error for minimum arity with function name.
    pub fn arity_at_least_named(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::AtLeast(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for an arity range with function name.
    pub fn arity_range_named(name: impl Into<String>, min: usize, max: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Range(min, max),
            got,
            name: Some(name.into()),
        }
    }

    /// Create a type error.
    pub fn type_error(expected: &'static str, got: &'static str) -> Self {
        Error::TypeError {
            expected,
            got,
            context: None,
        }
    }

    /// Create a type error with context.
    pub fn type_error_in(
        context: impl Into<String>,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        Error::TypeError {
            expected,
            got,
            context: Some(context.into()),
        }
    }

    /// Create an invalid syntax error.
    pub fn syntax(form: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidSyntax {
            form,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_symbol_message() {
        let err = Error::UndefinedSymbol(Symbol::new("abc"));
        assert_eq!(err.to_string(), "'abc' not found");
    }

    #[test]
    fn test_arity_messages() {
        assert_eq!(
            Error::arity(2, 3).to_string(),
            "Wrong number of arguments: expected 2, got 3"
        );
        assert_eq!(
            Error::arity_at_least_named("+", 1, 0).to_string(),
            "Wrong number of arguments to '+': expected at least 1, got 0"
        );
    }

    #[test]
    fn test_thrown_displays_value() {
        let err = Error::Thrown(TarnVal::list(vec![TarnVal::int(1), TarnVal::int(2)]));
        assert_eq!(err.to_string(), "(1 2)");
    }
}

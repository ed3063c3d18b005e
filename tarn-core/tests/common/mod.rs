// tarn-core - Common test utilities
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! Shared test helpers and utilities for Tarn integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`eval_str`] - Evaluate code in a fresh environment with builtins
//! - [`eval_str_with_env`] - Evaluate code in an existing environment
//! - [`eval_str_full`] - Evaluate code in a fully initialised root env
//! - [`eval_all`] - Evaluate multiple expressions, returning the last
//! - [`new_env`] - Create a new environment with builtins registered
//! - [`new_root_env`] - Create a root environment with prelude and `eval`
//!
//! # Macros
//!
//! - [`assert_eval!`] - Assert that code evaluates to an expected value
//! - [`assert_eval_err!`] - Assert that code produces an error
//! - [`assert_eval_with_env!`] - Assert evaluation with a shared environment

// Re-export common types for convenience
pub use tarn_core::builtins::register_builtins;
pub use tarn_core::env::Env;
pub use tarn_core::eval::eval;
pub use tarn_core::init_root_env;
#[allow(unused_imports)]
pub use tarn_parser::{Keyword, Parser, TarnVal};

/// Evaluate a Tarn expression string in a fresh environment.
///
/// The environment is pre-populated with built-in functions but not the
/// prelude (use [`eval_str_full`] for that).
///
/// # Returns
///
/// Returns the evaluated value, or an error message string.
#[must_use]
pub fn eval_str(s: &str) -> Result<TarnVal, String> {
    let env = new_env();
    eval_str_with_env(s, &env)
}

/// Evaluate a Tarn expression string in the given environment.
///
/// # Returns
///
/// Returns the evaluated value, or an error message string.
#[must_use]
pub fn eval_str_with_env(s: &str, env: &Env) -> Result<TarnVal, String> {
    let mut parser = Parser::new(s).map_err(|e| e.to_string())?;
    match parser.parse().map_err(|e| e.to_string())? {
        Some(expr) => eval(&expr, env).map_err(|e| e.to_string()),
        None => Ok(TarnVal::Nil),
    }
}

/// Evaluate a Tarn expression string in a fully initialised root
/// environment (builtins, `eval`, `*ARGV*`, and the prelude).
///
/// # Returns
///
/// Returns the evaluated value, or an error message string.
#[must_use]
#[allow(dead_code)]
pub fn eval_str_full(s: &str) -> Result<TarnVal, String> {
    let env = new_root_env();
    eval_str_with_env(s, &env)
}

/// Evaluate multiple Tarn expressions, returning the last result.
///
/// This is useful when you need to set up definitions before the final
/// expression. Each expression is parsed and evaluated sequentially.
///
/// # Returns
///
/// Returns the value of the last expression, or an error.
#[must_use]
#[allow(dead_code)]
pub fn eval_all(s: &str, env: &Env) -> Result<TarnVal, String> {
    let mut parser = Parser::new(s).map_err(|e| e.to_string())?;
    let mut result = TarnVal::Nil;

    while let Some(expr) = parser.parse().map_err(|e| e.to_string())? {
        result = eval(&expr, env).map_err(|e| e.to_string())?;
    }

    Ok(result)
}

/// Create a new environment with builtins registered.
///
/// # Returns
///
/// A fresh [`Env`] with all built-in functions available.
#[must_use]
pub fn new_env() -> Env {
    let env = Env::new();
    register_builtins(&env);
    env
}

/// Create a fully initialised root environment.
///
/// # Panics
///
/// Panics if the prelude fails to load (should never happen).
#[must_use]
#[allow(dead_code)]
pub fn new_root_env() -> Env {
    init_root_env(&[]).expect("Failed to initialise root environment")
}

/// Assert that evaluating `input` produces the expected value.
///
/// # Example
///
/// ```ignore
/// assert_eval!("(+ 1 2)", TarnVal::int(3));
/// ```
#[macro_export]
macro_rules! assert_eval {
    ($input:expr, $expected:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

/// Assert that evaluating `input` produces an error.
///
/// # Example
///
/// ```ignore
/// assert_eval_err!("(+ 1 :not-a-number)");
/// ```
#[macro_export]
macro_rules! assert_eval_err {
    ($input:expr) => {
        let result = $crate::common::eval_str($input);
        assert!(
            result.is_err(),
            "Expected error for '{}' but got {:?}",
            $input,
            result.ok()
        );
    };
}

/// Assert that evaluating `input` in the given environment produces the
/// expected value.
///
/// # Example
///
/// ```ignore
/// let env = new_env();
/// assert_eval_with_env!(&env, "(def! x 1)", TarnVal::int(1));
/// assert_eval_with_env!(&env, "x", TarnVal::int(1));
/// ```
#[macro_export]
macro_rules! assert_eval_with_env {
    ($env:expr, $input:expr, $expected:expr) => {
        let result = $crate::common::eval_str_with_env($input, $env);
        assert!(
            result.is_ok(),
            "Failed to evaluate '{}': {:?}",
            $input,
            result.err()
        );
        assert_eq!(
            result.unwrap(),
            $expected,
            "Evaluation of '{}' did not match expected",
            $input
        );
    };
}

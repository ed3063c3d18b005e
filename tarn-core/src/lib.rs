// tarn-core - Runtime and evaluator for the Tarn programming language
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! # tarn-core
//!
//! Runtime and evaluator for the Tarn programming language.
//! Provides an AST-walking interpreter for `TarnVal` expressions.

pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;

pub use builtins::register_builtins;
pub use env::Env;
pub use error::{Error, Result};
pub use eval::{apply, eval, macroexpand, make_native_fn};

// Re-export parser types for convenience
pub use tarn_parser::{Keyword, Symbol, TarnVal};

/// Embedded prelude source (bootstrap macros and utility functions).
const PRELUDE: &str = include_str!("../../tarn-std/prelude.tarn");

/// Create a fully initialised root environment.
///
/// Registers the native builtins, the `eval` builtin (which must close
/// over the root environment so re-entrant evaluation sees global
/// definitions), `*ARGV*`, and the prelude definitions.
pub fn init_root_env(argv: &[String]) -> Result<Env> {
    let env = Env::new();
    register_builtins(&env);

    // `eval` runs its argument in the root env, not the caller's env
    let root = env.clone();
    let eval_native = make_native_fn("eval", move |args: &[TarnVal]| {
        if args.len() != 1 {
            return Err(Error::arity_named("eval", 1, args.len()));
        }
        eval::eval(&args[0], &root)
    });
    env.define(Symbol::new("eval"), TarnVal::NativeFn(eval_native));

    env.define(
        Symbol::new("*ARGV*"),
        TarnVal::list(argv.iter().map(|s| TarnVal::string(s.as_str())).collect()),
    );

    init_prelude(&env)?;
    Ok(env)
}

/// Initialise the prelude by evaluating the embedded bootstrap forms.
///
/// Call this after `register_builtins`; `load-file` in particular needs
/// `read-string`, `slurp`, and `eval` to be defined.
pub fn init_prelude(env: &Env) -> Result<()> {
    let mut parser = tarn_parser::Parser::new(PRELUDE)?;
    while let Some(expr) = parser.parse()? {
        eval::eval(&expr, env)?;
    }
    Ok(())
}

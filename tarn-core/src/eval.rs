// tarn-core - AST-walking evaluator
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! AST-walking evaluator for Tarn expressions.
//!
//! The evaluator is trampolined: tail positions (`if` branches, `do` and
//! `let*` bodies, function call bodies) rewrite the loop's `(ast, env)`
//! pair instead of recursing, so tail calls run in constant stack space.
//! Non-tail positions (arguments, `try*` bodies, macro expansion) recurse
//! normally.

// Allow mutable key types - TarnVal has interior mutability for Atoms by design
#![allow(clippy::mutable_key_type)]

use std::any::Any;
use std::rc::Rc;

use tarn_parser::{TarnFn, TarnNativeFn, TarnVal};

use crate::env::Env;
use crate::error::{Error, Result};

/// Type alias for native function signature.
pub type NativeFnImpl = dyn Fn(&[TarnVal]) -> Result<TarnVal>;

/// Evaluate a Tarn expression in the given environment.
pub fn eval(expr: &TarnVal, env: &Env) -> Result<TarnVal> {
    let mut ast = expr.clone();
    let mut env = env.clone();

    loop {
        // Expand macros first: a macro call may rewrite to any form,
        // including another special form.
        ast = macroexpand(&ast, &env)?;

        let items: Vec<TarnVal> = match &ast {
            TarnVal::List(items, _) => items.iter().cloned().collect(),
            _ => return eval_ast(&ast, &env),
        };

        // Empty list evaluates to itself
        if items.is_empty() {
            return Ok(ast);
        }

        if let TarnVal::Symbol(sym) = &items[0] {
            match sym.name() {
                "def!" => return eval_def(&items[1..], &env),
                "defmacro!" => return eval_defmacro(&items[1..], &env),
                "quote" => {
                    if items.len() != 2 {
                        return Err(Error::syntax("quote", "requires exactly 1 argument"));
                    }
                    return Ok(items[1].clone());
                }
                "quasiquote" => {
                    if items.len() != 2 {
                        return Err(Error::syntax("quasiquote", "requires exactly 1 argument"));
                    }
                    // Rewrite to cons/concat calls and evaluate those in
                    // tail position
                    ast = quasiquote(&items[1])?;
                    continue;
                }
                "macroexpand" => {
                    if items.len() != 2 {
                        return Err(Error::syntax("macroexpand", "requires exactly 1 argument"));
                    }
                    return macroexpand(&items[1], &env);
                }
                "let*" => {
                    let (body, let_env) = eval_let(&items[1..], &env)?;
                    ast = body;
                    env = let_env;
                    continue;
                }
                "do" => {
                    if items.len() < 2 {
                        return Err(Error::syntax("do", "requires at least 1 expression"));
                    }
                    for expr in &items[1..items.len() - 1] {
                        eval(expr, &env)?;
                    }
                    ast = items[items.len() - 1].clone();
                    continue;
                }
                "if" => {
                    if items.len() != 3 && items.len() != 4 {
                        return Err(Error::syntax("if", "requires 2 or 3 arguments"));
                    }
                    let cond = eval(&items[1], &env)?;
                    if cond.is_truthy() {
                        ast = items[2].clone();
                    } else if items.len() == 4 {
                        ast = items[3].clone();
                    } else {
                        return Ok(TarnVal::Nil);
                    }
                    continue;
                }
                "fn*" => return eval_fn(&items[1..], &env),
                "try*" => return eval_try(&items[1..], &env),
                _ => {}
            }
        }

        // Function application: evaluate operator and operands, then
        // either jump into a closure body (tail call) or invoke natively.
        let func = eval(&items[0], &env)?;
        let mut args = Vec::with_capacity(items.len() - 1);
        for item in &items[1..] {
            args.push(eval(item, &env)?);
        }

        match func {
            TarnVal::Fn(f) => {
                let fn_env = Env::bind(closure_env(&f), &f.params, &args)?;
                if f.body.is_empty() {
                    return Ok(TarnVal::Nil);
                }
                for expr in &f.body[..f.body.len() - 1] {
                    eval(expr, &fn_env)?;
                }
                ast = f.body[f.body.len() - 1].clone();
                env = fn_env;
            }
            TarnVal::NativeFn(nf) => return apply_native(&nf, &args),
            other => return Err(Error::NotCallable(format!("{}", other))),
        }
    }
}

/// Evaluate a non-list form: symbols resolve through the environment,
/// vectors and maps evaluate their contents, everything else
/// self-evaluates.
fn eval_ast(expr: &TarnVal, env: &Env) -> Result<TarnVal> {
    match expr {
        TarnVal::Symbol(sym) => env.lookup(sym),
        TarnVal::Vector(items, _) => {
            let evaluated: Result<Vec<_>> = items.iter().map(|e| eval(e, env)).collect();
            Ok(TarnVal::vector(evaluated?))
        }
        TarnVal::Map(map, _) => {
            let mut result = Vec::with_capacity(map.len());
            for (k, v) in map.iter() {
                result.push((eval(k, env)?, eval(v, env)?));
            }
            Ok(TarnVal::map(result))
        }
        other => Ok(other.clone()),
    }
}

// ============================================================================
// Special Forms
// ============================================================================

/// (def! name value) - evaluate value and bind it in the current environment
fn eval_def(args: &[TarnVal], env: &Env) -> Result<TarnVal> {
    if args.len() != 2 {
        return Err(Error::syntax("def!", "requires a name and a value"));
    }
    let sym = match &args[0] {
        TarnVal::Symbol(sym) => sym.clone(),
        other => return Err(Error::type_error_in("def!", "symbol", other.type_name())),
    };
    let value = eval(&args[1], env)?;
    env.define(sym, value.clone());
    Ok(value)
}

/// (defmacro! name fn-form) - like def! but the value must evaluate to a
/// function, which is stored flagged as a macro
fn eval_defmacro(args: &[TarnVal], env: &Env) -> Result<TarnVal> {
    if args.len() != 2 {
        return Err(Error::syntax("defmacro!", "requires a name and a function"));
    }
    let sym = match &args[0] {
        TarnVal::Symbol(sym) => sym.clone(),
        other => {
            return Err(Error::type_error_in("defmacro!", "symbol", other.type_name()));
        }
    };
    let value = eval(&args[1], env)?;
    let mac = match &value {
        TarnVal::Fn(f) => TarnVal::Fn(f.as_macro()),
        other => {
            return Err(Error::type_error_in("defmacro!", "fn", other.type_name()));
        }
    };
    env.define(sym, mac.clone());
    Ok(mac)
}

/// (let* (name1 expr1 name2 expr2 ...) body) - sequential bindings in a
/// fresh child environment. Returns the body and the child environment so
/// the caller can evaluate the body in tail position.
fn eval_let(args: &[TarnVal], env: &Env) -> Result<(TarnVal, Env)> {
    if args.len() != 2 {
        return Err(Error::syntax("let*", "requires a binding form and a body"));
    }
    let bindings: Vec<TarnVal> = match &args[0] {
        TarnVal::List(items, _) | TarnVal::Vector(items, _) => items.iter().cloned().collect(),
        other => {
            return Err(Error::type_error_in(
                "let* bindings",
                "list or vector",
                other.type_name(),
            ));
        }
    };
    if bindings.len() % 2 != 0 {
        return Err(Error::syntax(
            "let*",
            "binding form must contain an even number of forms",
        ));
    }

    let let_env = env.child();
    for pair in bindings.chunks(2) {
        let sym = match &pair[0] {
            TarnVal::Symbol(sym) => sym.clone(),
            other => {
                return Err(Error::type_error_in(
                    "let* binding name",
                    "symbol",
                    other.type_name(),
                ));
            }
        };
        // Each init expression sees the bindings before it
        let value = eval(&pair[1], &let_env)?;
        let_env.define(sym, value);
    }

    Ok((args[1].clone(), let_env))
}

/// (fn* (params...) body...) - create a closure capturing the current
/// environment. A `&` before the last parameter collects remaining
/// arguments into a list.
fn eval_fn(args: &[TarnVal], env: &Env) -> Result<TarnVal> {
    if args.is_empty() {
        return Err(Error::syntax("fn*", "requires a parameter list"));
    }
    let param_forms = match &args[0] {
        TarnVal::List(items, _) | TarnVal::Vector(items, _) => items,
        other => {
            return Err(Error::type_error_in(
                "fn* parameters",
                "list or vector",
                other.type_name(),
            ));
        }
    };

    let mut params = Vec::with_capacity(param_forms.len());
    for form in param_forms.iter() {
        match form {
            TarnVal::Symbol(sym) => params.push(sym.clone()),
            other => {
                return Err(Error::type_error_in(
                    "fn* parameter",
                    "symbol",
                    other.type_name(),
                ));
            }
        }
    }
    if let Some(amp) = params.iter().position(|p| p.name() == "&") {
        if amp + 2 != params.len() {
            return Err(Error::syntax(
                "fn*",
                "& must be followed by exactly one parameter name",
            ));
        }
    }

    let body: Vec<TarnVal> = args[1..].to_vec();
    let env_any: Rc<dyn Any> = Rc::new(env.clone());
    Ok(TarnVal::Fn(TarnFn::new(params, body, env_any)))
}

/// (try* body (catch* name handler)) - evaluate body; on error, bind the
/// caught value to name in a child environment and evaluate the handler.
///
/// A thrown value is caught unchanged; any other evaluation error is
/// caught as its message string.
fn eval_try(args: &[TarnVal], env: &Env) -> Result<TarnVal> {
    if args.len() != 2 {
        return Err(Error::syntax(
            "try*",
            "requires a body and a catch* clause",
        ));
    }

    let catch_items: Vec<TarnVal> = match &args[1] {
        TarnVal::List(items, _) => items.iter().cloned().collect(),
        other => {
            return Err(Error::type_error_in(
                "try* catch clause",
                "list",
                other.type_name(),
            ));
        }
    };
    let is_catch = matches!(catch_items.first(), Some(TarnVal::Symbol(s)) if s.name() == "catch*");
    if !is_catch || catch_items.len() != 3 {
        return Err(Error::syntax(
            "try*",
            "second argument must be (catch* name handler)",
        ));
    }
    let binding = match &catch_items[1] {
        TarnVal::Symbol(sym) => sym.clone(),
        other => {
            return Err(Error::type_error_in(
                "catch* binding",
                "symbol",
                other.type_name(),
            ));
        }
    };

    match eval(&args[0], env) {
        Ok(val) => Ok(val),
        Err(err) => {
            let caught = match err {
                Error::Thrown(val) => val,
                other => TarnVal::string(other.to_string()),
            };
            let catch_env = env.child();
            catch_env.define(binding, caught);
            eval(&catch_items[2], &catch_env)
        }
    }
}

// ============================================================================
// Quasiquote
// ============================================================================

/// Rewrite a quasiquoted form into cons/concat calls.
///
/// - `(unquote x)` rewrites to `x`
/// - a leading `(splice-unquote x)` element rewrites to a `concat` of `x`
///   with the rewritten remainder
/// - other non-empty sequences rewrite element-wise via `cons`
/// - everything else becomes `(quote form)`
fn quasiquote(ast: &TarnVal) -> Result<TarnVal> {
    let items: Vec<TarnVal> = match ast.as_seq() {
        Some(items) if !items.is_empty() => items.iter().cloned().collect(),
        _ => {
            return Ok(TarnVal::list(vec![TarnVal::sym("quote"), ast.clone()]));
        }
    };

    if matches!(&items[0], TarnVal::Symbol(s) if s.name() == "unquote") {
        if items.len() != 2 {
            return Err(Error::syntax("unquote", "requires exactly 1 argument"));
        }
        return Ok(items[1].clone());
    }

    let rest = TarnVal::list(items[1..].to_vec());
    if let Some(head_items) = items[0].as_seq() {
        if matches!(head_items.front(), Some(TarnVal::Symbol(s)) if s.name() == "splice-unquote") {
            if head_items.len() != 2 {
                return Err(Error::syntax(
                    "splice-unquote",
                    "requires exactly 1 argument",
                ));
            }
            return Ok(TarnVal::list(vec![
                TarnVal::sym("concat"),
                head_items[1].clone(),
                quasiquote(&rest)?,
            ]));
        }
    }

    Ok(TarnVal::list(vec![
        TarnVal::sym("cons"),
        quasiquote(&items[0])?,
        quasiquote(&rest)?,
    ]))
}

// ============================================================================
// Macro Expansion
// ============================================================================

/// If the form is a call whose head resolves to a macro, return the macro.
fn macro_for(form: &TarnVal, env: &Env) -> Option<TarnFn> {
    let items = match form {
        TarnVal::List(items, _) if !items.is_empty() => items,
        _ => return None,
    };
    let sym = match &items[0] {
        TarnVal::Symbol(sym) => sym,
        _ => return None,
    };
    match env.lookup(sym) {
        Ok(TarnVal::Fn(f)) if f.is_macro => Some(f),
        _ => None,
    }
}

/// Repeatedly expand macro calls at the head of the form until it is no
/// longer a macro call. Arguments are passed unevaluated.
pub fn macroexpand(form: &TarnVal, env: &Env) -> Result<TarnVal> {
    let mut current = form.clone();
    while let Some(mac) = macro_for(&current, env) {
        let args: Vec<TarnVal> = match &current {
            TarnVal::List(items, _) => items.iter().skip(1).cloned().collect(),
            _ => unreachable!("macro_for only matches lists"),
        };
        current = apply_fn(&mac, &args)?;
    }
    Ok(current)
}

// ============================================================================
// Function Application
// ============================================================================

/// Apply a function to already-evaluated arguments.
pub fn apply(func: &TarnVal, args: &[TarnVal]) -> Result<TarnVal> {
    match func {
        TarnVal::Fn(f) => apply_fn(f, args),
        TarnVal::NativeFn(nf) => apply_native(nf, args),
        other => Err(Error::NotCallable(format!("{}", other))),
    }
}

/// Apply a user-defined function by evaluating its body in a fresh
/// environment chained to the captured one.
fn apply_fn(func: &TarnFn, args: &[TarnVal]) -> Result<TarnVal> {
    let fn_env = Env::bind(closure_env(func), &func.params, args)?;
    let mut result = TarnVal::Nil;
    for expr in &func.body {
        result = eval(expr, &fn_env)?;
    }
    Ok(result)
}

/// Apply a native function.
fn apply_native(func: &TarnNativeFn, args: &[TarnVal]) -> Result<TarnVal> {
    let f = func
        .func()
        .downcast_ref::<Rc<NativeFnImpl>>()
        .expect("Native function must have correct type");
    f(args)
}

/// Recover the typed environment from a closure's type-erased slot.
fn closure_env(func: &TarnFn) -> &Env {
    func.env
        .downcast_ref::<Env>()
        .expect("Function environment must be Env type")
}

// ============================================================================
// Helper for creating native functions
// ============================================================================

/// Create a native function value.
pub fn make_native_fn(
    name: &'static str,
    func: impl Fn(&[TarnVal]) -> Result<TarnVal> + 'static,
) -> TarnNativeFn {
    let func_rc: Rc<NativeFnImpl> = Rc::new(func);
    let func_any: Rc<dyn Any> = Rc::new(func_rc);
    TarnNativeFn::new(name, func_any)
}

// ============================================================================
// Tests
// ============================================================================

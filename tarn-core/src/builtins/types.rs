// tarn-core - Type predicate and constructor built-in functions
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! Type predicates (`nil?`, `symbol?`, ...) and the `symbol`/`keyword`
//! constructors.

use tarn_parser::{Keyword, Symbol, TarnVal};

use crate::error::{Error, Result};

fn unary_predicate(
    args: &[TarnVal],
    name: &'static str,
    test: impl Fn(&TarnVal) -> bool,
) -> Result<TarnVal> {
    if args.len() != 1 {
        return Err(Error::arity_named(name, 1, args.len()));
    }
    Ok(TarnVal::bool(test(&args[0])))
}

pub(crate) fn builtin_nil_p(args: &[TarnVal]) -> Result<TarnVal> {
    unary_predicate(args, "nil?", TarnVal::is_nil)
}

pub(crate) fn builtin_true_p(args: &[TarnVal]) -> Result<TarnVal> {
    unary_predicate(args, "true?", |v| matches!(v, TarnVal::Bool(true)))
}

pub(crate) fn builtin_false_p(args: &[TarnVal]) -> Result<TarnVal> {
    unary_predicate(args, "false?", |v| matches!(v, TarnVal::Bool(false)))
}

pub(crate) fn builtin_number_p(args: &[TarnVal]) -> Result<TarnVal> {
    unary_predicate(args, "number?", |v| {
        matches!(v, TarnVal::Int(_) | TarnVal::Float(_))
    })
}

pub(crate) fn builtin_string_p(args: &[TarnVal]) -> Result<TarnVal> {
    unary_predicate(args, "string?", |v| matches!(v, TarnVal::String(_)))
}

pub(crate) fn builtin_symbol_p(args: &[TarnVal]) -> Result<TarnVal> {
    unary_predicate(args, "symbol?", |v| matches!(v, TarnVal::Symbol(_)))
}

pub(crate) fn builtin_keyword_p(args: &[TarnVal]) -> Result<TarnVal> {
    unary_predicate(args, "keyword?", |v| matches!(v, TarnVal::Keyword(_)))
}

pub(crate) fn builtin_list_p(args: &[TarnVal]) -> Result<TarnVal> {
    unary_predicate(args, "list?", |v| matches!(v, TarnVal::List(_, _)))
}

pub(crate) fn builtin_vector_p(args: &[TarnVal]) -> Result<TarnVal> {
    unary_predicate(args, "vector?", |v| matches!(v, TarnVal::Vector(_, _)))
}

pub(crate) fn builtin_map_p(args: &[TarnVal]) -> Result<TarnVal> {
    unary_predicate(args, "map?", |v| matches!(v, TarnVal::Map(_, _)))
}

pub(crate) fn builtin_sequential_p(args: &[TarnVal]) -> Result<TarnVal> {
    unary_predicate(args, "sequential?", |v| {
        matches!(v, TarnVal::List(_, _) | TarnVal::Vector(_, _))
    })
}

/// `fn?` is true for callables that are not macros.
pub(crate) fn builtin_fn_p(args: &[TarnVal]) -> Result<TarnVal> {
    unary_predicate(args, "fn?", |v| match v {
        TarnVal::Fn(f) => !f.is_macro,
        TarnVal::NativeFn(_) => true,
        _ => false,
    })
}

pub(crate) fn builtin_macro_p(args: &[TarnVal]) -> Result<TarnVal> {
    unary_predicate(args, "macro?", |v| {
        matches!(v, TarnVal::Fn(f) if f.is_macro)
    })
}

pub(crate) fn builtin_symbol(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("symbol", 1, args.len()));
    }
    match &args[0] {
        TarnVal::String(s) => Ok(TarnVal::Symbol(Symbol::new(s))),
        TarnVal::Symbol(_) => Ok(args[0].clone()),
        other => Err(Error::type_error_in("symbol", "string", other.type_name())),
    }
}

pub(crate) fn builtin_keyword(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("keyword", 1, args.len()));
    }
    match &args[0] {
        TarnVal::String(s) => Ok(TarnVal::Keyword(Keyword::new(s))),
        TarnVal::Keyword(_) => Ok(args[0].clone()),
        other => Err(Error::type_error_in("keyword", "string", other.type_name())),
    }
}

// tarn-core - Comparison built-in functions
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! Comparison operations: =, <, <=, >, >=
//!
//! `=` uses structural value equality (lists and vectors with equal
//! elements compare equal, as do an integer and the float with the same
//! value). The ordering operations accept numbers only and chain across
//! all their arguments.

use std::cmp::Ordering;

use tarn_parser::TarnVal;

use crate::error::{Error, Result};

fn compare_numbers(a: &TarnVal, b: &TarnVal, context: &'static str) -> Result<Ordering> {
    let (x, y) = match (a, b) {
        (TarnVal::Int(x), TarnVal::Int(y)) => return Ok(x.cmp(y)),
        (TarnVal::Int(x), TarnVal::Float(y)) => (*x as f64, *y),
        (TarnVal::Float(x), TarnVal::Int(y)) => (*x, *y as f64),
        (TarnVal::Float(x), TarnVal::Float(y)) => (*x, *y),
        (TarnVal::Int(_) | TarnVal::Float(_), other) | (other, _) => {
            return Err(Error::type_error_in(context, "number", other.type_name()));
        }
    };
    x.partial_cmp(&y)
        .ok_or_else(|| Error::type_error_in(context, "comparable number", "NaN"))
}

fn chained_compare(
    args: &[TarnVal],
    name: &'static str,
    accept: impl Fn(Ordering) -> bool,
) -> Result<TarnVal> {
    if args.len() < 2 {
        return Err(Error::arity_at_least_named(name, 2, args.len()));
    }
    for pair in args.windows(2) {
        if !accept(compare_numbers(&pair[0], &pair[1], name)?) {
            return Ok(TarnVal::bool(false));
        }
    }
    Ok(TarnVal::bool(true))
}

pub(crate) fn builtin_eq(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() < 2 {
        return Err(Error::arity_at_least_named("=", 2, args.len()));
    }
    Ok(TarnVal::bool(args.windows(2).all(|pair| pair[0] == pair[1])))
}

pub(crate) fn builtin_lt(args: &[TarnVal]) -> Result<TarnVal> {
    chained_compare(args, "<", |ord| ord == Ordering::Less)
}

pub(crate) fn builtin_le(args: &[TarnVal]) -> Result<TarnVal> {
    chained_compare(args, "<=", |ord| ord != Ordering::Greater)
}

pub(crate) fn builtin_gt(args: &[TarnVal]) -> Result<TarnVal> {
    chained_compare(args, ">", |ord| ord == Ordering::Greater)
}

pub(crate) fn builtin_ge(args: &[TarnVal]) -> Result<TarnVal> {
    chained_compare(args, ">=", |ord| ord != Ordering::Less)
}

// tarn-core - Arithmetic built-in functions
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! Arithmetic operations: +, -, *, /
//!
//! All four fold left over their arguments. Two integers produce an
//! integer (with wrapping overflow); a float anywhere promotes the whole
//! computation to floats. Integer `/` truncates toward zero and rejects a
//! zero divisor.

use tarn_parser::TarnVal;

use crate::error::{Error, Result};

/// A number that is either still exact or has been promoted to float.
#[derive(Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn from_val(val: &TarnVal, context: &'static str) -> Result<Num> {
        match val {
            TarnVal::Int(n) => Ok(Num::Int(*n)),
            TarnVal::Float(n) => Ok(Num::Float(*n)),
            other => Err(Error::type_error_in(context, "number", other.type_name())),
        }
    }

    fn into_val(self) -> TarnVal {
        match self {
            Num::Int(n) => TarnVal::int(n),
            Num::Float(n) => TarnVal::float(n),
        }
    }

    fn as_float(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(n) => n,
        }
    }
}

fn fold_numeric(
    args: &[TarnVal],
    context: &'static str,
    init: Num,
    int_op: impl Fn(i64, i64) -> Result<i64>,
    float_op: impl Fn(f64, f64) -> f64,
) -> Result<TarnVal> {
    let mut acc = init;
    for arg in args {
        let rhs = Num::from_val(arg, context)?;
        acc = match (acc, rhs) {
            (Num::Int(a), Num::Int(b)) => Num::Int(int_op(a, b)?),
            (a, b) => Num::Float(float_op(a.as_float(), b.as_float())),
        };
    }
    Ok(acc.into_val())
}

pub(crate) fn builtin_add(args: &[TarnVal]) -> Result<TarnVal> {
    fold_numeric(args, "+", Num::Int(0), |a, b| Ok(a.wrapping_add(b)), |a, b| a + b)
}

pub(crate) fn builtin_sub(args: &[TarnVal]) -> Result<TarnVal> {
    match args {
        [] => Err(Error::arity_at_least_named("-", 1, 0)),
        // Unary minus negates
        [only] => match Num::from_val(only, "-")? {
            Num::Int(n) => Ok(TarnVal::int(n.wrapping_neg())),
            Num::Float(n) => Ok(TarnVal::float(-n)),
        },
        [first, rest @ ..] => fold_numeric(
            rest,
            "-",
            Num::from_val(first, "-")?,
            |a, b| Ok(a.wrapping_sub(b)),
            |a, b| a - b,
        ),
    }
}

pub(crate) fn builtin_mul(args: &[TarnVal]) -> Result<TarnVal> {
    fold_numeric(args, "*", Num::Int(1), |a, b| Ok(a.wrapping_mul(b)), |a, b| a * b)
}

pub(crate) fn builtin_div(args: &[TarnVal]) -> Result<TarnVal> {
    let div_int = |a: i64, b: i64| -> Result<i64> {
        if b == 0 {
            return Err(Error::DivisionByZero);
        }
        Ok(a.wrapping_div(b))
    };
    match args {
        [] => Err(Error::arity_at_least_named("/", 1, 0)),
        // Unary division is the reciprocal
        [only] => match Num::from_val(only, "/")? {
            Num::Int(n) => div_int(1, n).map(TarnVal::int),
            Num::Float(n) => Ok(TarnVal::float(1.0 / n)),
        },
        [first, rest @ ..] => {
            fold_numeric(rest, "/", Num::from_val(first, "/")?, div_int, |a, b| a / b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        assert_eq!(builtin_add(&[]).unwrap(), TarnVal::int(0));
        assert_eq!(
            builtin_add(&[TarnVal::int(1), TarnVal::int(2), TarnVal::int(3)]).unwrap(),
            TarnVal::int(6)
        );
        assert_eq!(
            builtin_add(&[TarnVal::int(1), TarnVal::float(0.5)]).unwrap(),
            TarnVal::float(1.5)
        );
    }

    #[test]
    fn test_sub_unary_negates() {
        assert_eq!(builtin_sub(&[TarnVal::int(5)]).unwrap(), TarnVal::int(-5));
        assert_eq!(
            builtin_sub(&[TarnVal::int(10), TarnVal::int(3), TarnVal::int(2)]).unwrap(),
            TarnVal::int(5)
        );
    }

    #[test]
    fn test_int_div_truncates() {
        assert_eq!(
            builtin_div(&[TarnVal::int(7), TarnVal::int(2)]).unwrap(),
            TarnVal::int(3)
        );
        assert_eq!(
            builtin_div(&[TarnVal::int(-7), TarnVal::int(2)]).unwrap(),
            TarnVal::int(-3)
        );
    }

    #[test]
    fn test_div_by_zero() {
        assert!(matches!(
            builtin_div(&[TarnVal::int(1), TarnVal::int(0)]),
            Err(Error::DivisionByZero)
        ));
        // Float division by zero follows IEEE semantics
        assert_eq!(
            builtin_div(&[TarnVal::float(1.0), TarnVal::float(0.0)]).unwrap(),
            TarnVal::float(f64::INFINITY)
        );
    }

    #[test]
    fn test_wrapping_overflow() {
        assert_eq!(
            builtin_add(&[TarnVal::int(i64::MAX), TarnVal::int(1)]).unwrap(),
            TarnVal::int(i64::MIN)
        );
    }

    #[test]
    fn test_non_number_rejected() {
        assert!(builtin_add(&[TarnVal::string("x")]).is_err());
    }
}

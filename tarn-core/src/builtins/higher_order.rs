// tarn-core - Higher-order built-in functions
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! `apply` and `map`, the builtins that call back into the evaluator.

use tarn_parser::TarnVal;

use crate::error::{Error, Result};
use crate::eval::apply;

/// (apply f a b ... coll) - call f with the leading arguments followed by
/// the elements of the final sequence.
pub(crate) fn builtin_apply(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() < 2 {
        return Err(Error::arity_at_least_named("apply", 2, args.len()));
    }
    let func = &args[0];
    let last = &args[args.len() - 1];

    let mut call_args: Vec<TarnVal> = args[1..args.len() - 1].to_vec();
    match last {
        TarnVal::Nil => {}
        TarnVal::List(items, _) | TarnVal::Vector(items, _) => {
            call_args.extend(items.iter().cloned());
        }
        other => {
            return Err(Error::type_error_in("apply", "seqable", other.type_name()));
        }
    }
    apply(func, &call_args)
}

/// (map f coll) - call f on each element, collecting results into a list.
pub(crate) fn builtin_map(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("map", 2, args.len()));
    }
    let func = &args[0];
    let items = match &args[1] {
        TarnVal::Nil => return Ok(TarnVal::empty_list()),
        TarnVal::List(items, _) | TarnVal::Vector(items, _) => items,
        other => {
            return Err(Error::type_error_in("map", "seqable", other.type_name()));
        }
    };

    let mut result = Vec::with_capacity(items.len());
    for item in items.iter() {
        result.push(apply(func, std::slice::from_ref(item))?);
    }
    Ok(TarnVal::list(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::arithmetic::builtin_add;
    use crate::eval::make_native_fn;

    fn add_fn() -> TarnVal {
        TarnVal::NativeFn(make_native_fn("+", builtin_add))
    }

    #[test]
    fn test_apply_flattens_trailing_sequence() {
        let result = builtin_apply(&[
            add_fn(),
            TarnVal::int(1),
            TarnVal::list(vec![TarnVal::int(2), TarnVal::int(3)]),
        ])
        .unwrap();
        assert_eq!(result, TarnVal::int(6));
    }

    #[test]
    fn test_apply_accepts_nil_tail() {
        let result = builtin_apply(&[add_fn(), TarnVal::int(4), TarnVal::Nil]).unwrap();
        assert_eq!(result, TarnVal::int(4));
    }

    #[test]
    fn test_map_over_vector_yields_list() {
        let result = builtin_map(&[
            add_fn(),
            TarnVal::vector(vec![TarnVal::int(1), TarnVal::int(2)]),
        ])
        .unwrap();
        assert_eq!(
            result,
            TarnVal::list(vec![TarnVal::int(1), TarnVal::int(2)])
        );
    }

    #[test]
    fn test_map_propagates_errors() {
        let bad = TarnVal::vector(vec![TarnVal::string("x")]);
        assert!(builtin_map(&[add_fn(), bad]).is_err());
    }
}

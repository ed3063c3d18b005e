// tarn-core - Atom built-in functions
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! Atoms: the single mutable reference cell.
//!
//! Cloning an atom value clones the handle, not the cell, so every copy
//! observes `reset!`/`swap!` through any alias.

use tarn_parser::{TarnAtom, TarnVal};

use crate::error::{Error, Result};
use crate::eval::apply;

pub(crate) fn builtin_atom(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("atom", 1, args.len()));
    }
    Ok(TarnVal::Atom(TarnAtom::new(args[0].clone())))
}

pub(crate) fn builtin_atom_p(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("atom?", 1, args.len()));
    }
    Ok(TarnVal::bool(matches!(args[0], TarnVal::Atom(_))))
}

pub(crate) fn builtin_deref(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("deref", 1, args.len()));
    }
    match &args[0] {
        TarnVal::Atom(atom) => Ok(atom.deref()),
        other => Err(Error::type_error_in("deref", "atom", other.type_name())),
    }
}

pub(crate) fn builtin_reset(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("reset!", 2, args.len()));
    }
    match &args[0] {
        TarnVal::Atom(atom) => {
            atom.reset(args[1].clone());
            Ok(args[1].clone())
        }
        other => Err(Error::type_error_in("reset!", "atom", other.type_name())),
    }
}

/// (swap! atom f & args) - replace the atom's value with
/// (f current-value & args) and return the new value.
pub(crate) fn builtin_swap(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() < 2 {
        return Err(Error::arity_at_least_named("swap!", 2, args.len()));
    }
    let atom = match &args[0] {
        TarnVal::Atom(atom) => atom,
        other => return Err(Error::type_error_in("swap!", "atom", other.type_name())),
    };

    let mut call_args = Vec::with_capacity(args.len() - 1);
    call_args.push(atom.deref());
    call_args.extend_from_slice(&args[2..]);

    let new_value = apply(&args[1], &call_args)?;
    atom.reset(new_value.clone());
    Ok(new_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::make_native_fn;

    #[test]
    fn test_atom_roundtrip() {
        let atom = builtin_atom(&[TarnVal::int(1)]).unwrap();
        assert_eq!(builtin_deref(&[atom.clone()]).unwrap(), TarnVal::int(1));
        assert_eq!(
            builtin_reset(&[atom.clone(), TarnVal::int(2)]).unwrap(),
            TarnVal::int(2)
        );
        assert_eq!(builtin_deref(&[atom]).unwrap(), TarnVal::int(2));
    }

    #[test]
    fn test_aliases_share_the_cell() {
        let atom = builtin_atom(&[TarnVal::int(1)]).unwrap();
        let alias = atom.clone();
        builtin_reset(&[atom, TarnVal::int(9)]).unwrap();
        assert_eq!(builtin_deref(&[alias]).unwrap(), TarnVal::int(9));
    }

    #[test]
    fn test_swap_applies_function_with_extra_args() {
        let atom = builtin_atom(&[TarnVal::int(10)]).unwrap();
        let add = TarnVal::NativeFn(make_native_fn("+", super::super::arithmetic::builtin_add));
        let result = builtin_swap(&[atom.clone(), add, TarnVal::int(5)]).unwrap();
        assert_eq!(result, TarnVal::int(15));
        assert_eq!(builtin_deref(&[atom]).unwrap(), TarnVal::int(15));
    }

    #[test]
    fn test_deref_rejects_non_atom() {
        assert!(builtin_deref(&[TarnVal::int(1)]).is_err());
    }
}

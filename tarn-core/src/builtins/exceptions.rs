// tarn-core - Exception built-in functions
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! `throw`: raise an arbitrary value as an exception.
//!
//! The value travels through the error channel untouched so a matching
//! `catch*` binds exactly what was thrown.

use tarn_parser::TarnVal;

use crate::error::{Error, Result};

pub(crate) fn builtin_throw(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("throw", 1, args.len()));
    }
    Err(Error::Thrown(args[0].clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throw_preserves_value() {
        let payload = TarnVal::map(vec![(TarnVal::string("code"), TarnVal::int(404))]);
        match builtin_throw(&[payload.clone()]) {
            Err(Error::Thrown(val)) => assert_eq!(val, payload),
            other => panic!("expected thrown value, got {:?}", other),
        }
    }
}

// tarn-core - Metadata built-in functions
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! Metadata attachment and retrieval.
//!
//! Metadata lives on collections and functions only. `with-meta` returns
//! a copy carrying the new metadata; `meta` returns nil when none has
//! been attached. Metadata never participates in equality.

use std::rc::Rc;

use tarn_parser::TarnVal;

use crate::error::{Error, Result};

pub(crate) fn builtin_with_meta(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("with-meta", 2, args.len()));
    }
    args[0]
        .with_meta(Rc::new(args[1].clone()))
        .ok_or_else(|| {
            Error::type_error_in(
                "with-meta",
                "collection or function",
                args[0].type_name(),
            )
        })
}

pub(crate) fn builtin_meta(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("meta", 1, args.len()));
    }
    Ok(args[0].meta())
}

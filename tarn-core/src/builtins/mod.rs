// tarn-core - Built-in functions
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! Built-in functions for Tarn.

// Allow mutable key types - TarnVal has interior mutability for Atoms by design
#![allow(clippy::mutable_key_type)]

mod arithmetic;
mod atoms;
mod collections;
mod comparison;
mod exceptions;
mod higher_order;
mod io;
mod meta;
mod types;

use tarn_parser::{Symbol, TarnVal};

use crate::env::Env;
use crate::error::Result;
use crate::eval::make_native_fn;

use arithmetic::{builtin_add, builtin_div, builtin_mul, builtin_sub};
use atoms::{builtin_atom, builtin_atom_p, builtin_deref, builtin_reset, builtin_swap};
use collections::{
    builtin_assoc, builtin_concat, builtin_cons, builtin_contains_p, builtin_count,
    builtin_dissoc, builtin_empty_p, builtin_first, builtin_get, builtin_hash_map, builtin_keys,
    builtin_list, builtin_nth, builtin_rest, builtin_vals, builtin_vec, builtin_vector,
};
use comparison::{builtin_eq, builtin_ge, builtin_gt, builtin_le, builtin_lt};
use exceptions::builtin_throw;
use higher_order::{builtin_apply, builtin_map};
use io::{
    builtin_pr_str, builtin_println, builtin_prn, builtin_read_string, builtin_slurp, builtin_str,
};
use meta::{builtin_meta, builtin_with_meta};
use types::{
    builtin_false_p, builtin_fn_p, builtin_keyword, builtin_keyword_p, builtin_list_p,
    builtin_macro_p, builtin_map_p, builtin_nil_p, builtin_number_p, builtin_sequential_p,
    builtin_string_p, builtin_symbol, builtin_symbol_p, builtin_true_p, builtin_vector_p,
};

/// Register all built-in functions into the given environment.
///
/// The `eval` builtin is registered separately by [`crate::init_root_env`]
/// because it must close over the root environment.
pub fn register_builtins(env: &Env) {
    // Arithmetic
    env.define_native("+", builtin_add);
    env.define_native("-", builtin_sub);
    env.define_native("*", builtin_mul);
    env.define_native("/", builtin_div);

    // Comparison
    env.define_native("=", builtin_eq);
    env.define_native("<", builtin_lt);
    env.define_native(">", builtin_gt);
    env.define_native("<=", builtin_le);
    env.define_native(">=", builtin_ge);

    // Sequences
    env.define_native("list", builtin_list);
    env.define_native("vector", builtin_vector);
    env.define_native("vec", builtin_vec);
    env.define_native("cons", builtin_cons);
    env.define_native("concat", builtin_concat);
    env.define_native("first", builtin_first);
    env.define_native("rest", builtin_rest);
    env.define_native("nth", builtin_nth);
    env.define_native("count", builtin_count);
    env.define_native("empty?", builtin_empty_p);

    // Maps
    env.define_native("hash-map", builtin_hash_map);
    env.define_native("assoc", builtin_assoc);
    env.define_native("dissoc", builtin_dissoc);
    env.define_native("get", builtin_get);
    env.define_native("contains?", builtin_contains_p);
    env.define_native("keys", builtin_keys);
    env.define_native("vals", builtin_vals);

    // Type predicates
    env.define_native("nil?", builtin_nil_p);
    env.define_native("true?", builtin_true_p);
    env.define_native("false?", builtin_false_p);
    env.define_native("number?", builtin_number_p);
    env.define_native("string?", builtin_string_p);
    env.define_native("symbol?", builtin_symbol_p);
    env.define_native("keyword?", builtin_keyword_p);
    env.define_native("list?", builtin_list_p);
    env.define_native("vector?", builtin_vector_p);
    env.define_native("map?", builtin_map_p);
    env.define_native("sequential?", builtin_sequential_p);
    env.define_native("fn?", builtin_fn_p);
    env.define_native("macro?", builtin_macro_p);

    // Constructors
    env.define_native("symbol", builtin_symbol);
    env.define_native("keyword", builtin_keyword);

    // Strings and IO
    env.define_native("pr-str", builtin_pr_str);
    env.define_native("str", builtin_str);
    env.define_native("prn", builtin_prn);
    env.define_native("println", builtin_println);
    env.define_native("read-string", builtin_read_string);
    env.define_native("slurp", builtin_slurp);

    // Atoms
    env.define_native("atom", builtin_atom);
    env.define_native("atom?", builtin_atom_p);
    env.define_native("deref", builtin_deref);
    env.define_native("reset!", builtin_reset);
    env.define_native("swap!", builtin_swap);

    // Metadata
    env.define_native("with-meta", builtin_with_meta);
    env.define_native("meta", builtin_meta);

    // Exceptions
    env.define_native("throw", builtin_throw);

    // Higher-order
    env.define_native("apply", builtin_apply);
    env.define_native("map", builtin_map);
}

/// Helper trait to define native functions more easily.
pub trait EnvExt {
    fn define_native(&self, name: &'static str, func: fn(&[TarnVal]) -> Result<TarnVal>);
}

impl EnvExt for Env {
    fn define_native(&self, name: &'static str, func: fn(&[TarnVal]) -> Result<TarnVal>) {
        let native = make_native_fn(name, func);
        self.define(Symbol::new(name), TarnVal::NativeFn(native));
    }
}

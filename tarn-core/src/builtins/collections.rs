// tarn-core - Collection built-in functions
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! Lists, vectors, and maps: construction, access, and persistent updates.
//!
//! Sequence functions treat `nil` as the empty sequence. Map updates
//! copy the underlying map; existing references to the original value
//! never observe a change.

use tarn_parser::{TarnVal, Vector};

use crate::error::{Error, Result};

/// View a value as a sequence of elements. `nil` is the empty sequence.
fn to_seq(val: &TarnVal, context: &'static str) -> Result<Vector<TarnVal>> {
    match val {
        TarnVal::Nil => Ok(Vector::new()),
        TarnVal::List(items, _) | TarnVal::Vector(items, _) => Ok(items.clone()),
        other => Err(Error::type_error_in(context, "seqable", other.type_name())),
    }
}

// ============================================================================
// Sequences
// ============================================================================

pub(crate) fn builtin_list(args: &[TarnVal]) -> Result<TarnVal> {
    Ok(TarnVal::list(args.to_vec()))
}

pub(crate) fn builtin_vector(args: &[TarnVal]) -> Result<TarnVal> {
    Ok(TarnVal::vector(args.to_vec()))
}

pub(crate) fn builtin_vec(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("vec", 1, args.len()));
    }
    Ok(TarnVal::vector_from(to_seq(&args[0], "vec")?))
}

pub(crate) fn builtin_cons(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("cons", 2, args.len()));
    }
    let mut items = to_seq(&args[1], "cons")?;
    items.push_front(args[0].clone());
    Ok(TarnVal::list_from(items))
}

pub(crate) fn builtin_concat(args: &[TarnVal]) -> Result<TarnVal> {
    let mut result = Vector::new();
    for arg in args {
        result.append(to_seq(arg, "concat")?);
    }
    Ok(TarnVal::list_from(result))
}

pub(crate) fn builtin_first(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("first", 1, args.len()));
    }
    let items = to_seq(&args[0], "first")?;
    Ok(items.front().cloned().unwrap_or(TarnVal::Nil))
}

pub(crate) fn builtin_rest(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("rest", 1, args.len()));
    }
    let items = to_seq(&args[0], "rest")?;
    if items.is_empty() {
        return Ok(TarnVal::empty_list());
    }
    Ok(TarnVal::list_from(items.skip(1)))
}

pub(crate) fn builtin_nth(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() < 2 || args.len() > 3 {
        return Err(Error::arity_range_named("nth", 2, 3, args.len()));
    }
    let idx = match &args[1] {
        TarnVal::Int(n) => *n,
        other => return Err(Error::type_error_in("nth", "integer", other.type_name())),
    };
    let items = to_seq(&args[0], "nth")?;

    if idx < 0 || idx as usize >= items.len() {
        if let Some(default) = args.get(2) {
            return Ok(default.clone());
        }
        return Err(Error::IndexOutOfBounds {
            index: idx,
            length: items.len(),
        });
    }
    Ok(items[idx as usize].clone())
}

pub(crate) fn builtin_count(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("count", 1, args.len()));
    }
    let len = match &args[0] {
        TarnVal::Nil => 0,
        TarnVal::List(items, _) | TarnVal::Vector(items, _) => items.len(),
        TarnVal::Map(map, _) => map.len(),
        TarnVal::String(s) => s.chars().count(),
        other => {
            return Err(Error::type_error_in("count", "countable", other.type_name()));
        }
    };
    Ok(TarnVal::int(len as i64))
}

pub(crate) fn builtin_empty_p(args: &[TarnVal]) -> Result<TarnVal> {
    match builtin_count(args)? {
        TarnVal::Int(n) => Ok(TarnVal::bool(n == 0)),
        _ => unreachable!("count returns an integer"),
    }
}

// ============================================================================
// Maps
// ============================================================================

pub(crate) fn builtin_hash_map(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() % 2 != 0 {
        return Err(Error::syntax(
            "hash-map",
            "requires an even number of arguments",
        ));
    }
    let pairs: Vec<_> = args
        .chunks(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect();
    Ok(TarnVal::map(pairs))
}

pub(crate) fn builtin_assoc(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() < 3 || args.len() % 2 != 1 {
        return Err(Error::syntax(
            "assoc",
            "requires a map and key/value pairs",
        ));
    }
    let mut map = match &args[0] {
        TarnVal::Nil => tarn_parser::TarnMap::default(),
        TarnVal::Map(map, _) => (**map).clone(),
        other => return Err(Error::type_error_in("assoc", "map", other.type_name())),
    };
    for pair in args[1..].chunks(2) {
        map.insert(pair[0].clone(), pair[1].clone());
    }
    Ok(TarnVal::map_from(map))
}

pub(crate) fn builtin_dissoc(args: &[TarnVal]) -> Result<TarnVal> {
    if args.is_empty() {
        return Err(Error::arity_at_least_named("dissoc", 1, 0));
    }
    let mut map = match &args[0] {
        TarnVal::Nil => return Ok(TarnVal::Nil),
        TarnVal::Map(map, _) => (**map).clone(),
        other => return Err(Error::type_error_in("dissoc", "map", other.type_name())),
    };
    for key in &args[1..] {
        // shift_remove keeps the insertion order of surviving entries
        map.shift_remove(key);
    }
    Ok(TarnVal::map_from(map))
}

pub(crate) fn builtin_get(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() < 2 || args.len() > 3 {
        return Err(Error::arity_range_named("get", 2, 3, args.len()));
    }
    let not_found = args.get(2).cloned().unwrap_or(TarnVal::Nil);
    match &args[0] {
        TarnVal::Nil => Ok(not_found),
        TarnVal::Map(map, _) => Ok(map.get(&args[1]).cloned().unwrap_or(not_found)),
        other => Err(Error::type_error_in("get", "map", other.type_name())),
    }
}

pub(crate) fn builtin_contains_p(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 2 {
        return Err(Error::arity_named("contains?", 2, args.len()));
    }
    match &args[0] {
        TarnVal::Nil => Ok(TarnVal::bool(false)),
        TarnVal::Map(map, _) => Ok(TarnVal::bool(map.contains_key(&args[1]))),
        other => Err(Error::type_error_in("contains?", "map", other.type_name())),
    }
}

pub(crate) fn builtin_keys(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("keys", 1, args.len()));
    }
    match &args[0] {
        TarnVal::Nil => Ok(TarnVal::empty_list()),
        TarnVal::Map(map, _) => Ok(TarnVal::list(map.keys().cloned().collect())),
        other => Err(Error::type_error_in("keys", "map", other.type_name())),
    }
}

pub(crate) fn builtin_vals(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("vals", 1, args.len()));
    }
    match &args[0] {
        TarnVal::Nil => Ok(TarnVal::empty_list()),
        TarnVal::Map(map, _) => Ok(TarnVal::list(map.values().cloned().collect())),
        other => Err(Error::type_error_in("vals", "map", other.type_name())),
    }
}

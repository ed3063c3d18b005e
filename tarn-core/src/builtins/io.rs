// tarn-core - String and IO built-in functions
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! String rendering, printing, and file access.
//!
//! The `pr-` family prints readably (strings quoted and escaped); `str`
//! and `println` print for display. `read-string` re-enters the reader
//! and `slurp` reads a whole file as a string.

use std::fs;

use tarn_parser::{pr_str, Parser, TarnVal};

use crate::error::{Error, Result};

fn join_args(args: &[TarnVal], readably: bool, separator: &str) -> String {
    args.iter()
        .map(|v| pr_str(v, readably))
        .collect::<Vec<_>>()
        .join(separator)
}

pub(crate) fn builtin_pr_str(args: &[TarnVal]) -> Result<TarnVal> {
    Ok(TarnVal::string(join_args(args, true, " ")))
}

pub(crate) fn builtin_str(args: &[TarnVal]) -> Result<TarnVal> {
    Ok(TarnVal::string(join_args(args, false, "")))
}

pub(crate) fn builtin_prn(args: &[TarnVal]) -> Result<TarnVal> {
    println!("{}", join_args(args, true, " "));
    Ok(TarnVal::Nil)
}

pub(crate) fn builtin_println(args: &[TarnVal]) -> Result<TarnVal> {
    println!("{}", join_args(args, false, " "));
    Ok(TarnVal::Nil)
}

/// (read-string s) - parse the first form in the string. An empty or
/// comment-only string reads as nil.
pub(crate) fn builtin_read_string(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("read-string", 1, args.len()));
    }
    let source = match &args[0] {
        TarnVal::String(s) => s,
        other => {
            return Err(Error::type_error_in(
                "read-string",
                "string",
                other.type_name(),
            ));
        }
    };
    Ok(Parser::parse_str(source)?.unwrap_or(TarnVal::Nil))
}

pub(crate) fn builtin_slurp(args: &[TarnVal]) -> Result<TarnVal> {
    if args.len() != 1 {
        return Err(Error::arity_named("slurp", 1, args.len()));
    }
    let path = match &args[0] {
        TarnVal::String(s) => s,
        other => return Err(Error::type_error_in("slurp", "string", other.type_name())),
    };
    let contents = fs::read_to_string(path.as_ref())
        .map_err(|e| Error::Io(format!("Cannot read '{}': {}", path, e)))?;
    Ok(TarnVal::string(contents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pr_str_readable_with_spaces() {
        let result = builtin_pr_str(&[TarnVal::string("hi"), TarnVal::int(1)]).unwrap();
        assert_eq!(result, TarnVal::string("\"hi\" 1"));
    }

    #[test]
    fn test_str_display_no_separator() {
        let result = builtin_str(&[
            TarnVal::string("a"),
            TarnVal::int(1),
            TarnVal::Nil,
        ])
        .unwrap();
        assert_eq!(result, TarnVal::string("a1nil"));
    }

    #[test]
    fn test_read_string_parses_first_form() {
        let result = builtin_read_string(&[TarnVal::string("(+ 1 2) ignored")]).unwrap();
        assert_eq!(
            result,
            TarnVal::list(vec![TarnVal::sym("+"), TarnVal::int(1), TarnVal::int(2)])
        );
    }

    #[test]
    fn test_read_string_empty_is_nil() {
        assert_eq!(
            builtin_read_string(&[TarnVal::string("  ; comment only")]).unwrap(),
            TarnVal::Nil
        );
    }

    #[test]
    fn test_read_string_syntax_error() {
        assert!(matches!(
            builtin_read_string(&[TarnVal::string("(1 2")]),
            Err(Error::Syntax(_))
        ));
    }

    #[test]
    fn test_slurp_missing_file() {
        assert!(matches!(
            builtin_slurp(&[TarnVal::string("/nonexistent/tarn-test-file")]),
            Err(Error::Io(_))
        ));
    }
}

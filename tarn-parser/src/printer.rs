// tarn-parser - Printer for Tarn values
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! Rendering of values back to source text.
//!
//! [`pr_str`] is the single entry point. In readable mode strings are
//! quoted and escaped so the output can be read back to an equal value;
//! in display mode strings appear raw, for human-facing output.

use crate::value::TarnVal;

/// Render a value as a string.
///
/// With `readably` set, strings are surrounded by quotes and backslash,
/// double-quote and newline are escaped. Readability propagates through
/// collections and atoms.
pub fn pr_str(value: &TarnVal, readably: bool) -> String {
    match value {
        TarnVal::Nil => "nil".to_string(),
        TarnVal::Bool(b) => b.to_string(),
        TarnVal::Int(n) => n.to_string(),
        TarnVal::Float(n) => {
            if n.is_nan() {
                "##NaN".to_string()
            } else if n.is_infinite() {
                if *n > 0.0 {
                    "##Inf".to_string()
                } else {
                    "##-Inf".to_string()
                }
            } else {
                let s = n.to_string();
                // Keep a decimal point so the value reads back as a float,
                // unless the shortest form already carries one (or an
                // exponent)
                if s.contains('.') || s.contains('e') || s.contains('E') {
                    s
                } else {
                    format!("{}.0", s)
                }
            }
        }
        TarnVal::String(s) => {
            if readably {
                format!("\"{}\"", escape_string(s))
            } else {
                s.to_string()
            }
        }
        TarnVal::Symbol(sym) => sym.to_string(),
        TarnVal::Keyword(kw) => kw.to_string(),
        TarnVal::List(items, _) => {
            let parts: Vec<String> = items.iter().map(|v| pr_str(v, readably)).collect();
            format!("({})", parts.join(" "))
        }
        TarnVal::Vector(items, _) => {
            let parts: Vec<String> = items.iter().map(|v| pr_str(v, readably)).collect();
            format!("[{}]", parts.join(" "))
        }
        TarnVal::Map(map, _) => {
            let parts: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{} {}", pr_str(k, readably), pr_str(v, readably)))
                .collect();
            format!("{{{}}}", parts.join(" "))
        }
        TarnVal::Fn(f) => {
            if f.is_macro {
                "#<macro>".to_string()
            } else {
                "#<fn>".to_string()
            }
        }
        TarnVal::NativeFn(nf) => format!("#<native-fn {}>", nf.name()),
        TarnVal::Atom(a) => format!("(atom {})", pr_str(&a.deref(), readably)),
    }
}

/// Escape a string for readable output.
///
/// Only backslash, double-quote and newline are escaped; these are
/// exactly the escapes the lexer decodes, so readable output reads back
/// to an equal string.
fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    result
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::Keyword;

    #[test]
    fn test_scalars() {
        assert_eq!(pr_str(&TarnVal::Nil, true), "nil");
        assert_eq!(pr_str(&TarnVal::Bool(true), true), "true");
        assert_eq!(pr_str(&TarnVal::Int(42), true), "42");
        assert_eq!(pr_str(&TarnVal::Float(1.5), true), "1.5");
        assert_eq!(pr_str(&TarnVal::Float(2.0), true), "2.0");
    }

    #[test]
    fn test_string_readable() {
        let s = TarnVal::string("a\"b\\c\nd");
        assert_eq!(pr_str(&s, true), "\"a\\\"b\\\\c\\nd\"");
        assert_eq!(pr_str(&s, false), "a\"b\\c\nd");
    }

    #[test]
    fn test_collections() {
        let list = TarnVal::list(vec![TarnVal::Int(1), TarnVal::Int(2)]);
        assert_eq!(pr_str(&list, true), "(1 2)");

        let vector = TarnVal::vector(vec![TarnVal::sym("a"), TarnVal::string("b")]);
        assert_eq!(pr_str(&vector, true), "[a \"b\"]");

        let map = TarnVal::map(vec![(
            TarnVal::Keyword(Keyword::new("k")),
            TarnVal::Int(1),
        )]);
        assert_eq!(pr_str(&map, true), "{:k 1}");
    }

    #[test]
    fn test_map_preserves_insertion_order() {
        let map = TarnVal::map(vec![
            (TarnVal::Keyword(Keyword::new("b")), TarnVal::Int(2)),
            (TarnVal::Keyword(Keyword::new("a")), TarnVal::Int(1)),
        ]);
        assert_eq!(pr_str(&map, true), "{:b 2 :a 1}");
    }

    #[test]
    fn test_atom() {
        let atom = TarnVal::atom(TarnVal::string("x"));
        assert_eq!(pr_str(&atom, true), "(atom \"x\")");
        assert_eq!(pr_str(&atom, false), "(atom x)");
    }
}

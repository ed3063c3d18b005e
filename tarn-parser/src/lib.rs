// tarn-parser - Lexer and parser for the Tarn programming language
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! # tarn-parser
//!
//! Lexer, parser, value types and printer for the Tarn programming
//! language. Produces `TarnVal` AST from source code strings.

pub mod keyword;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod symbol;
pub mod value;

pub use im::Vector;
pub use indexmap::IndexMap;
pub use keyword::Keyword;
pub use lexer::Lexer;
pub use parser::{ParseError, Parser};
pub use printer::pr_str;
pub use symbol::Symbol;
pub use value::{Meta, TarnAtom, TarnFn, TarnMap, TarnNativeFn, TarnVal};

// tarn-parser - Parser for Tarn
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! Recursive descent parser for Tarn source code.
//!
//! Converts tokens into `TarnVal` AST nodes. Reader macros expand
//! structurally here: `'x` becomes `(quote x)`, `@x` becomes `(deref x)`,
//! `^m x` becomes `(with-meta x m)`, and so on. The evaluator never sees
//! the shorthand.

use std::fmt;

use crate::keyword::Keyword;
use crate::lexer::{Lexer, LexerError, Token};
use crate::symbol::Symbol;
use crate::value::TarnVal;

/// Parser error with position information.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at {}:{}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexerError> for ParseError {
    fn from(e: LexerError) -> Self {
        ParseError {
            message: e.message,
            line: e.line,
            column: e.column,
        }
    }
}

/// The parser converts tokens into `TarnVal` AST nodes.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source code.
    pub fn new(source: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        // Capture position before first token
        let line = lexer.line();
        let column = lexer.column();
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            line,
            column,
        })
    }

    /// Parse a single form from the source.
    /// Returns None if at end of input.
    pub fn parse(&mut self) -> Result<Option<TarnVal>, ParseError> {
        if matches!(self.current, Token::Eof) {
            return Ok(None);
        }
        let val = self.parse_form()?;
        Ok(Some(val))
    }

    /// Parse all forms from the source.
    pub fn parse_all(&mut self) -> Result<Vec<TarnVal>, ParseError> {
        let mut forms = Vec::new();
        while let Some(form) = self.parse()? {
            forms.push(form);
        }
        Ok(forms)
    }

    /// Parse a string and return the first form (convenience function).
    pub fn parse_str(source: &str) -> Result<Option<TarnVal>, ParseError> {
        let mut parser = Parser::new(source)?;
        parser.parse()
    }

    /// Parse a string and return all forms (convenience function).
    pub fn parse_all_str(source: &str) -> Result<Vec<TarnVal>, ParseError> {
        let mut parser = Parser::new(source)?;
        parser.parse_all()
    }

    // ========================================================================
    // Internal parsing methods
    // ========================================================================

    fn advance(&mut self) -> Result<Token, ParseError> {
        let prev = std::mem::replace(&mut self.current, Token::Eof);
        // Capture position of the next token before fetching it
        self.line = self.lexer.line();
        self.column = self.lexer.column();
        self.current = self.lexer.next_token()?;
        Ok(prev)
    }

    fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            line: self.line,
            column: self.column,
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ParseError> {
        if &self.current == expected {
            self.advance()?;
            Ok(())
        } else if matches!(self.current, Token::Eof) {
            Err(self.error(format!("EOF while reading, expected {:?}", expected)))
        } else {
            Err(self.error(format!("Expected {:?}, found {:?}", expected, self.current)))
        }
    }

    fn parse_form(&mut self) -> Result<TarnVal, ParseError> {
        match &self.current {
            // Literals
            Token::Nil => {
                self.advance()?;
                Ok(TarnVal::nil())
            }
            Token::True => {
                self.advance()?;
                Ok(TarnVal::bool(true))
            }
            Token::False => {
                self.advance()?;
                Ok(TarnVal::bool(false))
            }
            Token::Int(n) => {
                let n = *n;
                self.advance()?;
                Ok(TarnVal::int(n))
            }
            Token::Float(n) => {
                let n = *n;
                self.advance()?;
                Ok(TarnVal::float(n))
            }
            Token::String(s) => {
                let s = s.clone();
                self.advance()?;
                Ok(TarnVal::string(s))
            }
            Token::Symbol(s) => {
                let s = s.clone();
                self.advance()?;
                Ok(TarnVal::symbol(Symbol::new(&s)))
            }
            Token::Keyword(s) => {
                let s = s.clone();
                self.advance()?;
                Ok(TarnVal::keyword(Keyword::new(&s)))
            }

            // Collections
            Token::LParen => self.parse_list(),
            Token::LBracket => self.parse_vector(),
            Token::LBrace => self.parse_map(),

            // Reader macros
            Token::Quote => self.parse_quote("quote"),
            Token::Quasiquote => self.parse_quote("quasiquote"),
            Token::Unquote => self.parse_quote("unquote"),
            Token::SpliceUnquote => self.parse_quote("splice-unquote"),
            Token::Deref => self.parse_quote("deref"),
            Token::Meta => self.parse_meta(),

            // Unexpected tokens
            Token::RParen => Err(self.error("Unexpected ')'".to_string())),
            Token::RBracket => Err(self.error("Unexpected ']'".to_string())),
            Token::RBrace => Err(self.error("Unexpected '}'".to_string())),
            Token::Eof => Err(self.error("EOF while reading".to_string())),
        }
    }

    fn parse_list(&mut self) -> Result<TarnVal, ParseError> {
        self.advance()?; // consume (
        let mut elements = Vec::new();

        while !matches!(self.current, Token::RParen | Token::Eof) {
            elements.push(self.parse_form()?);
        }

        self.expect(&Token::RParen)?;
        Ok(TarnVal::list(elements))
    }

    fn parse_vector(&mut self) -> Result<TarnVal, ParseError> {
        self.advance()?; // consume [
        let mut elements = Vec::new();

        while !matches!(self.current, Token::RBracket | Token::Eof) {
            elements.push(self.parse_form()?);
        }

        self.expect(&Token::RBracket)?;
        Ok(TarnVal::vector(elements))
    }

    fn parse_map(&mut self) -> Result<TarnVal, ParseError> {
        self.advance()?; // consume {
        let mut pairs = Vec::new();

        while !matches!(self.current, Token::RBrace | Token::Eof) {
            let key = self.parse_form()?;
            if matches!(self.current, Token::RBrace | Token::Eof) {
                return Err(
                    self.error("Map literal must contain an even number of forms".to_string())
                );
            }
            let value = self.parse_form()?;
            pairs.push((key, value));
        }

        self.expect(&Token::RBrace)?;
        Ok(TarnVal::map(pairs))
    }

    fn parse_quote(&mut self, name: &str) -> Result<TarnVal, ParseError> {
        self.advance()?; // consume the quote token
        let form = self.parse_form()?;
        Ok(TarnVal::list(vec![
            TarnVal::symbol(Symbol::new(name)),
            form,
        ]))
    }

    /// `^meta form` reads as `(with-meta form meta)`: the metadata form
    /// comes first in the source but second in the expansion.
    fn parse_meta(&mut self) -> Result<TarnVal, ParseError> {
        self.advance()?; // consume ^
        let meta = self.parse_form()?;
        let form = self.parse_form()?;
        Ok(TarnVal::list(vec![
            TarnVal::symbol(Symbol::new("with-meta")),
            form,
            meta,
        ]))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> TarnVal {
        Parser::parse_str(s)
            .expect("parse failed")
            .expect("empty input")
    }

    #[test]
    fn test_literals() {
        assert_eq!(parse("nil"), TarnVal::Nil);
        assert_eq!(parse("true"), TarnVal::Bool(true));
        assert_eq!(parse("false"), TarnVal::Bool(false));
        assert_eq!(parse("42"), TarnVal::Int(42));
        assert_eq!(parse("-17"), TarnVal::Int(-17));
        assert_eq!(parse("2.5"), TarnVal::Float(2.5));
        assert_eq!(parse("\"hello\""), TarnVal::string("hello"));
        assert_eq!(parse("foo"), TarnVal::sym("foo"));
        assert_eq!(parse(":kw"), TarnVal::keyword(Keyword::new("kw")));
    }

    #[test]
    fn test_list() {
        assert_eq!(
            parse("(+ 1 2)"),
            TarnVal::list(vec![TarnVal::sym("+"), TarnVal::Int(1), TarnVal::Int(2)])
        );
        assert_eq!(parse("()"), TarnVal::empty_list());
    }

    #[test]
    fn test_vector() {
        assert_eq!(
            parse("[1 2 3]"),
            TarnVal::vector(vec![TarnVal::Int(1), TarnVal::Int(2), TarnVal::Int(3)])
        );
    }

    #[test]
    fn test_map() {
        assert_eq!(
            parse("{:a 1 :b 2}"),
            TarnVal::map(vec![
                (TarnVal::keyword(Keyword::new("a")), TarnVal::Int(1)),
                (TarnVal::keyword(Keyword::new("b")), TarnVal::Int(2)),
            ])
        );
    }

    #[test]
    fn test_map_odd_forms() {
        let err = Parser::parse_str("{:a 1 :b}").unwrap_err();
        assert!(err.message.contains("even number of forms"));
    }

    #[test]
    fn test_nested() {
        assert_eq!(
            parse("(a [b {:c 1}])"),
            TarnVal::list(vec![
                TarnVal::sym("a"),
                TarnVal::vector(vec![
                    TarnVal::sym("b"),
                    TarnVal::map(vec![(
                        TarnVal::keyword(Keyword::new("c")),
                        TarnVal::Int(1)
                    )]),
                ]),
            ])
        );
    }

    #[test]
    fn test_quote_shorthand() {
        assert_eq!(
            parse("'x"),
            TarnVal::list(vec![TarnVal::sym("quote"), TarnVal::sym("x")])
        );
        assert_eq!(
            parse("`x"),
            TarnVal::list(vec![TarnVal::sym("quasiquote"), TarnVal::sym("x")])
        );
        assert_eq!(
            parse("~x"),
            TarnVal::list(vec![TarnVal::sym("unquote"), TarnVal::sym("x")])
        );
        assert_eq!(
            parse("~@x"),
            TarnVal::list(vec![TarnVal::sym("splice-unquote"), TarnVal::sym("x")])
        );
        assert_eq!(
            parse("@a"),
            TarnVal::list(vec![TarnVal::sym("deref"), TarnVal::sym("a")])
        );
    }

    #[test]
    fn test_meta_shorthand() {
        assert_eq!(
            parse("^:tag [1]"),
            TarnVal::list(vec![
                TarnVal::sym("with-meta"),
                TarnVal::vector(vec![TarnVal::Int(1)]),
                TarnVal::keyword(Keyword::new("tag")),
            ])
        );
    }

    #[test]
    fn test_unbalanced() {
        assert!(Parser::parse_str("(1 2").is_err());
        assert!(Parser::parse_str("[1 2").is_err());
        assert!(Parser::parse_str("{:a 1").is_err());
        assert!(Parser::parse_str(")").is_err());
    }

    #[test]
    fn test_parse_all() {
        let forms = Parser::parse_all_str("1 2 3").unwrap();
        assert_eq!(
            forms,
            vec![TarnVal::Int(1), TarnVal::Int(2), TarnVal::Int(3)]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Parser::parse_str("").unwrap(), None);
        assert_eq!(Parser::parse_str("  ; just a comment").unwrap(), None);
    }

    #[test]
    fn test_error_position() {
        let err = Parser::parse_str("(1\n2").unwrap_err();
        assert_eq!(err.line, 2);
    }
}

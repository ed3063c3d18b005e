// tarn-parser - Lexer for Tarn
// Copyright (c) 2026 Tarn contributors. MIT licensed.

//! Lexer (tokeniser) for Tarn source code.
//!
//! Converts a source string into a stream of tokens. Commas count as
//! whitespace and `;` comments run to end of line.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Delimiters
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    LBrace,   // {
    RBrace,   // }

    // Reader macros
    Quote,         // '
    Quasiquote,    // `
    Unquote,       // ~
    SpliceUnquote, // ~@
    Deref,         // @
    Meta,          // ^

    // Literals
    Nil,
    True,
    False,
    Int(i64),
    Float(f64),
    String(String),
    Symbol(String),
    Keyword(String),

    // Special
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Quote => write!(f, "'"),
            Token::Quasiquote => write!(f, "`"),
            Token::Unquote => write!(f, "~"),
            Token::SpliceUnquote => write!(f, "~@"),
            Token::Deref => write!(f, "@"),
            Token::Meta => write!(f, "^"),
            Token::Nil => write!(f, "nil"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Int(n) => write!(f, "{}", n),
            Token::Float(n) => write!(f, "{}", n),
            Token::String(s) => write!(f, "\"{}\"", s),
            Token::Symbol(s) => write!(f, "{}", s),
            Token::Keyword(s) => write!(f, ":{}", s),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// Lexer error with position information.
#[derive(Debug, Clone)]
pub struct LexerError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at {}:{}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for LexerError {}

/// The lexer converts source code into tokens.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Lexer {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token from the source.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace_and_comments();

        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        match c {
            // Delimiters
            '(' => {
                self.advance();
                Ok(Token::LParen)
            }
            ')' => {
                self.advance();
                Ok(Token::RParen)
            }
            '[' => {
                self.advance();
                Ok(Token::LBracket)
            }
            ']' => {
                self.advance();
                Ok(Token::RBracket)
            }
            '{' => {
                self.advance();
                Ok(Token::LBrace)
            }
            '}' => {
                self.advance();
                Ok(Token::RBrace)
            }

            // Reader macros
            '\'' => {
                self.advance();
                Ok(Token::Quote)
            }
            '`' => {
                self.advance();
                Ok(Token::Quasiquote)
            }
            '~' => {
                self.advance();
                if self.peek() == Some('@') {
                    self.advance();
                    Ok(Token::SpliceUnquote)
                } else {
                    Ok(Token::Unquote)
                }
            }
            '@' => {
                self.advance();
                Ok(Token::Deref)
            }
            '^' => {
                self.advance();
                Ok(Token::Meta)
            }

            // String
            '"' => self.read_string(),

            // Keyword
            ':' => self.read_keyword(),

            // Atom (number, nil, true, false, or symbol)
            _ => self.read_atom(),
        }
    }

    /// Collect all tokens into a vector.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if matches!(token, Token::Eof) {
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Get the current line number (1-indexed).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the current column number (1-indexed).
    pub fn column(&self) -> usize {
        self.column
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        c
    }

    fn error(&self, message: String) -> LexerError {
        LexerError {
            message,
            line: self.line,
            column: self.column,
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() || c == ',' => {
                    self.advance();
                }
                Some(';') => {
                    // Skip to end of line
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn read_string(&mut self) -> Result<Token, LexerError> {
        self.advance(); // consume opening "
        let mut s = String::new();

        loop {
            match self.advance() {
                Some('"') => break,
                Some('\\') => match self.advance() {
                    Some('"') => s.push('"'),
                    Some('\\') => s.push('\\'),
                    Some('n') => s.push('\n'),
                    Some(c) => {
                        // Unknown escapes pass through unchanged
                        s.push('\\');
                        s.push(c);
                    }
                    None => return Err(self.error("Unterminated string".to_string())),
                },
                Some(c) => s.push(c),
                None => return Err(self.error("Unterminated string".to_string())),
            }
        }

        Ok(Token::String(s))
    }

    fn read_keyword(&mut self) -> Result<Token, LexerError> {
        self.advance(); // consume :

        let mut name = String::new();
        while let Some(c) = self.peek() {
            if is_atom_char(c) {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if name.is_empty() {
            return Err(self.error("Expected keyword name after :".to_string()));
        }

        Ok(Token::Keyword(name))
    }

    /// Read a maximal run of atom characters, then classify it as a
    /// number, a reserved word, or a symbol.
    fn read_atom(&mut self) -> Result<Token, LexerError> {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if is_atom_char(c) {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if s.is_empty() {
            let c = self.peek().unwrap_or(' ');
            return Err(self.error(format!("Unexpected character: '{}'", c)));
        }

        match s.as_str() {
            "nil" => Ok(Token::Nil),
            "true" => Ok(Token::True),
            "false" => Ok(Token::False),
            _ => Ok(classify_atom(&s)),
        }
    }
}

/// Classify a non-reserved atom as Int, Float or Symbol.
///
/// An atom is numeric only if it starts with a digit, or a sign followed
/// by a digit. This keeps symbols like `-`, `+` and `inf` out of the
/// number path (`f64::from_str` would happily parse "inf").
fn classify_atom(s: &str) -> Token {
    let mut chars = s.chars();
    let first = chars.next().unwrap_or(' ');
    let numeric_start = first.is_ascii_digit()
        || ((first == '-' || first == '+') && chars.next().is_some_and(|c| c.is_ascii_digit()));

    if numeric_start {
        if let Ok(n) = s.parse::<i64>() {
            return Token::Int(n);
        }
        if let Ok(n) = s.parse::<f64>() {
            return Token::Float(n);
        }
    }
    Token::Symbol(s.to_string())
}

/// Check if a character can appear in an atom (symbol, keyword or number).
///
/// Everything is allowed except whitespace, the comma, the delimiters,
/// and the quote/comment characters.
fn is_atom_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, ',' | '(' | ')' | '[' | ']' | '{' | '}' | '\'' | '"' | '`' | ';')
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(s: &str) -> Result<Vec<Token>, LexerError> {
        Lexer::new(s).tokenize()
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(
            tokenize("()[]{}").unwrap(),
            vec![
                Token::LParen,
                Token::RParen,
                Token::LBracket,
                Token::RBracket,
                Token::LBrace,
                Token::RBrace,
            ]
        );
    }

    #[test]
    fn test_reader_macros() {
        assert_eq!(
            tokenize("' ` ~ ~@ @ ^").unwrap(),
            vec![
                Token::Quote,
                Token::Quasiquote,
                Token::Unquote,
                Token::SpliceUnquote,
                Token::Deref,
                Token::Meta,
            ]
        );
    }

    #[test]
    fn test_nil_and_booleans() {
        assert_eq!(
            tokenize("nil true false").unwrap(),
            vec![Token::Nil, Token::True, Token::False,]
        );
    }

    #[test]
    fn test_integers() {
        assert_eq!(
            tokenize("0 1 42 -1 +5").unwrap(),
            vec![
                Token::Int(0),
                Token::Int(1),
                Token::Int(42),
                Token::Int(-1),
                Token::Int(5),
            ]
        );
    }

    #[test]
    fn test_floats() {
        assert_eq!(
            tokenize("0.0 3.14 -2.5 1e10").unwrap(),
            vec![
                Token::Float(0.0),
                Token::Float(3.14),
                Token::Float(-2.5),
                Token::Float(1e10),
            ]
        );
    }

    #[test]
    fn test_digit_prefixed_symbol() {
        // Not parseable as a number, so it stays a symbol
        assert_eq!(
            tokenize("1abc").unwrap(),
            vec![Token::Symbol("1abc".to_string())]
        );
    }

    #[test]
    fn test_inf_is_a_symbol() {
        assert_eq!(
            tokenize("inf NaN").unwrap(),
            vec![
                Token::Symbol("inf".to_string()),
                Token::Symbol("NaN".to_string()),
            ]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            tokenize(r#""""#).unwrap(),
            vec![Token::String("".to_string())]
        );
        assert_eq!(
            tokenize(r#""hello""#).unwrap(),
            vec![Token::String("hello".to_string())]
        );
        assert_eq!(
            tokenize(r#""hello\nworld""#).unwrap(),
            vec![Token::String("hello\nworld".to_string())]
        );
        assert_eq!(
            tokenize(r#""quote\" slash\\""#).unwrap(),
            vec![Token::String("quote\" slash\\".to_string())]
        );
    }

    #[test]
    fn test_unknown_escape_passes_through() {
        assert_eq!(
            tokenize(r#""tab\there""#).unwrap(),
            vec![Token::String("tab\\there".to_string())]
        );
    }

    #[test]
    fn test_unterminated_string() {
        assert!(tokenize(r#""open"#).is_err());
        assert!(tokenize(r#""trailing\"#).is_err());
    }

    #[test]
    fn test_symbols() {
        assert_eq!(
            tokenize("foo bar my-symbol + - * / <= !=").unwrap(),
            vec![
                Token::Symbol("foo".to_string()),
                Token::Symbol("bar".to_string()),
                Token::Symbol("my-symbol".to_string()),
                Token::Symbol("+".to_string()),
                Token::Symbol("-".to_string()),
                Token::Symbol("*".to_string()),
                Token::Symbol("/".to_string()),
                Token::Symbol("<=".to_string()),
                Token::Symbol("!=".to_string()),
            ]
        );
    }

    #[test]
    fn test_non_ascii_atom_characters() {
        // Any non-delimiter character joins the atom run
        assert_eq!(
            tokenize("λ (héllo)").unwrap(),
            vec![
                Token::Symbol("λ".to_string()),
                Token::LParen,
                Token::Symbol("héllo".to_string()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            tokenize(":foo :my-key").unwrap(),
            vec![
                Token::Keyword("foo".to_string()),
                Token::Keyword("my-key".to_string()),
            ]
        );
    }

    #[test]
    fn test_commas_as_whitespace() {
        assert_eq!(
            tokenize("[1, 2, 3]").unwrap(),
            vec![
                Token::LBracket,
                Token::Int(1),
                Token::Int(2),
                Token::Int(3),
                Token::RBracket,
            ]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            tokenize("1 ; comment\n2").unwrap(),
            vec![Token::Int(1), Token::Int(2),]
        );
    }

    #[test]
    fn test_line_tracking() {
        let mut lexer = Lexer::new("1\n  2");
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        assert_eq!(lexer.line(), 2);
    }

    #[test]
    fn test_complex_expression() {
        let tokens = tokenize("(def! inc (fn* [x] (+ x 1)))").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LParen,
                Token::Symbol("def!".to_string()),
                Token::Symbol("inc".to_string()),
                Token::LParen,
                Token::Symbol("fn*".to_string()),
                Token::LBracket,
                Token::Symbol("x".to_string()),
                Token::RBracket,
                Token::LParen,
                Token::Symbol("+".to_string()),
                Token::Symbol("x".to_string()),
                Token::Int(1),
                Token::RParen,
                Token::RParen,
                Token::RParen,
            ]
        );
    }
}

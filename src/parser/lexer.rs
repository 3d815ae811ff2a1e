//! Lexer (tokenizer) for cycy source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Whitespace and comments are dropped; literal escapes are decoded here so the
//! parser only ever sees final character values.

use super::ast::SourceLocation;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Token kinds produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    IntLiteral(i32),
    CharLiteral(char),
    StringLiteral(String),

    // Identifiers
    Ident(String),

    // Keywords
    Int,
    Const,
    Char,
    Void,
    While,
    Return,
    Null,

    // Arithmetic
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    // Comparison
    EqEq,  // ==
    NotEq, // !=
    Lt,    // <
    Le,    // <=
    Gt,    // >
    Ge,    // >=

    // Assignment
    Eq, // =

    // Increment/Decrement
    PlusPlus,   // ++
    MinusMinus, // --

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Semicolon, // ;
    Comma,     // ,

    // End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::IntLiteral(n) => write!(f, "int literal {}", n),
            TokenKind::CharLiteral(c) => write!(f, "char literal {:?}", c),
            TokenKind::StringLiteral(s) => write!(f, "string literal {:?}", s),
            TokenKind::Ident(s) => write!(f, "identifier '{}'", s),
            TokenKind::Int => write!(f, "'int'"),
            TokenKind::Const => write!(f, "'const'"),
            TokenKind::Char => write!(f, "'char'"),
            TokenKind::Void => write!(f, "'void'"),
            TokenKind::While => write!(f, "'while'"),
            TokenKind::Return => write!(f, "'return'"),
            TokenKind::Null => write!(f, "'NULL'"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Percent => write!(f, "'%'"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::NotEq => write!(f, "'!='"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Le => write!(f, "'<='"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::Ge => write!(f, "'>='"),
            TokenKind::Eq => write!(f, "'='"),
            TokenKind::PlusPlus => write!(f, "'++'"),
            TokenKind::MinusMinus => write!(f, "'--'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A token together with the location of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("{location}: unexpected character {ch:?}")]
    UnexpectedCharacter { ch: char, location: SourceLocation },

    #[error("{location}: unterminated string literal")]
    UnterminatedString { location: SourceLocation },

    #[error("{location}: unterminated character literal")]
    UnterminatedChar { location: SourceLocation },

    #[error("{location}: unterminated block comment")]
    UnterminatedComment { location: SourceLocation },

    #[error("{location}: empty character literal")]
    EmptyCharLiteral { location: SourceLocation },

    #[error("{location}: character literal contains more than one character")]
    MultiCharLiteral { location: SourceLocation },

    #[error("{location}: unknown escape sequence '\\{escape}'")]
    UnknownEscape { escape: char, location: SourceLocation },

    #[error("{location}: integer literal {literal} does not fit in 32 bits")]
    IntegerOverflow {
        literal: String,
        location: SourceLocation,
    },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::UnexpectedCharacter { location, .. }
            | LexError::UnterminatedString { location }
            | LexError::UnterminatedChar { location }
            | LexError::UnterminatedComment { location }
            | LexError::EmptyCharLiteral { location }
            | LexError::MultiCharLiteral { location }
            | LexError::UnknownEscape { location, .. }
            | LexError::IntegerOverflow { location, .. } => *location,
        }
    }
}

fn keywords() -> &'static FxHashMap<&'static str, TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        [
            ("int", TokenKind::Int),
            ("const", TokenKind::Const),
            ("char", TokenKind::Char),
            ("void", TokenKind::Void),
            ("while", TokenKind::While),
            ("return", TokenKind::Return),
            ("NULL", TokenKind::Null),
        ]
        .into_iter()
        .collect()
    })
}

/// Lexer for cycy source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    /// Byte offset of `input[position]` in the original source
    byte_offset: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            byte_offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input. The result always ends with a single `Eof`.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::Eof, self.current_location()));
                break;
            }

            tokens.push(self.next_token()?);
        }

        log::trace!("lexed {} tokens", tokens.len());
        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let Some(ch) = self.advance() else {
            return Ok(Token::new(TokenKind::Eof, loc));
        };

        let kind = match ch {
            '"' => self.string_literal(loc)?,
            '\'' => self.char_literal(loc)?,
            '0'..='9' => self.number_literal(ch, loc)?,
            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(ch),

            '+' => self.either('+', TokenKind::PlusPlus, TokenKind::Plus),
            '-' => self.either('-', TokenKind::MinusMinus, TokenKind::Minus),
            '=' => self.either('=', TokenKind::EqEq, TokenKind::Eq),
            '<' => self.either('=', TokenKind::Le, TokenKind::Lt),
            '>' => self.either('=', TokenKind::Ge, TokenKind::Gt),
            '!' if self.peek() == Some('=') => {
                self.advance();
                TokenKind::NotEq
            }
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,

            _ => return Err(LexError::UnexpectedCharacter { ch, location: loc }),
        };

        Ok(Token::new(kind, loc))
    }

    /// Maximal munch for two-character operators
    fn either(&mut self, second: char, long: TokenKind, short: TokenKind) -> TokenKind {
        if self.peek() == Some(second) {
            self.advance();
            long
        } else {
            short
        }
    }

    /// Parse string literal; the opening quote is already consumed
    fn string_literal(&mut self, loc: SourceLocation) -> Result<TokenKind, LexError> {
        let mut string = String::new();

        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(LexError::UnterminatedString { location: loc });
                }
                Some('"') => {
                    self.advance();
                    return Ok(TokenKind::StringLiteral(string));
                }
                Some('\\') => {
                    self.advance();
                    string.push(self.escape(LexError::UnterminatedString { location: loc })?);
                }
                Some(ch) => {
                    self.advance();
                    string.push(ch);
                }
            }
        }
    }

    /// Parse character literal; the opening quote is already consumed
    fn char_literal(&mut self, loc: SourceLocation) -> Result<TokenKind, LexError> {
        let value = match self.peek() {
            None | Some('\n') => return Err(LexError::UnterminatedChar { location: loc }),
            Some('\'') => {
                self.advance();
                return Err(LexError::EmptyCharLiteral { location: loc });
            }
            Some('\\') => {
                self.advance();
                self.escape(LexError::UnterminatedChar { location: loc })?
            }
            Some(ch) => {
                self.advance();
                ch
            }
        };

        match self.peek() {
            Some('\'') => {
                self.advance();
                Ok(TokenKind::CharLiteral(value))
            }
            None | Some('\n') => Err(LexError::UnterminatedChar { location: loc }),
            Some(_) => Err(LexError::MultiCharLiteral { location: loc }),
        }
    }

    /// Decode the character after a backslash
    fn escape(&mut self, unterminated: LexError) -> Result<char, LexError> {
        let location = self.current_location();
        let escaped = self.advance().ok_or(unterminated)?;

        match escaped {
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            '0' => Ok('\0'),
            '\\' => Ok('\\'),
            '\'' => Ok('\''),
            '"' => Ok('"'),
            _ => Err(LexError::UnknownEscape {
                escape: escaped,
                location,
            }),
        }
    }

    /// Parse numeric literal (decimal integers only)
    fn number_literal(
        &mut self,
        first_digit: char,
        loc: SourceLocation,
    ) -> Result<TokenKind, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);

        while let Some(ch) = self.peek().filter(char::is_ascii_digit) {
            num_str.push(ch);
            self.advance();
        }

        // Only digits were collected, so the sole failure mode is overflow.
        let value = num_str
            .parse::<i32>()
            .map_err(|_| LexError::IntegerOverflow {
                literal: num_str.clone(),
                location: loc,
            })?;

        Ok(TokenKind::IntLiteral(value))
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char) -> TokenKind {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match keywords().get(ident.as_str()) {
            Some(keyword) => keyword.clone(),
            None => TokenKind::Ident(ident),
        }
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') if self.peek_ahead(1) == Some('/') => self.skip_line_comment(),
                Some('/') if self.peek_ahead(1) == Some('*') => self.skip_block_comment()?,
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.advance() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return Ok(());
            }
            self.advance();
        }

        Err(LexError::UnterminatedComment {
            location: start_loc,
        })
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;
        self.byte_offset += ch.len_utf8();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.byte_offset, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        assert_eq!(
            kinds("int main(void) { return 0; }"),
            vec![
                TokenKind::Int,
                TokenKind::Ident("main".to_string()),
                TokenKind::LParen,
                TokenKind::Void,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::Return,
                TokenKind::IntLiteral(0),
                TokenKind::Semicolon,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators_maximal_munch() {
        assert_eq!(
            kinds("++ + -- - == = != <= < >= >"),
            vec![
                TokenKind::PlusPlus,
                TokenKind::Plus,
                TokenKind::MinusMinus,
                TokenKind::Minus,
                TokenKind::EqEq,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::Le,
                TokenKind::Lt,
                TokenKind::Ge,
                TokenKind::Gt,
                TokenKind::Eof,
            ]
        );
        // `i+++1` is `i ++ + 1`, never `i + ++1`
        assert_eq!(
            kinds("i+++1"),
            vec![
                TokenKind::Ident("i".to_string()),
                TokenKind::PlusPlus,
                TokenKind::Plus,
                TokenKind::IntLiteral(1),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(
            kinds("NULL null Int while_"),
            vec![
                TokenKind::Null,
                TokenKind::Ident("null".to_string()),
                TokenKind::Ident("Int".to_string()),
                TokenKind::Ident("while_".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments() {
        let tokens = kinds("int x; // comment\nint y; /* block\ncomment */ int z;");
        assert_eq!(tokens.len(), 10);
        assert_eq!(tokens[6], TokenKind::Int);
        assert_eq!(tokens[7], TokenKind::Ident("z".to_string()));
    }

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(
            kinds(r#""hello\n\"world\"""#),
            vec![
                TokenKind::StringLiteral("hello\n\"world\"".to_string()),
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds(r#""""#),
            vec![TokenKind::StringLiteral(String::new()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(
            kinds(r"'c' '\n' '\0' '\''"),
            vec![
                TokenKind::CharLiteral('c'),
                TokenKind::CharLiteral('\n'),
                TokenKind::CharLiteral('\0'),
                TokenKind::CharLiteral('\''),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_locations() {
        let tokens = Lexer::new("int\n  x;").tokenize().unwrap();
        assert_eq!(tokens[0].location, SourceLocation::new(0, 1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(6, 2, 3));
        assert_eq!(tokens[2].location, SourceLocation::new(7, 2, 4));
    }

    #[test]
    fn test_offsets_are_bytes() {
        let source = "\"héllo\" x";
        let tokens = Lexer::new(source).tokenize().unwrap();

        assert_eq!(tokens[1].kind, TokenKind::Ident("x".to_string()));
        assert_eq!(tokens[1].location, SourceLocation::new(9, 1, 9));
        assert_eq!(&source[tokens[1].location.offset..], "x");
        assert_eq!(tokens[2].location.offset, source.len());
    }

    #[test]
    fn test_integer_bounds() {
        assert_eq!(
            kinds("2147483647"),
            vec![TokenKind::IntLiteral(i32::MAX), TokenKind::Eof]
        );
        let err = Lexer::new("2147483648").tokenize().unwrap_err();
        assert!(matches!(
            err,
            LexError::IntegerOverflow { ref literal, .. } if literal == "2147483648"
        ));
    }

    #[test]
    fn test_lex_errors() {
        let err = |s: &str| Lexer::new(s).tokenize().unwrap_err();

        assert!(matches!(err("''"), LexError::EmptyCharLiteral { .. }));
        assert!(matches!(err("'ab'"), LexError::MultiCharLiteral { .. }));
        assert!(matches!(err("'a"), LexError::UnterminatedChar { .. }));
        assert!(matches!(err("\"abc"), LexError::UnterminatedString { .. }));
        assert!(matches!(err("\"ab\ncd\""), LexError::UnterminatedString { .. }));
        assert!(matches!(err("/* never closed"), LexError::UnterminatedComment { .. }));
        assert!(matches!(err(r"'\q'"), LexError::UnknownEscape { escape: 'q', .. }));
        assert!(matches!(err("x @ y"), LexError::UnexpectedCharacter { ch: '@', .. }));
        assert!(matches!(err("!x"), LexError::UnexpectedCharacter { ch: '!', .. }));
    }

    #[test]
    fn test_error_location() {
        let err = Lexer::new("int x;\n  $").tokenize().unwrap_err();
        assert_eq!(err.location(), SourceLocation::new(9, 2, 3));
        assert_eq!(err.to_string(), "line 2, column 3: unexpected character '$'");
    }
}

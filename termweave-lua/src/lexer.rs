//! Tokenizer for the configuration scripting dialect.
//!
//! Lexes the full token set of the dialect, including operators the
//! parser does not evaluate, so that unsupported statements can still be
//! walked past and captured verbatim. The only fatal conditions here are
//! unterminated strings and unterminated block comments.

use crate::error::LuaError;

/// Reserved words recognized by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Local,
    Return,
    True,
    False,
    Nil,
    Function,
    End,
    If,
    Then,
    Else,
    Elseif,
    For,
    While,
    Do,
    Repeat,
    Until,
    In,
    Not,
    And,
    Or,
    Break,
}

impl Keyword {
    fn from_str(word: &str) -> Option<Self> {
        Some(match word {
            "local" => Keyword::Local,
            "return" => Keyword::Return,
            "true" => Keyword::True,
            "false" => Keyword::False,
            "nil" => Keyword::Nil,
            "function" => Keyword::Function,
            "end" => Keyword::End,
            "if" => Keyword::If,
            "then" => Keyword::Then,
            "else" => Keyword::Else,
            "elseif" => Keyword::Elseif,
            "for" => Keyword::For,
            "while" => Keyword::While,
            "do" => Keyword::Do,
            "repeat" => Keyword::Repeat,
            "until" => Keyword::Until,
            "in" => Keyword::In,
            "not" => Keyword::Not,
            "and" => Keyword::And,
            "or" => Keyword::Or,
            "break" => Keyword::Break,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Keyword(Keyword),
    /// String literal with escapes already resolved.
    Str(String),
    Number(f64),
    Eq,
    Dot,
    Comma,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Concat,
    Minus,
    Hash,
    /// Any other operator or punctuation. Lexed so unsupported statements
    /// can be skipped over, never evaluated.
    Op(String),
}

/// A token with its line and byte span in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, LuaError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    fn run(mut self) -> Result<Vec<Token>, LuaError> {
        let mut tokens = Vec::new();
        while let Some(byte) = self.peek() {
            match byte {
                b' ' | b'\t' | b'\r' => {
                    self.pos += 1;
                }
                b'\n' => {
                    self.pos += 1;
                    self.line += 1;
                }
                b'-' if self.peek_at(1) == Some(b'-') => {
                    self.skip_comment()?;
                }
                _ => {
                    let token = self.next_token()?;
                    tokens.push(token);
                }
            }
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn skip_comment(&mut self) -> Result<(), LuaError> {
        let start_line = self.line;
        self.pos += 2;
        // Block comment: --[[ or --[=[ etc.
        if self.peek() == Some(b'[') {
            if let Some(level) = self.long_bracket_level() {
                self.consume_long_bracket(level, start_line, "block comment")?;
                return Ok(());
            }
        }
        while let Some(byte) = self.peek() {
            if byte == b'\n' {
                break;
            }
            self.pos += 1;
        }
        Ok(())
    }

    /// Checks for `[`, `[=`, `[==`, ... followed by `[` at the current
    /// position. Returns the `=` count without consuming on a miss.
    fn long_bracket_level(&self) -> Option<usize> {
        if self.peek() != Some(b'[') {
            return None;
        }
        let mut level = 0;
        while self.peek_at(1 + level) == Some(b'=') {
            level += 1;
        }
        if self.peek_at(1 + level) == Some(b'[') {
            Some(level)
        } else {
            None
        }
    }

    /// Consumes a `[=*[ ... ]=*]` body, returning the inner text.
    fn consume_long_bracket(
        &mut self,
        level: usize,
        start_line: usize,
        what: &str,
    ) -> Result<String, LuaError> {
        self.pos += 2 + level;
        // A newline immediately after the opening bracket is not part of
        // the content.
        if self.peek() == Some(b'\n') {
            self.pos += 1;
            self.line += 1;
        }
        let content_start = self.pos;
        loop {
            match self.peek() {
                None => {
                    return Err(LuaError::syntax(
                        start_line,
                        format!("unterminated {what}"),
                    ));
                }
                Some(b']') => {
                    let mut eqs = 0;
                    while self.peek_at(1 + eqs) == Some(b'=') {
                        eqs += 1;
                    }
                    if eqs == level && self.peek_at(1 + eqs) == Some(b']') {
                        let content = self.source[content_start..self.pos].to_string();
                        self.pos += 2 + level;
                        return Ok(content);
                    }
                    self.pos += 1;
                }
                Some(b'\n') => {
                    self.pos += 1;
                    self.line += 1;
                }
                Some(_) => {
                    self.pos += 1;
                }
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, LuaError> {
        let start = self.pos;
        let line = self.line;
        let byte = self.bytes[self.pos];

        let kind = match byte {
            b'"' | b'\'' => TokenKind::Str(self.quoted_string(byte)?),
            b'[' => {
                if let Some(level) = self.long_bracket_level() {
                    TokenKind::Str(self.consume_long_bracket(level, line, "string")?)
                } else {
                    self.pos += 1;
                    TokenKind::LBracket
                }
            }
            b'0'..=b'9' => self.number(line)?,
            b'.' => {
                if self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) {
                    self.number(line)?
                } else if self.peek_at(1) == Some(b'.') {
                    if self.peek_at(2) == Some(b'.') {
                        self.pos += 3;
                        TokenKind::Op("...".to_string())
                    } else {
                        self.pos += 2;
                        TokenKind::Concat
                    }
                } else {
                    self.pos += 1;
                    TokenKind::Dot
                }
            }
            b'=' => {
                if self.peek_at(1) == Some(b'=') {
                    self.pos += 2;
                    TokenKind::Op("==".to_string())
                } else {
                    self.pos += 1;
                    TokenKind::Eq
                }
            }
            b'~' | b'<' | b'>' => {
                if self.peek_at(1) == Some(b'=') {
                    self.pos += 2;
                    TokenKind::Op(self.source[start..self.pos].to_string())
                } else {
                    self.pos += 1;
                    TokenKind::Op(self.source[start..self.pos].to_string())
                }
            }
            b',' => {
                self.pos += 1;
                TokenKind::Comma
            }
            b'{' => {
                self.pos += 1;
                TokenKind::LBrace
            }
            b'}' => {
                self.pos += 1;
                TokenKind::RBrace
            }
            b'(' => {
                self.pos += 1;
                TokenKind::LParen
            }
            b')' => {
                self.pos += 1;
                TokenKind::RParen
            }
            b']' => {
                self.pos += 1;
                TokenKind::RBracket
            }
            b'-' => {
                self.pos += 1;
                TokenKind::Minus
            }
            b'#' => {
                self.pos += 1;
                TokenKind::Hash
            }
            b'+' | b'*' | b'/' | b'%' | b'^' | b':' | b';' => {
                self.pos += 1;
                TokenKind::Op((byte as char).to_string())
            }
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => {
                let word_start = self.pos;
                while self
                    .peek()
                    .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
                {
                    self.pos += 1;
                }
                let word = &self.source[word_start..self.pos];
                match Keyword::from_str(word) {
                    Some(keyword) => TokenKind::Keyword(keyword),
                    None => TokenKind::Ident(word.to_string()),
                }
            }
            other => {
                return Err(LuaError::syntax(
                    line,
                    format!("unexpected character `{}`", other as char),
                ));
            }
        };

        Ok(Token {
            kind,
            line,
            start,
            end: self.pos,
        })
    }

    fn quoted_string(&mut self, quote: u8) -> Result<String, LuaError> {
        let start_line = self.line;
        self.pos += 1;
        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    return Err(LuaError::syntax(start_line, "unterminated string"));
                }
                Some(byte) if byte == quote => {
                    self.pos += 1;
                    return Ok(value);
                }
                Some(b'\\') => {
                    self.pos += 1;
                    let escape = self.peek().ok_or_else(|| {
                        LuaError::syntax(start_line, "unterminated string")
                    })?;
                    match escape {
                        b'n' => {
                            value.push('\n');
                            self.pos += 1;
                        }
                        b't' => {
                            value.push('\t');
                            self.pos += 1;
                        }
                        b'r' => {
                            value.push('\r');
                            self.pos += 1;
                        }
                        b'a' => {
                            value.push('\x07');
                            self.pos += 1;
                        }
                        b'b' => {
                            value.push('\x08');
                            self.pos += 1;
                        }
                        b'f' => {
                            value.push('\x0c');
                            self.pos += 1;
                        }
                        b'v' => {
                            value.push('\x0b');
                            self.pos += 1;
                        }
                        b'\\' | b'"' | b'\'' => {
                            value.push(escape as char);
                            self.pos += 1;
                        }
                        b'\n' => {
                            value.push('\n');
                            self.pos += 1;
                            self.line += 1;
                        }
                        b'x' => {
                            self.pos += 1;
                            let mut code = 0u32;
                            let mut digits = 0;
                            while digits < 2 {
                                match self.peek().and_then(|b| (b as char).to_digit(16)) {
                                    Some(digit) => {
                                        code = code * 16 + digit;
                                        self.pos += 1;
                                        digits += 1;
                                    }
                                    None => break,
                                }
                            }
                            if digits == 0 {
                                return Err(LuaError::syntax(
                                    start_line,
                                    "malformed \\x escape",
                                ));
                            }
                            value.push(code as u8 as char);
                        }
                        b'0'..=b'9' => {
                            let mut code = 0u32;
                            let mut digits = 0;
                            while digits < 3 {
                                match self.peek().and_then(|b| (b as char).to_digit(10)) {
                                    Some(digit) => {
                                        code = code * 10 + digit;
                                        self.pos += 1;
                                        digits += 1;
                                    }
                                    None => break,
                                }
                            }
                            if code > 255 {
                                return Err(LuaError::syntax(
                                    start_line,
                                    "decimal escape out of range",
                                ));
                            }
                            value.push(code as u8 as char);
                        }
                        other => {
                            return Err(LuaError::syntax(
                                start_line,
                                format!("unknown escape `\\{}`", other as char),
                            ));
                        }
                    }
                }
                Some(_) => {
                    // Strings are UTF-8: copy whole chars, not bytes.
                    let rest = &self.source[self.pos..];
                    let ch = rest.chars().next().unwrap_or('\u{fffd}');
                    value.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
    }

    fn number(&mut self, line: usize) -> Result<TokenKind, LuaError> {
        let start = self.pos;
        if self.peek() == Some(b'0')
            && matches!(self.peek_at(1), Some(b'x') | Some(b'X'))
        {
            self.pos += 2;
            let digits_start = self.pos;
            while self.peek().is_some_and(|b| b.is_ascii_hexdigit()) {
                self.pos += 1;
            }
            if self.pos == digits_start {
                return Err(LuaError::syntax(line, "malformed hex number"));
            }
            let value = u64::from_str_radix(&self.source[digits_start..self.pos], 16)
                .map_err(|_| LuaError::syntax(line, "hex number out of range"))?;
            return Ok(TokenKind::Number(value as f64));
        }

        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.peek() == Some(b'.') && self.peek_at(1) != Some(b'.') {
            self.pos += 1;
            while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            let mut lookahead = 1;
            if matches!(self.peek_at(1), Some(b'+') | Some(b'-')) {
                lookahead = 2;
            }
            if self.peek_at(lookahead).is_some_and(|b| b.is_ascii_digit()) {
                self.pos += lookahead;
                while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
        }
        self.source[start..self.pos]
            .parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| LuaError::syntax(line, "malformed number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_basic_assignment() {
        assert_eq!(
            kinds("config.font_size = 14.0"),
            vec![
                TokenKind::Ident("config".into()),
                TokenKind::Dot,
                TokenKind::Ident("font_size".into()),
                TokenKind::Eq,
                TokenKind::Number(14.0),
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            kinds(r#"'a\nb' "q\"q" '\x41' '\65'"#),
            vec![
                TokenKind::Str("a\nb".into()),
                TokenKind::Str("q\"q".into()),
                TokenKind::Str("A".into()),
                TokenKind::Str("A".into()),
            ]
        );
    }

    #[test]
    fn test_long_string_and_block_comment() {
        let source = "--[[ ignored\nstill ignored ]] x = [[hello\nworld]]";
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::Ident("x".into()),
                TokenKind::Eq,
                TokenKind::Str("hello\nworld".into()),
            ]
        );
    }

    #[test]
    fn test_line_comment_discarded() {
        assert_eq!(
            kinds("x = 1 -- trailing\ny = 2"),
            vec![
                TokenKind::Ident("x".into()),
                TokenKind::Eq,
                TokenKind::Number(1.0),
                TokenKind::Ident("y".into()),
                TokenKind::Eq,
                TokenKind::Number(2.0),
            ]
        );
    }

    #[test]
    fn test_hex_and_negative() {
        assert_eq!(
            kinds("0xff -3"),
            vec![
                TokenKind::Number(255.0),
                TokenKind::Minus,
                TokenKind::Number(3.0),
            ]
        );
    }

    #[test]
    fn test_concat_vs_dot() {
        assert_eq!(
            kinds("a .. b"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Concat,
                TokenKind::Ident("b".into()),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_is_fatal() {
        let err = tokenize("x = 'oops").unwrap_err();
        assert!(matches!(err, LuaError::Syntax { line: 1, .. }));
    }

    #[test]
    fn test_unterminated_block_comment_is_fatal() {
        let err = tokenize("--[[ never closed\nx = 1").unwrap_err();
        assert!(matches!(err, LuaError::Syntax { line: 1, .. }));
    }

    #[test]
    fn test_line_numbers_advance() {
        let tokens = tokenize("a = 1\nb = 2\n\nc = 3").unwrap();
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, [1, 1, 1, 2, 2, 2, 4, 4, 4]);
    }

    #[test]
    fn test_foreign_operators_lex_as_op() {
        assert_eq!(
            kinds("a >= 2"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Op(">=".into()),
                TokenKind::Number(2.0),
            ]
        );
    }
}

//! Recursive-descent parser for the configuration dialect.
//!
//! Produces a flat statement list. Statements the grammar does not cover
//! are not errors: they are recorded as [`StmtKind::Opaque`] with their
//! exact source span so the evaluator can preserve them verbatim. Only
//! structurally fatal input (delimiters left open at end of input) aborts.

use crate::error::LuaError;
use crate::lexer::{Keyword, Token, TokenKind, tokenize};

/// An expression the evaluator understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
    Ident(String),
    /// Dotted reference without a call, e.g. `mod.action.Paste`.
    Path(Vec<String>),
    /// Call on a dotted callee: `mod.font("x")`, including the
    /// paren-less sugar `f "x"` and `f { ... }`.
    Call { callee: Vec<String>, args: Vec<Expr> },
    Table(Vec<TableItem>),
    Neg(Box<Expr>),
    Concat(Box<Expr>, Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableItem {
    Positional(Expr),
    Named { key: String, value: Expr },
    /// `[expr] = value` pairs.
    Keyed { key: Expr, value: Expr },
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `local NAME = expr`
    Local { name: String, value: Expr },
    /// `IDENT(.field)+ = expr`
    Assign { target: Vec<String>, value: Expr },
    /// `return IDENT`
    Return { name: String },
    /// A bare call used as a statement.
    ExprStmt(Expr),
    /// Anything outside the grammar, kept verbatim.
    Opaque,
}

/// A statement with its line and exact byte span in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

pub fn parse(source: &str) -> Result<Vec<Stmt>, LuaError> {
    let tokens = tokenize(source)?;
    Parser::new(tokens).run()
}

/// Recoverable inability to parse an expression or statement. The caller
/// degrades the enclosing statement to opaque; never surfaces to users.
struct Unsupported;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn run(mut self) -> Result<Vec<Stmt>, LuaError> {
        let mut stmts = Vec::new();
        while self.pos < self.tokens.len() {
            stmts.push(self.statement()?);
        }
        Ok(stmts)
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn peek_at(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Result<String, Unsupported> {
        match self.peek() {
            Some(TokenKind::Ident(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(Unsupported),
        }
    }

    fn statement(&mut self) -> Result<Stmt, LuaError> {
        let start_pos = self.pos;
        let first = &self.tokens[start_pos];
        let line = first.line;
        let start = first.start;

        let parsed = self.try_statement();
        match parsed {
            Ok(kind) => {
                let last = &self.tokens[self.pos - 1];
                let end = last.end;
                let last_line = last.line;
                // Optional statement separator.
                let terminated = self.eat(&TokenKind::Op(";".to_string()));
                // Leftover tokens on the same line mean the expression
                // continued past what the grammar covers (e.g. `base + 2`);
                // the whole statement is then kept verbatim instead.
                if !terminated
                    && self
                        .tokens
                        .get(self.pos)
                        .is_some_and(|next| next.line == last_line)
                {
                    self.pos = start_pos;
                    let end = self.skip_statement(line)?;
                    return Ok(Stmt {
                        kind: StmtKind::Opaque,
                        line,
                        start,
                        end,
                    });
                }
                Ok(Stmt {
                    kind,
                    line,
                    start,
                    end,
                })
            }
            Err(Unsupported) => {
                self.pos = start_pos;
                let end = self.skip_statement(line)?;
                Ok(Stmt {
                    kind: StmtKind::Opaque,
                    line,
                    start,
                    end,
                })
            }
        }
    }

    fn try_statement(&mut self) -> Result<StmtKind, Unsupported> {
        match self.peek() {
            Some(TokenKind::Keyword(Keyword::Local)) => {
                self.pos += 1;
                let name = self.ident()?;
                if !self.eat(&TokenKind::Eq) {
                    return Err(Unsupported);
                }
                let value = self.expr()?;
                Ok(StmtKind::Local { name, value })
            }
            Some(TokenKind::Keyword(Keyword::Return)) => {
                self.pos += 1;
                let name = self.ident()?;
                if self.pos < self.tokens.len() {
                    // `return expr, expr` or anything trailing is
                    // outside the grammar.
                    return Err(Unsupported);
                }
                Ok(StmtKind::Return { name })
            }
            Some(TokenKind::Ident(_)) => {
                let path = self.dotted_path()?;
                match self.peek() {
                    Some(TokenKind::Eq) if path.len() >= 2 => {
                        self.pos += 1;
                        let value = self.expr()?;
                        Ok(StmtKind::Assign {
                            target: path,
                            value,
                        })
                    }
                    Some(TokenKind::LParen)
                    | Some(TokenKind::Str(_))
                    | Some(TokenKind::LBrace) => {
                        let args = self.call_args()?;
                        Ok(StmtKind::ExprStmt(Expr::Call { callee: path, args }))
                    }
                    _ => Err(Unsupported),
                }
            }
            _ => Err(Unsupported),
        }
    }

    fn dotted_path(&mut self) -> Result<Vec<String>, Unsupported> {
        let mut path = vec![self.ident()?];
        while self.peek() == Some(&TokenKind::Dot) {
            self.pos += 1;
            path.push(self.ident()?);
        }
        Ok(path)
    }

    fn call_args(&mut self) -> Result<Vec<Expr>, Unsupported> {
        match self.peek() {
            Some(TokenKind::LParen) => {
                self.pos += 1;
                let mut args = Vec::new();
                if self.eat(&TokenKind::RParen) {
                    return Ok(args);
                }
                loop {
                    args.push(self.expr()?);
                    if self.eat(&TokenKind::Comma) {
                        continue;
                    }
                    if self.eat(&TokenKind::RParen) {
                        return Ok(args);
                    }
                    return Err(Unsupported);
                }
            }
            Some(TokenKind::Str(value)) => {
                let value = value.clone();
                self.pos += 1;
                Ok(vec![Expr::Str(value)])
            }
            Some(TokenKind::LBrace) => Ok(vec![self.table()?]),
            _ => Err(Unsupported),
        }
    }

    fn expr(&mut self) -> Result<Expr, Unsupported> {
        let left = self.unary_expr()?;
        if self.eat(&TokenKind::Concat) {
            let right = self.expr()?;
            return Ok(Expr::Concat(Box::new(left), Box::new(right)));
        }
        Ok(left)
    }

    fn unary_expr(&mut self) -> Result<Expr, Unsupported> {
        if self.eat(&TokenKind::Minus) {
            let inner = self.unary_expr()?;
            return Ok(Expr::Neg(Box::new(inner)));
        }
        self.primary_expr()
    }

    fn primary_expr(&mut self) -> Result<Expr, Unsupported> {
        match self.peek() {
            Some(TokenKind::Keyword(Keyword::Nil)) => {
                self.pos += 1;
                Ok(Expr::Nil)
            }
            Some(TokenKind::Keyword(Keyword::True)) => {
                self.pos += 1;
                Ok(Expr::Bool(true))
            }
            Some(TokenKind::Keyword(Keyword::False)) => {
                self.pos += 1;
                Ok(Expr::Bool(false))
            }
            Some(TokenKind::Number(value)) => {
                let value = *value;
                self.pos += 1;
                Ok(Expr::Number(value))
            }
            Some(TokenKind::Str(value)) => {
                let value = value.clone();
                self.pos += 1;
                Ok(Expr::Str(value))
            }
            Some(TokenKind::LBrace) => self.table(),
            Some(TokenKind::Ident(_)) => {
                let path = self.dotted_path()?;
                match self.peek() {
                    Some(TokenKind::LParen)
                    | Some(TokenKind::Str(_))
                    | Some(TokenKind::LBrace) => {
                        let args = self.call_args()?;
                        Ok(Expr::Call { callee: path, args })
                    }
                    _ => {
                        if path.len() == 1 {
                            Ok(Expr::Ident(path.into_iter().next().unwrap_or_default()))
                        } else {
                            Ok(Expr::Path(path))
                        }
                    }
                }
            }
            _ => Err(Unsupported),
        }
    }

    fn table(&mut self) -> Result<Expr, Unsupported> {
        if !self.eat(&TokenKind::LBrace) {
            return Err(Unsupported);
        }
        let mut items = Vec::new();
        loop {
            if self.eat(&TokenKind::RBrace) {
                return Ok(Expr::Table(items));
            }
            match self.peek() {
                // `name = value` (only when followed by `=`)
                Some(TokenKind::Ident(_)) if self.peek_at(1) == Some(&TokenKind::Eq) => {
                    let key = self.ident()?;
                    self.pos += 1;
                    let value = self.expr()?;
                    items.push(TableItem::Named { key, value });
                }
                // `[expr] = value`
                Some(TokenKind::LBracket) => {
                    self.pos += 1;
                    let key = self.expr()?;
                    if !self.eat(&TokenKind::RBracket) || !self.eat(&TokenKind::Eq) {
                        return Err(Unsupported);
                    }
                    let value = self.expr()?;
                    items.push(TableItem::Keyed { key, value });
                }
                _ => {
                    items.push(TableItem::Positional(self.expr()?));
                }
            }
            // Separators are `,` or `;`; a closing brace may follow either.
            if self.eat(&TokenKind::Comma) || self.eat(&TokenKind::Op(";".to_string())) {
                continue;
            }
            if self.eat(&TokenKind::RBrace) {
                return Ok(Expr::Table(items));
            }
            return Err(Unsupported);
        }
    }

    /// Skips one unsupported statement, tracking block keywords and
    /// delimiter depth, and returns the byte offset just past it. A new
    /// statement is assumed to start at the first token on a later line
    /// once every block and delimiter is closed.
    fn skip_statement(&mut self, line: usize) -> Result<usize, LuaError> {
        let mut block_depth = 0usize;
        let mut delim_depth = 0usize;
        let mut last_end = self.tokens[self.pos].end;
        let mut last_line = self.tokens[self.pos].line;

        while let Some(token) = self.advance() {
            let token = token.clone();
            if token.line > last_line && block_depth == 0 && delim_depth == 0 {
                // Next statement begins here.
                self.pos -= 1;
                return Ok(last_end);
            }
            match &token.kind {
                TokenKind::Keyword(
                    Keyword::Function
                    | Keyword::If
                    | Keyword::For
                    | Keyword::While
                    | Keyword::Do
                    | Keyword::Repeat,
                ) => block_depth += 1,
                TokenKind::Keyword(Keyword::End | Keyword::Until) => {
                    block_depth = block_depth.saturating_sub(1);
                }
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => {
                    delim_depth += 1;
                }
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => {
                    delim_depth = delim_depth.saturating_sub(1);
                }
                _ => {}
            }
            last_end = token.end;
            last_line = token.line;
        }

        if delim_depth > 0 {
            return Err(LuaError::syntax(
                line,
                "unbalanced delimiters at end of input",
            ));
        }
        Ok(last_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<StmtKind> {
        parse(source).unwrap().into_iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_local_require_and_assignment() {
        let stmts = kinds("local wezterm = require('wezterm')\nconfig.font_size = 14.0");
        assert_eq!(
            stmts[0],
            StmtKind::Local {
                name: "wezterm".into(),
                value: Expr::Call {
                    callee: vec!["require".into()],
                    args: vec![Expr::Str("wezterm".into())],
                },
            }
        );
        assert_eq!(
            stmts[1],
            StmtKind::Assign {
                target: vec!["config".into(), "font_size".into()],
                value: Expr::Number(14.0),
            }
        );
    }

    #[test]
    fn test_table_constructor_forms() {
        let stmts = kinds("config.colors = { foreground = '#fff', 'a', ['x-y'] = 1 }");
        let StmtKind::Assign { value, .. } = &stmts[0] else {
            panic!("expected assignment");
        };
        assert_eq!(
            *value,
            Expr::Table(vec![
                TableItem::Named {
                    key: "foreground".into(),
                    value: Expr::Str("#fff".into()),
                },
                TableItem::Positional(Expr::Str("a".into())),
                TableItem::Keyed {
                    key: Expr::Str("x-y".into()),
                    value: Expr::Number(1.0),
                },
            ])
        );
    }

    #[test]
    fn test_paren_less_call_sugar() {
        let stmts = kinds("config.font = wezterm.font 'JetBrains Mono'");
        let StmtKind::Assign { value, .. } = &stmts[0] else {
            panic!("expected assignment");
        };
        assert_eq!(
            *value,
            Expr::Call {
                callee: vec!["wezterm".into(), "font".into()],
                args: vec![Expr::Str("JetBrains Mono".into())],
            }
        );
    }

    #[test]
    fn test_dotted_path_without_call() {
        let stmts = kinds("k.action = wezterm.action.Paste");
        let StmtKind::Assign { value, .. } = &stmts[0] else {
            panic!("expected assignment");
        };
        assert_eq!(
            *value,
            Expr::Path(vec!["wezterm".into(), "action".into(), "Paste".into()])
        );
    }

    #[test]
    fn test_unary_minus_and_concat() {
        let stmts = kinds("config.scrollback_lines = -1\nconfig.term = 'xterm-' .. '256color'");
        let StmtKind::Assign { value, .. } = &stmts[0] else {
            panic!("expected assignment");
        };
        assert_eq!(*value, Expr::Neg(Box::new(Expr::Number(1.0))));
        let StmtKind::Assign { value, .. } = &stmts[1] else {
            panic!("expected assignment");
        };
        assert!(matches!(value, Expr::Concat(_, _)));
    }

    #[test]
    fn test_unsupported_block_becomes_opaque() {
        let source = "if os.getenv('WSL') then\n  config.font_size = 10\nend\nconfig.initial_cols = 120";
        let stmts = parse(source).unwrap();
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0].kind, StmtKind::Opaque);
        assert_eq!(&source[stmts[0].start..stmts[0].end], "if os.getenv('WSL') then\n  config.font_size = 10\nend");
        assert!(matches!(stmts[1].kind, StmtKind::Assign { .. }));
    }

    #[test]
    fn test_callback_registration_is_expr_stmt() {
        let stmts = kinds("wezterm.on('update-status', callback)");
        assert!(matches!(stmts[0], StmtKind::ExprStmt(Expr::Call { .. })));
    }

    #[test]
    fn test_return_config() {
        let stmts = kinds("return config");
        assert_eq!(
            stmts[0],
            StmtKind::Return {
                name: "config".into()
            }
        );
    }

    #[test]
    fn test_unbalanced_braces_fatal() {
        let err = parse("config.keys = { { key = 'c'").unwrap_err();
        assert!(matches!(err, LuaError::Syntax { .. }));
    }

    #[test]
    fn test_arithmetic_falls_back_to_opaque() {
        let stmts = kinds("config.font_size = base + 2\nconfig.initial_rows = 40");
        assert_eq!(stmts[0], StmtKind::Opaque);
        assert!(matches!(stmts[1], StmtKind::Assign { .. }));
    }
}

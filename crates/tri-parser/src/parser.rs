// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The recursive-descent parser.
//!
//! One token of lookahead, no backtracking. A missing token is recorded as
//! an error without consuming anything, and parsing carries on from there.

use tri_ast::command::{Command, CommandKind};
use tri_ast::decl::{Decl, DeclKind};
use tri_ast::expr::{Expr, ExprKind, Ident, Operator, Param, ParamKind, TypeDenoter};
use tri_ast::token::{Token, TokenKind};
use tri_ast::{NodeId, Program, Span};

/// Maximum number of errors to collect.
const MAX_ERRORS: usize = 20;

/// Maximum nesting of commands and expressions.
const MAX_DEPTH: usize = 256;

/// The parser for Tri source code.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// End offset of the last consumed token
    prev_end: usize,
    /// Collected errors during parsing
    errors: Vec<ParseError>,
    /// Counter for generating unique NodeIds
    next_node_id: u32,
    /// Current nesting of single commands and primaries
    depth: usize,
    /// Set once nesting passed MAX_DEPTH; no further errors are recorded
    abandoned: bool,
}

/// The result of parsing a token stream.
#[derive(Debug)]
pub struct ParseResult {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EndOfText) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
            let position = tokens.last().map(|t| t.position).unwrap_or_default();
            tokens.push(Token::new(TokenKind::EndOfText, "", Span::new(end, end), position));
        }
        Self {
            tokens,
            pos: 0,
            prev_end: 0,
            errors: Vec::new(),
            next_node_id: 0,
            depth: 0,
            abandoned: false,
        }
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    fn record_error(&mut self, error: ParseError) {
        if !self.abandoned && self.errors.len() < MAX_ERRORS {
            tracing::trace!(error = %error, "parse error");
            self.errors.push(error);
        }
    }

    /// Parse a whole program: a command followed by end of text.
    pub fn parse(mut self) -> ParseResult {
        let start = self.current().span.start;
        let command = self.parse_command();

        if !self.at_end() {
            let error = ParseError::expected(
                TokenKind::EndOfText.display_name(),
                self.current_kind(),
                self.current().span,
            );
            self.record_error(error);
        }

        tracing::debug!(
            nodes = self.next_node_id,
            errors = self.errors.len(),
            "parsed program"
        );

        let span = Span::new(start, self.tokens.last().map(|t| t.span.end).unwrap_or(start));
        ParseResult {
            program: Program { command, span },
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token Navigation
    // =========================================================================

    fn current(&self) -> &Token {
        // `new` guarantees a trailing EndOfText, and `advance` never moves past it
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    fn at_end(&self) -> bool {
        self.current_kind() == TokenKind::EndOfText
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !self.at_end() {
            self.pos += 1;
            self.prev_end = token.span.end;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or record an "expected" error and leave the current
    /// token in place.
    fn expect(&mut self, kind: TokenKind) -> bool {
        if self.match_token(kind) {
            return true;
        }
        let error = ParseError::expected(kind.display_name(), self.current_kind(), self.current().span);
        self.record_error(error);
        false
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.prev_end.max(start))
    }

    /// Run `parse` one nesting level deeper. Past `MAX_DEPTH` the rest of
    /// the input is skipped, a single error is recorded and `fallback`
    /// stands in for the node.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> T, fallback: impl FnOnce(&mut Self) -> T) -> T {
        if self.depth >= MAX_DEPTH {
            if !self.abandoned {
                let error = ParseError::too_deep(self.current().span);
                self.record_error(error);
                self.abandoned = true;
            }
            while !self.at_end() {
                self.advance();
            }
            return fallback(self);
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Command := SingleCommand (';' SingleCommand)*
    fn parse_command(&mut self) -> Command {
        let start = self.current().span.start;
        let mut command = self.parse_single_command();

        while self.match_token(TokenKind::Semicolon) {
            let second = self.parse_single_command();
            command = Command {
                id: self.next_id(),
                kind: CommandKind::Sequential {
                    first: Box::new(command),
                    second: Box::new(second),
                },
                span: self.span_from(start),
            };
        }

        command
    }

    fn parse_single_command(&mut self) -> Command {
        self.nested(Self::parse_single_command_inner, |p| Command {
            id: p.next_id(),
            kind: CommandKind::Error,
            span: p.current().span,
        })
    }

    fn parse_single_command_inner(&mut self) -> Command {
        let start = self.current().span.start;

        let kind = match self.current_kind() {
            TokenKind::Identifier => return self.parse_identifier_command(),
            TokenKind::Begin => {
                self.advance();
                let inner = self.parse_command();
                self.expect(TokenKind::End);
                return inner;
            }
            TokenKind::Let => {
                self.advance();
                let decl = self.parse_declaration();
                self.expect(TokenKind::In);
                let body = self.parse_single_command();
                self.expect(TokenKind::Endlet);
                let rest = self.parse_command();
                CommandKind::Let {
                    decl,
                    body: Box::new(body),
                    rest: Box::new(rest),
                }
            }
            TokenKind::If => {
                self.advance();
                let cond = self.parse_expression();
                self.expect(TokenKind::Then);
                let then_branch = self.parse_single_command();
                self.expect(TokenKind::Else);
                let else_branch = self.parse_single_command();
                CommandKind::If {
                    cond,
                    then_branch: Box::new(then_branch),
                    else_branch: Box::new(else_branch),
                }
            }
            TokenKind::While => {
                self.advance();
                let cond = self.parse_expression();
                self.expect(TokenKind::Do);
                let body = self.parse_command();
                self.expect(TokenKind::Wend);
                let rest = self.parse_command();
                CommandKind::While {
                    cond,
                    body: Box::new(body),
                    rest: Box::new(rest),
                }
            }
            TokenKind::Do => {
                self.advance();
                let body = self.parse_single_command();
                self.expect(TokenKind::WendWhile);
                let cond = self.parse_expression();
                CommandKind::DoWhile {
                    body: Box::new(body),
                    cond,
                }
            }
            TokenKind::Pass => {
                self.advance();
                CommandKind::Blank
            }
            _ => CommandKind::Blank,
        };

        Command {
            id: self.next_id(),
            kind,
            span: self.span_from(start),
        }
    }

    /// Identifier ( '(' Parameter ')' | '=' Expression )
    fn parse_identifier_command(&mut self) -> Command {
        let start = self.current().span.start;
        let name = self.parse_ident_leaf();

        let kind = match self.current_kind() {
            TokenKind::LeftBracket => {
                self.advance();
                let param = self.parse_parameter();
                self.expect(TokenKind::RightBracket);
                CommandKind::Call { callee: name, param }
            }
            TokenKind::Becomes => {
                self.advance();
                let value = self.parse_expression();
                CommandKind::Assign { target: name, value }
            }
            found => {
                let error = ParseError::unexpected(
                    format!(
                        "expected '(' or '=' after `{}`, found {}",
                        name.name,
                        found.display_name()
                    ),
                    self.current().span,
                )
                .with_hint("a command starting with a name is a call `p(...)` or an assignment `x = ...`");
                self.record_error(error);
                CommandKind::Error
            }
        };

        Command {
            id: self.next_id(),
            kind,
            span: self.span_from(start),
        }
    }

    /// Parameter := Expression | 'var' Identifier | ε
    fn parse_parameter(&mut self) -> Param {
        let start = self.current().span.start;

        let kind = if self.starts_expression() {
            ParamKind::Expr(self.parse_expression())
        } else if self.match_token(TokenKind::Var) {
            match self.expect_ident("a name") {
                Some(ident) => ParamKind::Var(ident),
                None => ParamKind::Error,
            }
        } else {
            ParamKind::Blank
        };

        Param {
            id: self.next_id(),
            kind,
            span: self.span_from(start),
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Declaration := SingleDeclaration (';' SingleDeclaration)*
    fn parse_declaration(&mut self) -> Decl {
        let start = self.current().span.start;
        let mut decl = self.parse_single_declaration();

        while self.match_token(TokenKind::Semicolon) {
            let second = self.parse_single_declaration();
            decl = Decl {
                id: self.next_id(),
                kind: DeclKind::Sequential {
                    first: Box::new(decl),
                    second: Box::new(second),
                },
                span: self.span_from(start),
            };
        }

        decl
    }

    fn parse_single_declaration(&mut self) -> Decl {
        let start = self.current().span.start;

        let kind = match self.current_kind() {
            TokenKind::Const => {
                self.advance();
                let name = self.expect_ident("a name");
                self.expect(TokenKind::Is);
                let value = self.parse_expression();
                match name {
                    Some(name) => DeclKind::Const { name, value },
                    None => DeclKind::Error,
                }
            }
            TokenKind::Var => {
                self.advance();
                let name = self.expect_ident("a name");
                let ty = self.parse_type_denoter();
                match (name, ty) {
                    (Some(name), Some(ty)) => DeclKind::Var { name, ty },
                    _ => DeclKind::Error,
                }
            }
            found => {
                let error = ParseError::expected("declaration ('const' or 'var')", found, self.current().span)
                    .with_kind(ParseErrorKind::UnexpectedToken);
                self.record_error(error);
                DeclKind::Error
            }
        };

        Decl {
            id: self.next_id(),
            kind,
            span: self.span_from(start),
        }
    }

    /// TypeDenoter := Identifier
    fn parse_type_denoter(&mut self) -> Option<TypeDenoter> {
        let name = self.expect_ident("a type name")?;
        Some(TypeDenoter {
            id: self.next_id(),
            span: name.span,
            name,
        })
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn starts_expression(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::IntLiteral
                | TokenKind::CharLiteral
                | TokenKind::Identifier
                | TokenKind::Operator
                | TokenKind::LeftBracket
        )
    }

    /// Expression := PrimaryExpr (Operator PrimaryExpr)*
    fn parse_expression(&mut self) -> Expr {
        let start = self.current().span.start;
        let mut lhs = self.parse_primary();

        while self.check(TokenKind::Operator) {
            let op = self.parse_operator();
            let rhs = self.parse_primary();
            lhs = Expr {
                id: self.next_id(),
                kind: ExprKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                span: self.span_from(start),
            };
        }

        lhs
    }

    fn parse_primary(&mut self) -> Expr {
        self.nested(Self::parse_primary_inner, |p| Expr {
            id: p.next_id(),
            kind: ExprKind::Error,
            span: p.current().span,
        })
    }

    fn parse_primary_inner(&mut self) -> Expr {
        let start = self.current().span.start;

        let kind = match self.current_kind() {
            TokenKind::IntLiteral => ExprKind::Int(self.advance().spelling),
            TokenKind::CharLiteral => {
                let token = self.advance();
                ExprKind::Char(token.spelling.chars().nth(1).unwrap_or('\0'))
            }
            TokenKind::Identifier => ExprKind::Ident(self.parse_ident_leaf()),
            TokenKind::Operator => {
                let op = self.parse_operator();
                let operand = self.parse_primary();
                ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                }
            }
            TokenKind::LeftBracket => {
                self.advance();
                let inner = self.parse_expression();
                self.expect(TokenKind::RightBracket);
                return inner;
            }
            found => {
                let error = ParseError::expected("expression", found, self.current().span)
                    .with_kind(ParseErrorKind::UnexpectedToken);
                self.record_error(error);
                ExprKind::Error
            }
        };

        Expr {
            id: self.next_id(),
            kind,
            span: self.span_from(start),
        }
    }

    // =========================================================================
    // Leaves
    // =========================================================================

    /// Build an identifier leaf from the current token, which must be an
    /// identifier.
    fn parse_ident_leaf(&mut self) -> Ident {
        let token = self.advance();
        Ident {
            id: self.next_id(),
            name: token.spelling,
            span: token.span,
        }
    }

    fn expect_ident(&mut self, what: &str) -> Option<Ident> {
        if self.check(TokenKind::Identifier) {
            Some(self.parse_ident_leaf())
        } else {
            let error = ParseError::expected(what, self.current_kind(), self.current().span);
            self.record_error(error);
            None
        }
    }

    fn parse_operator(&mut self) -> Operator {
        let token = self.advance();
        Operator {
            id: self.next_id(),
            spelling: token.spelling,
            span: token.span,
        }
    }
}

/// Which family of syntax error this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A required token was missing
    ExpectedToken,
    /// The current token cannot start the construct required here
    UnexpectedToken,
    /// Commands or expressions nested past the parser's limit
    TooDeep,
}

/// A parse error with location and friendly message.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    fn expected(expected: &str, found: TokenKind, span: Span) -> Self {
        let message = format!("expected {}, found {}", expected, found.display_name());
        let hint = crate::hints::for_expected(expected, found).map(String::from);
        Self {
            kind: ParseErrorKind::ExpectedToken,
            span,
            message,
            hint,
        }
    }

    fn unexpected(message: String, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::UnexpectedToken,
            span,
            message,
            hint: None,
        }
    }

    fn too_deep(span: Span) -> Self {
        Self {
            kind: ParseErrorKind::TooDeep,
            span,
            message: format!("program nests deeper than {} levels", MAX_DEPTH),
            hint: Some("split deeply nested expressions or commands into smaller pieces".to_string()),
        }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    fn with_kind(mut self, kind: ParseErrorKind) -> Self {
        self.kind = kind;
        self
    }
}

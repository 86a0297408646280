//! Recursive-descent parser turning a token stream into an AST.
mod error;

pub use error::ParseError;

use crate::ast::{BinaryOp, Block, Expr, Program, Stmt, UnaryOp};
use crate::lexer::{Position, Token, TokenKind};

pub type ParseResult<T> = Result<T, ParseError>;

/// Single-cursor parser over a flat token vector. `peek` never runs past the end because the
/// lexer always appends a trailing `Eof` token.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse(tokens: Vec<Token>) -> ParseResult<Program> {
        let mut parser = Self::new(tokens);
        let mut statements = Block::new();

        while !parser.at_eof() {
            statements.push(parser.parse_stmt()?);
        }

        Ok(Program::new(statements))
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    fn peek_at(&self, offset: usize) -> &TokenKind {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    fn position(&self) -> Position {
        self.tokens[self.pos].position
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<()> {
        if self.check(&kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(expected))
        }
    }

    fn error(&self, expected: &str) -> ParseError {
        ParseError::new(self.peek_kind().clone(), expected, self.position())
    }

    fn consume_ident(&mut self) -> ParseResult<String> {
        match self.peek_kind().clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name)
            }
            _ => Err(self.error("an identifier")),
        }
    }

    /// Trailing semicolons are syntactic salt: consume one if present, tolerate its absence
    /// otherwise.
    fn opt_semicolon(&mut self) {
        self.match_token(&TokenKind::Semicolon);
    }

    // --- statements ---------------------------------------------------

    fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        match self.peek_kind() {
            TokenKind::Print => self.parse_print(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Function => self.parse_funcdef(),
            TokenKind::Return => self.parse_return(),
            TokenKind::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            TokenKind::Define => self.parse_define(),
            TokenKind::Amend => self.parse_amend(),
            TokenKind::Remove => self.parse_remove(),
            TokenKind::Ident(_) if *self.peek_at(1) == TokenKind::Assign => self.parse_assign(),
            _ => self.parse_expr_stmt(),
        }
    }

    fn parse_print(&mut self) -> ParseResult<Stmt> {
        self.advance();
        let expr = self.parse_expr()?;
        self.opt_semicolon();
        Ok(Stmt::Print { expr })
    }

    fn parse_if(&mut self) -> ParseResult<Stmt> {
        self.advance();
        self.expect(TokenKind::LParen, "'('")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        let then_block = self.parse_block()?;
        let else_block = if self.match_token(&TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(Stmt::If {
            cond,
            then_block,
            else_block,
        })
    }

    fn parse_while(&mut self) -> ParseResult<Stmt> {
        self.advance();
        self.expect(TokenKind::LParen, "'('")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        let body = self.parse_block()?;
        Ok(Stmt::While { cond, body })
    }

    fn parse_funcdef(&mut self) -> ParseResult<Stmt> {
        self.advance();
        let name = self.consume_ident()?;
        self.expect(TokenKind::LParen, "'('")?;

        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                params.push(self.consume_ident()?);
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'")?;

        let body = self.parse_block()?;
        Ok(Stmt::FuncDef { name, params, body })
    }

    fn parse_return(&mut self) -> ParseResult<Stmt> {
        self.advance();
        let expr = self.parse_expr()?;
        self.opt_semicolon();
        Ok(Stmt::Return { expr })
    }

    fn parse_define(&mut self) -> ParseResult<Stmt> {
        self.advance();
        let name = self.consume_ident()?;
        let expr = self.parse_expr()?;
        self.opt_semicolon();
        Ok(Stmt::Assign { name, expr })
    }

    fn parse_amend(&mut self) -> ParseResult<Stmt> {
        self.advance();
        let position = self.position();
        let target = self.parse_expr()?;
        let (base, index) = Self::require_index_target(target, position, "amend")?;

        self.expect(TokenKind::To, "'to'")?;
        let value = self.parse_expr()?;
        self.opt_semicolon();

        Ok(Stmt::IndexAssign {
            base,
            index,
            value,
            position,
        })
    }

    fn parse_remove(&mut self) -> ParseResult<Stmt> {
        self.advance();
        let position = self.position();
        let target = self.parse_expr()?;
        let (base, index) = Self::require_index_target(target, position, "remove")?;
        self.opt_semicolon();

        Ok(Stmt::Remove {
            base,
            index,
            position,
        })
    }

    fn require_index_target(
        target: Expr,
        position: Position,
        keyword: &str,
    ) -> ParseResult<(Expr, Expr)> {
        match target {
            Expr::Index { base, index, .. } => Ok((*base, *index)),
            other => Err(ParseError::new(
                Self::describe_as_kind(&other),
                format!("an indexed expression after '{keyword}'"),
                position,
            )),
        }
    }

    /// `require_index_target` needs to report *what was parsed*, not a raw token, since the
    /// mismatch is only visible once the whole expression has been consumed.
    fn describe_as_kind(expr: &Expr) -> TokenKind {
        match expr {
            Expr::Var { name, .. } => TokenKind::Ident(name.clone()),
            _ => TokenKind::Ident("<expression>".into()),
        }
    }

    fn parse_assign(&mut self) -> ParseResult<Stmt> {
        let name = self.consume_ident()?;
        self.expect(TokenKind::Assign, "'='")?;
        let expr = self.parse_expr()?;
        self.opt_semicolon();
        Ok(Stmt::Assign { name, expr })
    }

    fn parse_expr_stmt(&mut self) -> ParseResult<Stmt> {
        let expr = self.parse_expr()?;
        self.opt_semicolon();
        Ok(Stmt::Expr(expr))
    }

    fn parse_block(&mut self) -> ParseResult<Block> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut statements = Block::new();
        while !self.check(&TokenKind::RBrace) && !self.at_eof() {
            statements.push(self.parse_stmt()?);
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(statements)
    }

    // --- expressions, lowest to highest precedence ---------------------

    fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_and()?;
        while self.check(&TokenKind::Or) {
            let position = self.position();
            self.advance();
            let right = self.parse_and()?;
            left = Expr::Binary {
                left: Box::new(left),
                op: BinaryOp::Or,
                right: Box::new(right),
                position,
            };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_equality()?;
        while self.check(&TokenKind::And) {
            let position = self.position();
            self.advance();
            let right = self.parse_equality()?;
            left = Expr::Binary {
                left: Box::new(left),
                op: BinaryOp::And,
                right: Box::new(right),
                position,
            };
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_comparison()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Eq => BinaryOp::Eq,
                TokenKind::Ne => BinaryOp::Ne,
                _ => break,
            };
            let position = self.position();
            self.advance();
            let right = self.parse_comparison()?;
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                position,
            };
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::Le => BinaryOp::Le,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::Ge => BinaryOp::Ge,
                _ => break,
            };
            let position = self.position();
            self.advance();
            let right = self.parse_term()?;
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                position,
            };
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            let position = self.position();
            self.advance();
            let right = self.parse_factor()?;
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                position,
            };
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Mul => BinaryOp::Mul,
                TokenKind::Div => BinaryOp::Div,
                _ => break,
            };
            let position = self.position();
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
                position,
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let op = match self.peek_kind() {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Not => Some(UnaryOp::Not),
            _ => None,
        };
        match op {
            Some(op) => {
                let position = self.position();
                self.advance();
                let expr = self.parse_unary()?;
                Ok(Expr::Unary {
                    op,
                    expr: Box::new(expr),
                    position,
                })
            }
            None => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let position = self.position();
        match self.peek_kind().clone() {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr::Num(n))
            }
            TokenKind::Str(s) => {
                self.advance();
                Ok(Expr::Str(s))
            }
            TokenKind::Boolean(b) => {
                self.advance();
                Ok(Expr::Bool(b))
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.match_token(&TokenKind::LParen) {
                    let args = self.parse_arg_list()?;
                    Ok(Expr::Call {
                        name,
                        args,
                        position,
                    })
                } else if self.match_token(&TokenKind::LBracket) {
                    let index = self.parse_expr()?;
                    self.expect(TokenKind::RBracket, "']'")?;
                    Ok(Expr::Index {
                        base: Box::new(Expr::Var { name, position }),
                        index: Box::new(index),
                        position,
                    })
                } else {
                    Ok(Expr::Var { name, position })
                }
            }
            TokenKind::Input => {
                self.advance();
                self.expect(TokenKind::LParen, "'('")?;
                let prompt = self.parse_expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(Expr::Input {
                    prompt: Box::new(prompt),
                    position,
                })
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(expr)
            }
            TokenKind::LBracket => {
                self.advance();
                let mut items = Vec::new();
                if !self.check(&TokenKind::RBracket) {
                    loop {
                        items.push(self.parse_expr()?);
                        if !self.match_token(&TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect(TokenKind::RBracket, "']'")?;
                Ok(Expr::List(items))
            }
            TokenKind::LBrace => {
                self.advance();
                let mut pairs = Vec::new();
                if !self.check(&TokenKind::RBrace) {
                    loop {
                        let key = self.parse_expr()?;
                        self.expect(TokenKind::Colon, "':'")?;
                        let value = self.parse_expr()?;
                        pairs.push((key, value));
                        if !self.match_token(&TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect(TokenKind::RBrace, "'}'")?;
                Ok(Expr::Dict(pairs))
            }
            _ => Err(self.error("an expression")),
        }
    }

    fn parse_arg_list(&mut self) -> ParseResult<Vec<Expr>> {
        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(source: &str) -> Program {
        let tokens = Lexer::lex(source).unwrap();
        Parser::parse(tokens).unwrap()
    }

    #[test]
    fn precedence_mul_binds_tighter_than_add() {
        let a = parse("a + b * c;");
        let b = parse("a + (b * c);");
        assert_eq!(a, b);
    }

    #[test]
    fn precedence_not_binds_tighter_than_and() {
        let a = parse("!a and b;");
        let b = parse("(!a) and b;");
        assert_eq!(a, b);
    }

    #[test]
    fn precedence_and_binds_tighter_than_or() {
        let a = parse("a or b and c;");
        let b = parse("a or (b and c);");
        assert_eq!(a, b);
    }

    #[test]
    fn trailing_semicolons_are_optional() {
        let with = parse("print 1;");
        let without = parse("print 1");
        assert_eq!(with, without);
    }

    #[test]
    fn dict_literal_in_expression_position_is_unambiguous() {
        let program = parse(r#"d = {"k": 1};"#);
        match &program.statements[0] {
            Stmt::Assign { expr: Expr::Dict(pairs), .. } => assert_eq!(pairs.len(), 1),
            other => panic!("expected a dict assignment, got {other:?}"),
        }
    }

    #[test]
    fn amend_requires_an_indexed_target() {
        let tokens = Lexer::lex("amend a to 1;").unwrap();
        assert!(Parser::parse(tokens).is_err());
    }
}

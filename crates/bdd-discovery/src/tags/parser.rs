//! Precedence-climbing parser over the token list.

use super::ast::{Expr, TagExprError};
use super::lexer::{Token, TokenKind, tokenize};

/// Binary operators, loosest first.
#[derive(Clone, Copy)]
enum Binary {
    Or,
    And,
}

impl Binary {
    fn matches(self, kind: &TokenKind) -> bool {
        match self {
            Self::Or => *kind == TokenKind::Or,
            Self::And => *kind == TokenKind::And,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Self::Or => "or",
            Self::And => "and",
        }
    }

    fn combine(self, lhs: Expr, rhs: Expr) -> Expr {
        match self {
            Self::Or => Expr::Or(Box::new(lhs), Box::new(rhs)),
            Self::And => Expr::And(Box::new(lhs), Box::new(rhs)),
        }
    }
}

/// Parse a complete expression, rejecting trailing tokens.
pub(super) fn parse(input: &str) -> Result<Expr, TagExprError> {
    let tokens = tokenize(input)?;
    let mut cursor = Cursor {
        tokens: &tokens,
        index: 0,
    };
    let expr = cursor.binary(Binary::Or)?;
    let rest = cursor.peek();
    if rest.kind == TokenKind::End {
        Ok(expr)
    } else {
        Err(TagExprError::new(
            rest.offset,
            format!("unexpected token {}", rest.kind.label()),
        ))
    }
}

struct Cursor<'t> {
    tokens: &'t [Token],
    index: usize,
}

impl<'t> Cursor<'t> {
    fn peek(&self) -> &'t Token {
        // `tokenize` always appends an end token, so the last entry exists.
        self.tokens
            .get(self.index)
            .or_else(|| self.tokens.last())
            .unwrap_or(&END)
    }

    fn bump(&mut self) -> &'t Token {
        let token = self.peek();
        if token.kind != TokenKind::End {
            self.index += 1;
        }
        token
    }

    fn binary(&mut self, op: Binary) -> Result<Expr, TagExprError> {
        let mut lhs = self.operand(op)?;
        while op.matches(&self.peek().kind) {
            self.bump();
            self.require_operand(op.keyword())?;
            let rhs = self.operand(op)?;
            lhs = op.combine(lhs, rhs);
        }
        Ok(lhs)
    }

    fn operand(&mut self, op: Binary) -> Result<Expr, TagExprError> {
        match op {
            Binary::Or => self.binary(Binary::And),
            Binary::And => self.unary(),
        }
    }

    fn unary(&mut self) -> Result<Expr, TagExprError> {
        if self.peek().kind != TokenKind::Not {
            return self.atom();
        }
        self.bump();
        self.require_operand("not")?;
        Ok(Expr::Not(Box::new(self.unary()?)))
    }

    fn atom(&mut self) -> Result<Expr, TagExprError> {
        let token = self.bump();
        match &token.kind {
            TokenKind::Tag(name) => Ok(Expr::Tag(name.clone())),
            TokenKind::Open => {
                let inner = self.binary(Binary::Or)?;
                if self.peek().kind == TokenKind::Close {
                    self.bump();
                    Ok(inner)
                } else {
                    Err(TagExprError::new(token.offset, "missing ')'"))
                }
            }
            TokenKind::End => Err(TagExprError::new(token.offset, "expected tag or '('")),
            other => Err(TagExprError::new(
                token.offset,
                format!("expected tag or '(' but found {}", other.label()),
            )),
        }
    }

    /// Fail unless the next token can start an operand of `keyword`.
    fn require_operand(&self, keyword: &str) -> Result<(), TagExprError> {
        let next = self.peek();
        match next.kind {
            TokenKind::Tag(_) | TokenKind::Not | TokenKind::Open => Ok(()),
            _ => Err(TagExprError::new(
                next.offset,
                format!("expected tag or '(' after '{keyword}'"),
            )),
        }
    }
}

static END: Token = Token {
    kind: TokenKind::End,
    offset: 0,
};

//! Recursive-descent parser for the DEPS dialect.
//!
//! Grammar:
//!
//! ```text
//! program    := (NEWLINE | statement)* EOF
//! statement  := NAME '=' expression (NEWLINE | ';' | EOF)
//! expression := primary ('+' primary)*
//! primary    := STRING+                      adjacent literals are joined
//!             | INT | 'True' | 'False' | 'None'
//!             | '{' (expression ':' expression (',' expression ':' expression)* ','?)? '}'
//!             | '[' (expression (',' expression)* ','?)? ']'
//!             | '(' expression ')'
//!             | 'Var' '(' expression ')'
//! ```
//!
//! Anything else (name references, other calls, tuples, operators other than
//! `+`) is rejected with the position of the offending token. Bracket nesting
//! deeper than [`MAX_NESTING`] is rejected as well.

use super::SyntaxError;
use super::lexer::{Position, Token, TokenKind};
use crate::constants::MAX_NESTING;

/// Name of the single callable the dialect exposes.
pub const VAR_CALL: &str = "Var";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    Str(String),
    Int(i64),
    Bool(bool),
    None,
    List(Vec<Expr>),
    Map(Vec<(Expr, Expr)>),
    /// `first + operand + ...`, each operand paired with the position of its `+`
    Concat {
        first: Box<Expr>,
        rest: Vec<(Position, Expr)>,
    },
    /// `Var(name)`
    Var(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Position,
}

/// A top-level `name = expression` assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub target: String,
    pub value: Expr,
    pub pos: Position,
}

pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    depth: usize,
}

impl Parser {
    /// Creates a parser over a token stream ending in [`TokenKind::Eof`].
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: 0,
            depth: 0,
        }
    }

    pub fn parse_program(mut self) -> Result<Vec<Statement>, SyntaxError> {
        let mut statements = Vec::new();
        loop {
            match self.peek().kind.clone() {
                TokenKind::Eof => return Ok(statements),
                TokenKind::Newline | TokenKind::Semicolon => {
                    self.advance();
                }
                _ => statements.push(self.statement()?),
            }
        }
    }

    fn peek(&self) -> &Token {
        // The stream always ends with Eof and we never advance past it
        &self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.index += 1;
        }
        token
    }

    fn expect(&mut self, expected: &TokenKind, context: &str) -> Result<Token, SyntaxError> {
        let token = self.advance();
        if &token.kind == expected {
            Ok(token)
        } else {
            Err(SyntaxError::new(
                token.pos,
                format!("expected {} {context}, found {}", expected.describe(), token.kind.describe()),
            ))
        }
    }

    fn statement(&mut self) -> Result<Statement, SyntaxError> {
        let token = self.advance();
        let TokenKind::Ident(target) = token.kind else {
            return Err(SyntaxError::new(
                token.pos,
                format!("expected an assignment, found {}", token.kind.describe()),
            ));
        };

        let assign = self.advance();
        if assign.kind != TokenKind::Assign {
            return Err(SyntaxError::new(
                assign.pos,
                format!(
                    "only 'name = value' statements are supported, found {} after '{target}'",
                    assign.kind.describe()
                ),
            ));
        }

        let value = self.expression()?;

        let end = self.peek().clone();
        match end.kind {
            TokenKind::Newline | TokenKind::Semicolon => {
                self.advance();
            }
            TokenKind::Eof => {}
            other => {
                return Err(SyntaxError::new(
                    end.pos,
                    format!("unexpected {} after the value of '{target}'", other.describe()),
                ));
            }
        }

        Ok(Statement {
            target,
            value,
            pos: token.pos,
        })
    }

    fn expression(&mut self) -> Result<Expr, SyntaxError> {
        let first = self.primary()?;
        let mut rest = Vec::new();
        while self.peek().kind == TokenKind::Plus {
            let plus = self.advance();
            rest.push((plus.pos, self.primary()?));
        }
        let Some(&(pos, _)) = rest.first() else {
            return Ok(first);
        };
        Ok(Expr {
            kind: ExprKind::Concat {
                first: Box::new(first),
                rest,
            },
            pos,
        })
    }

    /// Runs `parse` one bracket level deeper.
    fn nested<T>(
        &mut self,
        pos: Position,
        parse: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        if self.depth >= MAX_NESTING {
            return Err(SyntaxError::new(
                pos,
                format!("too many nested brackets (limit {MAX_NESTING})"),
            ));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn primary(&mut self) -> Result<Expr, SyntaxError> {
        let token = self.advance();
        let pos = token.pos;
        let kind = match token.kind {
            TokenKind::Str(mut value) => {
                while let TokenKind::Str(next) = &self.peek().kind {
                    value.push_str(next);
                    self.advance();
                }
                ExprKind::Str(value)
            }
            TokenKind::Int(value) => ExprKind::Int(value),
            TokenKind::LBrace => self.nested(pos, Self::map_literal)?,
            TokenKind::LBracket => self.nested(pos, Self::list_literal)?,
            TokenKind::LParen => {
                return self.nested(pos, |parser| {
                    let inner = parser.expression()?;
                    if parser.peek().kind == TokenKind::Comma {
                        return Err(SyntaxError::new(parser.peek().pos, "tuples are not supported"));
                    }
                    parser.expect(&TokenKind::RParen, "to close '('")?;
                    Ok(inner)
                });
            }
            TokenKind::Ident(name) => match name.as_str() {
                "True" => ExprKind::Bool(true),
                "False" => ExprKind::Bool(false),
                "None" => ExprKind::None,
                VAR_CALL if self.peek().kind == TokenKind::LParen => {
                    let paren = self.advance();
                    let argument = self.nested(paren.pos, |parser| {
                        let argument = parser.expression()?;
                        parser.expect(&TokenKind::RParen, "to close Var(")?;
                        Ok(argument)
                    })?;
                    ExprKind::Var(Box::new(argument))
                }
                _ if self.peek().kind == TokenKind::LParen => {
                    return Err(SyntaxError::new(
                        pos,
                        format!("call to '{name}' is not supported, only Var(...) is allowed"),
                    ));
                }
                _ => {
                    return Err(SyntaxError::new(
                        pos,
                        format!("name reference '{name}' is not supported"),
                    ));
                }
            },
            other => {
                return Err(SyntaxError::new(
                    pos,
                    format!("expected a value, found {}", other.describe()),
                ));
            }
        };
        Ok(Expr {
            kind,
            pos,
        })
    }

    fn map_literal(&mut self) -> Result<ExprKind, SyntaxError> {
        let mut entries = Vec::new();
        loop {
            if self.peek().kind == TokenKind::RBrace {
                self.advance();
                return Ok(ExprKind::Map(entries));
            }
            let key = self.expression()?;
            self.expect(&TokenKind::Colon, "after mapping key")?;
            let value = self.expression()?;
            entries.push((key, value));

            let separator = self.advance();
            match separator.kind {
                TokenKind::Comma => {}
                TokenKind::RBrace => return Ok(ExprKind::Map(entries)),
                other => {
                    return Err(SyntaxError::new(
                        separator.pos,
                        format!("expected ',' or '}}' in mapping, found {}", other.describe()),
                    ));
                }
            }
        }
    }

    fn list_literal(&mut self) -> Result<ExprKind, SyntaxError> {
        let mut items = Vec::new();
        loop {
            if self.peek().kind == TokenKind::RBracket {
                self.advance();
                return Ok(ExprKind::List(items));
            }
            items.push(self.expression()?);

            let separator = self.advance();
            match separator.kind {
                TokenKind::Comma => {}
                TokenKind::RBracket => return Ok(ExprKind::List(items)),
                other => {
                    return Err(SyntaxError::new(
                        separator.pos,
                        format!("expected ',' or ']' in list, found {}", other.describe()),
                    ));
                }
            }
        }
    }
}

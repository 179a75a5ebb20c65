//! Recursive-descent parser producing the expression tree.
//!
//! ```text
//! expr       := or
//! or         := and ( "||" and )*
//! and        := equality ( "&&" equality )*
//! equality   := comparison ( ( "==" | "!=" ) comparison )*
//! comparison := additive ( ( ">" | ">=" | "<" | "<=" ) additive )*
//! additive   := term ( ( "+" | "-" ) term )*
//! term       := unary ( ( "*" | "/" ) unary )*
//! unary      := ( "-" | "!" | "+" ) unary | primary
//! primary    := number | "true" | "false" | reference
//!             | function "(" expr ( "," expr )* ")" | "(" expr ")"
//! ```

use super::token::{Token, TokenKind};
use super::{ExprError, ExprLimits};
use crate::stats::StatKind;

/// Attribute an expression can read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reference {
    Level,
    StatMod(StatKind),
    StatTotal(StatKind),
    /// Highest rank among psychic-sourced skills.
    PsychicHighest,
    /// Skill rank by name, underscores already turned into spaces.
    SkillRank(String),
}

impl Reference {
    fn from_path(path: &[String]) -> Result<Self, ExprError> {
        let unknown = || ExprError::UnknownReference(format!("@{}", path.join(".")));
        let segments: Vec<&str> = path.iter().map(String::as_str).collect();

        match segments.as_slice() {
            ["level"] => Ok(Self::Level),
            ["stats", stat, field] => {
                let kind = stat.parse::<StatKind>().map_err(|_| unknown())?;
                match *field {
                    "mod" => Ok(Self::StatMod(kind)),
                    "total" => Ok(Self::StatTotal(kind)),
                    _ => Err(unknown()),
                }
            }
            ["skills", "psychic", "highest"] => Ok(Self::PsychicHighest),
            ["skills", name, "rank"] => Ok(Self::SkillRank(name.replace('_', " "))),
            _ => Err(unknown()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Function {
    Min,
    Max,
    Floor,
    Ceil,
    Round,
    Abs,
}

impl Function {
    /// Resolves `name` or `Math.name`.
    fn lookup(name: &str) -> Option<Self> {
        let bare = name.strip_prefix("Math.").unwrap_or(name);
        bare.parse().ok()
    }

    /// Returns the accepted argument count range.
    pub const fn arity(self) -> (usize, Option<usize>) {
        match self {
            Self::Min | Self::Max => (1, None),
            Self::Floor | Self::Ceil | Self::Round | Self::Abs => (1, Some(1)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
    And,
    Or,
}

/// Parsed expression tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Number(f64),
    Bool(bool),
    Ref(Reference),
    Unary(UnaryOp, Box<Node>),
    Binary(BinaryOp, Box<Node>, Box<Node>),
    Call(Function, Vec<Node>),
}

pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    limits: &'a ExprLimits,
    /// Set when the tree calls `floor` or `ceil`.
    pub explicit_rounding: bool,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], limits: &'a ExprLimits) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            limits,
            explicit_rounding: false,
        }
    }

    /// Parses the whole token stream as one expression.
    pub fn parse(&mut self) -> Result<Node, ExprError> {
        if self.tokens.is_empty() {
            return Err(ExprError::Empty);
        }
        let node = self.expression()?;
        match self.peek() {
            None => Ok(node),
            Some(token) => Err(unexpected(token)),
        }
    }

    fn expression(&mut self) -> Result<Node, ExprError> {
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            return Err(ExprError::TooDeep {
                max: self.limits.max_depth,
            });
        }
        let node = self.or();
        self.depth -= 1;
        node
    }

    fn or(&mut self) -> Result<Node, ExprError> {
        let mut lhs = self.and()?;
        while self.eat(&TokenKind::OrOr) {
            let rhs = self.and()?;
            lhs = Node::Binary(BinaryOp::Or, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn and(&mut self) -> Result<Node, ExprError> {
        let mut lhs = self.equality()?;
        while self.eat(&TokenKind::AndAnd) {
            let rhs = self.equality()?;
            lhs = Node::Binary(BinaryOp::And, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn equality(&mut self) -> Result<Node, ExprError> {
        let mut lhs = self.comparison()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::EqEq) => BinaryOp::Eq,
                Some(TokenKind::NotEq) => BinaryOp::Ne,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.comparison()?;
            lhs = Node::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn comparison(&mut self) -> Result<Node, ExprError> {
        let mut lhs = self.additive()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Gt) => BinaryOp::Gt,
                Some(TokenKind::Ge) => BinaryOp::Ge,
                Some(TokenKind::Lt) => BinaryOp::Lt,
                Some(TokenKind::Le) => BinaryOp::Le,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.additive()?;
            lhs = Node::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn additive(&mut self) -> Result<Node, ExprError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Node::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn term(&mut self) -> Result<Node, ExprError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Node::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn unary(&mut self) -> Result<Node, ExprError> {
        let op = match self.peek_kind() {
            Some(TokenKind::Minus) => Some(UnaryOp::Neg),
            Some(TokenKind::Bang) => Some(UnaryOp::Not),
            Some(TokenKind::Plus) => None,
            _ => return self.primary(),
        };
        self.pos += 1;

        self.depth += 1;
        if self.depth > self.limits.max_depth {
            return Err(ExprError::TooDeep {
                max: self.limits.max_depth,
            });
        }
        let operand = self.unary();
        self.depth -= 1;

        let operand = operand?;
        Ok(match op {
            Some(op) => Node::Unary(op, Box::new(operand)),
            None => operand,
        })
    }

    fn primary(&mut self) -> Result<Node, ExprError> {
        let tokens = self.tokens;
        let Some(token) = tokens.get(self.pos) else {
            return Err(ExprError::UnexpectedEnd);
        };
        self.pos += 1;

        match &token.kind {
            TokenKind::Number(value) => Ok(Node::Number(*value)),
            TokenKind::Reference(path) => Reference::from_path(path).map(Node::Ref),
            TokenKind::LParen => {
                let inner = self.expression()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Ident(name) if name == "true" => Ok(Node::Bool(true)),
            TokenKind::Ident(name) if name == "false" => Ok(Node::Bool(false)),
            TokenKind::Ident(name) => {
                let function =
                    Function::lookup(name).ok_or_else(|| ExprError::UnknownFunction(name.clone()))?;
                self.call(function)
            }
            _ => Err(unexpected(token)),
        }
    }

    fn call(&mut self, function: Function) -> Result<Node, ExprError> {
        self.expect(&TokenKind::LParen)?;

        let mut args = Vec::new();
        if !self.eat(&TokenKind::RParen) {
            loop {
                args.push(self.expression()?);
                if self.eat(&TokenKind::Comma) {
                    continue;
                }
                self.expect(&TokenKind::RParen)?;
                break;
            }
        }

        let (min, max) = function.arity();
        if args.len() < min || max.is_some_and(|max| args.len() > max) {
            return Err(ExprError::Arity {
                function: function.to_string(),
                found: args.len(),
            });
        }

        if matches!(function, Function::Floor | Function::Ceil) {
            self.explicit_rounding = true;
        }
        Ok(Node::Call(function, args))
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&'a TokenKind> {
        self.peek().map(|token| &token.kind)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ExprError> {
        match self.peek() {
            Some(token) if &token.kind == kind => {
                self.pos += 1;
                Ok(())
            }
            Some(token) => Err(unexpected(token)),
            None => Err(ExprError::UnexpectedEnd),
        }
    }
}

fn unexpected(token: &Token) -> ExprError {
    ExprError::UnexpectedToken {
        found: token.kind.describe(),
        offset: token.offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::token::tokenize;

    fn parse(source: &str) -> Result<Node, ExprError> {
        let tokens = tokenize(source)?;
        let limits = ExprLimits::default();
        Parser::new(&tokens, &limits).parse()
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let node = parse("1 + 2 * 3").unwrap();
        assert_eq!(
            node,
            Node::Binary(
                BinaryOp::Add,
                Box::new(Node::Number(1.0)),
                Box::new(Node::Binary(
                    BinaryOp::Mul,
                    Box::new(Node::Number(2.0)),
                    Box::new(Node::Number(3.0)),
                )),
            )
        );
    }

    #[test]
    fn skill_reference_turns_underscores_into_spaces() {
        assert_eq!(
            parse("@skills.know_magic.rank").unwrap(),
            Node::Ref(Reference::SkillRank("know magic".into()))
        );
    }

    #[test]
    fn unknown_reference_shapes_are_rejected() {
        assert_eq!(
            parse("@stats.luck.mod").unwrap_err(),
            ExprError::UnknownReference("@stats.luck.mod".into())
        );
        assert!(matches!(
            parse("@actor.items").unwrap_err(),
            ExprError::UnknownReference(_)
        ));
    }

    #[test]
    fn math_prefix_resolves_to_builtin() {
        let tokens = tokenize("Math.ceil(@level / 2)").unwrap();
        let limits = ExprLimits::default();
        let mut parser = Parser::new(&tokens, &limits);
        let node = parser.parse().unwrap();
        assert!(matches!(node, Node::Call(Function::Ceil, _)));
        assert!(parser.explicit_rounding);
    }

    #[test]
    fn unknown_function_is_rejected() {
        assert_eq!(
            parse("eval(1)").unwrap_err(),
            ExprError::UnknownFunction("eval".into())
        );
        assert!(matches!(
            parse("constructor").unwrap_err(),
            ExprError::UnknownFunction(_)
        ));
    }

    #[test]
    fn wrong_arity_is_rejected() {
        assert!(matches!(parse("floor(1, 2)"), Err(ExprError::Arity { .. })));
        assert!(matches!(parse("max()"), Err(ExprError::Arity { .. })));
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        assert!(matches!(
            parse("1 2"),
            Err(ExprError::UnexpectedToken { offset: 2, .. })
        ));
        assert_eq!(parse("(1 + 2").unwrap_err(), ExprError::UnexpectedEnd);
        assert_eq!(parse("").unwrap_err(), ExprError::Empty);
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let limits = ExprLimits {
            max_len: 512,
            max_depth: 4,
        };
        let tokens = tokenize("((((1))))").unwrap();
        let err = Parser::new(&tokens, &limits).parse().unwrap_err();
        assert_eq!(err, ExprError::TooDeep { max: 4 });

        let tokens = tokenize("--------1").unwrap();
        assert!(Parser::new(&tokens, &limits).parse().is_err());
    }
}

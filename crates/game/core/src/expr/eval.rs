//! Tree-walking evaluator.

use super::parser::{BinaryOp, Function, Node, Reference, UnaryOp};
use super::{AttributeSource, ExprError, Value};

/// Rank reported for a skill the actor does not have.
pub const UNTRAINED_RANK: i32 = -1;

pub fn evaluate(node: &Node, source: &dyn AttributeSource) -> Result<Value, ExprError> {
    match node {
        Node::Number(n) => Ok(Value::Number(*n)),
        Node::Bool(b) => Ok(Value::Bool(*b)),
        Node::Ref(reference) => Ok(Value::Number(f64::from(resolve(reference, source)))),
        Node::Unary(UnaryOp::Neg, operand) => {
            let value = evaluate(operand, source)?.as_number()?;
            Ok(Value::Number(-value))
        }
        Node::Unary(UnaryOp::Not, operand) => {
            Ok(Value::Bool(!evaluate(operand, source)?.truthy()))
        }
        Node::Binary(BinaryOp::And, lhs, rhs) => {
            if !evaluate(lhs, source)?.truthy() {
                return Ok(Value::Bool(false));
            }
            Ok(Value::Bool(evaluate(rhs, source)?.truthy()))
        }
        Node::Binary(BinaryOp::Or, lhs, rhs) => {
            if evaluate(lhs, source)?.truthy() {
                return Ok(Value::Bool(true));
            }
            Ok(Value::Bool(evaluate(rhs, source)?.truthy()))
        }
        Node::Binary(op, lhs, rhs) => {
            let lhs = evaluate(lhs, source)?;
            let rhs = evaluate(rhs, source)?;
            binary(*op, lhs, rhs)
        }
        Node::Call(function, args) => {
            let args = args
                .iter()
                .map(|arg| evaluate(arg, source)?.as_number())
                .collect::<Result<Vec<_>, _>>()?;
            call(*function, &args).map(Value::Number)
        }
    }
}

fn resolve(reference: &Reference, source: &dyn AttributeSource) -> i32 {
    match reference {
        Reference::Level => source.level(),
        Reference::StatMod(kind) => source.stat(*kind).modifier,
        Reference::StatTotal(kind) => source.stat(*kind).total,
        Reference::PsychicHighest => source.highest_psychic_rank().unwrap_or(UNTRAINED_RANK),
        Reference::SkillRank(name) => source.skill_rank(name).unwrap_or(UNTRAINED_RANK),
    }
}

fn binary(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, ExprError> {
    use BinaryOp::*;

    let value = match (op, lhs, rhs) {
        (And, a, b) => Value::Bool(a.truthy() && b.truthy()),
        (Or, a, b) => Value::Bool(a.truthy() || b.truthy()),
        (Eq, Value::Bool(a), Value::Bool(b)) => Value::Bool(a == b),
        (Ne, Value::Bool(a), Value::Bool(b)) => Value::Bool(a != b),
        (Add, a, b) => Value::Number(a.as_number()? + b.as_number()?),
        (Sub, a, b) => Value::Number(a.as_number()? - b.as_number()?),
        (Mul, a, b) => Value::Number(a.as_number()? * b.as_number()?),
        (Div, a, b) => {
            let divisor = b.as_number()?;
            if divisor == 0.0 {
                return Err(ExprError::DivisionByZero);
            }
            Value::Number(a.as_number()? / divisor)
        }
        (Gt, a, b) => Value::Bool(a.as_number()? > b.as_number()?),
        (Ge, a, b) => Value::Bool(a.as_number()? >= b.as_number()?),
        (Lt, a, b) => Value::Bool(a.as_number()? < b.as_number()?),
        (Le, a, b) => Value::Bool(a.as_number()? <= b.as_number()?),
        (Eq, a, b) => Value::Bool(a.as_number()? == b.as_number()?),
        (Ne, a, b) => Value::Bool(a.as_number()? != b.as_number()?),
    };

    match value {
        Value::Number(n) if !n.is_finite() => Err(ExprError::NonFinite),
        other => Ok(other),
    }
}

fn call(function: Function, args: &[f64]) -> Result<f64, ExprError> {
    let first = args.first().copied().ok_or_else(|| ExprError::Arity {
        function: function.to_string(),
        found: 0,
    })?;

    Ok(match function {
        Function::Min => args.iter().copied().fold(first, f64::min),
        Function::Max => args.iter().copied().fold(first, f64::max),
        Function::Floor => first.floor(),
        Function::Ceil => first.ceil(),
        Function::Round => first.round(),
        Function::Abs => first.abs(),
    })
}

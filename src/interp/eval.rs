//! Tree-walking interpreter for Strand programs

use crate::ast::{BinaryOp, Expr, ExprKind, Stmt, StmtKind};
use crate::common::Span;
use crate::diagnostics::RuntimeError;

use super::env::Environment;
use super::value::{Seq, Value};

/// Tree-walking interpreter.
///
/// All mutable program state lives in the environment and in sequences
/// reachable from it; statements themselves are pure syntax. One interpreter
/// executes every top-level statement of a program run against the same
/// environment.
pub struct Interpreter {
    /// Variable environment
    env: Environment,
    /// Output buffer for testing; mirrors what was written to stdout
    output: Vec<String>,
}

impl Interpreter {
    /// Create a new interpreter with an empty environment
    pub fn new() -> Self {
        Interpreter {
            env: Environment::new(),
            output: Vec::new(),
        }
    }

    /// Get captured output (for testing)
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Clear output buffer
    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// The variable environment
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Execute a statement
    pub fn execute(&mut self, stmt: &Stmt) -> Result<(), RuntimeError> {
        match &stmt.kind {
            StmtKind::Print(arg) => {
                let text = match self.eval(arg)? {
                    Value::Int(n) => n.to_string(),
                    // Sequence elements print as character codes, with no
                    // separators and no trailing newline.
                    Value::Seq(seq) => seq
                        .to_vec()
                        .iter()
                        .map(|v| (*v as u8) as char)
                        .collect::<String>(),
                };
                print!("{}", text);
                self.output.push(text);
                Ok(())
            }

            StmtKind::Compound(stmts) => {
                for child in stmts {
                    self.execute(child)?;
                }
                Ok(())
            }

            StmtKind::If { cond, body } => {
                let c = self.eval_int(cond)?;
                if c != 0 {
                    self.execute(body)?;
                }
                Ok(())
            }

            StmtKind::While { cond, body } => {
                while self.eval_int(cond)? != 0 {
                    self.execute(body)?;
                }
                Ok(())
            }

            StmtKind::Assign { name, index, value } => {
                let rhs = self.eval(value)?;
                match index {
                    // In-place element mutation: every alias of the sequence
                    // observes the write. Out-of-range indices are not a
                    // reported diagnostic here, unlike index reads.
                    Some(iexpr) => {
                        let idx = self.eval_int(iexpr)?;
                        let v = require_int(&rhs, value.span)?;
                        let seq = require_seq(&self.env.lookup(name), stmt.span)?.clone();
                        seq.set(idx as usize, v);
                    }
                    None => {
                        // Storing the value clones the handle, which is the
                        // acquire; the overwritten binding's handle drops.
                        self.env.set(name, rhs);
                    }
                }
                Ok(())
            }

            StmtKind::Push { seq, value } => {
                let target = require_seq(&self.eval(seq)?, seq.span)?.clone();
                let v = self.eval_int(value)?;
                target.push(v);
                Ok(())
            }
        }
    }

    /// Evaluate an expression
    pub fn eval(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match &expr.kind {
            ExprKind::LiteralInt(v) => Ok(Value::Int(*v)),

            ExprKind::Variable(name) => Ok(self.env.lookup(name)),

            ExprKind::Binary { op, left, right } => self.eval_binary(*op, left, right),

            ExprKind::SeqInit(elements) => {
                let seq = Seq::new();
                for elem in elements {
                    seq.push(self.eval_int(elem)?);
                }
                Ok(Value::Seq(seq))
            }

            ExprKind::SeqIndex { seq, index } => {
                let target = require_seq(&self.eval(seq)?, seq.span)?.clone();
                let idx = self.eval_int(index)?;
                if idx < 0 || idx as usize >= target.len() {
                    return Err(RuntimeError::IndexOutOfBounds {
                        index: idx,
                        len: target.len(),
                        span: index.span.into(),
                    });
                }
                // In range, so the read cannot fail.
                Ok(Value::Int(target.get(idx as usize).unwrap_or(0)))
            }

            ExprKind::SeqLen(arg) => {
                let seq = require_seq(&self.eval(arg)?, arg.span)?.clone();
                Ok(Value::Int(seq.len() as i64))
            }
        }
    }

    fn eval_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> Result<Value, RuntimeError> {
        // Short-circuit for And/Or: the left operand must be an integer, and
        // when it decides the result its value is returned as-is.
        match op {
            BinaryOp::And => {
                let l = self.eval_int(left)?;
                if l == 0 {
                    return Ok(Value::Int(l));
                }
                return Ok(Value::Int(self.eval_int(right)?));
            }
            BinaryOp::Or => {
                let l = self.eval_int(left)?;
                if l != 0 {
                    return Ok(Value::Int(l));
                }
                return Ok(Value::Int(self.eval_int(right)?));
            }
            _ => {}
        }

        let lhs = self.eval(left)?;
        let rhs = self.eval(right)?;

        match op {
            BinaryOp::Add => {
                let (a, b) = (require_int(&lhs, left.span)?, require_int(&rhs, right.span)?);
                Ok(Value::Int(a + b))
            }
            BinaryOp::Sub => {
                let (a, b) = (require_int(&lhs, left.span)?, require_int(&rhs, right.span)?);
                Ok(Value::Int(a - b))
            }
            BinaryOp::Mul => {
                let (a, b) = (require_int(&lhs, left.span)?, require_int(&rhs, right.span)?);
                Ok(Value::Int(a * b))
            }
            BinaryOp::Div => {
                let (a, b) = (require_int(&lhs, left.span)?, require_int(&rhs, right.span)?);
                if b == 0 {
                    return Err(RuntimeError::DivideByZero {
                        span: right.span.into(),
                    });
                }
                // Truncating division, like the literal operator.
                Ok(Value::Int(a / b))
            }
            BinaryOp::Less => match (&lhs, &rhs) {
                (Value::Int(a), Value::Int(b)) => Ok(Value::Int(i64::from(a < b))),
                (Value::Seq(a), Value::Seq(b)) => Ok(Value::Int(i64::from(a.lex_lt(b)))),
                _ => Err(RuntimeError::TypeMismatch {
                    expected: lhs.type_name(),
                    found: rhs.type_name(),
                    span: right.span.into(),
                }),
            },
            // Mixed kinds are never equal, never an error.
            BinaryOp::Equals => Ok(Value::Int(i64::from(lhs == rhs))),
            BinaryOp::And | BinaryOp::Or => unreachable!("handled above"),
        }
    }

    /// Evaluate an expression that must produce an integer
    fn eval_int(&mut self, expr: &Expr) -> Result<i64, RuntimeError> {
        let value = self.eval(expr)?;
        require_int(&value, expr.span)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn require_int(value: &Value, span: Span) -> Result<i64, RuntimeError> {
    value.as_int().ok_or(RuntimeError::TypeMismatch {
        expected: "int",
        found: value.type_name(),
        span: span.into(),
    })
}

fn require_seq<'a>(value: &'a Value, span: Span) -> Result<&'a Seq, RuntimeError> {
    value.as_seq().ok_or(RuntimeError::TypeMismatch {
        expected: "sequence",
        found: value.type_name(),
        span: span.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> Expr {
        Expr {
            kind: ExprKind::LiteralInt(v),
            span: Span::default(),
        }
    }

    fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr {
            kind: ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span: Span::default(),
        }
    }

    #[test]
    fn test_division_truncates() {
        let mut interp = Interpreter::new();
        let expr = binary(BinaryOp::Div, int(7), int(2));
        assert_eq!(interp.eval(&expr).unwrap(), Value::Int(3));
        let expr = binary(BinaryOp::Div, int(-7), int(2));
        assert_eq!(interp.eval(&expr).unwrap(), Value::Int(-3));
    }

    #[test]
    fn test_division_by_zero() {
        let mut interp = Interpreter::new();
        let expr = binary(BinaryOp::Div, int(1), int(0));
        assert!(matches!(
            interp.eval(&expr),
            Err(RuntimeError::DivideByZero { .. })
        ));
    }

    #[test]
    fn test_and_short_circuits_past_division_by_zero() {
        let mut interp = Interpreter::new();
        let poison = binary(BinaryOp::Div, int(1), int(0));
        let expr = binary(BinaryOp::And, int(0), poison);
        assert_eq!(interp.eval(&expr).unwrap(), Value::Int(0));
    }

    #[test]
    fn test_or_short_circuits_and_keeps_left_value() {
        let mut interp = Interpreter::new();
        let poison = binary(BinaryOp::Div, int(1), int(0));
        let expr = binary(BinaryOp::Or, int(7), poison);
        assert_eq!(interp.eval(&expr).unwrap(), Value::Int(7));
    }

    #[test]
    fn test_logical_result_not_normalized() {
        let mut interp = Interpreter::new();
        let expr = binary(BinaryOp::And, int(2), int(3));
        assert_eq!(interp.eval(&expr).unwrap(), Value::Int(3));
    }
}

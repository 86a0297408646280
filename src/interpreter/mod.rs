//! Post-order tree walk over the AST, maintaining an environment chain and a function table.
mod environment;
mod error;
mod functions;
mod value;

pub use environment::Environment;
pub use error::RuntimeError;
pub use functions::{FunctionDef, FunctionTable};
pub use value::{format_number, Value};

use crate::ast::{BinaryOp, Block, Expr, Program, Stmt, UnaryOp};
use crate::io::InterpreterIo;
use crate::lexer::Position;

pub type EvalResult<T> = Result<T, RuntimeError>;

/// The result of executing a statement or block: either the ordinary flow-through value, or a
/// `Return` signal unwinding toward the nearest enclosing `Call`.
enum Flow {
    Normal(Value),
    Return(Value),
}

/// Walks one program. Holds the only two pieces of mutable state the language has: the
/// environment chain (created per call, grown/shrunk with it) and the function table.
pub struct Interpreter<'io> {
    functions: FunctionTable,
    io: &'io mut dyn InterpreterIo,
}

impl<'io> Interpreter<'io> {
    pub fn new(io: &'io mut dyn InterpreterIo) -> Self {
        Self {
            functions: FunctionTable::new(),
            io,
        }
    }

    /// Runs `program` to completion. A `return` at the top level terminates the program with
    /// the returned value; otherwise the value of the last executed top-level statement is
    /// returned.
    pub fn run(&mut self, program: &Program) -> EvalResult<Value> {
        let global = Environment::global();
        match self.exec_block(&program.statements, &global)? {
            Flow::Return(value) | Flow::Normal(value) => Ok(value),
        }
    }

    fn exec_block(&mut self, block: &Block, env: &Environment) -> EvalResult<Flow> {
        let mut last = Value::Nil;
        for stmt in block {
            match self.exec_stmt(stmt, env)? {
                Flow::Return(value) => return Ok(Flow::Return(value)),
                Flow::Normal(value) => last = value,
            }
        }
        Ok(Flow::Normal(last))
    }

    fn exec_stmt(&mut self, stmt: &Stmt, env: &Environment) -> EvalResult<Flow> {
        match stmt {
            Stmt::Expr(expr) => Ok(Flow::Normal(self.eval_expr(expr, env)?)),

            Stmt::Assign { name, expr } => {
                let value = self.eval_expr(expr, env)?;
                env.set(name, value);
                Ok(Flow::Normal(Value::Nil))
            }

            Stmt::IndexAssign {
                base,
                index,
                value,
                position,
            } => {
                self.exec_index_assign(base, index, value, env, *position)?;
                Ok(Flow::Normal(Value::Nil))
            }

            Stmt::Remove {
                base,
                index,
                position,
            } => {
                self.exec_remove(base, index, env, *position)?;
                Ok(Flow::Normal(Value::Nil))
            }

            Stmt::FuncDef { name, params, body } => {
                self.functions
                    .define(name.clone(), params.clone(), body.clone());
                Ok(Flow::Normal(Value::Nil))
            }

            Stmt::Return { expr } => Ok(Flow::Return(self.eval_expr(expr, env)?)),

            // `if`/`while`/bare blocks execute in the current environment, not a new frame:
            // only function calls get a fresh scope.
            Stmt::If {
                cond,
                then_block,
                else_block,
            } => {
                if self.eval_expr(cond, env)?.is_truthy() {
                    self.exec_block(then_block, env)
                } else if let Some(else_block) = else_block {
                    self.exec_block(else_block, env)
                } else {
                    Ok(Flow::Normal(Value::Nil))
                }
            }

            Stmt::While { cond, body } => {
                while self.eval_expr(cond, env)?.is_truthy() {
                    if let Flow::Return(value) = self.exec_block(body, env)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal(Value::Nil))
            }

            Stmt::Print { expr } => {
                let value = self.eval_expr(expr, env)?;
                self.io.print_line(&value.to_string());
                Ok(Flow::Normal(Value::Nil))
            }

            Stmt::Block(block) => self.exec_block(block, env),
        }
    }

    fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> EvalResult<Value> {
        match expr {
            Expr::Num(n) => Ok(Value::Number(*n)),
            Expr::Str(s) => Ok(Value::String(s.clone())),
            Expr::Bool(b) => Ok(Value::Bool(*b)),

            Expr::Var { name, position } => env
                .get(name)
                .ok_or_else(|| RuntimeError::undefined_variable(name, *position)),

            Expr::Unary { op, expr, position } => {
                let value = self.eval_expr(expr, env)?;
                match op {
                    UnaryOp::Neg => match value {
                        Value::Number(n) => Ok(Value::Number(-n)),
                        other => Err(RuntimeError::new(
                            format!("cannot negate a {}", other.type_name()),
                            *position,
                        )),
                    },
                    UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
                }
            }

            Expr::Binary {
                left,
                op,
                right,
                position,
            } => self.eval_binary(left, *op, right, env, *position),

            Expr::Index {
                base,
                index,
                position,
            } => {
                let base = self.eval_expr(base, env)?;
                let index = self.eval_expr(index, env)?;
                self.index_value(&base, &index, *position)
            }

            Expr::List(items) => {
                let values = items
                    .iter()
                    .map(|item| self.eval_expr(item, env))
                    .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::list(values))
            }

            Expr::Dict(pairs) => {
                let mut entries: Vec<(Value, Value)> = Vec::with_capacity(pairs.len());
                for (key_expr, value_expr) in pairs {
                    let key = self.eval_expr(key_expr, env)?;
                    let value = self.eval_expr(value_expr, env)?;
                    // Later duplicate keys overwrite earlier ones.
                    if let Some(slot) = entries.iter_mut().find(|(k, _)| *k == key) {
                        slot.1 = value;
                    } else {
                        entries.push((key, value));
                    }
                }
                Ok(Value::dict(entries))
            }

            Expr::Call {
                name,
                args,
                position,
            } => self.eval_call(name, args, env, *position),

            Expr::Input { prompt, position } => {
                let prompt = self.eval_expr(prompt, env)?;
                self.io
                    .read_line(&prompt.to_string())
                    .map(Value::String)
                    .map_err(|err| RuntimeError::new(format!("input failed: {err}"), *position))
            }
        }
    }

    /// `and`/`or` short-circuit and yield the last operand actually evaluated, not a coerced
    /// boolean, in the style of common dynamic languages. Every other binary operator always
    /// evaluates both sides.
    fn eval_binary(
        &mut self,
        left: &Expr,
        op: BinaryOp,
        right: &Expr,
        env: &Environment,
        position: Position,
    ) -> EvalResult<Value> {
        match op {
            BinaryOp::And => {
                let left = self.eval_expr(left, env)?;
                if !left.is_truthy() {
                    return Ok(left);
                }
                self.eval_expr(right, env)
            }
            BinaryOp::Or => {
                let left = self.eval_expr(left, env)?;
                if left.is_truthy() {
                    return Ok(left);
                }
                self.eval_expr(right, env)
            }
            _ => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                match op {
                    BinaryOp::Add => Self::eval_add(left, right, position),
                    BinaryOp::Sub => Self::numeric_op(left, right, position, |a, b| a - b),
                    BinaryOp::Mul => Self::numeric_op(left, right, position, |a, b| a * b),
                    BinaryOp::Div => {
                        let (a, b) = Self::numeric_pair(left, right, position)?;
                        if b == 0.0 {
                            Err(RuntimeError::new("division by zero", position))
                        } else {
                            Ok(Value::Number(a / b))
                        }
                    }
                    BinaryOp::Eq => Ok(Value::Bool(left == right)),
                    BinaryOp::Ne => Ok(Value::Bool(left != right)),
                    BinaryOp::Lt => Self::compare(left, right, position, |o| o.is_lt()),
                    BinaryOp::Le => Self::compare(left, right, position, |o| o.is_le()),
                    BinaryOp::Gt => Self::compare(left, right, position, |o| o.is_gt()),
                    BinaryOp::Ge => Self::compare(left, right, position, |o| o.is_ge()),
                    BinaryOp::And | BinaryOp::Or => unreachable!("handled above"),
                }
            }
        }
    }

    /// `+` has dual semantics: string concatenation if either operand is a string, numeric
    /// addition otherwise. `Value`'s `Display` impl already normalizes integer-valued floats
    /// before the concatenation happens.
    fn eval_add(left: Value, right: Value, position: Position) -> EvalResult<Value> {
        match (&left, &right) {
            (Value::String(_), _) | (_, Value::String(_)) => {
                Ok(Value::String(format!("{left}{right}")))
            }
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            _ => Err(RuntimeError::new(
                format!("cannot add {} and {}", left.type_name(), right.type_name()),
                position,
            )),
        }
    }

    fn numeric_pair(left: Value, right: Value, position: Position) -> EvalResult<(f64, f64)> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok((a, b)),
            (left, right) => Err(RuntimeError::new(
                format!(
                    "expected numbers, got {} and {}",
                    left.type_name(),
                    right.type_name()
                ),
                position,
            )),
        }
    }

    fn numeric_op(
        left: Value,
        right: Value,
        position: Position,
        f: impl Fn(f64, f64) -> f64,
    ) -> EvalResult<Value> {
        let (a, b) = Self::numeric_pair(left, right, position)?;
        Ok(Value::Number(f(a, b)))
    }

    /// Ordered comparisons are defined for number-number and string-string pairs only.
    fn compare(
        left: Value,
        right: Value,
        position: Position,
        f: impl Fn(std::cmp::Ordering) -> bool,
    ) -> EvalResult<Value> {
        match (&left, &right) {
            (Value::Number(a), Value::Number(b)) => a
                .partial_cmp(b)
                .map(|ord| Value::Bool(f(ord)))
                .ok_or_else(|| RuntimeError::new("cannot compare NaN", position)),
            (Value::String(a), Value::String(b)) => Ok(Value::Bool(f(a.cmp(b)))),
            _ => Err(RuntimeError::new(
                format!(
                    "cannot compare {} and {}",
                    left.type_name(),
                    right.type_name()
                ),
                position,
            )),
        }
    }

    /// Coerces an integer-valued index to `i64`; a fractional index is a runtime error.
    fn coerce_index(index: &Value, position: Position) -> EvalResult<i64> {
        match index {
            Value::Number(n) if n.fract() == 0.0 => Ok(*n as i64),
            Value::Number(_) => Err(RuntimeError::new(
                "list index must be a whole number",
                position,
            )),
            other => Err(RuntimeError::new(
                format!("list index must be a number, got {}", other.type_name()),
                position,
            )),
        }
    }

    fn index_value(&self, base: &Value, index: &Value, position: Position) -> EvalResult<Value> {
        match base {
            Value::List(items) => {
                let idx = Self::coerce_index(index, position)?;
                let items = items.borrow();
                usize::try_from(idx)
                    .ok()
                    .and_then(|idx| items.get(idx))
                    .cloned()
                    .ok_or_else(|| RuntimeError::new("list index out of range", position))
            }
            Value::Dict(pairs) => pairs
                .borrow()
                .iter()
                .find(|(key, _)| key == index)
                .map(|(_, value)| value.clone())
                .ok_or_else(|| RuntimeError::new(format!("key {index} not found"), position)),
            other => Err(RuntimeError::new(
                format!("cannot index a {}", other.type_name()),
                position,
            )),
        }
    }

    fn exec_index_assign(
        &mut self,
        base: &Expr,
        index: &Expr,
        value: &Expr,
        env: &Environment,
        position: Position,
    ) -> EvalResult<()> {
        let base_value = self.eval_expr(base, env)?;
        let index_value = self.eval_expr(index, env)?;
        let new_value = self.eval_expr(value, env)?;

        match &base_value {
            Value::List(items) => {
                let idx = Self::coerce_index(&index_value, position)?;
                let mut items = items.borrow_mut();
                let slot = usize::try_from(idx)
                    .ok()
                    .and_then(|idx| items.get_mut(idx))
                    .ok_or_else(|| RuntimeError::new("list index out of range", position))?;
                *slot = new_value;
                Ok(())
            }
            Value::Dict(pairs) => {
                let mut pairs = pairs.borrow_mut();
                if let Some(slot) = pairs.iter_mut().find(|(key, _)| *key == index_value) {
                    slot.1 = new_value;
                } else {
                    pairs.push((index_value, new_value));
                }
                Ok(())
            }
            other => Err(RuntimeError::new(
                format!("cannot index-assign a {}", other.type_name()),
                position,
            )),
        }
    }

    fn exec_remove(
        &mut self,
        base: &Expr,
        index: &Expr,
        env: &Environment,
        position: Position,
    ) -> EvalResult<()> {
        let base_value = self.eval_expr(base, env)?;
        let index_value = self.eval_expr(index, env)?;

        match &base_value {
            Value::List(items) => {
                let idx = Self::coerce_index(&index_value, position)?;
                let mut items = items.borrow_mut();
                let idx = usize::try_from(idx).ok().filter(|&idx| idx < items.len());
                match idx {
                    Some(idx) => {
                        items.remove(idx);
                        Ok(())
                    }
                    None => Err(RuntimeError::new("list index out of range", position)),
                }
            }
            Value::Dict(pairs) => {
                let mut pairs = pairs.borrow_mut();
                let found = pairs.iter().position(|(key, _)| *key == index_value);
                match found {
                    Some(idx) => {
                        pairs.remove(idx);
                        Ok(())
                    }
                    None => Err(RuntimeError::new(
                        format!("key {index_value} not found"),
                        position,
                    )),
                }
            }
            other => Err(RuntimeError::new(
                format!("cannot remove from a {}", other.type_name()),
                position,
            )),
        }
    }

    /// Calls are resolved by name in the process-wide function table. The new frame's parent
    /// is the *caller's* current environment rather than the environment the function was
    /// defined in — dynamic scoping is an intentional, observable property of this language,
    /// not an oversight, so free names inside a function body resolve against whoever calls
    /// it, not where it was written.
    fn eval_call(
        &mut self,
        name: &str,
        args: &[Expr],
        env: &Environment,
        position: Position,
    ) -> EvalResult<Value> {
        let func = self
            .functions
            .get(name)
            .ok_or_else(|| RuntimeError::undefined_function(name, position))?;

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg, env)?);
        }

        let call_env = env.child();
        // Extra arguments are silently ignored; a deficit leaves the remaining parameters
        // unbound, so the first access to one raises undefined-variable.
        for (param, value) in func.params.iter().zip(values) {
            call_env.set(param, value);
        }

        match self.exec_block(&func.body, &call_env)? {
            Flow::Return(value) | Flow::Normal(value) => Ok(value),
        }
    }
}

use crate::lexer::Position;

use super::expr::Expr;

/// A sequence of statements executed in order.
pub type Block = Vec<Stmt>;

/// Statement nodes. `Program` is just a top-level `Block`.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    Assign {
        name: String,
        expr: Expr,
    },
    IndexAssign {
        base: Expr,
        index: Expr,
        value: Expr,
        position: Position,
    },
    Remove {
        base: Expr,
        index: Expr,
        position: Position,
    },
    FuncDef {
        name: String,
        params: Vec<String>,
        body: Block,
    },
    Return {
        expr: Expr,
    },
    If {
        cond: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },
    While {
        cond: Expr,
        body: Block,
    },
    Print {
        expr: Expr,
    },
    Block(Block),
}

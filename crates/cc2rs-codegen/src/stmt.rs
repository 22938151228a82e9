//! The statement translator (spec §4.3).
//!
//! Every C statement becomes exactly one target [`Stmt`], almost always
//! `Stmt::Expr` wrapping a control-flow [`Expr`] variant — Rust's `if`,
//! `while`, `loop`, `break`, `continue`, and `return` are themselves
//! expressions, so this mirrors the source shape closely. Compound
//! statements open and close a lexical scope via [`Environment::mark`] and
//! [`Environment::restore`], on every exit path including the early
//! returns this function takes on unsupported constructs.

use crate::bool_coercion::to_bool;
use crate::decl::translate_declaration;
use crate::expr::translate_expr;
use crate::target_ast::{Block, Expr, Stmt};
use cc2rs_ast as ast;
use cc2rs_hir::{Environment, TranslateError};

/// Translate a compound statement's items into a target [`Block`],
/// opening and restoring its own scope.
pub fn translate_block_items(
    items: &[ast::BlockItem],
    env: &mut Environment,
) -> Result<Block, TranslateError> {
    let mark = env.mark();
    let result = (|| {
        let mut stmts = Vec::with_capacity(items.len());
        for item in items {
            match item {
                ast::BlockItem::Decl(decl) => stmts.extend(translate_declaration(decl, env)?),
                ast::BlockItem::Stmt(inner) => stmts.push(translate_stmt(inner, env)?),
            }
        }
        Ok(Block { stmts, trailing: None })
    })();
    env.restore(mark);
    result
}

/// Flatten a single translated statement into a [`Block`], so `if`/`while`
/// bodies that were a single (non-compound) C statement don't grow a
/// redundant nested block.
fn stmt_to_block(stmt: Stmt) -> Block {
    match stmt {
        Stmt::Expr(Expr::Block(block)) => block,
        other => Block {
            stmts: vec![other],
            trailing: None,
        },
    }
}

/// Translate one C statement.
pub fn translate_stmt(stmt: &ast::Stmt, env: &mut Environment) -> Result<Stmt, TranslateError> {
    match stmt {
        ast::Stmt::Expr(None) => Ok(Stmt::Expr(Expr::Block(Block::empty()))),
        ast::Stmt::Expr(Some(e)) => {
            let result = translate_expr(false, e, env)?;
            Ok(Stmt::Expr(result.expr))
        }
        ast::Stmt::Compound(items) => {
            let block = translate_block_items(items, env)?;
            Ok(Stmt::Expr(Expr::Block(block)))
        }
        ast::Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => translate_if(cond, then_branch, else_branch.as_deref(), env),
        ast::Stmt::While { cond, body } => translate_while(cond, body, env),
        ast::Stmt::DoWhile { .. } => {
            Err(TranslateError::UnsupportedStatement("do-while loop".to_string()))
        }
        ast::Stmt::For {
            init,
            cond,
            step,
            body,
        } => translate_for(init, cond.as_ref(), step.as_ref(), body, env),
        ast::Stmt::Break => Ok(Stmt::Expr(Expr::Break)),
        ast::Stmt::Continue => Ok(Stmt::Expr(Expr::Continue)),
        ast::Stmt::Return(value) => translate_return(value.as_ref(), env),
        ast::Stmt::Switch { .. } => {
            Err(TranslateError::UnsupportedStatement("switch statement".to_string()))
        }
        ast::Stmt::Goto(_) => Err(TranslateError::UnsupportedStatement("goto statement".to_string())),
        ast::Stmt::Labeled { .. } => {
            Err(TranslateError::UnsupportedStatement("labeled statement".to_string()))
        }
    }
}

fn translate_if(
    cond: &ast::Expr,
    then_branch: &ast::Stmt,
    else_branch: Option<&ast::Stmt>,
    env: &mut Environment,
) -> Result<Stmt, TranslateError> {
    let cond_bool = to_bool(translate_expr(true, cond, env)?);
    let then_block = stmt_to_block(translate_stmt(then_branch, env)?);
    let else_block = match else_branch {
        Some(stmt) => stmt_to_block(translate_stmt(stmt, env)?),
        None => Block::empty(),
    };
    Ok(Stmt::Expr(Expr::If {
        cond: Box::new(cond_bool.expr),
        then_block,
        else_block,
    }))
}

fn translate_while(cond: &ast::Expr, body: &ast::Stmt, env: &mut Environment) -> Result<Stmt, TranslateError> {
    let cond_bool = to_bool(translate_expr(true, cond, env)?);
    let body_block = stmt_to_block(translate_stmt(body, env)?);
    Ok(Stmt::Expr(Expr::While {
        cond: Box::new(cond_bool.expr),
        body: body_block,
    }))
}

fn translate_for(
    init: &ast::ForInit,
    cond: Option<&ast::Expr>,
    step: Option<&ast::Expr>,
    body: &ast::Stmt,
    env: &mut Environment,
) -> Result<Stmt, TranslateError> {
    if step.is_some() {
        return Err(TranslateError::UnsupportedStatement(
            "for-loop with a step expression".to_string(),
        ));
    }

    let mark = env.mark();
    let result = (|| {
        let mut pre_stmts = Vec::new();
        match init {
            ast::ForInit::Empty => {}
            ast::ForInit::Expr(e) => {
                let result = translate_expr(false, e, env)?;
                pre_stmts.push(Stmt::Expr(result.expr));
            }
            ast::ForInit::Decl(decl) => pre_stmts.extend(translate_declaration(decl, env)?),
        }

        let body_block = stmt_to_block(translate_stmt(body, env)?);
        let loop_expr = match cond {
            Some(cond) => {
                let cond_bool = to_bool(translate_expr(true, cond, env)?);
                Expr::While {
                    cond: Box::new(cond_bool.expr),
                    body: body_block,
                }
            }
            None => Expr::Loop(body_block),
        };

        Ok(Stmt::Expr(Expr::Block(Block {
            stmts: pre_stmts,
            trailing: Some(Box::new(loop_expr)),
        })))
    })();
    env.restore(mark);
    result
}

fn translate_return(value: Option<&ast::Expr>, env: &mut Environment) -> Result<Stmt, TranslateError> {
    match value {
        Some(e) => {
            let result = translate_expr(true, e, env)?;
            Ok(Stmt::Expr(Expr::Return(Some(Box::new(result.expr)))))
        }
        None => Ok(Stmt::Expr(Expr::Return(None))),
    }
}

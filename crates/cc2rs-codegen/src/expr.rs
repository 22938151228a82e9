//! The expression translator (spec §4.2).
//!
//! `translate_expr` converts a C expression node to a [`ExprResult`]: the
//! pair of inferred C type and target expression spec §3.2 calls a
//! "Result". The `demand` flag states whether the expression's *value* is
//! required; it affects only the comma and assignment lowerings.

use crate::bool_coercion::{from_bool, to_bool, ExprResult};
use crate::target_ast::{AssignOp, BinOp, Block, Expr, Stmt};
use cc2rs_ast::{self as ast};
use cc2rs_hir::types::{fold_type_specifiers, usual_arithmetic_conversions};
use cc2rs_hir::{CType, Environment, FloatWidth, TranslateError};

/// Translate a C expression. `demand` states whether the expression's
/// value is consumed; it is threaded unchanged except where spec §4.2
/// overrides it (casts and prefix inc/dec always demand their operand's
/// value; comparisons and logicals always demand both operands').
pub fn translate_expr(
    demand: bool,
    expr: &ast::Expr,
    env: &mut Environment,
) -> Result<ExprResult, TranslateError> {
    match expr {
        ast::Expr::IntLiteral(lexeme) => {
            Ok(ExprResult::new(CType::signed_int(), Expr::IntLiteral(lexeme.clone())))
        }
        ast::Expr::FloatLiteral(lexeme) => translate_float_literal(lexeme),
        ast::Expr::StringLiteral(lexeme) => Err(TranslateError::UnsupportedExpression(format!(
            "string literal `{lexeme}`"
        ))),
        ast::Expr::CharLiteral(c) => {
            Err(TranslateError::UnsupportedExpression(format!("char literal `{c}`")))
        }
        ast::Expr::Ident(name) => translate_variable(name, env),
        ast::Expr::Cast(specifiers, inner) => translate_cast(specifiers, inner, env),
        ast::Expr::Unary(op, inner) => translate_unary(demand, *op, inner, env),
        ast::Expr::PostfixIncDec(op, _) => Err(TranslateError::UnsupportedUnaryOperator(format!(
            "postfix {op:?}"
        ))),
        ast::Expr::AddressOf(_) => {
            Err(TranslateError::UnsupportedUnaryOperator("address-of (&)".to_string()))
        }
        ast::Expr::Deref(_) => {
            Err(TranslateError::UnsupportedUnaryOperator("dereference (*)".to_string()))
        }
        ast::Expr::SizeOf(_) => {
            Err(TranslateError::UnsupportedUnaryOperator("sizeof".to_string()))
        }
        ast::Expr::Binary(op, a, b) => translate_binary(*op, a, b, env),
        ast::Expr::Logical(op, a, b) => translate_logical(*op, a, b, env),
        ast::Expr::Conditional(c, t, f) => translate_conditional(demand, c, t, f, env),
        ast::Expr::Assign(op, lhs, rhs) => translate_assign(demand, *op, lhs, rhs, env),
        ast::Expr::Call(callee, args) => translate_call(callee, args, env),
        ast::Expr::Comma(items) => translate_comma(demand, items, env),
    }
}

fn translate_variable(name: &str, env: &Environment) -> Result<ExprResult, TranslateError> {
    let ty = env
        .lookup(name)
        .cloned()
        .ok_or_else(|| TranslateError::UndefinedVariable(name.to_string()))?;
    Ok(ExprResult::new(ty, Expr::Ident(name.to_string())))
}

fn translate_float_literal(lexeme: &str) -> Result<ExprResult, TranslateError> {
    let (digits, is_f32) = match lexeme.strip_suffix(['f', 'F']) {
        Some(digits) => (digits, true),
        None => (lexeme, false),
    };
    let well_formed = !digits.is_empty()
        && digits.chars().any(|c| c.is_ascii_digit())
        && digits
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !well_formed {
        return Err(TranslateError::MalformedFloat(lexeme.to_string()));
    }
    if is_f32 {
        Ok(ExprResult::new(
            CType::Float(FloatWidth::ThirtyTwo),
            Expr::RawLexeme(format!("{digits}f32")),
        ))
    } else {
        Ok(ExprResult::new(
            CType::Float(FloatWidth::SixtyFour),
            Expr::RawLexeme(digits.to_string()),
        ))
    }
}

fn translate_cast(
    specifiers: &[ast::TypeSpecifier],
    inner: &ast::Expr,
    env: &mut Environment,
) -> Result<ExprResult, TranslateError> {
    let target_ty = fold_type_specifiers(specifiers)?;
    let target_name = target_ty.target_name()?;
    let inner_result = translate_expr(true, inner, env)?;
    Ok(ExprResult::new(
        target_ty,
        Expr::Cast(Box::new(inner_result.expr), target_name),
    ))
}

fn translate_unary(
    demand: bool,
    op: ast::UnaryOp,
    inner: &ast::Expr,
    env: &mut Environment,
) -> Result<ExprResult, TranslateError> {
    match op {
        ast::UnaryOp::Plus => translate_expr(true, inner, env),
        ast::UnaryOp::Minus => {
            let operand = translate_expr(true, inner, env)?;
            Ok(ExprResult::new(
                operand.c_type,
                Expr::Neg(Box::new(operand.expr)),
            ))
        }
        ast::UnaryOp::BitNot => {
            let operand = translate_expr(true, inner, env)?;
            Ok(ExprResult::new(
                operand.c_type,
                Expr::Not(Box::new(operand.expr)),
            ))
        }
        ast::UnaryOp::LogicalNot => {
            let operand = translate_expr(true, inner, env)?;
            let negated = to_bool(operand);
            Ok(from_bool(Expr::Not(Box::new(negated.expr))))
        }
        ast::UnaryOp::PreInc | ast::UnaryOp::PreDec => {
            let assign_op = if op == ast::UnaryOp::PreInc {
                ast::AssignOp::AddAssign
            } else {
                ast::AssignOp::SubAssign
            };
            let desugared = ast::Expr::Assign(
                assign_op,
                Box::new(inner.clone()),
                Box::new(ast::Expr::IntLiteral("1".to_string())),
            );
            translate_expr(demand, &desugared, env)
        }
    }
}

/// The "promotion helper" of spec §4.2: build a binary target expression
/// from two [`ExprResult`]s, computing the usual-arithmetic common type
/// and inserting casts for whichever operand doesn't already have it.
fn promote_binop(
    ctor: impl FnOnce(Box<Expr>, Box<Expr>) -> Expr,
    a: ExprResult,
    b: ExprResult,
) -> Result<ExprResult, TranslateError> {
    let common = usual_arithmetic_conversions(&a.c_type, &b.c_type);
    let a_expr = to_common_type(a, &common)?;
    let b_expr = to_common_type(b, &common)?;
    Ok(ExprResult::new(common, ctor(Box::new(a_expr), Box::new(b_expr))))
}

pub(crate) fn to_common_type(result: ExprResult, target: &CType) -> Result<Expr, TranslateError> {
    if &result.c_type == target {
        Ok(result.expr)
    } else {
        Ok(Expr::Cast(Box::new(result.expr), target.target_name()?))
    }
}

fn target_binop(op: ast::BinOp) -> BinOp {
    match op {
        ast::BinOp::Add => BinOp::Add,
        ast::BinOp::Sub => BinOp::Sub,
        ast::BinOp::Mul => BinOp::Mul,
        ast::BinOp::Div => BinOp::Div,
        ast::BinOp::Rem => BinOp::Rem,
        ast::BinOp::Shl => BinOp::Shl,
        ast::BinOp::Shr => BinOp::Shr,
        ast::BinOp::BitAnd => BinOp::BitAnd,
        ast::BinOp::BitXor => BinOp::BitXor,
        ast::BinOp::BitOr => BinOp::BitOr,
        ast::BinOp::Lt => BinOp::Lt,
        ast::BinOp::Le => BinOp::Le,
        ast::BinOp::Gt => BinOp::Gt,
        ast::BinOp::Ge => BinOp::Ge,
        ast::BinOp::Eq => BinOp::Eq,
        ast::BinOp::Ne => BinOp::Ne,
    }
}

fn is_comparison(op: ast::BinOp) -> bool {
    matches!(
        op,
        ast::BinOp::Lt | ast::BinOp::Le | ast::BinOp::Gt | ast::BinOp::Ge | ast::BinOp::Eq | ast::BinOp::Ne
    )
}

fn translate_binary(
    op: ast::BinOp,
    a: &ast::Expr,
    b: &ast::Expr,
    env: &mut Environment,
) -> Result<ExprResult, TranslateError> {
    let a_result = translate_expr(true, a, env)?;
    let b_result = translate_expr(true, b, env)?;
    let target_op = target_binop(op);
    let combined = promote_binop(
        |l, r| Expr::Binary(target_op, l, r),
        a_result,
        b_result,
    )?;
    if is_comparison(op) {
        Ok(from_bool(combined.expr))
    } else {
        Ok(combined)
    }
}

fn translate_logical(
    op: ast::LogicalOp,
    a: &ast::Expr,
    b: &ast::Expr,
    env: &mut Environment,
) -> Result<ExprResult, TranslateError> {
    let a_bool = to_bool(translate_expr(true, a, env)?);
    let b_bool = to_bool(translate_expr(true, b, env)?);
    let combined = match op {
        ast::LogicalOp::And => promote_binop(Expr::LogicalAnd, a_bool, b_bool)?,
        ast::LogicalOp::Or => promote_binop(Expr::LogicalOr, a_bool, b_bool)?,
    };
    Ok(from_bool(combined.expr))
}

fn translate_conditional(
    demand: bool,
    cond: &ast::Expr,
    then_expr: &ast::Expr,
    else_expr: &ast::Expr,
    env: &mut Environment,
) -> Result<ExprResult, TranslateError> {
    let cond_bool = to_bool(translate_expr(true, cond, env)?);
    let then_result = translate_expr(demand, then_expr, env)?;
    let else_result = translate_expr(demand, else_expr, env)?;
    let common = usual_arithmetic_conversions(&then_result.c_type, &else_result.c_type);
    let then_expr = to_common_type(then_result, &common)?;
    let else_expr = to_common_type(else_result, &common)?;
    Ok(ExprResult::new(
        common,
        Expr::If {
            cond: Box::new(cond_bool.expr),
            then_block: Block::value_of(then_expr),
            else_block: Block::value_of(else_expr),
        },
    ))
}

fn callee_name(callee: &ast::Expr) -> String {
    match callee {
        ast::Expr::Ident(name) => name.clone(),
        other => format!("{other:?}"),
    }
}

fn translate_call(
    callee: &ast::Expr,
    args: &[ast::Expr],
    env: &mut Environment,
) -> Result<ExprResult, TranslateError> {
    let callee_result = translate_expr(true, callee, env)?;
    let returns = match callee_result.c_type {
        CType::Function { returns } => *returns,
        _ => return Err(TranslateError::CalleeNotFunction(callee_name(callee))),
    };
    let mut arg_exprs = Vec::with_capacity(args.len());
    for arg in args {
        arg_exprs.push(translate_expr(true, arg, env)?.expr);
    }
    Ok(ExprResult::new(
        returns,
        Expr::Call(Box::new(callee_result.expr), arg_exprs),
    ))
}

fn translate_comma(
    demand: bool,
    items: &[ast::Expr],
    env: &mut Environment,
) -> Result<ExprResult, TranslateError> {
    let split_at = items.len().saturating_sub(1);
    let (effects, last_slice) = items.split_at(split_at);
    let mut stmts = Vec::with_capacity(effects.len());
    for effect in effects {
        let result = translate_expr(false, effect, env)?;
        stmts.push(Stmt::Expr(result.expr));
    }
    let Some(last) = last_slice.first() else {
        return Ok(ExprResult::new(CType::Void, Expr::Block(Block { stmts, trailing: None })));
    };
    if demand {
        let result = translate_expr(true, last, env)?;
        Ok(ExprResult::new(
            result.c_type,
            Expr::Block(Block {
                stmts,
                trailing: Some(Box::new(result.expr)),
            }),
        ))
    } else {
        let result = translate_expr(false, last, env)?;
        stmts.push(Stmt::Expr(result.expr));
        Ok(ExprResult::new(CType::Void, Expr::Block(Block { stmts, trailing: None })))
    }
}

fn target_assign_op(op: ast::AssignOp) -> AssignOp {
    match op {
        ast::AssignOp::Assign => AssignOp::Assign,
        ast::AssignOp::MulAssign => AssignOp::MulAssign,
        ast::AssignOp::DivAssign => AssignOp::DivAssign,
        ast::AssignOp::RemAssign => AssignOp::RemAssign,
        ast::AssignOp::AddAssign => AssignOp::AddAssign,
        ast::AssignOp::SubAssign => AssignOp::SubAssign,
        ast::AssignOp::ShlAssign => AssignOp::ShlAssign,
        ast::AssignOp::ShrAssign => AssignOp::ShrAssign,
        ast::AssignOp::AndAssign => AssignOp::AndAssign,
        ast::AssignOp::XorAssign => AssignOp::XorAssign,
        ast::AssignOp::OrAssign => AssignOp::OrAssign,
    }
}

/// The name of the immutable local bound to a mutable borrow of the lhs in
/// the demanded-assignment lowering (spec §4.2, §9).
const ASSIGN_TEMP: &str = "_tmp";

fn translate_assign(
    demand: bool,
    op: ast::AssignOp,
    lhs: &ast::Expr,
    rhs: &ast::Expr,
    env: &mut Environment,
) -> Result<ExprResult, TranslateError> {
    let lhs_result = translate_expr(true, lhs, env)?;
    let rhs_result = translate_expr(true, rhs, env)?;
    let target_op = target_assign_op(op);

    if !demand {
        return Ok(ExprResult::new(
            CType::Void,
            Expr::Assign(target_op, Box::new(lhs_result.expr), Box::new(rhs_result.expr)),
        ));
    }

    // The lhs is evaluated exactly once: bind a mutable borrow, assign
    // through it, and yield the stored value through the same borrow.
    let tmp_ident = || Expr::Ident(ASSIGN_TEMP.to_string());
    let block = Block {
        stmts: vec![
            Stmt::Let {
                mutable: false,
                name: ASSIGN_TEMP.to_string(),
                type_name: None,
                init: Some(Expr::MutBorrow(Box::new(lhs_result.expr))),
            },
            Stmt::Expr(Expr::Assign(
                target_op,
                Box::new(Expr::Deref(Box::new(tmp_ident()))),
                Box::new(rhs_result.expr),
            )),
        ],
        trailing: Some(Box::new(Expr::Deref(Box::new(tmp_ident())))),
    };
    Ok(ExprResult::new(lhs_result.c_type, Expr::Block(block)))
}

//! Boolean coercion between C's integer-valued booleans and the target's
//! native `bool` (spec §4.2).

use crate::target_ast::{Block, Expr};
use cc2rs_hir::CType;

/// The result of translating a C expression: its inferred C type paired
/// with the target expression that computes it (spec §3.2).
#[derive(Debug, Clone, PartialEq)]
pub struct ExprResult {
    /// The C type the standard would assign to the source expression,
    /// after any implicit conversions already materialized as casts.
    pub c_type: CType,
    /// The target expression.
    pub expr: Expr,
}

impl ExprResult {
    /// Build a result, typed and expressed as given.
    pub fn new(c_type: CType, expr: Expr) -> Self {
        Self { c_type, expr }
    }
}

/// Wrap a target boolean expression as `if b { 1 } else { 0 }`, typed
/// signed 32-bit — C's integer-valued view of a boolean.
pub fn from_bool(bool_expr: Expr) -> ExprResult {
    ExprResult::new(
        CType::signed_int(),
        Expr::If {
            cond: Box::new(bool_expr),
            then_block: Block {
                stmts: vec![],
                trailing: Some(Box::new(Expr::IntLiteral("1".to_string()))),
            },
            else_block: Block {
                stmts: vec![],
                trailing: Some(Box::new(Expr::IntLiteral("0".to_string()))),
            },
        },
    )
}

/// If `result`'s expression is literally a [`from_bool`] wrapper, peel it
/// back to the native-bool expression inside. Otherwise emit `expr != 0`.
///
/// Always typed signed 32-bit: this is a marker type, not a literal claim
/// that the expression evaluates to an `i32` — callers that need a native
/// `bool` consume the peeled expression directly (spec §4.2).
pub fn to_bool(result: ExprResult) -> ExprResult {
    if let Some(native_bool) = peel_from_bool(&result.expr) {
        return ExprResult::new(CType::signed_int(), native_bool);
    }
    ExprResult::new(
        CType::signed_int(),
        Expr::CompareZero(Box::new(result.expr)),
    )
}

/// Recognize the exact shape [`from_bool`] produces and return the
/// original boolean expression, if `expr` matches it.
fn peel_from_bool(expr: &Expr) -> Option<Expr> {
    let Expr::If {
        cond,
        then_block,
        else_block,
    } = expr
    else {
        return None;
    };
    if is_literal_block(then_block, "1") && is_literal_block(else_block, "0") {
        Some((**cond).clone())
    } else {
        None
    }
}

fn is_literal_block(block: &Block, literal: &str) -> bool {
    block.stmts.is_empty()
        && matches!(
            block.trailing.as_deref(),
            Some(Expr::IntLiteral(lexeme)) if lexeme == literal
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bool_wraps_as_if_one_else_zero() {
        let result = from_bool(Expr::Ident("flag".to_string()));
        assert_eq!(result.c_type, CType::signed_int());
        match result.expr {
            Expr::If {
                then_block,
                else_block,
                ..
            } => {
                assert_eq!(
                    then_block.trailing.as_deref(),
                    Some(&Expr::IntLiteral("1".to_string()))
                );
                assert_eq!(
                    else_block.trailing.as_deref(),
                    Some(&Expr::IntLiteral("0".to_string()))
                );
            }
            other => panic!("expected If, got {other:?}"),
        }
    }

    #[test]
    fn to_bool_peels_a_from_bool_wrapper() {
        let wrapped = from_bool(Expr::Ident("flag".to_string()));
        let peeled = to_bool(wrapped);
        assert_eq!(peeled.expr, Expr::Ident("flag".to_string()));
    }

    #[test]
    fn to_bool_emits_compare_zero_otherwise() {
        let result = ExprResult::new(CType::signed_int(), Expr::Ident("x".to_string()));
        let coerced = to_bool(result);
        assert_eq!(
            coerced.expr,
            Expr::CompareZero(Box::new(Expr::Ident("x".to_string())))
        );
    }

    #[test]
    fn boolean_round_trip() {
        let original = Expr::Binary(
            crate::target_ast::BinOp::Lt,
            Box::new(Expr::Ident("a".to_string())),
            Box::new(Expr::Ident("b".to_string())),
        );
        let wrapped = from_bool(original.clone());
        let peeled = to_bool(wrapped);
        assert_eq!(peeled.expr, original);
    }
}

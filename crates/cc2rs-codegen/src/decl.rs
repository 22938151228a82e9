//! Local declaration lowering (spec §4.3).
//!
//! A C local declaration can name several declarators sharing one
//! specifier list (`int x = 1, y;`); each becomes its own `let` statement,
//! its initializer emitted exactly as the expression translator produced it
//! — §4.3 does not call for a cast to the declared type here.

use crate::expr::translate_expr;
use crate::target_ast::Stmt;
use cc2rs_ast as ast;
use cc2rs_hir::types::fold_type_specifiers;
use cc2rs_hir::{Environment, TranslateError};

/// Lower one local declaration to one `let` statement per declarator,
/// binding each name in `env` as it goes (later declarators in the same
/// declaration, and the rest of the enclosing scope, can see earlier
/// ones — C's left-to-right declarator scoping).
pub fn translate_declaration(
    decl: &ast::Declaration,
    env: &mut Environment,
) -> Result<Vec<Stmt>, TranslateError> {
    let declared_ty = fold_type_specifiers(&decl.specifiers.type_specifiers)?;
    let type_name = declared_ty.target_name()?;

    let mut stmts = Vec::with_capacity(decl.declarators.len());
    for declarator in &decl.declarators {
        let name = match &declarator.declarator {
            ast::Declarator::Identifier(name) => name.clone(),
            ast::Declarator::Derived(reason) => {
                return Err(TranslateError::UnsupportedDeclarator {
                    name: "<local>".to_string(),
                    reason: reason.clone(),
                })
            }
        };
        let init = match &declarator.init {
            Some(init_expr) => Some(translate_expr(true, init_expr, env)?.expr),
            None => None,
        };
        env.add_var(name.clone(), declared_ty.clone());
        stmts.push(Stmt::Let {
            mutable: true,
            name,
            type_name: Some(type_name.clone()),
            init,
        });
    }
    Ok(stmts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target_ast::Expr;
    use cc2rs_hir::types::{IntWidth, Signedness};
    use cc2rs_hir::CType;

    fn int32() -> CType {
        CType::Integer {
            signedness: Signedness::Signed,
            width: IntWidth::ThirtyTwo,
        }
    }

    fn decl_specs(specs: Vec<ast::TypeSpecifier>) -> ast::DeclSpecifiers {
        ast::DeclSpecifiers {
            type_specifiers: specs,
            ..Default::default()
        }
    }

    #[test]
    fn single_declarator_with_initializer() {
        let mut env = Environment::new();
        let decl = ast::Declaration {
            specifiers: decl_specs(vec![ast::TypeSpecifier::Int]),
            declarators: vec![ast::InitDeclarator {
                declarator: ast::Declarator::Identifier("x".to_string()),
                init: Some(ast::Expr::IntLiteral("5".to_string())),
            }],
        };
        let stmts = translate_declaration(&decl, &mut env).unwrap();
        assert_eq!(stmts.len(), 1);
        assert_eq!(
            stmts[0],
            Stmt::Let {
                mutable: true,
                name: "x".to_string(),
                type_name: Some("i32".to_string()),
                init: Some(Expr::IntLiteral("5".to_string())),
            }
        );
        assert_eq!(env.lookup("x"), Some(&int32()));
    }

    #[test]
    fn multiple_declarators_share_the_specifier_list() {
        let mut env = Environment::new();
        let decl = ast::Declaration {
            specifiers: decl_specs(vec![ast::TypeSpecifier::Int]),
            declarators: vec![
                ast::InitDeclarator {
                    declarator: ast::Declarator::Identifier("x".to_string()),
                    init: Some(ast::Expr::IntLiteral("1".to_string())),
                },
                ast::InitDeclarator {
                    declarator: ast::Declarator::Identifier("y".to_string()),
                    init: None,
                },
            ],
        };
        let stmts = translate_declaration(&decl, &mut env).unwrap();
        assert_eq!(stmts.len(), 2);
        assert!(env.lookup("x").is_some());
        assert!(env.lookup("y").is_some());
    }

    #[test]
    fn s1_initializer_is_emitted_unconverted() {
        // char a = 1; — the initializer is emitted as-is, with no cast to
        // the declared type (spec §4.3, scenario S1).
        let mut env = Environment::new();
        let decl = ast::Declaration {
            specifiers: decl_specs(vec![ast::TypeSpecifier::Char]),
            declarators: vec![ast::InitDeclarator {
                declarator: ast::Declarator::Identifier("a".to_string()),
                init: Some(ast::Expr::IntLiteral("1".to_string())),
            }],
        };
        let stmts = translate_declaration(&decl, &mut env).unwrap();
        assert_eq!(
            stmts[0],
            Stmt::Let {
                mutable: true,
                name: "a".to_string(),
                type_name: Some("i8".to_string()),
                init: Some(Expr::IntLiteral("1".to_string())),
            }
        );
    }

    #[test]
    fn derived_declarator_is_unsupported() {
        let mut env = Environment::new();
        let decl = ast::Declaration {
            specifiers: decl_specs(vec![ast::TypeSpecifier::Int]),
            declarators: vec![ast::InitDeclarator {
                declarator: ast::Declarator::Derived("pointer".to_string()),
                init: None,
            }],
        };
        assert!(matches!(
            translate_declaration(&decl, &mut env),
            Err(TranslateError::UnsupportedDeclarator { .. })
        ));
    }
}

//! Top-level translation-unit orchestration for the cc2rs transpiler
//! (spec §2, §4.4).
//!
//! This crate is the thin composition root: it owns no translation rule of
//! its own, only the two-pass function-registration order and the
//! [`metrics`] ambient feature layered over [`cc2rs_codegen`]'s translators.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod metrics;

use cc2rs_ast::{ExternalDecl, TranslationUnit};
use cc2rs_codegen::{register_signature, render, translate_function_def, Item};
use cc2rs_hir::{Environment, TranslateError};
use metrics::CompileMetrics;

pub use cc2rs_hir::TranslationConfig;

/// The result of translating one translation unit: the target items, in
/// source order, plus ambient metrics about what the pass saw.
#[derive(Debug, Clone, PartialEq)]
pub struct TranspiledUnit {
    items: Vec<Item>,
    metrics: CompileMetrics,
}

impl TranspiledUnit {
    /// The translated top-level items, in source order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Ambient counts gathered while translating.
    pub fn metrics(&self) -> &CompileMetrics {
        &self.metrics
    }

    /// Render the translated items as Rust source text.
    pub fn render(&self) -> String {
        render(&self.items)
    }
}

/// Translate a whole translation unit.
///
/// Proceeds in two passes: first every function definition's signature is
/// registered in a shared [`Environment`], so a call to a function defined
/// later in the same file (or to itself, recursively) resolves; then each
/// function body is translated, in source order. Declarations other than
/// function definitions are out of scope (spec §1) and only counted in the
/// returned metrics, not emitted.
///
/// `config` governs only ambient diagnostics (`CType::bits`); it never
/// changes which target type name a `CType` maps to (spec §4.1).
pub fn translate_translation_unit(
    unit: &TranslationUnit,
    _config: &TranslationConfig,
) -> Result<TranspiledUnit, TranslateError> {
    let mut env = Environment::new();
    let mut metrics = CompileMetrics::new();

    for decl in &unit.decls {
        match decl {
            ExternalDecl::FunctionDefinition(def) => register_signature(def, &mut env)?,
            ExternalDecl::Other(_) => metrics.record_skipped_declaration(),
        }
    }

    let mut items = Vec::with_capacity(unit.decls.len());
    for decl in &unit.decls {
        if let ExternalDecl::FunctionDefinition(def) = decl {
            tracing::debug!(function = %def.name, "translating function");
            let function = translate_function_def(def, &mut env)?;
            metrics.record_function();
            items.push(Item::Function(function));
        }
    }

    Ok(TranspiledUnit { items, metrics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc2rs_ast::{
        BinOp, BlockItem, DeclSpecifiers, Declarator, Expr, FunctionDef, OtherDeclKind, Param,
        ParamList, Stmt, StorageClass, TypeSpecifier,
    };

    fn specs(type_specifiers: Vec<TypeSpecifier>) -> DeclSpecifiers {
        DeclSpecifiers {
            type_specifiers,
            ..Default::default()
        }
    }

    fn int_param(name: &str) -> Param {
        Param {
            specifiers: specs(vec![TypeSpecifier::Int]),
            declarator: Declarator::Identifier(name.to_string()),
        }
    }

    #[test]
    fn empty_unit_translates_to_no_items() {
        let unit = TranslationUnit::new(vec![]);
        let result = translate_translation_unit(&unit, &TranslationConfig::new()).unwrap();
        assert!(result.items().is_empty());
        assert_eq!(result.metrics().functions_translated(), 0);
    }

    #[test]
    fn non_function_decls_are_skipped_and_counted() {
        let unit = TranslationUnit::new(vec![ExternalDecl::Other(OtherDeclKind::GlobalVariable)]);
        let result = translate_translation_unit(&unit, &TranslationConfig::new()).unwrap();
        assert!(result.items().is_empty());
        assert_eq!(result.metrics().declarations_skipped(), 1);
    }

    #[test]
    fn s1_through_s3_single_function_renders() {
        // int add(int a, int b) { return a + b; }
        let unit = TranslationUnit::new(vec![ExternalDecl::FunctionDefinition(FunctionDef {
            specifiers: specs(vec![TypeSpecifier::Int]),
            name: "add".to_string(),
            params: ParamList::Params(vec![int_param("a"), int_param("b")]),
            body: Stmt::Compound(vec![BlockItem::Stmt(Stmt::Return(Some(Expr::Binary(
                BinOp::Add,
                Box::new(Expr::Ident("a".to_string())),
                Box::new(Expr::Ident("b".to_string())),
            ))))]),
        })]);
        let result = translate_translation_unit(&unit, &TranslationConfig::new()).unwrap();
        assert_eq!(result.metrics().functions_translated(), 1);
        let rendered = result.render();
        assert!(rendered.contains("pub fn add"));
        assert!(rendered.contains("a : i32"));
        assert!(rendered.contains("return"));
        assert!(rendered.contains("a + b"));
    }

    #[test]
    fn s4_static_function_has_no_pub_keyword() {
        let unit = TranslationUnit::new(vec![ExternalDecl::FunctionDefinition(FunctionDef {
            specifiers: DeclSpecifiers {
                storage_class: StorageClass::Static,
                type_specifiers: vec![TypeSpecifier::Void],
                ..Default::default()
            },
            name: "helper".to_string(),
            params: ParamList::Empty,
            body: Stmt::Compound(vec![]),
        })]);
        let result = translate_translation_unit(&unit, &TranslationConfig::new()).unwrap();
        let rendered = result.render();
        assert!(!rendered.contains("pub"));
        assert!(rendered.contains("fn helper"));
    }

    #[test]
    fn s6_mutually_forward_referencing_functions_both_resolve() {
        // int is_even(int n); int is_odd(int n) calls is_even and vice versa,
        // both defined in the same unit, each referencing the other before
        // its own definition appears.
        let is_even = FunctionDef {
            specifiers: specs(vec![TypeSpecifier::Int]),
            name: "is_even".to_string(),
            params: ParamList::Params(vec![int_param("n")]),
            body: Stmt::Compound(vec![BlockItem::Stmt(Stmt::Return(Some(Expr::Conditional(
                Box::new(Expr::Binary(
                    BinOp::Eq,
                    Box::new(Expr::Ident("n".to_string())),
                    Box::new(Expr::IntLiteral("0".to_string())),
                )),
                Box::new(Expr::IntLiteral("1".to_string())),
                Box::new(Expr::Call(
                    Box::new(Expr::Ident("is_odd".to_string())),
                    vec![Expr::Binary(
                        BinOp::Sub,
                        Box::new(Expr::Ident("n".to_string())),
                        Box::new(Expr::IntLiteral("1".to_string())),
                    )],
                )),
            ))))]),
        };
        let is_odd = FunctionDef {
            specifiers: specs(vec![TypeSpecifier::Int]),
            name: "is_odd".to_string(),
            params: ParamList::Params(vec![int_param("n")]),
            body: Stmt::Compound(vec![BlockItem::Stmt(Stmt::Return(Some(Expr::Conditional(
                Box::new(Expr::Binary(
                    BinOp::Eq,
                    Box::new(Expr::Ident("n".to_string())),
                    Box::new(Expr::IntLiteral("0".to_string())),
                )),
                Box::new(Expr::IntLiteral("0".to_string())),
                Box::new(Expr::Call(
                    Box::new(Expr::Ident("is_even".to_string())),
                    vec![Expr::Binary(
                        BinOp::Sub,
                        Box::new(Expr::Ident("n".to_string())),
                        Box::new(Expr::IntLiteral("1".to_string())),
                    )],
                )),
            ))))]),
        };
        let unit = TranslationUnit::new(vec![
            ExternalDecl::FunctionDefinition(is_even),
            ExternalDecl::FunctionDefinition(is_odd),
        ]);
        let result = translate_translation_unit(&unit, &TranslationConfig::new()).unwrap();
        assert_eq!(result.metrics().functions_translated(), 2);
    }

    #[test]
    fn translation_error_propagates_from_the_orchestrator() {
        let unit = TranslationUnit::new(vec![ExternalDecl::FunctionDefinition(FunctionDef {
            specifiers: specs(vec![TypeSpecifier::Int]),
            name: "bad".to_string(),
            params: ParamList::Empty,
            body: Stmt::Compound(vec![BlockItem::Stmt(Stmt::Return(Some(Expr::Ident(
                "undefined".to_string(),
            ))))]),
        })]);
        let err = translate_translation_unit(&unit, &TranslationConfig::new()).unwrap_err();
        assert_eq!(err, TranslateError::UndefinedVariable("undefined".to_string()));
    }
}

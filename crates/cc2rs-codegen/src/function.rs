//! Function-definition lowering (spec §4.4).
//!
//! Translates one C function definition into one target [`Function`] item.
//! The function's own name is pre-registered in `env` as a
//! [`CType::Function`] before its body is translated, so a self-recursive
//! call inside the body resolves (spec §8's recursive-call scenario);
//! [`cc2rs_core`](../cc2rs_core/index.html) pre-registers every function in
//! the translation unit the same way before translating any body, so
//! forward references between sibling functions resolve too.

use crate::stmt::translate_block_items;
use crate::target_ast::{Function, Param, Visibility};
use cc2rs_ast as ast;
use cc2rs_hir::types::fold_type_specifiers;
use cc2rs_hir::{CType, Environment, TranslateError};

/// Register a function definition's signature in `env`, without
/// translating its body. Idempotent: a function already bound (by an
/// earlier pass, or by itself) is left alone.
pub fn register_signature(def: &ast::FunctionDef, env: &mut Environment) -> Result<(), TranslateError> {
    if env.lookup(&def.name).is_some() {
        return Ok(());
    }
    let returns = fold_type_specifiers(&def.specifiers.type_specifiers)?;
    env.add_var(def.name.clone(), CType::Function { returns: Box::new(returns) });
    Ok(())
}

/// Translate a function definition.
pub fn translate_function_def(def: &ast::FunctionDef, env: &mut Environment) -> Result<Function, TranslateError> {
    let visibility = match &def.specifiers.storage_class {
        ast::StorageClass::None => Visibility::Public,
        ast::StorageClass::Static => Visibility::Private,
        ast::StorageClass::Other(storage) => {
            return Err(TranslateError::UnsupportedStorageClass {
                function: def.name.clone(),
                storage: storage.clone(),
            })
        }
    };

    if let Some(qualifier) = def.specifiers.type_qualifiers.first() {
        return Err(TranslateError::UnsupportedStorageClass {
            function: def.name.clone(),
            storage: qualifier.clone(),
        });
    }
    if let Some(specifier) = def.specifiers.function_specifiers.first() {
        return Err(TranslateError::UnsupportedStorageClass {
            function: def.name.clone(),
            storage: specifier.clone(),
        });
    }

    let return_ty = fold_type_specifiers(&def.specifiers.type_specifiers)?;
    let return_type = return_ty.target_name()?;

    register_signature(def, env)?;

    let mark = env.mark();
    let result = (|| {
        let ast_params = match &def.params {
            ast::ParamList::Empty => &[][..],
            ast::ParamList::Params(params) => params.as_slice(),
        };
        let mut params = Vec::with_capacity(ast_params.len());
        for param in ast_params {
            let name = match &param.declarator {
                ast::Declarator::Identifier(name) => name.clone(),
                ast::Declarator::Derived(reason) => {
                    return Err(TranslateError::UnsupportedDeclarator {
                        name: format!("<parameter of {}>", def.name),
                        reason: reason.clone(),
                    })
                }
            };
            let ty = fold_type_specifiers(&param.specifiers.type_specifiers)?;
            let type_name = ty.target_name()?;
            env.add_var(name.clone(), ty);
            params.push(Param { name, type_name });
        }

        let ast::Stmt::Compound(items) = &def.body else {
            return Err(TranslateError::UnsupportedStatement(
                "function body must be a compound statement".to_string(),
            ));
        };
        let body = translate_block_items(items, env)?;

        Ok(Function {
            visibility,
            name: def.name.clone(),
            params,
            return_type,
            body,
        })
    })();
    env.restore(mark);
    result
}

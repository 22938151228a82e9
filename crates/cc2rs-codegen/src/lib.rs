//! Expression, statement, and function-level Rust code generation for the
//! cc2rs transpiler (spec §2, §4.2–§4.4).
//!
//! This crate owns the target Rust AST ([`target_ast`]) and the three
//! translator layers built on top of it: expressions ([`expr`]), local
//! declarations ([`decl`]) and statements ([`stmt`]), and function
//! definitions ([`function`]). [`bool_coercion`] is the shared boolean
//! marker-type machinery spec §4.2 and §9 describe; every layer above
//! expressions calls into it rather than re-deriving the coercion rule.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod bool_coercion;
pub mod decl;
pub mod expr;
pub mod function;
pub mod stmt;
pub mod target_ast;

pub use bool_coercion::{from_bool, to_bool, ExprResult};
pub use expr::translate_expr;
pub use function::{register_signature, translate_function_def};
pub use stmt::{translate_block_items, translate_stmt};
pub use target_ast::{render, Block, Function, Item, Param, Visibility};

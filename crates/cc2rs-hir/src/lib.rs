//! The C type model, the name environment, and the shared error taxonomy.
//!
//! This crate is the leaf of the cc2rs workspace: the type model
//! (≈10% of the translation engine's budget per spec §2) plus the
//! environment/scope primitive the expression, statement, and top-level
//! translators all share.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod env;
pub mod error;
pub mod types;

pub use config::{TranslationConfig, WordWidth};
pub use env::Environment;
pub use error::TranslateError;
pub use types::{CType, FloatWidth, IntWidth, Signedness};

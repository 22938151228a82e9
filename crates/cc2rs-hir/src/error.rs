//! The fatal-translation-failure taxonomy (spec §7).
//!
//! Every entry here aborts translation of the enclosing translation unit;
//! none are retried or partially recovered (spec §7, "Propagation").

use thiserror::Error;

/// A fatal translation failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// A type-specifier token outside spec §4.1's folding table.
    #[error("unsupported type specifier: `{0}`")]
    UnsupportedTypeSpecifier(String),

    /// A non-empty, non-`static` storage class on a function definition.
    #[error("function `{function}` has an unsupported storage class: `{storage}`")]
    UnsupportedStorageClass {
        /// The function the storage class was attached to.
        function: String,
        /// The offending storage-class token.
        storage: String,
    },

    /// A pointer/array/function/bitfield declarator, or one carrying an
    /// attribute list, at a locus the engine handles.
    #[error("unsupported declarator for `{name}`: {reason}")]
    UnsupportedDeclarator {
        /// The name the declarator was attached to (or a placeholder if
        /// the declarator has no name yet).
        name: String,
        /// What made the declarator unsupported.
        reason: String,
    },

    /// An expression form outside spec §4.2.
    #[error("unsupported expression: {0}")]
    UnsupportedExpression(String),

    /// A statement form outside spec §4.3.
    #[error("unsupported statement: {0}")]
    UnsupportedStatement(String),

    /// Postfix increment/decrement, address-of, dereference, or `sizeof`.
    #[error("unsupported unary operator: {0}")]
    UnsupportedUnaryOperator(String),

    /// An identifier not present in the environment at its reference site.
    #[error("undefined variable `{0}`")]
    UndefinedVariable(String),

    /// A float lexeme that does not match `<digits>[fF]?`.
    #[error("malformed float literal: `{0}`")]
    MalformedFloat(String),

    /// A call expression whose callee's inferred type is not
    /// Function-returning-T.
    #[error("call target `{0}` is not a function")]
    CalleeNotFunction(String),

    /// A Function-returning-T type was requested where a value type (an
    /// emittable type name) was needed; function types have no target
    /// spelling (spec §4.1's mapping table).
    #[error("function type cannot be used as a value type here")]
    UnmappedFunctionType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_offending_token() {
        let err = TranslateError::UnsupportedTypeSpecifier("_Bool".to_string());
        assert!(err.to_string().contains("_Bool"));
    }

    #[test]
    fn undefined_variable_names_the_identifier() {
        let err = TranslateError::UndefinedVariable("foo".to_string());
        assert_eq!(err.to_string(), "undefined variable `foo`");
    }

    #[test]
    fn storage_class_error_names_function_and_storage() {
        let err = TranslateError::UnsupportedStorageClass {
            function: "g".to_string(),
            storage: "extern".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains('g'));
        assert!(msg.contains("extern"));
    }
}

//! C translation-unit AST consumed by the cc2rs transpiler.
//!
//! This crate does not parse C source — that is an external collaborator's
//! job (see spec §1). It only defines the shape of the tree a conventional
//! C parser hands to [`cc2rs-core`](https://docs.rs/cc2rs-core): translation
//! units of external declarations, declarations split into specifier lists
//! and declarators, statements, and expressions.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

/// The unit of input: one preprocessed C source file, as an ordered list of
/// external declarations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TranslationUnit {
    /// Declarations in source order.
    pub decls: Vec<ExternalDecl>,
}

impl TranslationUnit {
    /// Build a translation unit from a list of external declarations.
    pub fn new(decls: Vec<ExternalDecl>) -> Self {
        Self { decls }
    }
}

/// A top-level declaration.
///
/// Only [`ExternalDecl::FunctionDefinition`] is translated; every other form
/// is discarded at the top level per spec §4.4.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExternalDecl {
    /// A function definition with a body.
    FunctionDefinition(FunctionDef),
    /// A global variable, struct/enum/union definition, typedef, or function
    /// prototype — out of scope (spec §1); carried only so callers can see
    /// what was skipped.
    Other(OtherDeclKind),
}

/// The discarded top-level forms, kept only for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OtherDeclKind {
    /// `int x;` / `int x = 1;` at file scope.
    GlobalVariable,
    /// `struct S { ... };`
    StructDefinition,
    /// `enum E { ... };`
    EnumDefinition,
    /// `typedef ... name;`
    Typedef,
    /// `int f(int);` with no body.
    Prototype,
}

/// A C function definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    /// Declaration specifiers preceding the declarator (storage class,
    /// qualifiers, function specifiers, type specifiers).
    pub specifiers: DeclSpecifiers,
    /// The function's name.
    pub name: String,
    /// The parameter list.
    pub params: ParamList,
    /// The function body, always a compound statement.
    pub body: Stmt,
}

/// The specifier list attached to a declaration or parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeclSpecifiers {
    /// `static`, empty, or some other (unsupported) storage class.
    pub storage_class: StorageClass,
    /// `const`/`volatile` tokens, carried only to detect their presence.
    pub type_qualifiers: Vec<String>,
    /// `inline`/`_Noreturn` tokens, carried only to detect their presence.
    pub function_specifiers: Vec<String>,
    /// The type-specifier token sequence, e.g. `["unsigned", "long"]`.
    pub type_specifiers: Vec<TypeSpecifier>,
}

/// A C storage-class specifier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum StorageClass {
    /// No storage-class specifier: external linkage (public).
    #[default]
    None,
    /// `static`: internal linkage (private).
    Static,
    /// Anything else (`extern`, `auto`, `register`): unsupported on a
    /// function definition.
    Other(String),
}

/// A single type-specifier token, per spec §4.1's folding table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeSpecifier {
    /// `signed`
    Signed,
    /// `unsigned`
    Unsigned,
    /// `char`
    Char,
    /// `short`
    Short,
    /// `int`
    Int,
    /// `long`
    Long,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `void`
    Void,
    /// Any specifier not in the table above (`_Bool`, a typedef name, ...).
    Other(String),
}

/// A function's parameter list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamList {
    /// `(void)` and `()` are treated identically as "no parameters".
    Empty,
    /// One or more declared parameters.
    Params(Vec<Param>),
}

/// A single function parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// The parameter's declaration specifiers.
    pub specifiers: DeclSpecifiers,
    /// The parameter's declarator; must be a plain identifier.
    pub declarator: Declarator,
}

/// A declarator, i.e. the part of a declaration naming the identifier and
/// any derived type applied to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Declarator {
    /// A bare identifier: `x`.
    Identifier(String),
    /// A pointer, array, function, or bitfield declarator, or one carrying
    /// an attribute list — unsupported; the string names what was found for
    /// error reporting.
    Derived(String),
}

/// A local declaration (`int x = 1, y;`), one [`Stmt`] per item in a
/// compound statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// Shared specifiers for every declarator in this declaration.
    pub specifiers: DeclSpecifiers,
    /// One entry per comma-separated declarator.
    pub declarators: Vec<InitDeclarator>,
}

/// A single declarator plus its optional initializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitDeclarator {
    /// The declared name (or derived-type marker).
    pub declarator: Declarator,
    /// The initializer expression, if any.
    pub init: Option<Expr>,
}

/// An item inside a compound statement: either a nested statement or a
/// local declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockItem {
    /// A statement.
    Stmt(Stmt),
    /// A local declaration.
    Decl(Declaration),
}

/// The initializer clause of a `for` loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ForInit {
    /// `for (;;)`: no initializer.
    Empty,
    /// `for (i = 0; ...)`: a plain expression.
    Expr(Expr),
    /// `for (int i = 0; ...)`: a declaration.
    Decl(Declaration),
}

/// A C statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// An expression statement, `e;`, or an empty statement `;`.
    Expr(Option<Expr>),
    /// `{ ... }`.
    Compound(Vec<BlockItem>),
    /// `if (c) then [else else_]`.
    If {
        /// The condition.
        cond: Expr,
        /// The `then` branch.
        then_branch: Box<Stmt>,
        /// The optional `else` branch.
        else_branch: Option<Box<Stmt>>,
    },
    /// `while (c) body`.
    While {
        /// The loop condition.
        cond: Expr,
        /// The loop body.
        body: Box<Stmt>,
    },
    /// `do body while (c);` — not supported; kept only so the translator can
    /// report [`UnsupportedStatement`](cc2rs_hir::TranslateError).
    DoWhile {
        /// The loop body.
        body: Box<Stmt>,
        /// The loop condition.
        cond: Expr,
    },
    /// `for (init; cond; step) body`. `step` is `Some` only for the
    /// unsupported with-step form (spec §4.3).
    For {
        /// The loop initializer.
        init: ForInit,
        /// The optional loop condition.
        cond: Option<Expr>,
        /// The optional step expression; only the `None` case is supported.
        step: Option<Expr>,
        /// The loop body.
        body: Box<Stmt>,
    },
    /// `break;`
    Break,
    /// `continue;`
    Continue,
    /// `return [expr];`
    Return(Option<Expr>),
    /// `switch (e) body` — not supported.
    Switch {
        /// The switch subject.
        subject: Expr,
        /// The switch body.
        body: Box<Stmt>,
    },
    /// `goto label;` — not supported.
    Goto(String),
    /// `label: stmt` — not supported.
    Labeled {
        /// The label name.
        label: String,
        /// The labeled statement.
        stmt: Box<Stmt>,
    },
}

/// A C expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// An integer literal, its lexeme as written (decimal, hex, or octal).
    IntLiteral(String),
    /// A floating-point literal, its lexeme as written (before suffix
    /// validation).
    FloatLiteral(String),
    /// A string literal — not supported.
    StringLiteral(String),
    /// A character constant — not supported.
    CharLiteral(char),
    /// A variable reference.
    Ident(String),
    /// `(T)e`.
    Cast(Vec<TypeSpecifier>, Box<Expr>),
    /// A unary operator application.
    Unary(UnaryOp, Box<Expr>),
    /// `e++` / `e--` — not supported (only the prefix forms are).
    PostfixIncDec(IncDecOp, Box<Expr>),
    /// `&e` — not supported.
    AddressOf(Box<Expr>),
    /// `*e` — not supported.
    Deref(Box<Expr>),
    /// `sizeof e` / `sizeof(T)` — not supported.
    SizeOf(Box<Expr>),
    /// A binary arithmetic, bitwise, shift, or comparison operator.
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// `&&` / `||`.
    Logical(LogicalOp, Box<Expr>, Box<Expr>),
    /// `c ? t : f`. The GNU two-operand form (`c ?: f`) is not supported.
    Conditional(Box<Expr>, Box<Expr>, Box<Expr>),
    /// Simple or compound assignment.
    Assign(AssignOp, Box<Expr>, Box<Expr>),
    /// `callee(args...)`.
    Call(Box<Expr>, Vec<Expr>),
    /// `a, b, c`.
    Comma(Vec<Expr>),
}

/// A prefix unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `+e`
    Plus,
    /// `-e`
    Minus,
    /// `~e`
    BitNot,
    /// `!e`
    LogicalNot,
    /// `++e`
    PreInc,
    /// `--e`
    PreDec,
}

/// A prefix/postfix increment or decrement operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncDecOp {
    /// `++`
    Inc,
    /// `--`
    Dec,
}

/// A binary arithmetic, bitwise, shift, or comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `&`
    BitAnd,
    /// `^`
    BitXor,
    /// `|`
    BitOr,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==`
    Eq,
    /// `!=`
    Ne,
}

/// A short-circuit logical operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    /// `&&`
    And,
    /// `||`
    Or,
}

/// A simple or compound assignment operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
    /// `%=`
    RemAssign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `<<=`
    ShlAssign,
    /// `>>=`
    ShrAssign,
    /// `&=`
    AndAssign,
    /// `^=`
    XorAssign,
    /// `|=`
    OrAssign,
}

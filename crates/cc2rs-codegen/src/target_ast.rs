//! The target Rust AST (spec §6).
//!
//! The downstream pretty-printer is an external collaborator (spec §1); this
//! module only fixes the shape it must be able to print: items, blocks,
//! statements, and the expression forms enumerated in spec §6. A
//! `quote`-based [`ToTokens`] implementation is provided as a convenience
//! for tests and tooling — it is not the contract, only a witness that the
//! shape is printable.

use proc_macro2::{Ident, TokenStream};
use quote::{quote, ToTokens};

fn ident(name: &str) -> Ident {
    Ident::new(name, proc_macro2::Span::call_site())
}

/// A function item's visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// No storage class on the C function: emitted `pub fn`.
    Public,
    /// `static` on the C function: emitted `fn` (private).
    Private,
}

/// A function parameter, already lowered to a (name, type-name) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// The parameter's name.
    pub name: String,
    /// The parameter's target type name, spelled exactly as in spec §4.1's
    /// mapping table.
    pub type_name: String,
}

/// A function item.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Public or private.
    pub visibility: Visibility,
    /// The function's name, carried over from the C source.
    pub name: String,
    /// The formal parameter list.
    pub params: Vec<Param>,
    /// The return type's target name.
    pub return_type: String,
    /// The function body.
    pub body: Block,
}

/// A top-level target item. Only function items are produced (spec §4.4).
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// `[pub] fn name(params) -> ret { body }`
    Function(Function),
}

/// An ordered list of statements plus an optional trailing
/// value-producing expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    /// The statements, in order.
    pub stmts: Vec<Stmt>,
    /// The block's value, if it has one.
    pub trailing: Option<Box<Expr>>,
}

impl Block {
    /// An empty block with no value (`{}`).
    pub fn empty() -> Self {
        Self::default()
    }

    /// A block whose sole purpose is to produce `expr`'s value, flattening
    /// away a redundant nested block.
    pub fn value_of(expr: Expr) -> Self {
        match expr {
            Expr::Block(block) => block,
            other => Block {
                stmts: vec![],
                trailing: Some(Box::new(other)),
            },
        }
    }
}

/// A target statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `let [mut] name[: ty] [= init];`
    Let {
        /// Whether the binding is mutable. Local declarations (spec §4.3)
        /// are always emitted mutable.
        mutable: bool,
        /// The binding's name.
        name: String,
        /// The binding's declared type, if any.
        type_name: Option<String>,
        /// The initializer, if any.
        init: Option<Expr>,
    },
    /// An expression used as a statement (its value, if any, is discarded).
    Expr(Expr),
}

/// A binary arithmetic, bitwise, shift, or comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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

/// A simple or compound assignment operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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

/// A target expression (spec §6's expression list).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An untyped integer literal (spec's boundary guarantee: emitted
    /// without a suffix).
    IntLiteral(String),
    /// A literal emitted verbatim — used for float literals, which carry
    /// an `f32` suffix only when the C source used `f`/`F`.
    RawLexeme(String),
    /// A variable reference.
    Ident(String),
    /// `expr as type_name`.
    Cast(Box<Expr>, String),
    /// `-expr`.
    Neg(Box<Expr>),
    /// `!expr` — doubles as C's bitwise-not (on an integer operand) and as
    /// logical negation (on a bool-typed operand), since Rust's `Not` trait
    /// covers both.
    Not(Box<Expr>),
    /// `expr != 0`.
    CompareZero(Box<Expr>),
    /// A binary operator application.
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// `lhs && rhs`.
    LogicalAnd(Box<Expr>, Box<Expr>),
    /// `lhs || rhs`.
    LogicalOr(Box<Expr>, Box<Expr>),
    /// `if cond { then_block } else { else_block }`.
    If {
        /// The (already bool-typed) condition.
        cond: Box<Expr>,
        /// The `then` arm.
        then_block: Block,
        /// The `else` arm.
        else_block: Block,
    },
    /// `while cond { body }`.
    While {
        /// The (already bool-typed) condition.
        cond: Box<Expr>,
        /// The loop body.
        body: Block,
    },
    /// `loop { body }`.
    Loop(Block),
    /// `break;`
    Break,
    /// `continue;`
    Continue,
    /// `return [value];`
    Return(Option<Box<Expr>>),
    /// `callee(args...)`.
    Call(Box<Expr>, Vec<Expr>),
    /// A block used as an expression.
    Block(Block),
    /// `lhs op= rhs`.
    Assign(AssignOp, Box<Expr>, Box<Expr>),
    /// `&mut expr`.
    MutBorrow(Box<Expr>),
    /// `*expr`.
    Deref(Box<Expr>),
}

impl ToTokens for Visibility {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        if matches!(self, Visibility::Public) {
            tokens.extend(quote!(pub));
        }
    }
}

impl ToTokens for Function {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let vis = self.visibility;
        let name = ident(&self.name);
        let ret = ident(&self.return_type);
        let body = &self.body;
        let params = self.params.iter().map(|p| {
            let pname = ident(&p.name);
            let ty = ident(&p.type_name);
            quote!(#pname: #ty)
        });
        tokens.extend(quote!(#vis fn #name(#(#params),*) -> #ret #body));
    }
}

impl ToTokens for Item {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Item::Function(f) => f.to_tokens(tokens),
        }
    }
}

impl ToTokens for Block {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let stmts = &self.stmts;
        let trailing: TokenStream = self
            .trailing
            .as_deref()
            .map(|e| quote!(#e))
            .unwrap_or_default();
        tokens.extend(quote!({ #(#stmts)* #trailing }));
    }
}

impl ToTokens for Stmt {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Stmt::Let {
                mutable,
                name,
                type_name,
                init,
            } => {
                let name = ident(name);
                let mut_kw: TokenStream = if *mutable { quote!(mut) } else { TokenStream::new() };
                let ty: TokenStream = type_name
                    .as_deref()
                    .map(ident)
                    .map(|t| quote!(: #t))
                    .unwrap_or_default();
                let init: TokenStream = init.as_ref().map(|e| quote!(= #e)).unwrap_or_default();
                tokens.extend(quote!(let #mut_kw #name #ty #init ;));
            }
            Stmt::Expr(e) => tokens.extend(quote!(#e ;)),
        }
    }
}

impl ToTokens for BinOp {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(match self {
            BinOp::Add => quote!(+),
            BinOp::Sub => quote!(-),
            BinOp::Mul => quote!(*),
            BinOp::Div => quote!(/),
            BinOp::Rem => quote!(%),
            BinOp::Shl => quote!(<<),
            BinOp::Shr => quote!(>>),
            BinOp::BitAnd => quote!(&),
            BinOp::BitXor => quote!(^),
            BinOp::BitOr => quote!(|),
            BinOp::Lt => quote!(<),
            BinOp::Le => quote!(<=),
            BinOp::Gt => quote!(>),
            BinOp::Ge => quote!(>=),
            BinOp::Eq => quote!(==),
            BinOp::Ne => quote!(!=),
        });
    }
}

impl ToTokens for AssignOp {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(match self {
            AssignOp::Assign => quote!(=),
            AssignOp::MulAssign => quote!(*=),
            AssignOp::DivAssign => quote!(/=),
            AssignOp::RemAssign => quote!(%=),
            AssignOp::AddAssign => quote!(+=),
            AssignOp::SubAssign => quote!(-=),
            AssignOp::ShlAssign => quote!(<<=),
            AssignOp::ShrAssign => quote!(>>=),
            AssignOp::AndAssign => quote!(&=),
            AssignOp::XorAssign => quote!(^=),
            AssignOp::OrAssign => quote!(|=),
        });
    }
}

impl ToTokens for Expr {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Expr::IntLiteral(lexeme) => {
                let lit: TokenStream = lexeme.parse().unwrap_or_else(|_| quote!(0));
                tokens.extend(lit);
            }
            Expr::RawLexeme(lexeme) => {
                let lit: TokenStream = lexeme.parse().unwrap_or_else(|_| quote!(0));
                tokens.extend(lit);
            }
            Expr::Ident(name) => ident(name).to_tokens(tokens),
            Expr::Cast(e, ty) => {
                let ty = ident(ty);
                tokens.extend(quote!((#e as #ty)));
            }
            Expr::Neg(e) => tokens.extend(quote!((-#e))),
            Expr::Not(e) => tokens.extend(quote!((!#e))),
            Expr::CompareZero(e) => tokens.extend(quote!((#e != 0))),
            Expr::Binary(op, a, b) => tokens.extend(quote!((#a #op #b))),
            Expr::LogicalAnd(a, b) => tokens.extend(quote!((#a && #b))),
            Expr::LogicalOr(a, b) => tokens.extend(quote!((#a || #b))),
            Expr::If {
                cond,
                then_block,
                else_block,
            } => {
                tokens.extend(quote!(if #cond #then_block else #else_block));
            }
            Expr::While { cond, body } => tokens.extend(quote!(while #cond #body)),
            Expr::Loop(body) => tokens.extend(quote!(loop #body)),
            Expr::Break => tokens.extend(quote!(break)),
            Expr::Continue => tokens.extend(quote!(continue)),
            Expr::Return(value) => {
                let value: TokenStream = value.as_deref().map(|e| quote!(#e)).unwrap_or_default();
                tokens.extend(quote!(return #value));
            }
            Expr::Call(callee, args) => tokens.extend(quote!(#callee(#(#args),*))),
            Expr::Block(block) => block.to_tokens(tokens),
            Expr::Assign(op, lhs, rhs) => tokens.extend(quote!(#lhs #op #rhs)),
            Expr::MutBorrow(e) => tokens.extend(quote!(&mut #e)),
            Expr::Deref(e) => tokens.extend(quote!(*#e)),
        }
    }
}

/// Render a list of items as a `String` of Rust source, for tests and
/// debugging. Formatting is not guaranteed to be `rustfmt`-clean; only
/// token-level correctness is.
pub fn render(items: &[Item]) -> String {
    let mut tokens = TokenStream::new();
    for item in items {
        item.to_tokens(&mut tokens);
    }
    tokens.to_string()
}

//! Tree-shaped AST for type expressions and type-level declarations.

use serde::Serialize;
use typebrand_common::Span;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypeNode {
    pub kind: TypeNodeKind,
    pub span: Span,
}

impl TypeNode {
    pub fn new(kind: TypeNodeKind, span: Span) -> Self {
        TypeNode { kind, span }
    }

    /// Strip any number of redundant parentheses.
    pub fn skip_parens(&self) -> &TypeNode {
        let mut node = self;
        while let TypeNodeKind::Parenthesized(inner) = &node.kind {
            node = inner;
        }
        node
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum KeywordType {
    Any,
    Unknown,
    Never,
    Void,
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    BigInt,
    Symbol,
    Object,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum TypeNodeKind {
    Keyword(KeywordType),
    StringLiteral(String),
    NumberLiteral(f64),
    /// Decimal digits without the `n` suffix.
    BigIntLiteral {
        negative: bool,
        digits: String,
    },
    BooleanLiteral(bool),
    /// `this` in a type position.
    This,
    /// `Foo`, `ns.Foo`, `Promise<T>`.
    Reference {
        name: String,
        args: Vec<TypeNode>,
    },
    /// `typeof name`
    TypeQuery {
        name: String,
    },
    Array(Box<TypeNode>),
    Tuple(Vec<TupleElementNode>),
    /// `readonly T[]` / `readonly [A, B]`
    Readonly(Box<TypeNode>),
    /// `unique symbol`
    UniqueSymbol,
    Union(Vec<TypeNode>),
    Intersection(Vec<TypeNode>),
    Parenthesized(Box<TypeNode>),
    Function(Box<SignatureNode>),
    Constructor {
        signature: Box<SignatureNode>,
        is_abstract: bool,
    },
    TypeLiteral(Vec<MemberNode>),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TupleElementNode {
    pub name: Option<String>,
    pub ty: TypeNode,
    pub optional: bool,
    pub rest: bool,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParamNode {
    pub name: String,
    pub ty: Option<TypeNode>,
    pub optional: bool,
    pub rest: bool,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum PredicateTarget {
    Parameter(String),
    This,
}

/// `x is T`, `asserts x is T`, `asserts x`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PredicateNode {
    pub asserts: bool,
    pub target: PredicateTarget,
    pub ty: Option<TypeNode>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ReturnTypeNode {
    Type(TypeNode),
    Predicate(PredicateNode),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SignatureNode {
    /// Explicit `this: T` parameter, removed from `params`.
    pub this_param: Option<TypeNode>,
    pub params: Vec<ParamNode>,
    /// `None` only for member signatures written without an annotation.
    pub return_type: Option<ReturnTypeNode>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum MemberNode {
    Property {
        name: String,
        optional: bool,
        readonly: bool,
        ty: Option<TypeNode>,
        span: Span,
    },
    Method {
        name: String,
        optional: bool,
        signature: SignatureNode,
        span: Span,
    },
    Call(SignatureNode),
    Construct(SignatureNode),
    /// `[key: string]: T`
    Index {
        param_name: String,
        key: TypeNode,
        readonly: bool,
        ty: TypeNode,
        span: Span,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Declaration {
    /// `type Name = T;`
    TypeAlias {
        name: String,
        ty: TypeNode,
        span: Span,
    },
    /// `interface Name extends A, B { ... }`
    Interface {
        name: String,
        extends: Vec<TypeNode>,
        members: Vec<MemberNode>,
        span: Span,
    },
    /// `declare function name(...): T;` (repeated declarations form overloads)
    Function {
        name: String,
        signature: SignatureNode,
        span: Span,
    },
    /// `declare const name: T;`
    Variable {
        name: String,
        ty: TypeNode,
        span: Span,
    },
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::TypeAlias { name, .. }
            | Declaration::Interface { name, .. }
            | Declaration::Function { name, .. }
            | Declaration::Variable { name, .. } => name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Declaration::TypeAlias { span, .. }
            | Declaration::Interface { span, .. }
            | Declaration::Function { span, .. }
            | Declaration::Variable { span, .. } => *span,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SourceFile {
    pub declarations: Vec<Declaration>,
}

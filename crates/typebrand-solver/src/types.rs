//! Core type definitions for the structural type model.
//!
//! Types are represented as lightweight `TypeId` handles that point into the
//! [`TypeInterner`](crate::intern::TypeInterner). The interner stores one
//! `TypeKey` per distinct structure, so structural equality of two interned
//! types is `TypeId` equality.

use serde::Serialize;
use std::hash::{Hash, Hasher};
use typebrand_common::Atom;

/// Handle to an interned type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Returned when the interner runs out of capacity.
    pub const ERROR: TypeId = TypeId(1);

    pub const NEVER: TypeId = TypeId(2);
    pub const UNKNOWN: TypeId = TypeId(3);
    pub const ANY: TypeId = TypeId(4);
    pub const VOID: TypeId = TypeId(5);
    pub const UNDEFINED: TypeId = TypeId(6);
    pub const NULL: TypeId = TypeId(7);
    pub const BOOLEAN: TypeId = TypeId(8);
    pub const NUMBER: TypeId = TypeId(9);
    pub const STRING: TypeId = TypeId(10);
    pub const BIGINT: TypeId = TypeId(11);
    pub const SYMBOL: TypeId = TypeId(12);
    pub const OBJECT: TypeId = TypeId(13);

    /// The boolean literal types have reserved ids so the logic layer can
    /// work on them without touching the interner.
    pub const TRUE: TypeId = TypeId(14);
    pub const FALSE: TypeId = TypeId(15);

    /// First id handed out to interned structures.
    pub const FIRST_USER: u32 = 100;

    #[inline]
    pub fn is_intrinsic(self) -> bool {
        self.0 >= Self::NEVER.0 && self.0 <= Self::OBJECT.0
    }

    /// Intrinsic ids plus the reserved boolean literals.
    #[inline]
    pub fn is_reserved(self) -> bool {
        self.0 < Self::FIRST_USER
    }

    #[inline]
    pub fn is_error(self) -> bool {
        self == Self::ERROR
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IntrinsicKind {
    Never,
    Unknown,
    Any,
    Void,
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Bigint,
    Symbol,
    Object,
}

impl IntrinsicKind {
    pub const fn to_type_id(self) -> TypeId {
        match self {
            IntrinsicKind::Never => TypeId::NEVER,
            IntrinsicKind::Unknown => TypeId::UNKNOWN,
            IntrinsicKind::Any => TypeId::ANY,
            IntrinsicKind::Void => TypeId::VOID,
            IntrinsicKind::Undefined => TypeId::UNDEFINED,
            IntrinsicKind::Null => TypeId::NULL,
            IntrinsicKind::Boolean => TypeId::BOOLEAN,
            IntrinsicKind::Number => TypeId::NUMBER,
            IntrinsicKind::String => TypeId::STRING,
            IntrinsicKind::Bigint => TypeId::BIGINT,
            IntrinsicKind::Symbol => TypeId::SYMBOL,
            IntrinsicKind::Object => TypeId::OBJECT,
        }
    }

    pub const fn from_type_id(id: TypeId) -> Option<IntrinsicKind> {
        let kind = match id {
            TypeId::NEVER => IntrinsicKind::Never,
            TypeId::UNKNOWN => IntrinsicKind::Unknown,
            TypeId::ANY => IntrinsicKind::Any,
            TypeId::VOID => IntrinsicKind::Void,
            TypeId::UNDEFINED => IntrinsicKind::Undefined,
            TypeId::NULL => IntrinsicKind::Null,
            TypeId::BOOLEAN => IntrinsicKind::Boolean,
            TypeId::NUMBER => IntrinsicKind::Number,
            TypeId::STRING => IntrinsicKind::String,
            TypeId::BIGINT => IntrinsicKind::Bigint,
            TypeId::SYMBOL => IntrinsicKind::Symbol,
            TypeId::OBJECT => IntrinsicKind::Object,
            _ => return None,
        };
        Some(kind)
    }

    pub const fn name(self) -> &'static str {
        match self {
            IntrinsicKind::Never => "never",
            IntrinsicKind::Unknown => "unknown",
            IntrinsicKind::Any => "any",
            IntrinsicKind::Void => "void",
            IntrinsicKind::Undefined => "undefined",
            IntrinsicKind::Null => "null",
            IntrinsicKind::Boolean => "boolean",
            IntrinsicKind::Number => "number",
            IntrinsicKind::String => "string",
            IntrinsicKind::Bigint => "bigint",
            IntrinsicKind::Symbol => "symbol",
            IntrinsicKind::Object => "object",
        }
    }
}

/// `f64` wrapper with total equality, used inside hashed type keys.
///
/// `-0` is folded into `0` and every NaN compares equal to every other NaN.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct OrderedFloat(pub f64);

impl OrderedFloat {
    fn canonical_bits(self) -> u64 {
        if self.0 == 0.0 {
            0
        } else if self.0.is_nan() {
            f64::NAN.to_bits()
        } else {
            self.0.to_bits()
        }
    }
}

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_bits() == other.canonical_bits()
    }
}

impl Eq for OrderedFloat {}

impl Hash for OrderedFloat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_bits().hash(state);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LiteralValue {
    String(Atom),
    Number(OrderedFloat),
    Boolean(bool),
    /// Decimal digits, with a leading `-` for negative values.
    BigInt(Atom),
}

impl LiteralValue {
    /// The widened primitive of this literal.
    pub fn primitive(self) -> TypeId {
        match self {
            LiteralValue::String(_) => TypeId::STRING,
            LiteralValue::Number(_) => TypeId::NUMBER,
            LiteralValue::Boolean(_) => TypeId::BOOLEAN,
            LiteralValue::BigInt(_) => TypeId::BIGINT,
        }
    }
}

macro_rules! define_id {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $name(pub u32);
        )*
    };
}

define_id!(
    /// Interned list of member types (unions, intersections, type arguments).
    TypeListId,
    /// Interned list of tuple elements.
    TupleListId,
    ObjectShapeId,
    FunctionShapeId,
    CallableShapeId,
    NamedTypeId,
);

/// The structural key stored in the interner.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Intrinsic(IntrinsicKind),
    Literal(LiteralValue),
    /// A `unique symbol`; `id` makes every declaration distinct.
    UniqueSymbol { id: u32, name: Atom },
    Union(TypeListId),
    Intersection(TypeListId),
    /// `T[]`
    Array(TypeId),
    Tuple(TupleListId),
    /// `readonly T[]` or `readonly [..]`; wraps an `Array` or `Tuple`.
    ReadonlyType(TypeId),
    Object(ObjectShapeId),
    /// Exactly one call or construct signature and nothing else.
    Function(FunctionShapeId),
    Callable(CallableShapeId),
    /// An interface-like type that keeps its name for display and nominal checks.
    Named(NamedTypeId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TupleElement {
    pub type_id: TypeId,
    pub name: Option<Atom>,
    pub optional: bool,
    /// Rest elements carry the array (or tuple) type being spread.
    pub rest: bool,
}

impl TupleElement {
    pub fn required(type_id: TypeId) -> Self {
        TupleElement {
            type_id,
            name: None,
            optional: false,
            rest: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PropertyInfo {
    pub name: Atom,
    /// Declared type, without the implicit `undefined` of optional properties.
    pub type_id: TypeId,
    pub optional: bool,
    pub readonly: bool,
}

impl PropertyInfo {
    pub fn new(name: Atom, type_id: TypeId) -> Self {
        PropertyInfo {
            name,
            type_id,
            optional: false,
            readonly: false,
        }
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexSignature {
    pub value_type: TypeId,
    pub readonly: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ObjectShape {
    /// Sorted by property name.
    pub properties: Vec<PropertyInfo>,
    pub string_index: Option<IndexSignature>,
    pub number_index: Option<IndexSignature>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParamInfo {
    pub name: Option<Atom>,
    pub type_id: TypeId,
    pub optional: bool,
    /// Rest parameters carry the array (or tuple) type.
    pub rest: bool,
}

impl ParamInfo {
    pub fn required(name: Option<Atom>, type_id: TypeId) -> Self {
        ParamInfo {
            name,
            type_id,
            optional: false,
            rest: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PredicateTarget {
    This,
    /// Index into the signature's parameter list.
    Param(u32),
}

/// `x is T`, `asserts x is T`, `asserts x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypePredicate {
    pub asserts: bool,
    pub target: PredicateTarget,
    pub type_id: Option<TypeId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    pub params: Vec<ParamInfo>,
    pub this_type: Option<TypeId>,
    pub return_type: TypeId,
    pub type_predicate: Option<TypePredicate>,
}

impl Signature {
    pub fn new(params: Vec<ParamInfo>, return_type: TypeId) -> Self {
        Signature {
            params,
            this_type: None,
            return_type,
            type_predicate: None,
        }
    }

    /// Number of parameters a caller has to supply.
    pub fn min_argument_count(&self) -> usize {
        self.params
            .iter()
            .take_while(|p| !p.optional && !p.rest)
            .count()
    }

    pub fn has_rest(&self) -> bool {
        self.params.last().is_some_and(|p| p.rest)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionShape {
    pub signature: Signature,
    pub is_constructor: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CallableShape {
    pub call_signatures: Vec<Signature>,
    pub construct_signatures: Vec<Signature>,
    /// Sorted by property name.
    pub properties: Vec<PropertyInfo>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamedType {
    pub name: Atom,
    pub args: TypeListId,
    /// Structural body the name stands for.
    pub body: TypeId,
    /// Library types (`Date`, `Promise`, `Function`, ...).
    pub builtin: bool,
}

/// Result of a property lookup through the cached name index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyLookup {
    Found(usize),
    NotFound,
    /// The shape is small enough that callers should scan linearly.
    Uncached,
}

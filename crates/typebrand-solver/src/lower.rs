//! Lowering from the syntax tree to interned types.
//!
//! Declarations in one source text may refer to each other in any order.
//! They are resolved on demand with a recursion guard, so
//! `type A = B; type B = string;` works and `type A = B; type B = A;` is
//! reported as circular.

use crate::builtins;
use crate::operations;
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::solver::Solver;
use crate::structure::{self, Members};
use crate::types::*;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::fmt;
use tracing::{debug, trace};
use typebrand_common::{Span, ensure_sufficient_stack};
use typebrand_syntax::ast::{
    Declaration, KeywordType, MemberNode, PredicateTarget as PredicateTargetNode,
    ReturnTypeNode, SignatureNode, TupleElementNode, TypeNode, TypeNodeKind,
};
use typebrand_syntax::{ParseError, parse_source, parse_type};

pub mod error_codes {
    pub const DUPLICATE_IDENTIFIER: u32 = 2300;
    pub const CANNOT_FIND_NAME: u32 = 2304;
    pub const GENERIC_ARITY: u32 = 2314;
    pub const NOT_GENERIC: u32 = 2315;
    pub const CONSTRAINT_NOT_SATISFIED: u32 = 2344;
    pub const CIRCULAR_REFERENCE: u32 = 2456;
    pub const THIS_TYPE_NOT_ALLOWED: u32 = 2526;
    pub const UNIQUE_SYMBOL_NOT_ALLOWED: u32 = 1335;
    pub const READONLY_MODIFIER_NOT_ALLOWED: u32 = 1354;
    pub const INVALID_INDEX_KEY: u32 = 1268;
    pub const UNSUPPORTED: u32 = 9000;
}

use error_codes::*;

/// Failure to turn source text into a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LowerError {
    Parse(ParseError),
    Semantic {
        code: u32,
        message: String,
        span: Span,
    },
}

impl LowerError {
    fn semantic(code: u32, span: Span, message: impl Into<String>) -> Self {
        LowerError::Semantic {
            code,
            message: message.into(),
            span,
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            LowerError::Parse(err) => err.first().map_or(0, |d| d.code),
            LowerError::Semantic { code, .. } => *code,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            LowerError::Parse(err) => err.first().map(|d| d.span()),
            LowerError::Semantic { span, .. } => Some(*span),
        }
    }
}

impl fmt::Display for LowerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LowerError::Parse(err) => write!(f, "{err}"),
            LowerError::Semantic {
                code,
                message,
                span,
            } => write!(f, "TS{code} at {}: {message}", span.start),
        }
    }
}

impl std::error::Error for LowerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LowerError::Parse(err) => Some(err),
            LowerError::Semantic { .. } => None,
        }
    }
}

impl From<ParseError> for LowerError {
    fn from(err: ParseError) -> Self {
        LowerError::Parse(err)
    }
}

type LResult<T> = Result<T, LowerError>;

/// Names declared so far in a session.
#[derive(Clone, Debug, Default)]
pub struct TypeEnv {
    types: IndexMap<String, TypeId>,
    values: IndexMap<String, TypeId>,
}

impl TypeEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup_type(&self, name: &str) -> Option<TypeId> {
        self.types.get(name).copied()
    }

    pub fn lookup_value(&self, name: &str) -> Option<TypeId> {
        self.values.get(name).copied()
    }

    pub fn insert_type(&mut self, name: impl Into<String>, type_id: TypeId) {
        self.types.insert(name.into(), type_id);
    }

    pub fn insert_value(&mut self, name: impl Into<String>, type_id: TypeId) {
        self.values.insert(name.into(), type_id);
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn value_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Parse and lower a single type expression.
pub fn lower_type_source(solver: &Solver, env: &TypeEnv, source: &str) -> LResult<TypeId> {
    let node = parse_type(source)?;
    lower_type_node(solver, env, &node)
}

pub fn lower_type_node(solver: &Solver, env: &TypeEnv, node: &TypeNode) -> LResult<TypeId> {
    Lowerer::new(solver, env, &[]).lower_type(node)
}

/// Parse declarations and add them to `env`. Returns the declared names.
///
/// Nothing is committed when any declaration fails.
pub fn declare_source(solver: &Solver, env: &mut TypeEnv, source: &str) -> LResult<Vec<String>> {
    let file = parse_source(source)?;
    let mut lowerer = Lowerer::new(solver, env, &file.declarations);
    lowerer.check_duplicates()?;

    let mut types = Vec::new();
    let mut values = Vec::new();
    for (index, declaration) in file.declarations.iter().enumerate() {
        let name = declaration.name();
        match declaration {
            Declaration::TypeAlias { .. } | Declaration::Interface { .. } => {
                types.push((name.to_string(), lowerer.resolve_declared_type(index)?));
            }
            Declaration::Function { .. } | Declaration::Variable { .. } => {
                if values.iter().any(|(existing, _)| existing == name) {
                    continue;
                }
                values.push((name.to_string(), lowerer.resolve_declared_value(index)?));
            }
        }
    }
    drop(lowerer);

    let mut names = Vec::with_capacity(types.len() + values.len());
    for (name, type_id) in types {
        debug!(name = %name, type_id = type_id.0, "declared type");
        names.push(name.clone());
        env.insert_type(name, type_id);
    }
    for (name, type_id) in values {
        debug!(name = %name, type_id = type_id.0, "declared value");
        names.push(name.clone());
        env.insert_value(name, type_id);
    }
    Ok(names)
}

struct Lowerer<'a> {
    solver: &'a Solver,
    env: &'a TypeEnv,
    declarations: &'a [Declaration],
    type_decls: FxHashMap<&'a str, usize>,
    value_decls: FxHashMap<&'a str, Vec<usize>>,
    resolved: FxHashMap<usize, TypeId>,
    guard: RecursionGuard<usize>,
}

impl<'a> Lowerer<'a> {
    fn new(solver: &'a Solver, env: &'a TypeEnv, declarations: &'a [Declaration]) -> Self {
        let mut type_decls = FxHashMap::default();
        let mut value_decls: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
        for (index, declaration) in declarations.iter().enumerate() {
            match declaration {
                Declaration::TypeAlias { name, .. } | Declaration::Interface { name, .. } => {
                    type_decls.entry(name.as_str()).or_insert(index);
                }
                Declaration::Function { name, .. } | Declaration::Variable { name, .. } => {
                    value_decls.entry(name.as_str()).or_default().push(index);
                }
            }
        }
        Lowerer {
            solver,
            env,
            declarations,
            type_decls,
            value_decls,
            resolved: FxHashMap::default(),
            guard: RecursionGuard::with_profile(RecursionProfile::Lowering),
        }
    }

    fn check_duplicates(&self) -> LResult<()> {
        let mut seen_types: FxHashMap<&str, ()> = FxHashMap::default();
        for declaration in self.declarations {
            let name = declaration.name();
            let duplicate = match declaration {
                Declaration::TypeAlias { .. } | Declaration::Interface { .. } => {
                    seen_types.insert(name, ()).is_some() || self.env.lookup_type(name).is_some()
                }
                Declaration::Function { .. } => {
                    self.env.lookup_value(name).is_some()
                        || self.value_decls.get(name).is_some_and(|indices| {
                            indices.iter().any(|&i| {
                                matches!(self.declarations[i], Declaration::Variable { .. })
                            })
                        })
                }
                Declaration::Variable { .. } => {
                    self.env.lookup_value(name).is_some()
                        || self.value_decls.get(name).is_some_and(|v| v.len() > 1)
                }
            };
            if duplicate {
                return Err(LowerError::semantic(
                    DUPLICATE_IDENTIFIER,
                    declaration.span(),
                    format!("Duplicate identifier '{name}'."),
                ));
            }
        }
        Ok(())
    }

    fn enter(&mut self, index: usize) -> LResult<()> {
        match self.guard.enter(index) {
            RecursionResult::Entered => Ok(()),
            RecursionResult::Cycle => {
                let declaration = &self.declarations[index];
                Err(LowerError::semantic(
                    CIRCULAR_REFERENCE,
                    declaration.span(),
                    format!("'{}' circularly references itself.", declaration.name()),
                ))
            }
            RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => {
                Err(LowerError::semantic(
                    UNSUPPORTED,
                    self.declarations[index].span(),
                    "Declarations are nested too deeply.",
                ))
            }
        }
    }

    fn resolve_declared_type(&mut self, index: usize) -> LResult<TypeId> {
        if let Some(&type_id) = self.resolved.get(&index) {
            return Ok(type_id);
        }
        self.enter(index)?;
        let declaration = &self.declarations[index];
        let result = match declaration {
            Declaration::TypeAlias { ty, .. } => self.lower_type(ty),
            Declaration::Interface {
                name,
                extends,
                members,
                span,
            } => self.lower_interface(name, extends, members, *span),
            _ => Err(LowerError::semantic(
                CANNOT_FIND_NAME,
                declaration.span(),
                format!("Cannot find name '{}'.", declaration.name()),
            )),
        };
        self.guard.leave(index);
        let type_id = result?;
        trace!(name = declaration.name(), type_id = type_id.0, "resolved declaration");
        self.resolved.insert(index, type_id);
        Ok(type_id)
    }

    fn resolve_declared_value(&mut self, index: usize) -> LResult<TypeId> {
        let name = self.declarations[index].name();
        let indices = self.value_decls.get(name).cloned().unwrap_or_default();
        let first = indices.first().copied().unwrap_or(index);
        if let Some(&type_id) = self.resolved.get(&first) {
            return Ok(type_id);
        }
        self.enter(first)?;
        let result = self.lower_value(name, &indices);
        self.guard.leave(first);
        let type_id = result?;
        self.resolved.insert(first, type_id);
        Ok(type_id)
    }

    fn lower_value(&mut self, name: &str, indices: &[usize]) -> LResult<TypeId> {
        let mut signatures = Vec::new();
        for &index in indices {
            match &self.declarations[index] {
                Declaration::Variable { ty, .. } => {
                    if let TypeNodeKind::UniqueSymbol = ty.skip_parens().kind {
                        return Ok(self.solver.interner().unique_symbol(name));
                    }
                    return self.lower_type(ty);
                }
                Declaration::Function { signature, .. } => {
                    signatures.push(self.lower_signature(signature)?);
                }
                _ => {}
            }
        }
        Ok(self.solver.interner().callable(CallableShape {
            call_signatures: signatures,
            ..CallableShape::default()
        }))
    }

    fn lower_interface(
        &mut self,
        name: &str,
        extends: &[TypeNode],
        members: &[MemberNode],
        span: Span,
    ) -> LResult<TypeId> {
        let own = self.lower_members(members)?;
        let mut merged = Members::default();
        for base in extends {
            let base_type = self.lower_type(base)?;
            let Some(base_members) = structure::members_of(self.solver, base_type) else {
                return Err(LowerError::semantic(
                    UNSUPPORTED,
                    base.span,
                    "An interface can only extend an object type.",
                ));
            };
            for prop in base_members.properties {
                if merged.property(prop.name).is_none() {
                    merged.properties.push(prop);
                }
            }
            merged.call_signatures.extend(base_members.call_signatures);
            merged.construct_signatures.extend(base_members.construct_signatures);
            merged.string_index = merged.string_index.or(base_members.string_index);
            merged.number_index = merged.number_index.or(base_members.number_index);
        }
        merged.properties.retain(|p| own.property(p.name).is_none());
        let mut combined = own;
        combined.properties.extend(merged.properties);
        let mut calls = combined.call_signatures;
        calls.extend(merged.call_signatures);
        combined.call_signatures = calls;
        let mut constructs = combined.construct_signatures;
        constructs.extend(merged.construct_signatures);
        combined.construct_signatures = constructs;
        combined.string_index = combined.string_index.or(merged.string_index);
        combined.number_index = combined.number_index.or(merged.number_index);

        let body = self.members_to_type(combined, span)?;
        Ok(self.solver.interner().named(name, Vec::new(), body, false))
    }

    fn lower_type(&mut self, node: &TypeNode) -> LResult<TypeId> {
        ensure_sufficient_stack(|| self.lower_type_inner(node))
    }

    fn lower_type_inner(&mut self, node: &TypeNode) -> LResult<TypeId> {
        let solver = self.solver;
        let interner = solver.interner();
        match &node.kind {
            TypeNodeKind::Keyword(keyword) => Ok(keyword_type(*keyword)),
            TypeNodeKind::StringLiteral(value) => Ok(interner.literal_string(value)),
            TypeNodeKind::NumberLiteral(value) => Ok(interner.literal_number(*value)),
            TypeNodeKind::BigIntLiteral { negative, digits } => {
                Ok(interner.literal_bigint(*negative, digits))
            }
            TypeNodeKind::BooleanLiteral(value) => Ok(interner.literal_boolean(*value)),
            TypeNodeKind::This => Err(LowerError::semantic(
                THIS_TYPE_NOT_ALLOWED,
                node.span,
                "A 'this' type is available only in a non-static member of a class or interface.",
            )),
            TypeNodeKind::Reference { name, args } => self.lower_reference(name, args, node.span),
            TypeNodeKind::TypeQuery { name } => self.lower_type_query(name, node.span),
            TypeNodeKind::Array(element) => {
                let element = self.lower_type(element)?;
                Ok(interner.array(element))
            }
            TypeNodeKind::Tuple(elements) => {
                let elements = self.lower_tuple_elements(elements)?;
                Ok(interner.tuple(elements))
            }
            TypeNodeKind::Readonly(inner) => {
                let inner_type = self.lower_type(inner)?;
                match interner.lookup(inner_type) {
                    Some(TypeKey::Array(_)) | Some(TypeKey::Tuple(_)) => {
                        Ok(interner.readonly(inner_type))
                    }
                    _ => Err(LowerError::semantic(
                        READONLY_MODIFIER_NOT_ALLOWED,
                        node.span,
                        "'readonly' type modifier is only permitted on array and tuple literal types.",
                    )),
                }
            }
            TypeNodeKind::UniqueSymbol => Err(LowerError::semantic(
                UNIQUE_SYMBOL_NOT_ALLOWED,
                node.span,
                "'unique symbol' types are only allowed on 'declare const' declarations.",
            )),
            TypeNodeKind::Union(members) => {
                let members = members
                    .iter()
                    .map(|m| self.lower_type(m))
                    .collect::<LResult<Vec<_>>>()?;
                Ok(interner.union(members))
            }
            TypeNodeKind::Intersection(members) => {
                let members = members
                    .iter()
                    .map(|m| self.lower_type(m))
                    .collect::<LResult<Vec<_>>>()?;
                Ok(interner.intersection(members))
            }
            TypeNodeKind::Parenthesized(inner) => self.lower_type(inner),
            TypeNodeKind::Function(signature) => {
                let signature = self.lower_signature(signature)?;
                Ok(interner.function(signature))
            }
            TypeNodeKind::Constructor { signature, .. } => {
                let signature = self.lower_signature(signature)?;
                Ok(interner.constructor(signature))
            }
            TypeNodeKind::TypeLiteral(members) => {
                let members = self.lower_members(members)?;
                self.members_to_type(members, node.span)
            }
        }
    }

    fn lower_tuple_elements(
        &mut self,
        elements: &[TupleElementNode],
    ) -> LResult<Vec<TupleElement>> {
        let solver = self.solver;
        let interner = solver.interner();
        elements
            .iter()
            .map(|element| {
                Ok(TupleElement {
                    type_id: self.lower_type(&element.ty)?,
                    name: element.name.as_deref().map(|n| interner.intern_string(n)),
                    optional: element.optional,
                    rest: element.rest,
                })
            })
            .collect()
    }

    fn lower_reference(&mut self, name: &str, args: &[TypeNode], span: Span) -> LResult<TypeId> {
        if args.is_empty() {
            if let Some(&index) = self.type_decls.get(name) {
                return self.resolve_declared_type(index);
            }
            if let Some(type_id) = self.env.lookup_type(name) {
                return Ok(type_id);
            }
        } else if self.type_decls.contains_key(name) || self.env.lookup_type(name).is_some() {
            return Err(LowerError::semantic(
                NOT_GENERIC,
                span,
                format!("Type '{name}' is not generic."),
            ));
        }

        let expect_args = |count: usize| -> LResult<()> {
            if args.len() == count {
                Ok(())
            } else {
                Err(LowerError::semantic(
                    GENERIC_ARITY,
                    span,
                    format!(
                        "Generic type '{name}' requires {count} type argument{}.",
                        if count == 1 { "" } else { "s" }
                    ),
                ))
            }
        };

        let solver = self.solver;
        let interner = solver.interner();
        let library = solver.builtins();
        match name {
            builtins::DATE => {
                expect_args(0)?;
                Ok(library.date)
            }
            builtins::REGEXP => {
                expect_args(0)?;
                Ok(library.regexp)
            }
            builtins::FUNCTION => {
                expect_args(0)?;
                Ok(library.function)
            }
            "PropertyKey" => {
                expect_args(0)?;
                Ok(interner.union(vec![TypeId::STRING, TypeId::NUMBER, TypeId::SYMBOL]))
            }
            "Array" | "ReadonlyArray" => {
                expect_args(1)?;
                let element = self.lower_type(&args[0])?;
                let array = interner.array(element);
                Ok(if name == "Array" {
                    array
                } else {
                    interner.readonly(array)
                })
            }
            builtins::PROMISE | builtins::PROMISE_LIKE => {
                expect_args(1)?;
                let value = self.lower_type(&args[0])?;
                Ok(if name == builtins::PROMISE {
                    library.promise(interner, value)
                } else {
                    library.promise_like(interner, value)
                })
            }
            "Partial" | "Required" | "Readonly" | "NonNullable" => {
                expect_args(1)?;
                let inner = self.lower_type(&args[0])?;
                Ok(match name {
                    "Partial" => operations::partial(solver, inner),
                    "Required" => operations::required(solver, inner),
                    "Readonly" => operations::readonly(solver, inner),
                    _ => operations::non_nullable(solver, inner),
                })
            }
            "Pick" | "Omit" => {
                expect_args(2)?;
                let object = self.lower_type(&args[0])?;
                let key_type = self.lower_type(&args[1])?;
                let keys = operations::literal_keys(solver, key_type).ok_or_else(|| {
                    LowerError::semantic(
                        CONSTRAINT_NOT_SATISFIED,
                        args[1].span,
                        "Type argument must be a union of string or number literal types.",
                    )
                })?;
                Ok(if name == "Pick" {
                    operations::pick(solver, object, &keys)
                } else {
                    operations::omit(solver, object, &keys)
                })
            }
            "Record" => {
                expect_args(2)?;
                let key_type = self.lower_type(&args[0])?;
                let value = self.lower_type(&args[1])?;
                operations::record(solver, key_type, value).ok_or_else(|| {
                    LowerError::semantic(
                        CONSTRAINT_NOT_SATISFIED,
                        args[0].span,
                        "Type argument does not satisfy the constraint 'string | number'.",
                    )
                })
            }
            "Exclude" | "Extract" => {
                expect_args(2)?;
                let left = self.lower_type(&args[0])?;
                let right = self.lower_type(&args[1])?;
                Ok(if name == "Exclude" {
                    operations::exclude(solver, left, right)
                } else {
                    operations::extract(solver, left, right)
                })
            }
            "Parameters" | "ReturnType" | "ConstructorParameters" | "InstanceType" => {
                expect_args(1)?;
                let inner = self.lower_type(&args[0])?;
                let result = match name {
                    "Parameters" => operations::parameters(solver, inner),
                    "ReturnType" => operations::return_type(solver, inner),
                    "ConstructorParameters" => operations::constructor_parameters(solver, inner),
                    _ => operations::instance_type(solver, inner),
                };
                result.ok_or_else(|| {
                    LowerError::semantic(
                        CONSTRAINT_NOT_SATISFIED,
                        args[0].span,
                        format!("Type argument of '{name}' does not satisfy its constraint."),
                    )
                })
            }
            "ThisParameterType" => {
                expect_args(1)?;
                let inner = self.lower_type(&args[0])?;
                Ok(operations::this_parameter_type(solver, inner))
            }
            _ => Err(LowerError::semantic(
                CANNOT_FIND_NAME,
                span,
                format!("Cannot find name '{name}'."),
            )),
        }
    }

    fn lower_type_query(&mut self, path: &str, span: Span) -> LResult<TypeId> {
        let mut segments = path.split('.');
        let head = segments.next().unwrap_or_default();
        let mut current = if let Some(indices) = self.value_decls.get(head) {
            let first = indices[0];
            self.resolve_declared_value(first)?
        } else if let Some(type_id) = self.env.lookup_value(head) {
            type_id
        } else {
            return Err(LowerError::semantic(
                CANNOT_FIND_NAME,
                span,
                format!("Cannot find name '{head}'."),
            ));
        };
        for segment in segments {
            let atom = self.solver.interner().intern_string(segment);
            current = structure::property_read_type(self.solver, current, atom).ok_or_else(|| {
                LowerError::semantic(
                    CANNOT_FIND_NAME,
                    span,
                    format!("Property '{segment}' does not exist on '{path}'."),
                )
            })?;
        }
        Ok(current)
    }

    fn lower_signature(&mut self, node: &SignatureNode) -> LResult<Signature> {
        let solver = self.solver;
        let interner = solver.interner();
        let this_type = match &node.this_param {
            Some(ty) => Some(self.lower_type(ty)?),
            None => None,
        };

        let mut params = Vec::with_capacity(node.params.len());
        for param in &node.params {
            let name = interner.intern_string(&param.name);
            let type_id = match &param.ty {
                Some(ty) => self.lower_type(ty)?,
                None if param.rest => interner.array(TypeId::ANY),
                None => TypeId::ANY,
            };
            // `...args: [a: A, b?: B]` is the parameter list `(a: A, b?: B)`.
            if param.rest {
                if let Some(TypeKey::Tuple(list_id)) = interner.lookup(type_id) {
                    for (position, element) in interner.tuple_list(list_id).iter().enumerate() {
                        let element_name = element.name.unwrap_or_else(|| {
                            interner.intern_string(&format!("{}_{position}", param.name))
                        });
                        params.push(ParamInfo {
                            name: Some(element_name),
                            type_id: element.type_id,
                            optional: element.optional,
                            rest: element.rest,
                        });
                    }
                    continue;
                }
            }
            params.push(ParamInfo {
                name: Some(name),
                type_id,
                optional: param.optional,
                rest: param.rest,
            });
        }

        let mut signature = Signature::new(params, TypeId::ANY);
        signature.this_type = this_type;
        match &node.return_type {
            None => {}
            Some(ReturnTypeNode::Type(ty)) => signature.return_type = self.lower_type(ty)?,
            Some(ReturnTypeNode::Predicate(predicate)) => {
                let target = match &predicate.target {
                    PredicateTargetNode::This => PredicateTarget::This,
                    PredicateTargetNode::Parameter(name) => {
                        let position = node
                            .params
                            .iter()
                            .position(|p| &p.name == name)
                            .ok_or_else(|| {
                                LowerError::semantic(
                                    CANNOT_FIND_NAME,
                                    predicate.span,
                                    format!("Cannot find parameter '{name}'."),
                                )
                            })?;
                        PredicateTarget::Param(position as u32)
                    }
                };
                let type_id = match &predicate.ty {
                    Some(ty) => Some(self.lower_type(ty)?),
                    None => None,
                };
                signature.return_type = if predicate.asserts {
                    TypeId::VOID
                } else {
                    TypeId::BOOLEAN
                };
                signature.type_predicate = Some(TypePredicate {
                    asserts: predicate.asserts,
                    target,
                    type_id,
                });
            }
        }
        Ok(signature)
    }

    fn lower_members(&mut self, nodes: &[MemberNode]) -> LResult<Members> {
        let solver = self.solver;
        let interner = solver.interner();
        let mut members = Members::default();
        let mut methods: IndexMap<String, (bool, Vec<Signature>)> = IndexMap::new();

        for node in nodes {
            match node {
                MemberNode::Property {
                    name,
                    optional,
                    readonly,
                    ty,
                    span,
                } => {
                    let atom = interner.intern_string(name);
                    if members.property(atom).is_some() || methods.contains_key(name) {
                        return Err(LowerError::semantic(
                            DUPLICATE_IDENTIFIER,
                            *span,
                            format!("Duplicate identifier '{name}'."),
                        ));
                    }
                    let type_id = match ty {
                        Some(ty) => self.lower_type(ty)?,
                        None => TypeId::ANY,
                    };
                    members.properties.push(
                        PropertyInfo::new(atom, type_id)
                            .with_optional(*optional)
                            .with_readonly(*readonly),
                    );
                }
                MemberNode::Method {
                    name,
                    optional,
                    signature,
                    span,
                } => {
                    if members.property(interner.intern_string(name)).is_some() {
                        return Err(LowerError::semantic(
                            DUPLICATE_IDENTIFIER,
                            *span,
                            format!("Duplicate identifier '{name}'."),
                        ));
                    }
                    let signature = self.lower_signature(signature)?;
                    let entry = methods
                        .entry(name.clone())
                        .or_insert_with(|| (*optional, Vec::new()));
                    entry.1.push(signature);
                }
                MemberNode::Call(signature) => {
                    let signature = self.lower_signature(signature)?;
                    members.call_signatures.push(signature);
                }
                MemberNode::Construct(signature) => {
                    let signature = self.lower_signature(signature)?;
                    members.construct_signatures.push(signature);
                }
                MemberNode::Index {
                    key,
                    readonly,
                    ty,
                    span,
                    ..
                } => {
                    let key_type = self.lower_type(key)?;
                    let value_type = self.lower_type(ty)?;
                    let index = Some(IndexSignature {
                        value_type,
                        readonly: *readonly,
                    });
                    let slot = match key_type {
                        TypeId::STRING => &mut members.string_index,
                        TypeId::NUMBER => &mut members.number_index,
                        _ => {
                            return Err(LowerError::semantic(
                                INVALID_INDEX_KEY,
                                key.span,
                                "An index signature parameter type must be 'string' or 'number'.",
                            ));
                        }
                    };
                    if slot.is_some() {
                        return Err(LowerError::semantic(
                            DUPLICATE_IDENTIFIER,
                            *span,
                            "Duplicate index signature.",
                        ));
                    }
                    *slot = index;
                }
            }
        }

        for (name, (optional, signatures)) in methods {
            let method_type = interner.callable(CallableShape {
                call_signatures: signatures,
                ..CallableShape::default()
            });
            members.properties.push(
                PropertyInfo::new(interner.intern_string(&name), method_type)
                    .with_optional(optional),
            );
        }
        Ok(members)
    }

    fn members_to_type(&mut self, members: Members, span: Span) -> LResult<TypeId> {
        let solver = self.solver;
        let interner = solver.interner();
        let has_signatures =
            !members.call_signatures.is_empty() || !members.construct_signatures.is_empty();
        if has_signatures {
            if members.string_index.is_some() || members.number_index.is_some() {
                return Err(LowerError::semantic(
                    UNSUPPORTED,
                    span,
                    "Index signatures on callable types are not supported.",
                ));
            }
            return Ok(interner.callable(CallableShape {
                call_signatures: members.call_signatures,
                construct_signatures: members.construct_signatures,
                properties: members.properties,
            }));
        }
        Ok(interner.object_with_index(ObjectShape {
            properties: members.properties,
            string_index: members.string_index,
            number_index: members.number_index,
        }))
    }
}

fn keyword_type(keyword: KeywordType) -> TypeId {
    match keyword {
        KeywordType::Any => TypeId::ANY,
        KeywordType::Unknown => TypeId::UNKNOWN,
        KeywordType::Never => TypeId::NEVER,
        KeywordType::Void => TypeId::VOID,
        KeywordType::Undefined => TypeId::UNDEFINED,
        KeywordType::Null => TypeId::NULL,
        KeywordType::Boolean => TypeId::BOOLEAN,
        KeywordType::Number => TypeId::NUMBER,
        KeywordType::String => TypeId::STRING,
        KeywordType::BigInt => TypeId::BIGINT,
        KeywordType::Symbol => TypeId::SYMBOL,
        KeywordType::Object => TypeId::OBJECT,
    }
}

#[cfg(test)]
#[path = "../tests/lower_tests.rs"]
mod tests;
